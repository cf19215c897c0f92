//! ntfy delivery — HTTP POST with title/tag headers, per-person isolation.
//!
//! Deliveries run sequentially; each carries its own request timeout so one
//! unreachable endpoint cannot stall the rest of the batch. A failed
//! delivery is logged and reported in its [`Delivery`] outcome, and the
//! remaining recipients are still notified.

use std::collections::BTreeMap;
use std::time::Duration;

use chore_core::model::ChoreGroup;
use chore_rota::{Assignment, BinColour};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::compose::{bins_message, bins_tags, chores_phrase, person_assignments, weekly_message};
use crate::errors::NotifyError;

/// Per-request timeout for outbound notification calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Title header on every notification.
pub const NTFY_TITLE: &str = "choreworld";

/// Tag header for the weekly reminder.
pub const WEEKLY_TAGS: &str = "broom,sparkles";

/// Outcome of one notification delivery.
#[derive(Clone, Debug)]
pub struct Delivery {
    /// Recipient.
    pub person: String,
    /// Endpoint the message was (or would have been) posted to.
    pub endpoint: Option<String>,
    /// Whether the sink accepted the message.
    pub success: bool,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Transport or sink error description.
    pub error: Option<String>,
}

/// HTTP client for the ntfy sink.
pub struct NtfyClient {
    client: reqwest::Client,
}

impl NtfyClient {
    /// Build the client with the standard request timeout.
    pub fn new() -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::ClientBuild {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Post one message to one endpoint.
    pub async fn send(&self, person: &str, endpoint: &str, body: &str, tags: &str) -> Delivery {
        info!(person, endpoint, message = body, "notifying");
        let result = self
            .client
            .post(endpoint)
            .header("Title", NTFY_TITLE)
            .header("Tags", tags)
            .body(body.to_string())
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if response.status().is_success() {
                    Delivery {
                        person: person.to_string(),
                        endpoint: Some(endpoint.to_string()),
                        success: true,
                        status: Some(status),
                        error: None,
                    }
                } else {
                    let body = response.text().await.unwrap_or_default();
                    warn!(person, endpoint, status, body = %body, "notification rejected");
                    Delivery {
                        person: person.to_string(),
                        endpoint: Some(endpoint.to_string()),
                        success: false,
                        status: Some(status),
                        error: Some(body),
                    }
                }
            }
            Err(e) => {
                warn!(person, endpoint, error = %e, "notification failed");
                Delivery {
                    person: person.to_string(),
                    endpoint: Some(endpoint.to_string()),
                    success: false,
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Send the weekly reminder to every person holding at least one chore.
///
/// `endpoints` is the person → endpoint slice of the table for this config
/// source. A person with no endpoint is a reported failure, not an abort.
pub async fn notify_week(
    client: &NtfyClient,
    groups: &IndexMap<String, ChoreGroup>,
    assignments: &IndexMap<String, Assignment>,
    endpoints: &BTreeMap<String, String>,
) -> Vec<Delivery> {
    let mut outcomes = Vec::new();
    for (person, chores) in person_assignments(groups, assignments) {
        let Some(endpoint) = endpoints.get(&person) else {
            warn!(person = %person, "no endpoint on file, skipping");
            outcomes.push(Delivery {
                person,
                endpoint: None,
                success: false,
                status: None,
                error: Some("no endpoint on file".to_string()),
            });
            continue;
        };
        info!(person = %person, chores = %chores_phrase(&chores), "weekly chores");
        let message = weekly_message(&person, &chores);
        outcomes.push(client.send(&person, endpoint, &message, WEEKLY_TAGS).await);
    }
    outcomes
}

/// Send the bins-night reminder to the person currently assigned the bins.
pub async fn notify_bins(
    client: &NtfyClient,
    person: &str,
    endpoint: &str,
    colours: (BinColour, BinColour),
) -> Delivery {
    let message = bins_message(person, colours);
    let tags = bins_tags(colours);
    client.send(person, endpoint, &message, &tags).await
}
