//! The persisted endpoint table.
//!
//! JSON document mapping config-source id → (person → endpoint URL). The
//! table is consulted, never mutated, during notification; regeneration is a
//! separate operation that preserves previously issued endpoints for known
//! people and mints fresh ones only for people seen for the first time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::NotifyError;

/// config-source → (person → endpoint URL). Sorted keys keep regenerated
/// output deterministic and diffable.
pub type EndpointTable = BTreeMap<String, BTreeMap<String, String>>;

/// Load an endpoint table from a JSON file.
pub fn load(path: &Path) -> Result<EndpointTable, NotifyError> {
    let text = std::fs::read_to_string(path).map_err(|source| NotifyError::EndpointsRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| NotifyError::EndpointsParse {
        path: path.display().to_string(),
        source,
    })
}

/// Mint a fresh endpoint under `host`: a random v4 UUID capability URL.
pub fn mint_endpoint(host: &str) -> String {
    format!("{}/{}", host.trim_end_matches('/'), Uuid::new_v4())
}

/// Build an endpoint table for `rosters`, preserving entries from `existing`.
///
/// Every person listed for a config source keeps their previously issued
/// endpoint when one exists for that source; everyone else gets a freshly
/// minted one. People no longer on any roster are dropped.
pub fn generate(
    host: &str,
    rosters: &BTreeMap<String, Vec<String>>,
    existing: &EndpointTable,
) -> EndpointTable {
    rosters
        .iter()
        .map(|(source, people)| {
            let known = existing.get(source);
            let entries = people
                .iter()
                .map(|person| {
                    let endpoint = known
                        .and_then(|table| table.get(person))
                        .cloned()
                        .unwrap_or_else(|| mint_endpoint(host));
                    (person.clone(), endpoint)
                })
                .collect();
            (source.clone(), entries)
        })
        .collect()
}

/// Serialize a table to JSON text with a trailing newline.
///
/// `indent` of `None` or `Some(0)` renders compact JSON.
pub fn render(table: &EndpointTable, indent: Option<usize>) -> Result<String, NotifyError> {
    let mut text = match indent {
        Some(n) if n > 0 => {
            let indent_str = " ".repeat(n);
            let fmt = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(Vec::new(), fmt);
            table.serialize(&mut ser)?;
            String::from_utf8(ser.into_inner())?
        }
        _ => serde_json::to_string(table)?,
    };
    text.push('\n');
    Ok(text)
}
