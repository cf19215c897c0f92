//! # chore-catalog
//!
//! Loads chore-group configuration documents into the [`chore_core::model`]
//! types.
//!
//! A catalog document is a YAML mapping of group-id to group body:
//!
//! ```yaml
//! main:
//!   name: Main
//!   chores:
//!     - bins                     # shorthand: id only, name title-cased
//!     - id: toilet-lounge
//!       name: Toilet + Lounge    # explicit display name
//!   people:
//!     - Alice
//!     - Tom
//! ```
//!
//! Order of `chores` and `people` is semantically significant — it is the
//! rotation key — so groups are returned in an ordered map and the sequences
//! are never re-sorted. Catalogs are loaded fresh on every invocation; there
//! is no caching across runs.

#![deny(unsafe_code)]

pub mod errors;

pub use errors::CatalogError;

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use chore_core::model::{Chore, ChoreGroup};
use chore_core::text::title_case;

/// A chore entry as written in the document: either a bare id string or a
/// mapping with an `id` and optional `name`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChore {
    Id(String),
    Full {
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

/// A group body as written in the document. `chores` and `people` are
/// required keys; `name` defaults to the title-cased group id.
#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    name: Option<String>,
    chores: Vec<RawChore>,
    people: Vec<String>,
}

/// Load and validate a catalog document from `path`.
pub fn load_catalog(path: &Path) -> Result<IndexMap<String, ChoreGroup>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&text).map_err(|e| e.with_path(path))?;
    tracing::debug!(
        path = %path.display(),
        groups = catalog.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse a catalog document from its YAML text.
///
/// Duplicate group keys are not rejected: the last occurrence wins, matching
/// the underlying YAML mapping semantics.
pub fn parse_catalog(text: &str) -> Result<IndexMap<String, ChoreGroup>, CatalogError> {
    let raw: IndexMap<String, RawGroup> = serde_yaml::from_str(text)?;
    raw.into_iter()
        .map(|(group_id, body)| {
            let group = build_group(&group_id, body)?;
            Ok((group_id, group))
        })
        .collect()
}

fn build_group(group_id: &str, body: RawGroup) -> Result<ChoreGroup, CatalogError> {
    let chores = body
        .chores
        .into_iter()
        .map(|raw| build_chore(group_id, raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ChoreGroup {
        id: group_id.to_string(),
        name: body
            .name
            .unwrap_or_else(|| title_case(group_id)),
        chores,
        people: body.people,
    })
}

fn build_chore(group_id: &str, raw: RawChore) -> Result<Chore, CatalogError> {
    let (id, name) = match raw {
        RawChore::Id(id) => (id, None),
        RawChore::Full { id, name } => (id, name),
    };
    if id.is_empty() {
        return Err(CatalogError::EmptyChoreId {
            group: group_id.to_string(),
        });
    }
    // An explicit but empty name falls back to the title-cased id, the same
    // as a missing one.
    Ok(match name.filter(|n| !n.is_empty()) {
        Some(name) => Chore::new(id, name),
        None => Chore::from_id(id),
    })
}
