//! Round-robin assignment of chores to people.

use chore_core::model::ChoreGroup;
use indexmap::IndexMap;

use crate::errors::RotaError;

/// Resolved chore-id → person mapping for one group at one offset.
///
/// Iteration order matches the group's chore order.
pub type Assignment = IndexMap<String, String>;

/// Assign every chore in `group` for the given rotation offset.
///
/// The i-th chore goes to `people[(i + offset) mod people.len()]`. The
/// mapping is total (every chore gets exactly one person) and pure: the same
/// group and offset always produce the same mapping. Chores may outnumber
/// people, in which case assignments wrap and one person holds several
/// chores that week.
pub fn assign(offset: i64, group: &ChoreGroup) -> Result<Assignment, RotaError> {
    if group.people.is_empty() {
        return Err(RotaError::EmptyRoster {
            group: group.id.clone(),
        });
    }
    let count = group.people.len() as i64;
    Ok(group
        .chores
        .iter()
        .enumerate()
        .map(|(i, chore)| {
            let slot = (i as i64 + offset).rem_euclid(count) as usize;
            (chore.id.clone(), group.people[slot].clone())
        })
        .collect())
}

/// Assign every group in a catalog for the given offset.
///
/// Keyed and ordered like the input catalog. Fails on the first group with
/// an empty roster, producing no partial result.
pub fn assign_all(
    offset: i64,
    groups: &IndexMap<String, ChoreGroup>,
) -> Result<IndexMap<String, Assignment>, RotaError> {
    groups
        .iter()
        .map(|(id, group)| Ok((id.clone(), assign(offset, group)?)))
        .collect()
}
