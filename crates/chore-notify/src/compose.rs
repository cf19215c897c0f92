//! Message composition.
//!
//! The pluralization rules are long-standing household phrasing and are
//! reproduced exactly, including the asymmetry between the 2-chore case
//! (both names lowercased) and the 3+ case (original case kept).

use chore_core::model::{Chore, ChoreGroup};
use chore_rota::{Assignment, BinColour};
use indexmap::IndexMap;

/// Render a chore list as a natural-language phrase.
///
/// - 1 chore: the lowercased name alone
/// - 2 chores: `"a and b"`, both lowercased
/// - 3+ chores: `"A, B, and C"` with names in their original case
pub fn chores_phrase(chores: &[Chore]) -> String {
    match chores {
        [] => String::new(),
        [only] => only.name.to_lowercase(),
        [first, second] => format!(
            "{} and {}",
            first.name.to_lowercase(),
            second.name.to_lowercase()
        ),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|c| c.name.as_str()).collect();
            format!("{}, and {}", head.join(", "), last.name)
        }
    }
}

/// The weekly reminder body for one person.
pub fn weekly_message(person: &str, chores: &[Chore]) -> String {
    format!(
        "{person}, your chores for the week are: {}",
        chores_phrase(chores)
    )
}

/// The bins-night reminder body.
pub fn bins_message(person: &str, colours: (BinColour, BinColour)) -> String {
    format!(
        "{person}, {} and {} bins go out tonight!",
        colours.0, colours.1
    )
}

/// ntfy tag list for the bins reminder.
pub fn bins_tags(colours: (BinColour, BinColour)) -> String {
    format!("wastebasket,{}_square,{}_square", colours.0, colours.1)
}

/// Invert per-group assignments into an ordered person → chores map.
///
/// People appear in first-assignment order; each person's chores keep group
/// and chore order. A chore id with no catalog entry is skipped — it cannot
/// be named in a message.
pub fn person_assignments(
    groups: &IndexMap<String, ChoreGroup>,
    assignments: &IndexMap<String, Assignment>,
) -> IndexMap<String, Vec<Chore>> {
    let mut by_person: IndexMap<String, Vec<Chore>> = IndexMap::new();
    for (group_id, assignment) in assignments {
        let Some(group) = groups.get(group_id) else {
            continue;
        };
        for (chore_id, person) in assignment {
            let Some(chore) = group.chores.iter().find(|c| &c.id == chore_id) else {
                continue;
            };
            by_person
                .entry(person.clone())
                .or_default()
                .push(chore.clone());
        }
    }
    by_person
}
