//! Chore and chore-group value types.
//!
//! Both types are plain immutable records with structural equality and
//! hashing. The *order* of `chores` and `people` in a [`ChoreGroup`] is
//! semantically significant: it is the rotation key, so both are kept as
//! ordered sequences exactly as they appear in the source document.

use serde::{Deserialize, Serialize};

use crate::text::title_case;

/// A single recurring task with a stable identifier and display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chore {
    /// Stable key, unique within a group.
    pub id: String,
    /// Human-readable display label.
    pub name: String,
}

impl Chore {
    /// Create a chore with an explicit display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Create a chore whose display name is the title-cased id.
    ///
    /// Hyphenated ids keep their hyphens: `toilet-lounge` becomes
    /// `Toilet-Lounge`, not `Toilet Lounge`.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = title_case(&id);
        Self { id, name }
    }
}

/// A named collection of chores sharing one roster and one rotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoreGroup {
    /// Group identifier (the key in the config document).
    pub id: String,
    /// Display label.
    pub name: String,
    /// Ordered chore list — position drives the round-robin shift.
    pub chores: Vec<Chore>,
    /// Ordered roster of person names.
    pub people: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_id_title_cases() {
        let chore = Chore::from_id("bins");
        assert_eq!(chore.id, "bins");
        assert_eq!(chore.name, "Bins");
    }

    #[test]
    fn from_id_keeps_hyphens() {
        let chore = Chore::from_id("toilet-lounge");
        assert_eq!(chore.name, "Toilet-Lounge");
    }

    #[test]
    fn explicit_name_wins() {
        let chore = Chore::new("toilet-lounge", "Toilet + Lounge");
        assert_eq!(chore.name, "Toilet + Lounge");
    }

    #[test]
    fn equality_covers_id_and_name() {
        assert_eq!(Chore::from_id("bins"), Chore::new("bins", "Bins"));
        assert_ne!(Chore::from_id("bins"), Chore::new("bins", "Rubbish"));
    }

    #[test]
    fn chores_are_hashable() {
        let mut seen = HashSet::new();
        assert!(seen.insert(Chore::from_id("bins")));
        assert!(!seen.insert(Chore::from_id("bins")));
    }

    #[test]
    fn group_serializes_with_ordered_fields() {
        let group = ChoreGroup {
            id: "main".to_string(),
            name: "Main".to_string(),
            chores: vec![Chore::from_id("bins"), Chore::from_id("kitchen")],
            people: vec!["Alice".to_string(), "Tom".to_string()],
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["chores"][0]["id"], "bins");
        assert_eq!(json["chores"][1]["name"], "Kitchen");
        assert_eq!(json["people"][1], "Tom");
    }
}
