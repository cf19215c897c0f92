//! Display-name casing helpers.
//!
//! Chore and group ids are lowercase slugs (`bins`, `toilet-lounge`). When a
//! config entry has no explicit `name`, the display name is derived by
//! title-casing the id: the first letter of every alphabetic run is
//! uppercased and the rest lowercased. Any non-alphabetic character starts a
//! new run, so hyphenated ids keep their hyphens (`toilet-lounge` →
//! `Toilet-Lounge`) — no spaces are inserted.

/// Title-case a string, treating every non-alphabetic character as a word
/// boundary.
///
/// # Examples
///
/// ```
/// use chore_core::text::title_case;
///
/// assert_eq!(title_case("bins"), "Bins");
/// assert_eq!(title_case("toilet-lounge"), "Toilet-Lounge");
/// assert_eq!(title_case("MOP floors"), "Mop Floors");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
