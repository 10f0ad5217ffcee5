//! Name search over the in-memory character list

use crate::character::Character;

/// Characters whose name contains `query`, ignoring case, in input order
///
/// An empty query matches everything.
pub fn search<'a>(characters: &'a [Character], query: &str) -> Vec<&'a Character> {
    if query.is_empty() {
        return characters.iter().collect();
    }

    let needle = query.to_lowercase();
    characters
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}
