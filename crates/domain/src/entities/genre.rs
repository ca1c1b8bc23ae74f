use std::collections::HashSet;

/// Union of `incoming` and `existing`, incoming genres first.
///
/// Duplicates are dropped by exact string equality; the first occurrence wins.
pub fn merge_genres(incoming: &[String], existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    incoming
        .iter()
        .chain(existing)
        .filter(|genre| seen.insert(genre.as_str()))
        .cloned()
        .collect()
}

/// `existing` minus every genre in `remove`, keeping the order of `existing`.
///
/// Genres in `remove` that are not present are ignored.
pub fn subtract_genres(existing: &[String], remove: &[String]) -> Vec<String> {
    let remove: HashSet<&str> = remove.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    existing
        .iter()
        .filter(|genre| !remove.contains(genre.as_str()) && seen.insert(genre.as_str()))
        .cloned()
        .collect()
}
