//! Built-in attribute key vocabulary.

use strsim::levenshtein;

/// Attribute keys reserved by the filter language.
///
/// Matching is exact and case-sensitive. Any other run of letters is a
/// user-defined attribute key.
pub const BUILT_IN_KEYS: &[&str] = &[
    "due",
    "until",
    "project",
    "end",
    "entry",
    "estimate",
    "id",
    "modified",
    "parent",
    "priority",
    "recur",
    "scheduled",
    "start",
    "status",
    "wait",
];

/// Maximum Levenshtein distance to consider a built-in key as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Short names tolerate fewer edits: one edit per three characters.
const CHARS_PER_EDIT: usize = 3;

/// Returns the vocabulary entry for `name` if it is a built-in key.
pub fn lookup(name: &str) -> Option<&'static str> {
    BUILT_IN_KEYS.iter().copied().find(|key| *key == name)
}

/// Returns true if `name` is a built-in key.
pub fn is_built_in(name: &str) -> bool {
    lookup(name).is_some()
}

/// Finds the built-in key closest to `name`.
///
/// Returns `None` when `name` is itself built-in or when no built-in key is
/// within the suggestion distance. Comparison is case-insensitive so that
/// `Due` suggests `due`. The allowed distance grows with the length of
/// `name`, so single letters never suggest `id`.
pub fn suggest_builtin(name: &str) -> Option<&'static str> {
    if is_built_in(name) {
        return None;
    }

    let lower = name.to_lowercase();
    let (best, distance) = BUILT_IN_KEYS
        .iter()
        .map(|key| (*key, levenshtein(&lower, key)))
        .min_by_key(|(_, d)| *d)?;

    let threshold = (name.chars().count() / CHARS_PER_EDIT).min(MAX_SUGGESTION_DISTANCE);
    if distance <= threshold {
        Some(best)
    } else {
        None
    }
}
