//! Cell value equivalence under a [`MatchMode`].

use crate::models::MatchMode;

/// Decide whether two cell values are equivalent
///
/// Total and side-effect free. Two empty strings match under every mode;
/// under `Partial` an empty value is contained in anything.
pub fn matches(a: &str, b: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => a == b,
        MatchMode::CaseInsensitive => a.to_lowercase() == b.to_lowercase(),
        MatchMode::Partial => {
            let a = a.to_lowercase();
            let b = b.to_lowercase();
            a.contains(&b) || b.contains(&a)
        }
    }
}

/// Whether every paired value matches
pub fn all_match<'a>(
    a: impl IntoIterator<Item = &'a str>,
    b: impl IntoIterator<Item = &'a str>,
    mode: MatchMode,
) -> bool {
    a.into_iter().zip(b).all(|(a, b)| matches(a, b, mode))
}
