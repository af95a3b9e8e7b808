//! Case-insensitive prefix filtering for completion candidates.
//!
//! An absent prefix never matches: callers that have nothing typed yet get an
//! empty list rather than every candidate.

/// Keep the candidates that start with `prefix`, ignoring case.
///
/// Order follows `candidates`. Returns an empty list when `prefix` is `None`.
///
/// # Examples
///
/// ```
/// use cmdkit_dispatch::prefix::filter_by_prefix;
///
/// let names = ["pay", "Balance", "PAYOUT"];
/// assert_eq!(filter_by_prefix(&names, Some("pa")), vec!["pay", "PAYOUT"]);
/// assert_eq!(filter_by_prefix(&names, Some("")), vec!["pay", "Balance", "PAYOUT"]);
/// assert!(filter_by_prefix(&names, None).is_empty());
/// ```
pub fn filter_by_prefix<S>(candidates: &[S], prefix: Option<&str>) -> Vec<String>
where
    S: AsRef<str>,
{
    let Some(prefix) = prefix else {
        return Vec::new();
    };
    let needle = prefix.to_lowercase();
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| starts_with_lowercase(candidate, &needle))
        .map(str::to_string)
        .collect()
}

fn starts_with_lowercase(candidate: &str, lowered_prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(lowered_prefix)
}
