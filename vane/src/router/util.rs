use vane_core::{Capability, VaneError};

/// Collapse the errors of one fallback chain into its terminal outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - Else → `Exhausted { capability, what, errors }`, errors in attempt order.
#[must_use]
pub fn collapse_errors(
    capability: Capability,
    what: &str,
    attempted_any: bool,
    errors: Vec<VaneError>,
) -> VaneError {
    if !attempted_any {
        return VaneError::unsupported(capability.as_str());
    }
    VaneError::exhausted(capability.as_str(), what, errors)
}

/// Join the distinct connector names that produced `sources`, in first-seen order,
/// with `+`.
#[must_use]
pub fn join_sources<'a>(sources: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for s in sources.into_iter().flatten() {
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    seen.join("+")
}
