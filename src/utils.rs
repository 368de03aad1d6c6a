/// Sentinel used when an export record carries no usable name or artist.
pub const UNKNOWN: &str = "unknown";

/// Resolves a two-candidate nullable field pair.
///
/// Returns the primary value when present and non-empty, otherwise the
/// fallback, together with a flag telling whether the fallback was used.
/// Returns `None` when neither candidate holds a usable value, which lets
/// callers decide the rejection policy separately from parsing.
pub fn resolve_with_fallback(
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Option<(String, bool)> {
    match primary.filter(|v| !v.is_empty()) {
        Some(value) => Some((value.to_string(), false)),
        None => fallback
            .filter(|v| !v.is_empty())
            .map(|value| (value.to_string(), true)),
    }
}

/// Extracts the year portion of an export timestamp.
///
/// Export timestamps are ISO-8601 strings, so the year is the leading four
/// characters. Returns `None` for timestamps too short to carry one.
pub fn timestamp_year(ts: &str) -> Option<&str> {
    ts.get(..4)
}

pub fn format_listening_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    format!("{} h {:02} min", minutes / 60, minutes % 60)
}
