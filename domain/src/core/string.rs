//! String utilities for the domain layer.

/// Shorten `s` to at most `max_chars` characters, ending with `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head.trim_end())
}
