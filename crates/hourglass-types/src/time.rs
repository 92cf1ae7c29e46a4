//! Millisecond display helpers shared by the timeline and its renderers.

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60_000;
/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1_000;

/// Format a duration as `"<n>ms"`.
pub fn format_millis(ms: u64) -> String {
    format!("{ms}ms")
}

/// Format an offset as whole minutes and seconds, e.g. `"1m5s"`.
pub fn format_minutes_seconds(ms: u64) -> String {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{minutes}m{seconds}s")
}
