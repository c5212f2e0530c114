//! Playback clock formatting

/// Format a playback offset as `m:ss`
///
/// Minutes are not wrapped into hours, so an hour-long lesson reads `60:00`.
/// Unknown (NaN/infinite) and negative offsets render as `0:00`.
///
/// ```rust
/// use lesson_core::format_time;
///
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
