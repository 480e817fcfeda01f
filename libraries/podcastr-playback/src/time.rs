//! Duration labels for display

/// Format whole seconds as `MM:SS`
///
/// Minutes are total minutes, so an hour-long episode reads `62:05`.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format whole seconds as `HH:MM:SS`
pub fn format_duration_long(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds % 60)
}
