//! Utility helpers for Podplayer

/// Formats whole seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Playback positions arrive as floats; negative and NaN values render as zero.
pub fn format_position(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(0);
    }
    format_duration(seconds.floor().min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(3981), "01:06:21");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn positions_floor_and_clamp() {
        assert_eq!(format_position(61.9), "00:01:01");
        assert_eq!(format_position(-3.0), "00:00:00");
        assert_eq!(format_position(f64::NAN), "00:00:00");
    }
}
