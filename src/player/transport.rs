//! Transport control arithmetic: time labels, progress and seeking

/// Format seconds as `m:ss`. Non-finite or negative input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Position as a percentage (0-100) of the duration
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration * 100.0).clamp(0.0, 100.0)
}

/// Time in seconds for a slider position given as a percentage
pub fn seek_target(percent: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !percent.is_finite() {
        return None;
    }
    Some(percent.clamp(0.0, 100.0) / 100.0 * duration)
}

/// `current / total` label shown next to the progress slider
pub fn time_display(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3_600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(5.0, 0.0), 0.0);
        assert_eq!(progress_percent(5.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(200.0, 100.0), 100.0);
    }

    #[test]
    fn test_seek_target() {
        assert_eq!(seek_target(50.0, 90.0), Some(45.0));
        assert_eq!(seek_target(150.0, 90.0), Some(90.0));
        assert_eq!(seek_target(50.0, 0.0), None);
    }

    #[test]
    fn test_time_display() {
        assert_eq!(time_display(61.0, 125.0), "1:01 / 2:05");
    }
}
