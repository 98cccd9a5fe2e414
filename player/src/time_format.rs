use std::fmt;

/// Format seconds as `m:ss`. Fractions are truncated, negative and non-finite values show as
/// `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// The current and the total time of a timeline, displayed as `m:ss / m:ss`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeDisplay {
    pub current: f64,
    pub total: f64,
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", format_time(self.current), format_time(self.total))
    }
}
