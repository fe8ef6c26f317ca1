//! Display formatting for catalog listings.

/// Render a duration in minutes as `"45m"`, `"2h"` or `"1h 30m"`.
pub fn format_duration(minutes: u32) -> String {
    let (hours, mins) = (minutes / 60, minutes % 60);
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Render a price in cents as `"Free"` or `"$12.50"`.
pub fn format_price(cents: u32) -> String {
    if cents == 0 {
        "Free".to_string()
    } else {
        format!("${}.{:02}", cents / 100, cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(605), "10h 5m");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "Free");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(1250), "$12.50");
        assert_eq!(format_price(19900), "$199.00");
    }
}
