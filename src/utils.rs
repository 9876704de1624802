/// Daily cost projection from an hourly rate
pub fn daily_cost(cost_per_hour: f64) -> f64 {
    cost_per_hour * 24.0
}

/// Format an hourly rate the way the pricing pages do, e.g. "$0.1700"
pub fn format_hourly_cost(cost_per_hour: f64) -> String {
    format!("${:.4}", cost_per_hour)
}

/// Format a dollar amount with cent precision, e.g. "$4.08"
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_cost() {
        assert_eq!(daily_cost(0.0), 0.0);
        assert_eq!(daily_cost(1.0), 24.0);
        assert!((daily_cost(0.17) - 4.08).abs() < 1e-12);
    }

    #[test]
    fn test_format_hourly_cost() {
        assert_eq!(format_hourly_cost(0.17), "$0.1700");
        assert_eq!(format_hourly_cost(0.0104), "$0.0104");
        assert_eq!(format_hourly_cost(98.32), "$98.3200");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(4.08), "$4.08");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(9.216), "$9.22");
    }
}
