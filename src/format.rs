const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Largest unit <= value, base-1024, two decimals with trailing zeros
/// trimmed. Zero is special-cased so the log-based scaling never sees it.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / (1u64 << (10 * exp)) as f64;
    format!("{} {}", trim_decimals(value), UNITS[exp])
}

fn trim_decimals(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Fixed four-field "Xd Yh Zm Ws" decomposition by floor division.
pub fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Percentage of `used` over `total` with one fractional digit.
pub fn format_percent(used: u64, total: u64) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", used as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes_is_exact() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn bytes_scale_base_1024() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1 MB");
        assert_eq!(format_bytes(1_073_741_824), "1 GB");
        assert_eq!(format_bytes(1_099_511_627_776), "1 TB");
    }

    #[test]
    fn bytes_round_to_two_decimals() {
        // 1.337890625 KB rounds to 1.34
        assert_eq!(format_bytes(1370), "1.34 KB");
    }

    #[test]
    fn bytes_above_largest_unit_stay_in_tb() {
        assert_eq!(format_bytes(2_251_799_813_685_248), "2048 TB");
    }

    #[test]
    fn uptime_four_fields() {
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
        assert_eq!(format_uptime(59), "0d 0h 0m 59s");
        assert_eq!(format_uptime(0), "0d 0h 0m 0s");
        assert_eq!(format_uptime(86_400), "1d 0h 0m 0s");
    }

    #[test]
    fn percent_one_fractional_digit() {
        assert_eq!(format_percent(1, 2), "50.0");
        assert_eq!(format_percent(1, 3), "33.3");
        assert_eq!(format_percent(0, 0), "0.0");
        assert_eq!(format_percent(5, 5), "100.0");
    }
}
