pub mod models;

/// Formats an axis value in thousands once it reaches 1000, truncating toward
/// zero: `1500.0` becomes `1k` and `999.9` becomes `999`.

pub fn format_k(value: f64) -> String {
    if value >= 1000.0 {
        format!("{}k", (value / 1000.0) as i64)
    } else {
        format!("{}", value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::format_k;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_k(0.0), "0");
        assert_eq!(format_k(999.9), "999");
        assert_eq!(format_k(1000.0), "1k");
        assert_eq!(format_k(25_600.0), "25k");
        assert_eq!(format_k(3_000_000.0), "3000k");
    }
}
