//! Byte-count formatting helpers.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Render a byte count as a human-readable 1024-based string.
///
/// Values are rounded to at most two decimal places with trailing zeros
/// trimmed: `0` -> "0 Bytes", `1536` -> "1.5 KB", `10 * 1024 * 1024` -> "10 MB".
pub fn human_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (63 - bytes.leading_zeros() as u64) / 10;
    let exponent = exponent.min(UNITS.len() as u64 - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[exponent as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bytes() {
        assert_eq!(human_size(0), "0 Bytes");
    }

    #[test]
    fn test_sub_kilobyte() {
        assert_eq!(human_size(1), "1 Bytes");
        assert_eq!(human_size(512), "512 Bytes");
        assert_eq!(human_size(1023), "1023 Bytes");
    }

    #[test]
    fn test_kilobytes() {
        assert_eq!(human_size(1024), "1 KB");
        assert_eq!(human_size(1536), "1.5 KB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(human_size(2 * 1024 * 1024), "2 MB");
        assert_eq!(human_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(human_size(100 * 1024 * 1024), "100 MB");
    }

    #[test]
    fn test_gigabytes() {
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn test_rounding_trims_trailing_zeros() {
        // 1.25 MB keeps both decimals, 1.50 MB drops the zero
        assert_eq!(human_size(1024 * 1024 + 256 * 1024), "1.25 MB");
        assert_eq!(human_size(1024 * 1024 + 512 * 1024), "1.5 MB");
    }
}
