//! Salinity unit normalization
//!
//! Salinity is compared in specific gravity (SG). Refractometers and older
//! settings files report it as SG × 1000 (e.g. `1025`); those values are
//! scaled back down here. Apply this exactly once at every boundary.

/// Values at or above this are treated as SG × 1000
pub const RAW_SCALE_THRESHOLD: f64 = 1000.0;

/// Normalize a salinity value to SG
///
/// Values below 1000 are already SG and returned unchanged, so the function
/// is idempotent. Non-finite input is passed through for the caller to
/// reject.
pub fn normalize_salinity(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let mut sg = value;
    while sg >= RAW_SCALE_THRESHOLD {
        sg /= RAW_SCALE_THRESHOLD;
    }
    sg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_reading_scaled() {
        assert!((normalize_salinity(1025.0) - 1.025).abs() < 1e-12);
        assert!((normalize_salinity(1022.0) - 1.022).abs() < 1e-12);
    }

    #[test]
    fn test_sg_unchanged() {
        assert_eq!(normalize_salinity(1.025), 1.025);
        assert_eq!(normalize_salinity(0.0), 0.0);
        assert_eq!(normalize_salinity(999.9), 999.9);
        assert_eq!(normalize_salinity(-5.0), -5.0);
    }

    #[test]
    fn test_idempotent() {
        for value in [0.5, 1.025, 35.0, 999.0, 1000.0, 1025.0, 1e6, 3.2e9, 1e300] {
            let once = normalize_salinity(value);
            assert_eq!(normalize_salinity(once), once, "not idempotent for {value}");
            assert!(once < RAW_SCALE_THRESHOLD);
        }
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(normalize_salinity(f64::NAN).is_nan());
        assert_eq!(normalize_salinity(f64::INFINITY), f64::INFINITY);
    }
}
