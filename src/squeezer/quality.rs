//! Juice quality derivation.
//!
//! Quality is a pure function of cumulative efficiency: the juice collected
//! divided by the capacity of every squeezed lemon.

use super::model::JuiceQuality;

pub const EXCELLENT_THRESHOLD: f64 = 0.8;
pub const GOOD_THRESHOLD: f64 = 0.6;

/// Ratio of juice collected to squeezed capacity. Zero when nothing has
/// been squeezed.
pub fn efficiency(total_amount: f64, squeezed_capacity: f64) -> f64 {
    if squeezed_capacity > 0.0 {
        total_amount / squeezed_capacity
    } else {
        0.0
    }
}

pub fn grade(efficiency: f64) -> JuiceQuality {
    if efficiency >= EXCELLENT_THRESHOLD {
        JuiceQuality::Excellent
    } else if efficiency >= GOOD_THRESHOLD {
        JuiceQuality::Good
    } else {
        JuiceQuality::Poor
    }
}

/// Quality of a collection. `empty` is returned when no squeezed capacity
/// exists, which does not follow the thresholds.
pub fn collection_quality(
    total_amount: f64,
    squeezed_capacity: f64,
    empty: JuiceQuality,
) -> JuiceQuality {
    if squeezed_capacity > 0.0 {
        grade(efficiency(total_amount, squeezed_capacity))
    } else {
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(grade(100.0 / 120.0), JuiceQuality::Excellent);
        assert_eq!(grade(0.8), JuiceQuality::Excellent);
        assert_eq!(grade(0.6), JuiceQuality::Good);
        assert_eq!(grade(0.79999), JuiceQuality::Good);
        assert_eq!(grade(0.59999), JuiceQuality::Poor);
        assert_eq!(grade(0.0), JuiceQuality::Poor);
    }

    #[test]
    fn test_efficiency_without_capacity() {
        assert_eq!(efficiency(10.0, 0.0), 0.0);
        assert_eq!(efficiency(30.0, 60.0), 0.5);
    }

    #[test]
    fn test_collection_quality_empty_default() {
        assert_eq!(collection_quality(0.0, 0.0, JuiceQuality::Good), JuiceQuality::Good);
        assert_eq!(collection_quality(0.0, 0.0, JuiceQuality::Poor), JuiceQuality::Poor);
        // Juice with no remaining squeezed capacity still falls back to the default
        assert_eq!(collection_quality(40.0, 0.0, JuiceQuality::Good), JuiceQuality::Good);
        assert_eq!(collection_quality(36.0, 60.0, JuiceQuality::Good), JuiceQuality::Good);
        assert_eq!(collection_quality(30.0, 60.0, JuiceQuality::Good), JuiceQuality::Poor);
    }
}
