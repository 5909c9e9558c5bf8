//! Daily-load policy.
//!
//! Caps how many hours of one subject a class may receive on a single
//! day. When the user registered split patterns for the subject, the cap
//! is the largest block in any of them, whatever total they were written
//! for. Otherwise the cap follows the weekly total.

use crate::models::SplitConstraints;

/// Maximum hours of a subject allowed on one day for a class.
///
/// # Example
/// ```
/// use u_timetable::models::SplitConstraints;
/// use u_timetable::scheduler::max_daily_load;
///
/// let none = SplitConstraints::new();
/// assert_eq!(max_daily_load(5, "MAT", &none), 3);
/// assert_eq!(max_daily_load(4, "MAT", &none), 2);
///
/// let split = SplitConstraints::new().with_parsed("IPA", "4").unwrap();
/// assert_eq!(max_daily_load(4, "IPA", &split), 4);
/// ```
pub fn max_daily_load(total_weekly: u32, subject_code: &str, constraints: &SplitConstraints) -> u32 {
    let patterns = constraints.patterns_for(subject_code);
    if !patterns.is_empty() {
        return patterns
            .iter()
            .map(|p| p.largest_block())
            .max()
            .unwrap_or(0);
    }

    match total_weekly {
        t if t >= 5 => 3,
        4 => 2,
        t => t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SplitPattern;

    #[test]
    fn test_default_caps() {
        let none = SplitConstraints::new();
        assert_eq!(max_daily_load(10, "MAT", &none), 3);
        assert_eq!(max_daily_load(6, "MAT", &none), 3);
        assert_eq!(max_daily_load(5, "MAT", &none), 3);
        assert_eq!(max_daily_load(4, "MAT", &none), 2);
        assert_eq!(max_daily_load(3, "MAT", &none), 3);
        assert_eq!(max_daily_load(2, "MAT", &none), 2);
        assert_eq!(max_daily_load(1, "MAT", &none), 1);
        assert_eq!(max_daily_load(0, "MAT", &none), 0);
    }

    #[test]
    fn test_cap_from_any_pattern() {
        let split = SplitConstraints::new()
            .with_pattern("BIN", SplitPattern::new(vec![2, 2, 2]))
            .with_pattern("BIN", SplitPattern::new(vec![4, 1]));
        // Largest block across all patterns, even ones for other totals
        assert_eq!(max_daily_load(6, "BIN", &split), 4);
        assert_eq!(max_daily_load(2, "BIN", &split), 4);
        // Other subjects keep defaults
        assert_eq!(max_daily_load(4, "MAT", &split), 2);
    }
}
