#![allow(missing_docs)]

//! Pure metric derivation helpers shared by the pipeline and the scenario simulator.
//!
//! Every ratio in this module is defined to be zero when its denominator is not
//! positive, so degenerate rows never produce NaN or infinity.

/// Calculates output produced per hour worked.
pub fn efficiency(output_score: f64, hours_worked: f64) -> f64 {
    if hours_worked > 0.0 {
        output_score / hours_worked
    } else {
        0.0
    }
}

/// Calculates output produced per currency unit spent (hourly rate times hours worked).
pub fn cost_efficiency(output_score: f64, hourly_rate: f64, hours_worked: f64) -> f64 {
    let cost = hourly_rate * hours_worked;
    if cost > 0.0 { output_score / cost } else { 0.0 }
}

/// A ratio with a zero default for a non-positive denominator.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// The arithmetic mean of the values, or zero if there are none.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| {
            (sum + value, count + 1)
        });
    safe_ratio(sum, count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(400.0, 40.0, 10.0)]
    #[case(300.0, 20.0, 15.0)]
    #[case(100.0, 0.0, 0.0)] // Edge case: no hours worked
    #[case(0.0, 35.0, 0.0)]
    fn test_efficiency(#[case] output: f64, #[case] hours: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, efficiency(output, hours), expected);
    }

    #[rstest]
    #[case(400.0, 10.0, 40.0, 1.0)]
    #[case(300.0, 10.0, 20.0, 1.5)]
    #[case(300.0, 0.0, 20.0, 0.0)] // Zero rate means zero cost
    #[case(300.0, 10.0, 0.0, 0.0)] // Zero hours means zero cost
    fn test_cost_efficiency(
        #[case] output: f64,
        #[case] rate: f64,
        #[case] hours: f64,
        #[case] expected: f64,
    ) {
        assert_approx_eq!(f64, cost_efficiency(output, rate, hours), expected);
    }

    #[rstest]
    #[case(1.0, 2.0, 0.5)]
    #[case(-3.0, 2.0, -1.5)]
    #[case(1.0, 0.0, 0.0)]
    #[case(1.0, -2.0, 0.0)]
    fn test_safe_ratio(#[case] num: f64, #[case] den: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, safe_ratio(num, den), expected);
    }

    #[test]
    fn test_mean() {
        assert_approx_eq!(f64, mean([10.0, 15.0]), 12.5);
        assert_approx_eq!(f64, mean([]), 0.0);
    }
}
