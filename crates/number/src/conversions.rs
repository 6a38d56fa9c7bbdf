use num::{BigUint, Integer, Zero};

/// Renders `numerator / denominator` as a percentage with `precision`
/// fractional digits, rounding half up on the exact ratio.
///
/// Returns `None` for a zero denominator.
pub fn ratio_to_percentage(
    numerator: &BigUint,
    denominator: &BigUint,
    precision: u8,
) -> Option<String> {
    if denominator.is_zero() {
        return None;
    }

    let scale = BigUint::from(10u8).pow(u32::from(precision));
    let scaled = numerator * &scale * 100u8;
    let (quotient, remainder) = scaled.div_rem(denominator);
    let rounded = if remainder * 2u8 >= *denominator {
        quotient + 1u8
    } else {
        quotient
    };

    let (whole, fraction) = rounded.div_rem(&scale);
    if precision == 0 {
        return Some(format!("{whole}%"));
    }
    Some(format!(
        "{whole}.{:0>width$}%",
        fraction.to_string(),
        width = usize::from(precision)
    ))
}

/// Renders a decimal fraction (`0.75`) as a percentage with two fractional
/// digits (`"75.00%"`).
///
/// Returns `None` for non-positive or non-finite fractions.
pub fn fraction_to_percentage(fraction: f64) -> Option<String> {
    if !fraction.is_finite() || fraction <= 0. {
        return None;
    }
    Some(format!("{:.2}%", fraction * 100.))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentage(numerator: u64, denominator: u64) -> Option<String> {
        ratio_to_percentage(&numerator.into(), &denominator.into(), 2)
    }

    #[test]
    fn ratio_to_percentage_() {
        assert_eq!(percentage(3, 4).as_deref(), Some("75.00%"));
        assert_eq!(percentage(1, 3).as_deref(), Some("33.33%"));
        assert_eq!(percentage(2, 3).as_deref(), Some("66.67%"));
        assert_eq!(percentage(8235, 10_000).as_deref(), Some("82.35%"));
        assert_eq!(percentage(0, 7).as_deref(), Some("0.00%"));
        assert_eq!(percentage(5, 4).as_deref(), Some("125.00%"));
        assert_eq!(percentage(1, 0), None);
        assert_eq!(
            ratio_to_percentage(&1u8.into(), &8u8.into(), 0).as_deref(),
            Some("13%")
        );
    }

    #[test]
    fn rounds_half_up() {
        // 0.125% -> 0.13%
        assert_eq!(percentage(1, 800).as_deref(), Some("0.13%"));
        // 0.124% -> 0.12%
        assert_eq!(percentage(124, 100_000).as_deref(), Some("0.12%"));
    }

    #[test]
    fn fraction_to_percentage_() {
        assert_eq!(fraction_to_percentage(0.5).as_deref(), Some("50.00%"));
        assert_eq!(fraction_to_percentage(0.75).as_deref(), Some("75.00%"));
        assert_eq!(fraction_to_percentage(0.8235).as_deref(), Some("82.35%"));
        assert_eq!(fraction_to_percentage(0.), None);
        assert_eq!(fraction_to_percentage(-0.5), None);
        assert_eq!(fraction_to_percentage(f64::NAN), None);
        assert_eq!(fraction_to_percentage(f64::INFINITY), None);
    }
}
