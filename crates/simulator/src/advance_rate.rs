//! Derives a facility's effective advance rate from simulated state changes.

use {
    crate::{
        Address,
        change::{Change, Ratio},
    },
    num::BigUint,
    number::conversions,
};

/// How many nested variants are unwrapped when looking for a ratio node.
pub const MAX_NESTING: usize = 2;

/// Rendered when neither the simulation nor the fallback yields a rate.
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders the effective advance rate of `facility` as a percentage with two
/// decimals, e.g. `"82.35%"`.
///
/// The rate is the first ratio node of the first borrowing base written to
/// the facility account. Without such a node, or when its denominator is
/// zero, `fallback_rate` (a fraction, e.g. `0.75`) is rendered instead, or
/// [`NOT_AVAILABLE`] when the fallback is not positive.
pub fn effective_advance_rate(
    changes: &[Change],
    facility: &Address,
    fallback_rate: f64,
) -> String {
    borrowing_base_ratio(changes, facility)
        .filter(|ratio| ratio.is_defined())
        .and_then(|ratio| {
            conversions::ratio_to_percentage(&ratio.numerator, &ratio.denominator, 2)
        })
        .or_else(|| conversions::fraction_to_percentage(fallback_rate))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// The first ratio node of the first borrowing base written to `facility`.
pub fn borrowing_base_ratio<'a>(changes: &'a [Change], facility: &Address) -> Option<&'a Ratio> {
    let nodes = changes
        .iter()
        .find_map(|change| change.borrowing_base_of(facility))?;
    nodes.iter().find_map(|node| node.ratio(MAX_NESTING))
}

/// Attested values of the borrowing base nodes written to `facility`, in
/// node order.
pub fn attested_values<'a>(changes: &'a [Change], facility: &Address) -> Vec<&'a BigUint> {
    changes
        .iter()
        .find_map(|change| change.borrowing_base_of(facility))
        .into_iter()
        .flatten()
        .filter_map(|node| node.attested(MAX_NESTING))
        .collect()
}
