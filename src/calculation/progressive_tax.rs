//! Progressive personal income tax calculation.
//!
//! Taxable income is allocated to the regime's brackets from the lowest up.
//! Each bracket's slab is taxed at its own rate and the per-bracket tax is
//! rounded to whole VND. Bracket ordering is validated when the [`Regime`] is
//! built, so this walk never sorts.

use rust_decimal::Decimal;

use crate::config::{Regime, TaxBracket};
use crate::models::{Pit, PitItem};

use super::rounding::{format_percent, format_vnd, round_vnd};

/// Calculates personal income tax on a taxable amount under a regime.
///
/// A non-positive `taxable_income` produces an empty breakdown with
/// `taxable` clamped to zero. Income exactly at a threshold falls wholly into
/// the lower bracket.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_pit;
/// use salary_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let regime = loader.get_regime("2025").unwrap();
///
/// let pit = calculate_pit(Decimal::from(7_050_000), regime);
/// assert_eq!(pit.items.len(), 2);
/// assert_eq!(pit.total, Decimal::from(455_000));
/// ```
pub fn calculate_pit(taxable_income: Decimal, regime: &Regime) -> Pit {
    if taxable_income <= Decimal::ZERO {
        return Pit {
            taxable: Decimal::ZERO,
            items: Vec::new(),
            total: Decimal::ZERO,
        };
    }

    let mut items = Vec::new();
    let mut remaining = taxable_income;
    let mut previous = Decimal::ZERO;

    for (index, bracket) in regime.brackets().iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let slab = match bracket.threshold {
            Some(threshold) => remaining.min(threshold - previous),
            None => remaining,
        };
        let tax = round_vnd(slab * bracket.rate);

        items.push(PitItem {
            label: bracket_label(index + 1, previous, bracket),
            slab,
            rate: bracket.rate,
            tax,
        });

        remaining -= slab;
        if let Some(threshold) = bracket.threshold {
            previous = threshold;
        }
    }

    let total = items.iter().map(|item| item.tax).sum();

    Pit {
        taxable: taxable_income,
        items,
        total,
    }
}

fn bracket_label(number: usize, from: Decimal, bracket: &TaxBracket) -> String {
    let rate = format_percent(bracket.rate);
    match bracket.threshold {
        Some(to) => format!(
            "Bậc {}: {}–{} @ {}",
            number,
            format_vnd(from),
            format_vnd(to),
            rate
        ),
        None => format!("Bậc {}: >{} @ {}", number, format_vnd(from), rate),
    }
}
