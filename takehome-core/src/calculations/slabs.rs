//! Progressive slab tax.
//!
//! Each bracket is taxed on its own slice of taxable income and the slices are
//! summed, so moving one boundary never changes the arithmetic of another
//! bracket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::portion_between;
use crate::models::{RateConfiguration, SlabBracket};

/// Tax owed on the slice of taxable income that falls inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub bracket: SlabBracket,
    /// Taxable income falling inside the bracket.
    pub amount: Decimal,
    pub tax: Decimal,
}

/// Splits `taxable_income` across every bracket of `config`.
///
/// Brackets with nothing in them are still listed, with zero amounts.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::FiscalYearVariant;
/// use takehome_core::calculations::slabs::bracket_taxes;
///
/// let config = FiscalYearVariant::Fy2018_19.rate_configuration();
/// let taxes = bracket_taxes(&config, dec!(1040));
///
/// let amounts: Vec<_> = taxes.iter().map(|b| b.amount).collect();
/// assert_eq!(amounts, vec![dec!(250), dec!(250), dec!(500), dec!(40)]);
/// ```
pub fn bracket_taxes(
    config: &RateConfiguration,
    taxable_income: Decimal,
) -> Vec<BracketTax> {
    config
        .brackets()
        .map(|bracket| {
            let amount = portion_between(taxable_income, bracket.floor, bracket.ceiling);
            BracketTax {
                bracket,
                amount,
                tax: amount * bracket.rate,
            }
        })
        .collect()
}

/// Total slab tax on `taxable_income`, before surcharge and cess.
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::FiscalYearVariant;
/// use takehome_core::calculations::slabs::slab_tax;
///
/// let config = FiscalYearVariant::Fy2018_19.rate_configuration();
///
/// // 250 × 5% + 500 × 20% + 40 × 30%
/// assert_eq!(slab_tax(&config, dec!(1040)), dec!(124.5));
/// ```
pub fn slab_tax(
    config: &RateConfiguration,
    taxable_income: Decimal,
) -> Decimal {
    config
        .brackets()
        .map(|bracket| {
            portion_between(taxable_income, bracket.floor, bracket.ceiling) * bracket.rate
        })
        .sum()
}
