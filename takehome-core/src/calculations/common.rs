//! Common numeric helpers shared by the tax stages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, midpoints away from zero.
///
/// Used for display only; the stages themselves keep full precision.
///
/// # Arguments
///
/// * `value` - The amount to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(208.3333)), dec!(208.33));
/// assert_eq!(round_half_up(dec!(129.475)), dec!(129.48));
/// assert_eq!(round_half_up(dec!(-208.335)), dec!(-208.34));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Drops the fractional sub-units of a reported amount, truncating toward zero.
///
/// # Arguments
///
/// * `value` - The exact net amount
///
/// # Returns
///
/// The whole-unit part of `value`, so `-208.33` becomes `-208`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::calculations::common::whole_units;
///
/// assert_eq!(whole_units(dec!(63.3917)), dec!(63));
/// assert_eq!(whole_units(dec!(-208.33)), dec!(-208));
/// ```
pub fn whole_units(value: Decimal) -> Decimal {
    value.trunc()
}

/// Floors a value at zero.
///
/// Taxable income and reliefs use this so a deduction larger than the income
/// it reduces never turns into a negative amount.
///
/// # Arguments
///
/// * `value` - The amount to floor
///
/// # Returns
///
/// `value` when it is positive, otherwise zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(440)), dec!(440));
/// assert_eq!(non_negative(dec!(-160)), dec!(0));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Portion of `value` that lies above `floor` and at or below `ceiling`.
///
/// This is the slice of taxable income a single slab bracket is charged on.
///
/// # Arguments
///
/// * `value` - The income being split across brackets
/// * `floor` - Exclusive lower bound of the bracket
/// * `ceiling` - Inclusive upper bound, or `None` for the unbounded top bracket
///
/// # Returns
///
/// Zero when `value` is at or below `floor`, otherwise the amount between
/// `floor` and the smaller of `value` and `ceiling`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::calculations::common::portion_between;
///
/// assert_eq!(portion_between(dec!(1040), dec!(250), Some(dec!(500))), dec!(250));
/// assert_eq!(portion_between(dec!(1040), dec!(1000), None), dec!(40));
/// assert_eq!(portion_between(dec!(100), dec!(250), Some(dec!(500))), dec!(0));
/// ```
pub fn portion_between(
    value: Decimal,
    floor: Decimal,
    ceiling: Option<Decimal>,
) -> Decimal {
    if value <= floor {
        return Decimal::ZERO;
    }
    match ceiling {
        Some(ceiling) => value.min(ceiling) - floor,
        None => value - floor,
    }
}
