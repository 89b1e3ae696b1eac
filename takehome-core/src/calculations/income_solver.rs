//! Net-to-gross inversion of the [`TaxModel`].
//!
//! Take-home pay never falls as gross income rises (every rate table that
//! passes validation keeps the combined marginal rate below 1), so the
//! smallest gross income meeting a target can be found by exponential search
//! for an upper bound followed by bisection. The result is the same as
//! stepping one unit at a time from zero, in O(log gross) model evaluations.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use takehome_core::{EarnerKind, FiscalYearVariant, IncomeSolver};
//!
//! let config = FiscalYearVariant::Fy2021_22Marginal.rate_configuration();
//! let solver = IncomeSolver::new(&config);
//!
//! let solution = solver.solve(dec!(110393), EarnerKind::Consultant).unwrap();
//!
//! assert_eq!(solution.gross_income, dec!(160664));
//! assert_eq!(solution.assessment.take_home, dec!(110393));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::calculations::tax_model::{Assessment, TaxModel, TaxModelError};
use crate::models::{EarnerKind, RateConfiguration};

/// Highest gross income the solver will try, in the rate table's unit.
pub const DEFAULT_SEARCH_CEILING: u64 = 1_000_000_000_000;

/// Errors that can occur while inverting the tax model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeSolverError {
    #[error("search ceiling must be at least 1")]
    InvalidSearchCeiling,

    /// No gross income up to the ceiling reaches the target.
    #[error("no gross income up to {ceiling} yields a net income of {target}")]
    Unreachable { target: Decimal, ceiling: Decimal },

    #[error(transparent)]
    Model(#[from] TaxModelError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub search_ceiling: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search_ceiling: DEFAULT_SEARCH_CEILING,
        }
    }
}

/// Smallest gross income whose take-home pay meets the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossIncomeSolution {
    pub target_net_income: Decimal,
    pub gross_income: Decimal,
    /// First doubled bound found to meet the target; zero when no search ran.
    pub upper_bound: Decimal,
    /// Breakdown at `gross_income`.
    pub assessment: Assessment,
    /// Number of model evaluations spent.
    pub evaluations: u32,
}

/// Finds gross incomes for target net incomes under one rate table.
#[derive(Debug, Clone, Copy)]
pub struct IncomeSolver<'a> {
    model: TaxModel<'a>,
    config: SolverConfig,
}

impl<'a> IncomeSolver<'a> {
    pub fn new(rates: &'a RateConfiguration) -> Self {
        Self::with_config(rates, SolverConfig::default())
    }

    pub fn with_config(
        rates: &'a RateConfiguration,
        config: SolverConfig,
    ) -> Self {
        Self {
            model: TaxModel::new(rates),
            config,
        }
    }

    /// Finds the smallest non-negative whole gross income whose take-home
    /// pay is at least `target_net_income`.
    ///
    /// A target of zero or less is met by a gross income of zero.
    ///
    /// # Errors
    ///
    /// * [`IncomeSolverError::Model`] if the rate configuration is invalid.
    /// * [`IncomeSolverError::InvalidSearchCeiling`] if the ceiling is zero.
    /// * [`IncomeSolverError::Unreachable`] if even the ceiling falls short.
    pub fn solve(
        &self,
        target_net_income: Decimal,
        earner: EarnerKind,
    ) -> Result<GrossIncomeSolution, IncomeSolverError> {
        self.model
            .config()
            .validate()
            .map_err(TaxModelError::from)?;
        if self.config.search_ceiling == 0 {
            return Err(IncomeSolverError::InvalidSearchCeiling);
        }

        let mut evaluations = 0;
        let mut meets_target = |gross: u64| {
            evaluations += 1;
            self.model.compute(Decimal::from(gross), earner).take_home >= target_net_income
        };

        let (gross, upper_bound) = if target_net_income <= Decimal::ZERO || meets_target(0) {
            (0, 0)
        } else {
            let (lo, hi) = self.bracket_target(target_net_income, &mut meets_target)?;
            debug!(target = %target_net_income, lo, hi, "bracketed gross income");
            (bisect(lo, hi, &mut meets_target), hi)
        };

        let gross_income = Decimal::from(gross);
        let assessment = self.model.compute(gross_income, earner);
        evaluations += 1;

        debug!(
            earner = %earner,
            target = %target_net_income,
            gross = %gross_income,
            evaluations,
            "solved gross income"
        );
        if let Some(notice) = &assessment.unmodeled_regime {
            warn!(
                taxable = %notice.taxable_income,
                ceiling = %notice.modeled_ceiling,
                "ignoring surcharge tiers above the modeled ceiling"
            );
        }

        Ok(GrossIncomeSolution {
            target_net_income,
            gross_income,
            upper_bound: Decimal::from(upper_bound),
            assessment,
            evaluations,
        })
    }

    /// Gross income for `target_net_income`, without the breakdown.
    ///
    /// # Errors
    ///
    /// Same as [`IncomeSolver::solve`].
    pub fn gross_income_for(
        &self,
        target_net_income: Decimal,
        earner: EarnerKind,
    ) -> Result<Decimal, IncomeSolverError> {
        self.solve(target_net_income, earner)
            .map(|s| s.gross_income)
    }

    /// Doubles an upper bound from 1 until it meets the target.
    ///
    /// Returns `(lo, hi)` where `lo` is known to fall short and `hi` to meet
    /// the target.
    fn bracket_target(
        &self,
        target_net_income: Decimal,
        meets_target: &mut impl FnMut(u64) -> bool,
    ) -> Result<(u64, u64), IncomeSolverError> {
        let ceiling = self.config.search_ceiling;
        let mut lo = 0;
        let mut hi = 1.min(ceiling);

        while !meets_target(hi) {
            if hi >= ceiling {
                return Err(IncomeSolverError::Unreachable {
                    target: target_net_income,
                    ceiling: Decimal::from(ceiling),
                });
            }
            lo = hi;
            hi = hi.saturating_mul(2).min(ceiling);
        }

        Ok((lo, hi))
    }
}

/// Narrows `(lo, hi]` to the first value meeting the target.
fn bisect(
    mut lo: u64,
    mut hi: u64,
    meets_target: &mut impl FnMut(u64) -> bool,
) -> u64 {
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let met = meets_target(mid);
        trace!(lo, hi, mid, met, "bisecting gross income");
        if met {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Smallest whole gross income under `config` whose take-home pay is at
/// least `target_net_income`.
///
/// # Errors
///
/// Returns [`IncomeSolverError`] if the configuration is invalid or the target
/// cannot be reached below [`DEFAULT_SEARCH_CEILING`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::{EarnerKind, FiscalYearVariant, gross_income_for};
///
/// let config = FiscalYearVariant::Fy2021_22Marginal.rate_configuration();
///
/// // What fee to quote to keep 160,664 a month.
/// let gross = gross_income_for(dec!(160664), &config, EarnerKind::Consultant).unwrap();
///
/// assert_eq!(gross, dec!(233732));
/// ```
pub fn gross_income_for(
    target_net_income: Decimal,
    config: &RateConfiguration,
    earner: EarnerKind,
) -> Result<Decimal, IncomeSolverError> {
    IncomeSolver::new(config).gross_income_for(target_net_income, earner)
}
