//! Gross-to-net computation for one earner under one rate table.
//!
//! # Stages
//!
//! | Stage | Applies to | Amount |
//! |-------|------------|--------|
//! | GST extraction | consultant | `gross × r / (1 + r)` |
//! | Taxable income | consultant | `(gross - gst) × presumptive_rate` |
//! | Taxable income | employee | `gross - employee_deduction` |
//! | Slab tax | both | sum of every bracket's slice × its rate |
//! | Surcharge | both | `slab_tax × surcharge_rate` once taxable ≥ threshold |
//! | Cess | both | `(slab_tax + surcharge) × cess_rate` |
//! | Marginal relief | both | excess of income tax over the threshold tax plus the income above the threshold |
//! | Rebate | both | all income tax at or below the rebate limit; above it, the excess over the income above the limit less the extra PF |
//! | Professional tax | both | flat annual levy |
//! | Employer PF | employee | `min(gross, pf_cap) × pf_rate` |
//! | Net | both | `(gross - gst - income_tax - professional_tax - pf) / period` |
//!
//! Surcharge and cess are both proportional, so applying the surcharge before
//! or after the cess gives the same liability. The model applies the surcharge
//! first and levies cess on the surcharged tax.
//!
//! When professional tax is deductible it is also subtracted from taxable
//! income. Taxable income never goes below zero.
//!
//! Both reliefs cap tax so that a unit of extra income never lowers take-home
//! pay: just above the surcharge threshold or the rebate limit, the extra
//! income goes to tax until the uncapped liability catches up.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use takehome_core::{EarnerKind, FiscalYearVariant, TaxModel};
//!
//! let config = FiscalYearVariant::Fy2018_19.rate_configuration();
//! let model = TaxModel::new(&config);
//!
//! // CTC of 12 lakh a year, in thousands.
//! let assessment = model.assess(dec!(1200), EarnerKind::Employee).unwrap();
//!
//! assert_eq!(assessment.taxable_income, dec!(1040));
//! assert_eq!(assessment.slab_tax, dec!(124.5));
//! assert_eq!(assessment.income_tax, dec!(129.48));
//! assert_eq!(assessment.provident_fund, dec!(307.32));
//! assert_eq!(assessment.take_home, dec!(63));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, whole_units};
use crate::calculations::slabs::{BracketTax, bracket_taxes, slab_tax};
use crate::models::{EarnerKind, GstTreatment, RateConfigError, RateConfiguration};

/// Errors that reject a tax computation before it starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxModelError {
    #[error("gross income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("invalid rate configuration: {0}")]
    InvalidConfiguration(#[from] RateConfigError),
}

/// Taxable income lies above the highest surcharge tier the rate table
/// models. The computation still uses the modeled surcharge rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmodeledRegime {
    pub taxable_income: Decimal,
    pub modeled_ceiling: Decimal,
}

impl fmt::Display for UnmodeledRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "taxable income {} exceeds the modeled surcharge ceiling {}; higher surcharge tiers are ignored",
            self.taxable_income, self.modeled_ceiling
        )
    }
}

/// Every intermediate figure of one gross-to-net computation.
///
/// All amounts except `net_income` and `take_home` are annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub earner: EarnerKind,
    pub gross_income: Decimal,

    /// GST absorbed out of pocket (consultants only).
    pub gst: Decimal,

    /// Income the slabs are applied to.
    pub taxable_income: Decimal,

    pub brackets: Vec<BracketTax>,
    pub slab_tax: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,

    /// Reduction that keeps tax above the surcharge threshold from growing
    /// faster than income.
    pub marginal_relief: Decimal,

    /// Tax waived at or just above the rebate limit.
    pub rebate: Decimal,

    /// Slab tax + surcharge + cess - marginal relief - rebate.
    pub income_tax: Decimal,

    pub professional_tax: Decimal,

    /// Employer provident-fund contribution. Reduces take-home pay but is
    /// not a tax.
    pub provident_fund: Decimal,

    /// GST + income tax + professional tax.
    pub total_tax: Decimal,

    /// Exact net income per reporting period. Negative when the flat levies
    /// exceed income.
    pub net_income: Decimal,

    /// `net_income` without fractional sub-units, truncated toward zero.
    pub take_home: Decimal,

    pub unmodeled_regime: Option<UnmodeledRegime>,
}

/// Applies a [`RateConfiguration`] to gross incomes.
///
/// The model borrows the rate table; any number of models may share one.
#[derive(Debug, Clone, Copy)]
pub struct TaxModel<'a> {
    config: &'a RateConfiguration,
}

impl<'a> TaxModel<'a> {
    pub fn new(config: &'a RateConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a RateConfiguration {
        self.config
    }

    /// Computes the full breakdown for `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxModelError`] if the gross income is negative or the rate
    /// configuration is invalid. No partial result is produced.
    pub fn assess(
        &self,
        gross_income: Decimal,
        earner: EarnerKind,
    ) -> Result<Assessment, TaxModelError> {
        self.config.validate()?;
        if gross_income < Decimal::ZERO {
            return Err(TaxModelError::NegativeIncome(gross_income));
        }

        let assessment = self.compute(gross_income, earner);

        debug!(
            earner = %earner,
            gross = %gross_income,
            taxable = %assessment.taxable_income,
            income_tax = %assessment.income_tax,
            net = %assessment.net_income,
            "assessed gross income"
        );
        if let Some(notice) = &assessment.unmodeled_regime {
            warn!(
                taxable = %notice.taxable_income,
                ceiling = %notice.modeled_ceiling,
                "ignoring surcharge tiers above the modeled ceiling"
            );
        }

        Ok(assessment)
    }

    /// Net income per period for `gross_income`, without sub-units.
    ///
    /// # Errors
    ///
    /// Same as [`TaxModel::assess`].
    pub fn net_income_for(
        &self,
        gross_income: Decimal,
        earner: EarnerKind,
    ) -> Result<Decimal, TaxModelError> {
        self.assess(gross_income, earner).map(|a| a.take_home)
    }

    /// Runs every stage. The caller guarantees a validated configuration and
    /// a non-negative income.
    pub(crate) fn compute(
        &self,
        gross_income: Decimal,
        earner: EarnerKind,
    ) -> Assessment {
        let gst = self.gst_extracted(gross_income, earner);
        let taxable_income = self.taxable_income(gross_income, gst, earner);

        let brackets = bracket_taxes(self.config, taxable_income);
        let slab_tax: Decimal = brackets.iter().map(|b| b.tax).sum();
        let surcharge = self.surcharge(slab_tax, taxable_income);
        let cess = self.cess(slab_tax + surcharge);
        let marginal_relief =
            self.marginal_relief(taxable_income, slab_tax + surcharge + cess, surcharge);
        let relieved_tax = slab_tax + surcharge + cess - marginal_relief;
        let rebate = self.rebate(gross_income, taxable_income, relieved_tax, earner);
        let income_tax = relieved_tax - rebate;

        let professional_tax = self.config.professional_tax;
        let provident_fund = self.provident_fund(gross_income, earner);
        let total_tax = gst + income_tax + professional_tax;

        let net_income = self.net_per_period(gross_income - total_tax - provident_fund);

        Assessment {
            earner,
            gross_income,
            gst,
            taxable_income,
            brackets,
            slab_tax,
            surcharge,
            cess,
            marginal_relief,
            rebate,
            income_tax,
            professional_tax,
            provident_fund,
            total_tax,
            net_income,
            take_home: whole_units(net_income),
            unmodeled_regime: self.unmodeled_regime(taxable_income),
        }
    }

    /// GST the consultant pays out of a GST-inclusive fee.
    fn gst_extracted(
        &self,
        gross_income: Decimal,
        earner: EarnerKind,
    ) -> Decimal {
        if !earner.is_consultant() {
            return Decimal::ZERO;
        }
        gross_income * self.config.effective_gst_rate()
    }

    /// Income the slabs apply to, after GST, presumptive reduction or employee
    /// deduction, and deductible professional tax.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        gst: Decimal,
        earner: EarnerKind,
    ) -> Decimal {
        let base = match earner {
            EarnerKind::Employee => gross_income - self.config.employee_deduction,
            EarnerKind::Consultant => match self.config.gst_treatment {
                GstTreatment::ExcludedBeforePresumptive => {
                    self.presumptive_share(gross_income - gst)
                }
                GstTreatment::ExcludedAfterPresumptive => {
                    self.presumptive_share(gross_income) - gst
                }
            },
        };

        let base = if self.config.professional_tax_deductible {
            base - self.config.professional_tax
        } else {
            base
        };

        non_negative(base)
    }

    fn presumptive_share(
        &self,
        income: Decimal,
    ) -> Decimal {
        if !self.config.presumptive_enabled() {
            return income;
        }
        income * self.config.presumptive_rate
    }

    /// Surcharge on slab tax once taxable income reaches the threshold.
    fn surcharge(
        &self,
        slab_tax: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income < self.config.surcharge_threshold {
            return Decimal::ZERO;
        }
        slab_tax * self.config.surcharge_rate
    }

    fn cess(
        &self,
        tax: Decimal,
    ) -> Decimal {
        tax * self.config.cess_rate
    }

    /// Amount by which `liability` exceeds the tax at the threshold plus the
    /// income earned above it. Zero when no surcharge applies.
    fn marginal_relief(
        &self,
        taxable_income: Decimal,
        liability: Decimal,
        surcharge: Decimal,
    ) -> Decimal {
        if surcharge.is_zero() {
            return Decimal::ZERO;
        }

        let threshold = self.config.surcharge_threshold;
        let at_threshold =
            slab_tax(self.config, threshold) * (Decimal::ONE + self.config.cess_rate);
        let cap = at_threshold + (taxable_income - threshold);

        non_negative(liability - cap)
    }

    /// Tax waived by the rebate.
    ///
    /// At or below the limit everything is waived. Above it, tax may not
    /// exceed the taxable income over the limit less the provident fund that
    /// income adds, which keeps take-home pay at its value at the limit until
    /// the uncapped tax is lower.
    fn rebate(
        &self,
        gross_income: Decimal,
        taxable_income: Decimal,
        tax: Decimal,
        earner: EarnerKind,
    ) -> Decimal {
        let Some(limit) = self.config.rebate_limit else {
            return Decimal::ZERO;
        };
        if taxable_income <= limit {
            return tax;
        }

        let excess = taxable_income - limit;
        let extra_pf = self.provident_fund(gross_income, earner)
            - self.provident_fund(non_negative(gross_income - excess), earner);

        non_negative(tax - (excess - extra_pf))
    }

    /// Employer provident-fund contribution on income up to the cap.
    fn provident_fund(
        &self,
        gross_income: Decimal,
        earner: EarnerKind,
    ) -> Decimal {
        if !earner.is_employee() {
            return Decimal::ZERO;
        }
        gross_income.min(self.config.pf_cap) * self.config.pf_rate
    }

    fn net_per_period(
        &self,
        annual_net: Decimal,
    ) -> Decimal {
        annual_net / Decimal::from(self.config.period)
    }

    fn unmodeled_regime(
        &self,
        taxable_income: Decimal,
    ) -> Option<UnmodeledRegime> {
        (taxable_income > self.config.surcharge_ceiling).then_some(UnmodeledRegime {
            taxable_income,
            modeled_ceiling: self.config.surcharge_ceiling,
        })
    }
}

/// Net income per period for `gross_income` under `config`.
///
/// # Errors
///
/// Returns [`TaxModelError`] for a negative income or an invalid configuration.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use takehome_core::{EarnerKind, FiscalYearVariant, net_income_for};
///
/// let config = FiscalYearVariant::Fy2021_22Marginal.rate_configuration();
/// let net = net_income_for(dec!(160664), &config, EarnerKind::Consultant).unwrap();
///
/// assert_eq!(net, dec!(110393));
/// ```
pub fn net_income_for(
    gross_income: Decimal,
    config: &RateConfiguration,
    earner: EarnerKind,
) -> Result<Decimal, TaxModelError> {
    TaxModel::new(config).net_income_for(gross_income, earner)
}
