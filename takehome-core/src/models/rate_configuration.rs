use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`RateConfiguration`] breaks one of its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateConfigError {
    /// There must be exactly one more slab rate than slab boundaries.
    #[error("expected {expected} slab rates for {boundaries} boundaries, got {actual}")]
    SlabRateCount {
        boundaries: usize,
        expected: usize,
        actual: usize,
    },

    #[error("slab boundary must be non-negative, got {0}")]
    NegativeSlabBoundary(Decimal),

    #[error("slab boundaries must be strictly increasing, got {next} after {previous}")]
    NonIncreasingSlabBoundary { previous: Decimal, next: Decimal },

    #[error("slab rate must be between 0 and 1 (exclusive of 1), got {0}")]
    InvalidSlabRate(Decimal),

    /// Slab rates must be progressive.
    #[error("slab rates must be non-decreasing, got {next} after {previous}")]
    DecreasingSlabRates { previous: Decimal, next: Decimal },

    #[error("cess rate must be between 0 and 1 (exclusive of 1), got {0}")]
    InvalidCessRate(Decimal),

    #[error("surcharge rate must be between 0 and 1 (exclusive of 1), got {0}")]
    InvalidSurchargeRate(Decimal),

    #[error("GST rate must be between 0 and 1 (exclusive of 1), got {0}")]
    InvalidGstRate(Decimal),

    #[error("provident fund rate must be between 0 and 1 (exclusive of 1), got {0}")]
    InvalidPfRate(Decimal),

    #[error("presumptive rate must be between 0 and 1 (exclusive of 0), got {0}")]
    InvalidPresumptiveRate(Decimal),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("surcharge ceiling {ceiling} is below the surcharge threshold {threshold}")]
    SurchargeCeilingBelowThreshold { ceiling: Decimal, threshold: Decimal },

    #[error("reporting period must be greater than zero")]
    ZeroPeriod,

    /// Net income would fall as gross income rises.
    #[error("combined top marginal rate {0} must be below 1")]
    ConfiscatoryMarginalRate(Decimal),

    /// Uncapped PF contributions above the surcharge threshold would let
    /// marginal relief push net income down.
    #[error("provident fund cap {pf_cap} must not exceed {limit} while surcharge applies")]
    PfCapAboveSurchargeThreshold { pf_cap: Decimal, limit: Decimal },
}

/// Order in which a consultant's absorbed GST and the presumptive reduction
/// are applied when deriving taxable income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstTreatment {
    /// `(gross - gst) * presumptive_rate`
    #[default]
    ExcludedBeforePresumptive,
    /// `gross * presumptive_rate - gst`
    ExcludedAfterPresumptive,
}

/// One progressive bracket derived from the slab boundaries.
///
/// `floor` is exclusive: income exactly at a boundary belongs to the lower
/// bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBracket {
    pub floor: Decimal,
    pub ceiling: Option<Decimal>,
    pub rate: Decimal,
}

/// Immutable rate table for one fiscal-year variant.
///
/// All monetary amounts are annual and expressed in the variant's unit
/// (rupees, or thousands of rupees). `period` only converts the final net
/// figure into the reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfiguration {
    pub slab_boundaries: Vec<Decimal>,
    pub slab_rates: Vec<Decimal>,
    pub cess_rate: Decimal,
    pub surcharge_threshold: Decimal,
    pub surcharge_rate: Decimal,
    /// Top of the modeled surcharge tier. Taxable income above it raises
    /// an unmodeled-regime notice.
    pub surcharge_ceiling: Decimal,
    /// Taxable income up to which no income tax is due. Just above it, income
    /// tax is capped so take-home pay never drops below its value at the
    /// limit.
    pub rebate_limit: Option<Decimal>,
    pub professional_tax: Decimal,
    /// Whether professional tax is subtracted before computing income tax.
    pub professional_tax_deductible: bool,
    pub presumptive_rate: Decimal,
    pub gst_rate: Decimal,
    pub gst_treatment: GstTreatment,
    pub employee_deduction: Decimal,
    pub pf_rate: Decimal,
    pub pf_cap: Decimal,
    pub period: u32,
}

impl RateConfiguration {
    /// Validates every invariant the tax model and solver rely on.
    ///
    /// The rebate needs no guard of its own: its cap already gives back the
    /// provident fund earned above the limit, so take-home stays flat while
    /// the cap binds.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`RateConfigError`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use takehome_core::{FiscalYearVariant, RateConfigError};
    ///
    /// let mut config = FiscalYearVariant::Fy2018_19.rate_configuration();
    /// assert_eq!(config.validate(), Ok(()));
    ///
    /// config.slab_boundaries = vec![dec!(500), dec!(250), dec!(1000)];
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(RateConfigError::NonIncreasingSlabBoundary {
    ///         previous: dec!(500),
    ///         next: dec!(250),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), RateConfigError> {
        self.validate_slabs()?;

        if !is_fraction(self.cess_rate) {
            return Err(RateConfigError::InvalidCessRate(self.cess_rate));
        }
        if !is_fraction(self.surcharge_rate) {
            return Err(RateConfigError::InvalidSurchargeRate(self.surcharge_rate));
        }
        if !is_fraction(self.gst_rate) {
            return Err(RateConfigError::InvalidGstRate(self.gst_rate));
        }
        if !is_fraction(self.pf_rate) {
            return Err(RateConfigError::InvalidPfRate(self.pf_rate));
        }
        if self.presumptive_rate <= Decimal::ZERO || self.presumptive_rate > Decimal::ONE {
            return Err(RateConfigError::InvalidPresumptiveRate(
                self.presumptive_rate,
            ));
        }

        for (field, value) in [
            ("surcharge threshold", self.surcharge_threshold),
            ("professional tax", self.professional_tax),
            ("employee deduction", self.employee_deduction),
            ("provident fund cap", self.pf_cap),
            ("rebate limit", self.rebate_limit.unwrap_or_default()),
        ] {
            if value < Decimal::ZERO {
                return Err(RateConfigError::NegativeAmount { field, value });
            }
        }

        if self.surcharge_ceiling < self.surcharge_threshold {
            return Err(RateConfigError::SurchargeCeilingBelowThreshold {
                ceiling: self.surcharge_ceiling,
                threshold: self.surcharge_threshold,
            });
        }
        if self.period == 0 {
            return Err(RateConfigError::ZeroPeriod);
        }

        let marginal = self.top_marginal_rate();
        if marginal >= Decimal::ONE {
            return Err(RateConfigError::ConfiscatoryMarginalRate(marginal));
        }

        if self.pf_rate > Decimal::ZERO && self.surcharge_rate > Decimal::ZERO {
            let limit = self.surcharge_threshold + self.employee_deduction;
            if self.pf_cap > limit {
                return Err(RateConfigError::PfCapAboveSurchargeThreshold {
                    pf_cap: self.pf_cap,
                    limit,
                });
            }
        }

        Ok(())
    }

    fn validate_slabs(&self) -> Result<(), RateConfigError> {
        let expected = self.slab_boundaries.len() + 1;
        if self.slab_rates.len() != expected {
            return Err(RateConfigError::SlabRateCount {
                boundaries: self.slab_boundaries.len(),
                expected,
                actual: self.slab_rates.len(),
            });
        }

        if let Some(first) = self.slab_boundaries.first() {
            if *first < Decimal::ZERO {
                return Err(RateConfigError::NegativeSlabBoundary(*first));
            }
        }
        for pair in self.slab_boundaries.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RateConfigError::NonIncreasingSlabBoundary {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        for rate in &self.slab_rates {
            if !is_fraction(*rate) {
                return Err(RateConfigError::InvalidSlabRate(*rate));
            }
        }
        for pair in self.slab_rates.windows(2) {
            if pair[1] < pair[0] {
                return Err(RateConfigError::DecreasingSlabRates {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        Ok(())
    }

    /// Brackets in ascending order; the last one is unbounded.
    pub fn brackets(&self) -> impl Iterator<Item = SlabBracket> + '_ {
        self.slab_rates.iter().enumerate().map(|(i, rate)| {
            let floor = if i == 0 {
                Decimal::ZERO
            } else {
                self.slab_boundaries[i - 1]
            };
            SlabBracket {
                floor,
                ceiling: self.slab_boundaries.get(i).copied(),
                rate: *rate,
            }
        })
    }

    /// Share of a GST-inclusive fee that goes to GST: `r / (1 + r)`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use takehome_core::FiscalYearVariant;
    ///
    /// let config = FiscalYearVariant::Fy2018_19Gst.rate_configuration();
    /// assert_eq!(config.effective_gst_rate().round_dp(4), dec!(0.1525));
    /// ```
    pub fn effective_gst_rate(&self) -> Decimal {
        if self.gst_rate.is_zero() {
            return Decimal::ZERO;
        }
        self.gst_rate / (Decimal::ONE + self.gst_rate)
    }

    pub fn presumptive_enabled(&self) -> bool {
        self.presumptive_rate < Decimal::ONE
    }

    pub fn top_slab_rate(&self) -> Decimal {
        self.slab_rates.last().copied().unwrap_or(Decimal::ZERO)
    }

    /// Highest share of an extra unit of gross income that any stage can take.
    pub fn top_marginal_rate(&self) -> Decimal {
        self.top_slab_rate()
            * (Decimal::ONE + self.surcharge_rate)
            * (Decimal::ONE + self.cess_rate)
            + self.pf_rate
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate < Decimal::ONE
}
