use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rate_configuration::{GstTreatment, RateConfiguration};

/// Unit every amount of a variant is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyUnit {
    Rupees,
    ThousandRupees,
}

/// The hardcoded rate tables shipped with the engine.
///
/// | Variant | Unit | Figures | Period |
/// |---------|------|---------|--------|
/// | `Fy2018_19` | thousands of rupees | annual | monthly net |
/// | `Fy2018_19Gst` | thousands of rupees | annual | monthly net |
/// | `Fy2021_22Marginal` | rupees | monthly | monthly net |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiscalYearVariant {
    /// Old-regime slabs for FY 2018-19, no GST.
    #[serde(rename = "fy2018-19")]
    Fy2018_19,
    /// FY 2018-19 for a consultant who absorbs 18% GST instead of passing it on.
    #[serde(rename = "fy2018-19-gst")]
    Fy2018_19Gst,
    /// FY 2021-22 marginal model: every extra rupee lands in the 30% slab.
    #[serde(rename = "fy2021-22-marginal")]
    Fy2021_22Marginal,
}

impl FiscalYearVariant {
    pub const ALL: [FiscalYearVariant; 3] = [
        FiscalYearVariant::Fy2018_19,
        FiscalYearVariant::Fy2018_19Gst,
        FiscalYearVariant::Fy2021_22Marginal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fy2018_19 => "fy2018-19",
            Self::Fy2018_19Gst => "fy2018-19-gst",
            Self::Fy2021_22Marginal => "fy2021-22-marginal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn currency_unit(&self) -> CurrencyUnit {
        match self {
            Self::Fy2018_19 | Self::Fy2018_19Gst => CurrencyUnit::ThousandRupees,
            Self::Fy2021_22Marginal => CurrencyUnit::Rupees,
        }
    }

    /// Builds the rate table for this variant.
    pub fn rate_configuration(&self) -> RateConfiguration {
        match self {
            Self::Fy2018_19 => fy2018_19(Decimal::ZERO),
            Self::Fy2018_19Gst => fy2018_19(Decimal::new(18, 2)),
            Self::Fy2021_22Marginal => fy2021_22_marginal(),
        }
    }
}

impl fmt::Display for FiscalYearVariant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annual figures in thousands of rupees.
fn fy2018_19(gst_rate: Decimal) -> RateConfiguration {
    RateConfiguration {
        slab_boundaries: vec![Decimal::from(250), Decimal::from(500), Decimal::from(1000)],
        slab_rates: vec![
            Decimal::ZERO,
            Decimal::new(5, 2),
            Decimal::new(20, 2),
            Decimal::new(30, 2),
        ],
        cess_rate: Decimal::new(4, 2),
        // 50 lakh; the 15% tier above 1 crore is not modeled.
        surcharge_threshold: Decimal::from(5000),
        surcharge_rate: Decimal::new(10, 2),
        surcharge_ceiling: Decimal::from(10_000),
        // No tax up to 5 lakh of taxable income.
        rebate_limit: Some(Decimal::from(500)),
        // Karnataka: 2500 a year.
        professional_tax: Decimal::new(25, 1),
        professional_tax_deductible: false,
        presumptive_rate: Decimal::new(5, 1),
        gst_rate,
        gst_treatment: GstTreatment::ExcludedBeforePresumptive,
        // 80C, 80D and similar, only available to employees.
        employee_deduction: Decimal::from(160),
        pf_rate: Decimal::new(2561, 4),
        pf_cap: Decimal::from(5000),
        period: 12,
    }
}

/// Monthly figures in rupees for an earner already in the 30% slab.
fn fy2021_22_marginal() -> RateConfiguration {
    let twelve = Decimal::from(12);
    let surcharge_threshold = Decimal::from(5_000_000) / twelve;

    RateConfiguration {
        slab_boundaries: vec![],
        slab_rates: vec![Decimal::new(30, 2)],
        cess_rate: Decimal::new(4, 2),
        surcharge_threshold,
        surcharge_rate: Decimal::ZERO,
        surcharge_ceiling: surcharge_threshold,
        rebate_limit: None,
        professional_tax: Decimal::from(2500) / twelve,
        professional_tax_deductible: true,
        presumptive_rate: Decimal::ONE,
        gst_rate: Decimal::ZERO,
        gst_treatment: GstTreatment::ExcludedBeforePresumptive,
        employee_deduction: Decimal::ZERO,
        pf_rate: Decimal::ZERO,
        pf_cap: Decimal::ZERO,
        period: 1,
    }
}
