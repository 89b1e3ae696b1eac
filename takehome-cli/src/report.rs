//! Human-readable rendering of assessments and solutions.

use rust_decimal::Decimal;
use serde::Serialize;
use takehome_core::{Assessment, CurrencyUnit, EarnerKind, FiscalYearVariant, GrossIncomeSolution};

/// Employee and consultant take-home pay for the same cost to company.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub year: FiscalYearVariant,
    pub ctc: Decimal,
    pub employee: Assessment,
    pub consultant: Assessment,
}

/// Formats an amount in the unit of the rate table.
///
/// Rupee amounts print as `₹N`. Amounts in thousands print as `NK`, or as
/// `N lac` from one lakh upwards.
pub fn format_amount(
    amount: Decimal,
    unit: CurrencyUnit,
) -> String {
    match unit {
        CurrencyUnit::Rupees => format!("₹{}", amount.normalize()),
        CurrencyUnit::ThousandRupees if amount >= Decimal::ONE_HUNDRED => {
            format!("{} lac", (amount / Decimal::ONE_HUNDRED).normalize())
        }
        CurrencyUnit::ThousandRupees => format!("{}K", amount.normalize()),
    }
}

pub fn net_sentence(
    year: FiscalYearVariant,
    assessment: &Assessment,
) -> String {
    let unit = year.currency_unit();
    format!(
        "For a {} of {} {}, {} takes home {} a month.",
        gross_label(assessment.earner),
        format_amount(assessment.gross_income, unit),
        gross_basis(year),
        earner_phrase(assessment.earner),
        format_amount(assessment.take_home, unit),
    )
}

pub fn gross_sentence(
    year: FiscalYearVariant,
    solution: &GrossIncomeSolution,
) -> String {
    let unit = year.currency_unit();
    let earner = solution.assessment.earner;
    let verb = match earner {
        EarnerKind::Employee => "should aim for",
        EarnerKind::Consultant => "should quote",
    };
    format!(
        "For a net income of {} a month, {} {} a {} of {} {}.",
        format_amount(solution.target_net_income, unit),
        earner_phrase(earner),
        verb,
        gross_label(earner),
        format_amount(solution.gross_income, unit),
        gross_basis(year),
    )
}

pub fn comparison_sentence(comparison: &Comparison) -> String {
    let unit = comparison.year.currency_unit();
    format!(
        "For a CTC of {} {}, an employee takes home {}, while a consultant takes home {}, each month.",
        format_amount(comparison.ctc, unit),
        gross_basis(comparison.year),
        format_amount(comparison.employee.take_home, unit),
        format_amount(comparison.consultant.take_home, unit),
    )
}

fn gross_label(earner: EarnerKind) -> &'static str {
    match earner {
        EarnerKind::Employee => "CTC",
        EarnerKind::Consultant => "fee",
    }
}

fn earner_phrase(earner: EarnerKind) -> &'static str {
    match earner {
        EarnerKind::Employee => "an employee",
        EarnerKind::Consultant => "a consultant",
    }
}

/// How often the gross figures of a variant are earned.
fn gross_basis(year: FiscalYearVariant) -> &'static str {
    match year {
        FiscalYearVariant::Fy2018_19 | FiscalYearVariant::Fy2018_19Gst => "a year",
        FiscalYearVariant::Fy2021_22Marginal => "a month",
    }
}
