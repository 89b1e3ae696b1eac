//! Take-home pay for resident individuals in India.
//!
//! Computes net income from gross income for employees and consultants under
//! a fiscal-year rate table, and inverts that computation to find the gross
//! income (fee or CTC) needed for a desired net income.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use takehome_core::{EarnerKind, FiscalYearVariant, gross_income_for, net_income_for};
//!
//! let config = FiscalYearVariant::Fy2018_19.rate_configuration();
//!
//! let net = net_income_for(dec!(1200), &config, EarnerKind::Consultant).unwrap();
//! let gross = gross_income_for(net, &config, EarnerKind::Consultant).unwrap();
//!
//! assert_eq!(net, dec!(96));
//! assert!(gross <= dec!(1200));
//! ```

pub mod calculations;
pub mod models;

pub use calculations::{
    Assessment, BracketTax, GrossIncomeSolution, IncomeSolver, IncomeSolverError, SolverConfig,
    TaxModel, TaxModelError, UnmodeledRegime, gross_income_for, net_income_for,
};
pub use models::*;
