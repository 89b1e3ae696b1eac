//! The gross-to-net pipeline and its inverse.
//!
//! [`tax_model`] applies the deduction stages of a rate table to a gross
//! income; [`income_solver`] searches for the gross income that yields a
//! desired net income.

pub mod common;
pub mod income_solver;
pub mod slabs;
pub mod tax_model;

pub use income_solver::{
    DEFAULT_SEARCH_CEILING, GrossIncomeSolution, IncomeSolver, IncomeSolverError, SolverConfig,
    gross_income_for,
};
pub use slabs::BracketTax;
pub use tax_model::{Assessment, TaxModel, TaxModelError, UnmodeledRegime, net_income_for};
