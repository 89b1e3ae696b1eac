mod earner_kind;
mod fiscal_year;
mod rate_configuration;

pub use earner_kind::{EarnerKind, UnknownEarnerKind};
pub use fiscal_year::{CurrencyUnit, FiscalYearVariant};
pub use rate_configuration::{GstTreatment, RateConfigError, RateConfiguration, SlabBracket};
