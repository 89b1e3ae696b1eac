use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who earns the income. Selects which optional deduction stages apply.
///
/// Employees get the flat employee deduction and the employer provident-fund
/// contribution; consultants get GST extraction and presumptive taxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarnerKind {
    Employee,
    Consultant,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown earner kind '{0}', expected 'employee' or 'consultant'")]
pub struct UnknownEarnerKind(pub String);

impl EarnerKind {
    pub const ALL: [EarnerKind; 2] = [EarnerKind::Employee, EarnerKind::Consultant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Consultant => "consultant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "consultant" => Some(Self::Consultant),
            _ => None,
        }
    }

    pub fn is_employee(&self) -> bool {
        matches!(self, Self::Employee)
    }

    pub fn is_consultant(&self) -> bool {
        matches!(self, Self::Consultant)
    }
}

impl fmt::Display for EarnerKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EarnerKind {
    type Err = UnknownEarnerKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownEarnerKind(s.to_string()))
    }
}
