use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a client
pub type ClientId = Uuid;

/// reporting currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    LRD,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::USD, Currency::LRD];

    /// map a raw currency code onto a bucket; anything that is not `LRD` is `USD`
    pub fn normalize(code: Option<&str>) -> Currency {
        match code.map(str::trim) {
            Some(c) if c.eq_ignore_ascii_case("LRD") => Currency::LRD,
            _ => Currency::USD,
        }
    }

    /// whether `code` maps to a currency without falling back
    pub fn is_recognized(code: Option<&str>) -> bool {
        matches!(
            code.map(str::trim),
            Some(c) if c.eq_ignore_ascii_case("LRD") || c.eq_ignore_ascii_case("USD")
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::LRD => "LRD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// how interest is charged over the term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMethod {
    /// interest on the original amount every month
    Flat,
    /// interest on the remaining balance
    DecliningBalance,
}

/// normalized financial record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    SavingsBalance,
    PersonalInterestPayment,
    GeneralInterest,
    DuePayment,
    LoanPrincipal,
    LoanOutstanding,
    Penalty,
    Fee,
}

impl RecordType {
    /// income-bearing record kinds
    pub fn is_revenue(&self) -> bool {
        matches!(
            self,
            RecordType::PersonalInterestPayment
                | RecordType::GeneralInterest
                | RecordType::DuePayment
                | RecordType::Penalty
                | RecordType::Fee
        )
    }

    pub fn is_fine(&self) -> bool {
        matches!(self, RecordType::Penalty | RecordType::Fee)
    }

    /// revenue tag used when a record carries none
    pub fn revenue_source(&self) -> Option<&'static str> {
        match self {
            RecordType::PersonalInterestPayment => Some("personal_interest"),
            RecordType::GeneralInterest => Some("general_interest"),
            RecordType::DuePayment => Some("dues"),
            RecordType::Penalty => Some("penalties"),
            RecordType::Fee => Some("fees"),
            RecordType::SavingsBalance
            | RecordType::LoanPrincipal
            | RecordType::LoanOutstanding => None,
        }
    }
}

/// dues lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuesState {
    /// nothing ever assigned
    #[default]
    NoDues,
    /// balance below zero
    Outstanding,
    /// assigned and fully repaid
    Paid,
}

/// reported dues status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuesStatus {
    Outstanding,
    Paid,
}
