use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Money;

/// field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("loan amount must be a positive number, got {amount}")]
    InvalidLoanAmount {
        amount: Money,
    },

    #[error("term must be at least {minimum} month(s), got {term_months}")]
    InvalidTerm {
        term_months: i64,
        minimum: u32,
    },

    #[error("term must be at most {maximum} month(s), got {term_months}")]
    TermTooLong {
        term_months: i64,
        maximum: u32,
    },

    #[error("purpose must be at least {minimum} characters, got {length}")]
    PurposeTooShort {
        length: usize,
        minimum: usize,
    },

    #[error("percentage must be between 0 and 100, got {value}")]
    PercentageOutOfRange {
        value: Decimal,
    },

    #[error("required field is missing")]
    MissingField,

    #[error("dues payment must be positive, got {amount}")]
    InvalidDuesPayment {
        amount: Money,
    },

    #[error("dues payment {amount} exceeds outstanding balance {outstanding}")]
    DuesPaymentExceedsBalance {
        amount: Money,
        outstanding: Money,
    },
}

/// form field a validation error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    TermMonths,
    Purpose,
    InterestRate,
    UpfrontPercentage,
    DefaultChargesPercentage,
    LoanType,
    TotalDues,
    PaymentAmount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::TermMonths => "term_months",
            Field::Purpose => "purpose",
            Field::InterestRate => "interest_rate",
            Field::UpfrontPercentage => "upfront_percentage",
            Field::DefaultChargesPercentage => "default_charges_percentage",
            Field::LoanType => "loan_type",
            Field::TotalDues => "total_dues",
            Field::PaymentAmount => "payment_amount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub error: ValidationError,
}

/// every failing field from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(field: Field, error: ValidationError) -> Self {
        Self(vec![FieldError { field, error }])
    }

    pub fn push(&mut self, field: Field, error: ValidationError) {
        self.0.push(FieldError { field, error });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// first error reported for a field
    pub fn for_field(&self, field: Field) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.error)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown loan type: {name}")]
    UnknownLoanType {
        name: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// validation errors carried by this error, if any
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            EngineError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
