pub mod calculator;
pub mod schedule;
pub mod validation;

#[cfg(test)]
mod props;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::LoanType;
use crate::decimal::{Money, Percentage};
use crate::errors::Result;
use crate::types::{Currency, InterestMethod};

pub use calculator::{
    apply_loan_type, recalc_default_charges, recalc_principal, recalc_upfront,
    LoanTermsCalculator, LoanTypeTerms,
};
pub use schedule::{Installment, RepaymentSchedule};
pub use validation::validate_draft;

/// loan form as currently edited, any numeric field may still be blank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub loan_type: LoanType,
    pub currency: Currency,
    pub amount: Option<Decimal>,
    pub term_months: Option<i64>,
    pub purpose: String,
    pub interest_rate: Option<Decimal>,
    pub upfront_percentage: Option<Decimal>,
    pub default_charges_percentage: Option<Decimal>,
}

impl LoanDraft {
    pub fn new(loan_type: LoanType, currency: Currency) -> Self {
        Self {
            loan_type,
            currency,
            amount: None,
            term_months: None,
            purpose: String::new(),
            interest_rate: None,
            upfront_percentage: None,
            default_charges_percentage: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_term(mut self, term_months: i64) -> Self {
        self.term_months = Some(term_months);
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn with_upfront_percentage(mut self, pct: Decimal) -> Self {
        self.upfront_percentage = Some(pct);
        self
    }

    pub fn with_default_charges_percentage(mut self, pct: Decimal) -> Self {
        self.default_charges_percentage = Some(pct);
        self
    }
}

/// read a numeric form field, blank or non-numeric text is a missing value
pub fn parse_input(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// validated loan with every derived field filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_type: LoanType,
    pub currency: Currency,
    pub amount: Money,
    pub term_months: u32,
    pub purpose: String,
    pub interest_rate: Percentage,
    pub interest_method: InterestMethod,
    pub upfront_percentage: Percentage,
    pub upfront_amount: Money,
    pub principal: Money,
    pub default_charges_percentage: Option<Percentage>,
    pub default_charges_amount: Money,
}

impl LoanApplication {
    /// monthly repayment plan starting the month after `start_date`
    pub fn schedule(&self, start_date: NaiveDate) -> Result<RepaymentSchedule> {
        RepaymentSchedule::generate(
            self.amount,
            self.interest_rate,
            self.term_months,
            self.interest_method,
            start_date,
        )
    }

    /// fees withheld or charged on top of the disbursement
    pub fn total_charges(&self) -> Money {
        self.upfront_amount + self.default_charges_amount
    }
}
