use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::errors::{EngineError, Field, Result, ValidationError, ValidationErrors};
use crate::types::InterestMethod;

const MONTHS_PER_YEAR: u32 = 12;

/// one monthly installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub due_date: NaiveDate,
    pub beginning_balance: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub payment_amount: Money,
    pub ending_balance: Money,
}

/// monthly repayment plan for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub amount: Money,
    pub annual_rate: Percentage,
    pub term_months: u32,
    pub interest_method: InterestMethod,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl RepaymentSchedule {
    /// build the plan; principal is split evenly and the last installment
    /// absorbs rounding so the principal portions sum to `amount`
    pub fn generate(
        amount: Money,
        annual_rate: Percentage,
        term_months: u32,
        interest_method: InterestMethod,
        start_date: NaiveDate,
    ) -> Result<Self> {
        if term_months == 0 {
            return Err(ValidationErrors::single(
                Field::TermMonths,
                ValidationError::InvalidTerm {
                    term_months: 0,
                    minimum: 1,
                },
            )
            .into());
        }

        let monthly_rate = annual_rate.as_fraction() / Decimal::from(MONTHS_PER_YEAR);
        let principal_slice = amount.checked_div_count(u64::from(term_months));
        let flat_interest = amount * monthly_rate;

        let mut installments = Vec::new();
        let mut balance = amount;

        for number in 1..=term_months {
            let due_date = start_date
                .checked_add_months(Months::new(number))
                .ok_or_else(|| EngineError::Calculation {
                    message: format!("due date overflow at installment {number}"),
                })?;

            let principal_portion = if number == term_months {
                balance
            } else {
                principal_slice.min(balance)
            };
            let interest_portion = match interest_method {
                InterestMethod::Flat => flat_interest,
                InterestMethod::DecliningBalance => balance * monthly_rate,
            };
            let ending_balance = balance - principal_portion;

            installments.push(Installment {
                number,
                due_date,
                beginning_balance: balance,
                principal_portion,
                interest_portion,
                payment_amount: principal_portion + interest_portion,
                ending_balance,
            });

            balance = ending_balance;
        }

        let total_interest = installments.iter().map(|i| i.interest_portion).sum();
        let total_payment = installments.iter().map(|i| i.payment_amount).sum();

        Ok(Self {
            amount,
            annual_rate,
            term_months,
            interest_method,
            installments,
            total_interest,
            total_payment,
        })
    }

    pub fn installment(&self, number: u32) -> Option<&Installment> {
        number
            .checked_sub(1)
            .and_then(|i| self.installments.get(i as usize))
    }

    /// balance left after `number` installments, the full amount before any
    pub fn balance_after(&self, number: u32) -> Money {
        self.installment(number)
            .map(|i| i.ending_balance)
            .unwrap_or(self.amount)
    }
}
