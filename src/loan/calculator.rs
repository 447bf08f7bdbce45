use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LoanType, LoanTypeConfig, LoanTypeTable, ValidationRules};
use crate::decimal::{Money, Percentage};
use crate::errors::{EngineError, Result, ValidationErrors};
use crate::events::{Event, EventStore};
use crate::types::InterestMethod;

use super::validation::validate_draft;
use super::{LoanApplication, LoanDraft};

/// terms taken from a loan type, plus the amounts derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTypeTerms {
    pub interest_rate: Percentage,
    pub upfront_percentage: Percentage,
    pub interest_method: InterestMethod,
    /// `None` when no amount has been entered yet
    pub upfront_amount: Option<Money>,
    pub principal: Option<Money>,
}

/// reset rate, upfront percentage and method from `config`, deriving
/// upfront fee and principal when an amount is present
pub fn apply_loan_type(amount: Option<Decimal>, config: &LoanTypeConfig) -> LoanTypeTerms {
    let (upfront_amount, principal) = match amount {
        Some(amount) => {
            let upfront = recalc_upfront(Some(amount), Some(config.upfront_percentage.as_decimal()));
            (Some(upfront), Some(recalc_principal(Money::from_decimal(amount), upfront)))
        }
        None => (None, None),
    };

    LoanTypeTerms {
        interest_rate: config.interest_rate,
        upfront_percentage: config.upfront_percentage,
        interest_method: config.interest_method,
        upfront_amount,
        principal,
    }
}

/// `amount * upfront_percentage / 100`, zero if either is missing
pub fn recalc_upfront(amount: Option<Decimal>, upfront_percentage: Option<Decimal>) -> Money {
    match (amount, upfront_percentage) {
        (Some(amount), Some(pct)) => percent_of(amount, pct),
        _ => Money::ZERO,
    }
}

/// disbursed amount, never below zero
pub fn recalc_principal(amount: Money, upfront_amount: Money) -> Money {
    (amount - upfront_amount).max(Money::ZERO)
}

/// `principal * pct / 100`, zero if `pct` is missing
pub fn recalc_default_charges(principal: Money, pct: Option<Decimal>) -> Money {
    match pct {
        Some(pct) => percent_of(principal.as_decimal(), pct),
        None => Money::ZERO,
    }
}

fn percent_of(amount: Decimal, pct: Decimal) -> Money {
    Money::from_decimal(amount.saturating_mul(pct / Decimal::ONE_HUNDRED))
}

fn checked_percent_of(amount: Money, pct: Decimal) -> Result<Money> {
    amount
        .checked_mul(pct / Decimal::ONE_HUNDRED)
        .ok_or_else(|| EngineError::Calculation {
            message: format!("{amount} * {pct}% overflows"),
        })
}

/// live figures shown while a draft is being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPreview {
    pub upfront_amount: Money,
    pub principal: Money,
    pub default_charges_amount: Money,
}

/// turns loan drafts into fully derived applications
#[derive(Debug, Clone, Default)]
pub struct LoanTermsCalculator {
    table: LoanTypeTable,
    rules: ValidationRules,
}

impl LoanTermsCalculator {
    pub fn new(table: LoanTypeTable, rules: ValidationRules) -> Self {
        Self { table, rules }
    }

    pub fn table(&self) -> &LoanTypeTable {
        &self.table
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// switch the draft to `loan_type`, resetting the rate and percentages
    pub fn select_loan_type(&self, draft: &LoanDraft, loan_type: LoanType) -> LoanDraft {
        let config = self.table.get(loan_type);
        let terms = apply_loan_type(draft.amount, config);

        LoanDraft {
            loan_type,
            interest_rate: Some(terms.interest_rate.as_decimal()),
            upfront_percentage: Some(terms.upfront_percentage.as_decimal()),
            default_charges_percentage: if config.has_default_charges {
                draft
                    .default_charges_percentage
                    .or(config.default_charges_percentage.map(|p| p.as_decimal()))
            } else {
                None
            },
            ..draft.clone()
        }
    }

    /// recompute derived amounts without validating, blanks count as zero
    pub fn preview(&self, draft: &LoanDraft) -> LoanPreview {
        let config = self.table.get(draft.loan_type);
        let upfront_pct = draft
            .upfront_percentage
            .or(Some(config.upfront_percentage.as_decimal()));

        let upfront_amount = recalc_upfront(draft.amount, upfront_pct);
        let principal = recalc_principal(
            draft.amount.map(Money::from_decimal).unwrap_or(Money::ZERO),
            upfront_amount,
        );
        let default_charges_amount = if config.has_default_charges {
            recalc_default_charges(principal, self.default_charges_pct(draft, config))
        } else {
            Money::ZERO
        };

        LoanPreview {
            upfront_amount,
            principal,
            default_charges_amount,
        }
    }

    pub fn validate(&self, draft: &LoanDraft) -> std::result::Result<(), ValidationErrors> {
        validate_draft(draft, &self.rules)
    }

    /// validate the draft, then derive every field from it in one pass
    pub fn calculate(&self, draft: &LoanDraft, events: &mut EventStore) -> Result<LoanApplication> {
        self.validate(draft)?;

        let config = self.table.get(draft.loan_type);
        let (amount, term_months) = match (draft.amount, draft.term_months) {
            (Some(amount), Some(term)) => (amount, term),
            _ => {
                return Err(EngineError::Calculation {
                    message: "validated draft is missing amount or term".to_string(),
                })
            }
        };
        let term_months = u32::try_from(term_months).map_err(|_| EngineError::Calculation {
            message: format!("term out of range: {term_months}"),
        })?;

        let interest_rate = draft
            .interest_rate
            .map(Percentage::from_decimal_unchecked)
            .unwrap_or(config.interest_rate);
        let upfront_percentage = draft
            .upfront_percentage
            .map(Percentage::from_decimal_unchecked)
            .unwrap_or(config.upfront_percentage);

        let amount = Money::from_decimal(amount);
        let upfront_amount = checked_percent_of(amount, upfront_percentage.as_decimal())?;
        let principal = recalc_principal(amount, upfront_amount);

        let (default_charges_percentage, default_charges_amount) = if config.has_default_charges {
            match self.default_charges_pct(draft, config) {
                Some(pct) => (
                    Some(Percentage::from_decimal_unchecked(pct)),
                    checked_percent_of(principal, pct)?,
                ),
                None => (None, Money::ZERO),
            }
        } else {
            (None, Money::ZERO)
        };

        debug!(
            loan_type = %draft.loan_type,
            currency = %draft.currency,
            %amount,
            %upfront_amount,
            %principal,
            %default_charges_amount,
            "loan terms recalculated"
        );

        events.emit(Event::LoanTermsRecalculated {
            loan_type: draft.loan_type,
            currency: draft.currency,
            amount,
            upfront_amount,
            principal,
            default_charges_amount,
        });

        Ok(LoanApplication {
            loan_type: draft.loan_type,
            currency: draft.currency,
            amount,
            term_months,
            purpose: draft.purpose.trim().to_string(),
            interest_rate,
            interest_method: config.interest_method,
            upfront_percentage,
            upfront_amount,
            principal,
            default_charges_percentage,
            default_charges_amount,
        })
    }

    fn default_charges_pct(&self, draft: &LoanDraft, config: &LoanTypeConfig) -> Option<Decimal> {
        draft
            .default_charges_percentage
            .or(config.default_charges_percentage.map(|p| p.as_decimal()))
    }
}
