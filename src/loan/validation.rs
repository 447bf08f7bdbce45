use rust_decimal::Decimal;

use crate::config::ValidationRules;
use crate::decimal::{Money, Percentage};
use crate::errors::{Field, ValidationError, ValidationErrors};

use super::LoanDraft;

/// check every field of the draft, collecting all failures
pub fn validate_draft(
    draft: &LoanDraft,
    rules: &ValidationRules,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match draft.amount {
        None => errors.push(Field::Amount, ValidationError::MissingField),
        Some(amount) if amount <= Decimal::ZERO => errors.push(
            Field::Amount,
            ValidationError::InvalidLoanAmount {
                amount: Money::from_decimal(amount),
            },
        ),
        Some(_) => {}
    }

    match draft.term_months {
        None => errors.push(Field::TermMonths, ValidationError::MissingField),
        Some(term) if term < i64::from(rules.min_term_months) => errors.push(
            Field::TermMonths,
            ValidationError::InvalidTerm {
                term_months: term,
                minimum: rules.min_term_months,
            },
        ),
        Some(term) if term > i64::from(rules.max_term_months) => errors.push(
            Field::TermMonths,
            ValidationError::TermTooLong {
                term_months: term,
                maximum: rules.max_term_months,
            },
        ),
        Some(_) => {}
    }

    let purpose_len = draft.purpose.trim().chars().count();
    if purpose_len < rules.min_purpose_len {
        errors.push(
            Field::Purpose,
            ValidationError::PurposeTooShort {
                length: purpose_len,
                minimum: rules.min_purpose_len,
            },
        );
    }

    let percentages = [
        (Field::InterestRate, draft.interest_rate),
        (Field::UpfrontPercentage, draft.upfront_percentage),
        (Field::DefaultChargesPercentage, draft.default_charges_percentage),
    ];
    for (field, value) in percentages {
        if let Some(value) = value {
            if let Err(e) = Percentage::new(value) {
                errors.push(field, e);
            }
        }
    }

    errors.into_result()
}
