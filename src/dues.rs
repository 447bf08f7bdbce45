use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::decimal::Money;
use crate::errors::{Field, Result, ValidationError, ValidationErrors};
use crate::events::{Event, EventStore};
use crate::records::FinancialRecord;
use crate::types::{ClientId, Currency, DuesState, DuesStatus, RecordType};

const MONTHS_PER_YEAR: i64 = 12;

/// yearly dues obligation of one client, `total_dues` is never positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDuesAccount {
    pub client_id: ClientId,
    pub total_dues: Money,
    /// yearly figure as last assigned, drives `monthly_dues`
    pub assigned_yearly: Money,
    pub currency: Currency,
    pub state: DuesState,
}

impl ClientDuesAccount {
    /// account that never had dues assigned
    pub fn new(client_id: ClientId, currency: Currency) -> Self {
        Self {
            client_id,
            total_dues: Money::ZERO,
            assigned_yearly: Money::ZERO,
            currency,
            state: DuesState::NoDues,
        }
    }

    /// rebuild from stored values; a positive balance is clamped to zero and
    /// the balance stands in for the yearly figure only when none was stored
    pub fn from_balance(
        client_id: ClientId,
        total_dues: Option<Decimal>,
        assigned_yearly: Option<Decimal>,
        currency: Option<&str>,
    ) -> Self {
        let stored = total_dues.map(Money::from_decimal).unwrap_or(Money::ZERO);
        if stored.is_positive() {
            warn!(%client_id, %stored, "positive dues balance clamped to zero");
        }
        let total_dues = stored.min(Money::ZERO);
        let assigned_yearly = assigned_yearly
            .map(|d| Money::from_decimal(d).abs())
            .unwrap_or_else(|| total_dues.abs());

        let state = if total_dues.is_negative() {
            DuesState::Outstanding
        } else if assigned_yearly.is_positive() {
            DuesState::Paid
        } else {
            DuesState::NoDues
        };

        Self {
            client_id,
            total_dues,
            assigned_yearly,
            currency: Currency::normalize(currency),
            state,
        }
    }

    pub fn status(&self) -> DuesStatus {
        status(self)
    }

    /// amount still owed, as a positive figure
    pub fn outstanding(&self) -> Money {
        self.total_dues.abs()
    }

    pub fn monthly_dues(&self) -> Money {
        monthly_dues(self.assigned_yearly)
    }
}

/// `Outstanding` iff the balance is below zero
pub fn status(account: &ClientDuesAccount) -> DuesStatus {
    if account.total_dues.is_negative() {
        DuesStatus::Outstanding
    } else {
        DuesStatus::Paid
    }
}

/// fixed installment from the assigned yearly figure, not the live balance
pub fn monthly_dues(assigned_yearly: Money) -> Money {
    assigned_yearly.abs() / Decimal::from(MONTHS_PER_YEAR)
}

/// one accepted dues payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuesPayment {
    pub client_id: ClientId,
    pub currency: Currency,
    pub amount: Money,
    pub balance_after: Money,
    pub paid_on: Option<NaiveDate>,
}

impl DuesPayment {
    pub fn to_record(&self) -> FinancialRecord {
        let record = FinancialRecord::new(RecordType::DuePayment, self.amount, self.currency)
            .for_client(self.client_id);
        match self.paid_on {
            Some(date) => record.on(date),
            None => record,
        }
    }
}

/// applies dues assignments and repayments, logging each transition
#[derive(Debug, Default)]
pub struct DuesLedger {
    events: EventStore,
    payments: Vec<DuesPayment>,
}

impl DuesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// assign a new yearly figure, stored as `-abs(amount)`
    pub fn set_yearly_dues(
        &mut self,
        account: &ClientDuesAccount,
        amount: Money,
        currency: Currency,
    ) -> ClientDuesAccount {
        let yearly = amount.abs();
        let state = if yearly.is_positive() {
            DuesState::Outstanding
        } else if account.state == DuesState::Paid {
            DuesState::Paid
        } else {
            DuesState::NoDues
        };

        info!(
            client_id = %account.client_id,
            %currency,
            yearly_amount = %yearly,
            from = ?account.state,
            to = ?state,
            "yearly dues assigned"
        );

        self.events.emit(Event::DuesAssigned {
            client_id: account.client_id,
            currency,
            yearly_amount: yearly,
            new_state: state,
        });

        ClientDuesAccount {
            client_id: account.client_id,
            total_dues: Money::ZERO - yearly,
            assigned_yearly: yearly,
            currency,
            state,
        }
    }

    /// move the balance toward zero by `amount`
    pub fn apply_payment(
        &mut self,
        account: &ClientDuesAccount,
        amount: Money,
    ) -> Result<ClientDuesAccount> {
        self.apply_payment_on(account, amount, None)
    }

    /// as `apply_payment`, stamping the payment with its date
    pub fn apply_payment_on(
        &mut self,
        account: &ClientDuesAccount,
        amount: Money,
        paid_on: Option<NaiveDate>,
    ) -> Result<ClientDuesAccount> {
        if !amount.is_positive() {
            return Err(ValidationErrors::single(
                Field::PaymentAmount,
                ValidationError::InvalidDuesPayment { amount },
            )
            .into());
        }

        let outstanding = account.outstanding();
        if amount > outstanding {
            return Err(ValidationErrors::single(
                Field::PaymentAmount,
                ValidationError::DuesPaymentExceedsBalance {
                    amount,
                    outstanding,
                },
            )
            .into());
        }

        let total_dues = account.total_dues + amount;
        let state = if total_dues.is_zero() {
            DuesState::Paid
        } else {
            DuesState::Outstanding
        };

        self.events.emit(Event::DuesPaymentApplied {
            client_id: account.client_id,
            currency: account.currency,
            amount,
            remaining: total_dues.abs(),
        });
        self.payments.push(DuesPayment {
            client_id: account.client_id,
            currency: account.currency,
            amount,
            balance_after: total_dues,
            paid_on,
        });

        if state == DuesState::Paid {
            info!(client_id = %account.client_id, currency = %account.currency, "dues settled");
            self.events.emit(Event::DuesSettled {
                client_id: account.client_id,
                currency: account.currency,
                total_paid: account.assigned_yearly,
            });
        }

        Ok(ClientDuesAccount {
            total_dues,
            state,
            ..account.clone()
        })
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    pub fn payments(&self) -> &[DuesPayment] {
        &self.payments
    }

    pub fn take_payments(&mut self) -> Vec<DuesPayment> {
        std::mem::take(&mut self.payments)
    }

    /// accepted payments as `due_payment` records for aggregation
    pub fn payment_records(&self) -> Vec<FinancialRecord> {
        self.payments.iter().map(DuesPayment::to_record).collect()
    }
}
