use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::dues::ClientDuesAccount;
use crate::records::FinancialRecord;
use crate::types::{ClientId, Currency, RecordType};

use super::CurrencyBucket;

/// totals for one currency, or for both when `currency` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySummary {
    pub currency: Option<Currency>,
    pub total_savings: Money,
    pub total_personal_interest: Money,
    pub total_general_interest: Money,
    pub outstanding_dues: Money,
    pub monthly_dues: Money,
    pub total_loans: Money,
    pub outstanding_loans: Money,
    pub total_fines: Money,
    pub grand_total: Money,
    pub overall_total_savings: Money,
    pub clients_with_outstanding_dues: u64,
    pub clients_paid_dues: u64,
}

impl CurrencySummary {
    /// summary of an empty bucket
    pub fn empty(currency: Currency) -> Self {
        Self {
            currency: Some(currency),
            ..Self::default()
        }
    }

    pub fn is_combined(&self) -> bool {
        self.currency.is_none()
    }
}

/// reduce one bucket into its summary
pub fn compute_summary(bucket: &CurrencyBucket) -> CurrencySummary {
    let mut summary = CurrencySummary::empty(bucket.currency);
    let mut paying_clients: BTreeSet<ClientId> = BTreeSet::new();

    for record in &bucket.records {
        add_record(&mut summary, record);
        if record.record_type == RecordType::DuePayment {
            if let Some(client_id) = record.client_id {
                paying_clients.insert(client_id);
            }
        }
    }

    for client in &bucket.clients {
        if client.total_dues.is_negative() {
            summary.outstanding_dues += client.total_dues.abs();
            summary.clients_with_outstanding_dues += 1;
        } else if has_paid(client, &paying_clients) {
            summary.clients_paid_dues += 1;
        }
    }

    summary.monthly_dues = summary.outstanding_dues / Decimal::from(12);
    summary.grand_total = summary.total_savings
        + summary.total_personal_interest
        + summary.total_general_interest
        - summary.outstanding_dues;
    summary.overall_total_savings = summary.grand_total - summary.outstanding_loans;

    debug!(
        currency = %bucket.currency,
        records = bucket.records.len(),
        clients = bucket.clients.len(),
        grand_total = %summary.grand_total,
        "currency summary computed"
    );

    summary
}

fn add_record(summary: &mut CurrencySummary, record: &FinancialRecord) {
    let amount = record.amount;
    match record.record_type {
        RecordType::SavingsBalance => summary.total_savings += amount,
        RecordType::PersonalInterestPayment => summary.total_personal_interest += amount,
        RecordType::GeneralInterest => summary.total_general_interest += amount,
        RecordType::LoanPrincipal => summary.total_loans += amount,
        RecordType::LoanOutstanding => summary.outstanding_loans += amount,
        RecordType::Penalty | RecordType::Fee => summary.total_fines += amount,
        // counted through client balances
        RecordType::DuePayment => {}
    }
}

fn has_paid(client: &ClientDuesAccount, paying_clients: &BTreeSet<ClientId>) -> bool {
    client.total_dues.is_zero() && paying_clients.contains(&client.client_id)
}

/// field-wise sum of two currency summaries, display only
pub fn combine(usd: &CurrencySummary, lrd: &CurrencySummary) -> CurrencySummary {
    CurrencySummary {
        currency: None,
        total_savings: usd.total_savings + lrd.total_savings,
        total_personal_interest: usd.total_personal_interest + lrd.total_personal_interest,
        total_general_interest: usd.total_general_interest + lrd.total_general_interest,
        outstanding_dues: usd.outstanding_dues + lrd.outstanding_dues,
        monthly_dues: usd.monthly_dues + lrd.monthly_dues,
        total_loans: usd.total_loans + lrd.total_loans,
        outstanding_loans: usd.outstanding_loans + lrd.outstanding_loans,
        total_fines: usd.total_fines + lrd.total_fines,
        grand_total: usd.grand_total + lrd.grand_total,
        overall_total_savings: usd.overall_total_savings + lrd.overall_total_savings,
        clients_with_outstanding_dues: usd.clients_with_outstanding_dues
            + lrd.clients_with_outstanding_dues,
        clients_paid_dues: usd.clients_paid_dues + lrd.clients_paid_dues,
    }
}
