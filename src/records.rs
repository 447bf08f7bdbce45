use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::Money;
use crate::events::{Event, EventStore};
use crate::types::{ClientId, Currency, RecordType};

/// record as handed over by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub recorded_on: Option<NaiveDate>,
}

/// savings, transaction or loan reduced to the shared aggregation shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub amount: Money,
    pub currency: Currency,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub client_id: Option<ClientId>,
    pub source: Option<String>,
    pub recorded_on: Option<NaiveDate>,
}

impl FinancialRecord {
    pub fn new(record_type: RecordType, amount: Money, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            record_type,
            client_id: None,
            source: None,
            recorded_on: None,
        }
    }

    pub fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.recorded_on = Some(date);
        self
    }

    /// coerce a raw record; missing or negative amounts become zero and
    /// unknown currencies fall into USD
    pub fn normalize(raw: RawRecord, events: &mut EventStore) -> Self {
        let mut reasons = Vec::new();

        let amount = match raw.amount {
            Some(a) if a >= Decimal::ZERO => Money::from_decimal(a),
            Some(a) => {
                reasons.push(format!("negative amount {a} treated as 0"));
                Money::ZERO
            }
            None => {
                reasons.push("missing amount treated as 0".to_string());
                Money::ZERO
            }
        };

        let code = raw.currency.as_deref();
        let currency = Currency::normalize(code);
        if !Currency::is_recognized(code) {
            reasons.push(format!("currency {code:?} treated as {currency}"));
        }

        for reason in reasons {
            warn!(
                record_type = ?raw.record_type,
                client_id = ?raw.client_id,
                %reason,
                "financial record normalized"
            );
            events.emit(Event::RecordNormalized {
                client_id: raw.client_id,
                record_type: raw.record_type,
                reason,
            });
        }

        Self {
            amount,
            currency,
            record_type: raw.record_type,
            client_id: raw.client_id,
            source: raw.source,
            recorded_on: raw.recorded_on,
        }
    }

    /// revenue tag, explicit source first
    pub fn revenue_source(&self) -> Option<String> {
        if !self.record_type.is_revenue() {
            return None;
        }
        match self.source.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => self.record_type.revenue_source().map(str::to_string),
        }
    }
}

/// normalize a whole batch
pub fn normalize_all(raw: Vec<RawRecord>, events: &mut EventStore) -> Vec<FinancialRecord> {
    raw.into_iter()
        .map(|r| FinancialRecord::normalize(r, events))
        .collect()
}
