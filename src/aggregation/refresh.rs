use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dues::ClientDuesAccount;
use crate::events::EventStore;
use crate::records::{normalize_all, FinancialRecord, RawRecord};
use crate::types::Currency;

use super::{combine, compute_summary, partition, CurrencySummary};

/// immutable input for one recomputation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<FinancialRecord>,
    pub clients: Vec<ClientDuesAccount>,
}

impl Snapshot {
    pub fn new(records: Vec<FinancialRecord>, clients: Vec<ClientDuesAccount>) -> Self {
        Self { records, clients }
    }

    /// build from raw records, normalizing each one
    pub fn ingest(
        raw: Vec<RawRecord>,
        clients: Vec<ClientDuesAccount>,
        events: &mut EventStore,
    ) -> Self {
        Self {
            records: normalize_all(raw, events),
            clients,
        }
    }
}

/// per-currency summaries plus their display-only combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySet {
    pub usd: CurrencySummary,
    pub lrd: CurrencySummary,
    pub combined: CurrencySummary,
}

impl SummarySet {
    pub fn get(&self, currency: Currency) -> &CurrencySummary {
        match currency {
            Currency::USD => &self.usd,
            Currency::LRD => &self.lrd,
        }
    }
}

/// recompute every summary from scratch
pub fn refresh(snapshot: &Snapshot) -> SummarySet {
    let buckets = partition(&snapshot.records, &snapshot.clients);
    let usd = compute_summary(&buckets.usd);
    let lrd = compute_summary(&buckets.lrd);
    let combined = combine(&usd, &lrd);

    debug!(
        records = snapshot.records.len(),
        clients = snapshot.clients.len(),
        "summaries refreshed"
    );

    SummarySet { usd, lrd, combined }
}

/// generation number handed out when a refresh starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// keeps only the result of the most recently started refresh
#[derive(Debug)]
pub struct RefreshSequencer<T> {
    issued: u64,
    latest: Option<(RefreshToken, T)>,
}

impl<T> Default for RefreshSequencer<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            latest: None,
        }
    }
}

impl<T> RefreshSequencer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// start a new request, superseding every earlier one
    pub fn begin(&mut self) -> RefreshToken {
        self.issued += 1;
        RefreshToken(self.issued)
    }

    pub fn is_current(&self, token: RefreshToken) -> bool {
        token.0 == self.issued
    }

    /// store `result` if `token` is still the latest request; stale results
    /// are dropped and `false` is returned
    pub fn complete(&mut self, token: RefreshToken, result: T) -> bool {
        if !self.is_current(token) {
            debug!(
                token = token.0,
                latest = self.issued,
                "discarding superseded refresh result"
            );
            return false;
        }
        self.latest = Some((token, result));
        true
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref().map(|(_, value)| value)
    }

    pub fn latest_token(&self) -> Option<RefreshToken> {
        self.latest.as_ref().map(|(token, _)| *token)
    }
}
