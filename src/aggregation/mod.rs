pub mod refresh;
pub mod summary;

#[cfg(test)]
mod props;

use serde::{Deserialize, Serialize};

use crate::dues::ClientDuesAccount;
use crate::records::FinancialRecord;
use crate::types::Currency;

pub use refresh::{refresh, RefreshSequencer, RefreshToken, Snapshot, SummarySet};
pub use summary::{combine, compute_summary, CurrencySummary};

/// records and clients belonging to one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyBucket {
    pub currency: Currency,
    pub records: Vec<FinancialRecord>,
    pub clients: Vec<ClientDuesAccount>,
}

impl CurrencyBucket {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            records: Vec::new(),
            clients: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.clients.is_empty()
    }
}

/// the two currency buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partitioned {
    pub usd: CurrencyBucket,
    pub lrd: CurrencyBucket,
}

impl Partitioned {
    pub fn get(&self, currency: Currency) -> &CurrencyBucket {
        match currency {
            Currency::USD => &self.usd,
            Currency::LRD => &self.lrd,
        }
    }

    fn get_mut(&mut self, currency: Currency) -> &mut CurrencyBucket {
        match currency {
            Currency::USD => &mut self.usd,
            Currency::LRD => &mut self.lrd,
        }
    }
}

/// split records and clients by currency, each lands in exactly one bucket
pub fn partition(records: &[FinancialRecord], clients: &[ClientDuesAccount]) -> Partitioned {
    let mut buckets = Partitioned {
        usd: CurrencyBucket::new(Currency::USD),
        lrd: CurrencyBucket::new(Currency::LRD),
    };

    for record in records {
        buckets.get_mut(record.currency).records.push(record.clone());
    }
    for client in clients {
        buckets.get_mut(client.currency).clients.push(client.clone());
    }

    buckets
}
