use serde::{Deserialize, Serialize};

use crate::config::LoanType;
use crate::decimal::Money;
use crate::types::{ClientId, Currency, DuesState, RecordType};

/// domain events emitted while recomputing derived values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // loan events
    LoanTermsRecalculated {
        loan_type: LoanType,
        currency: Currency,
        amount: Money,
        upfront_amount: Money,
        principal: Money,
        default_charges_amount: Money,
    },

    // dues events
    DuesAssigned {
        client_id: ClientId,
        currency: Currency,
        yearly_amount: Money,
        new_state: DuesState,
    },
    DuesPaymentApplied {
        client_id: ClientId,
        currency: Currency,
        amount: Money,
        remaining: Money,
    },
    DuesSettled {
        client_id: ClientId,
        currency: Currency,
        total_paid: Money,
    },

    // ingestion events
    RecordNormalized {
        client_id: Option<ClientId>,
        record_type: RecordType,
        reason: String,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
