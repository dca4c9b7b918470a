//! Filter/view state: per-entity visibility over the loaded snapshot.
//!
//! RULE: this is the only stateful component. It never computes
//! aggregates itself; it publishes a FilterEvent on every effective
//! change and the subscriber re-runs the aggregation layer.

use crate::{
    error::{EngineError, EngineResult},
    model::{Customer, IndexCase},
    snapshot::Snapshot,
    types::{CustomerId, IndexCaseId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

/// Every change notification the filter state emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FilterEvent {
    CustomerVisibilityChanged {
        customer_id: CustomerId,
        visible:     bool,
    },
    IndexCaseVisibilityChanged {
        index_case_id: IndexCaseId,
        visible:       bool,
    },
    /// All flags were reset to visible.
    Reset,
}

#[derive(Debug)]
pub struct FilterState {
    snapshot:           Snapshot,
    customer_visible:   HashMap<CustomerId, bool>,
    index_case_visible: HashMap<IndexCaseId, bool>,
    subscribers:        Vec<Sender<FilterEvent>>,
}

impl FilterState {
    /// Everything starts visible.
    pub fn new(snapshot: Snapshot) -> Self {
        let customer_visible = snapshot.customers.iter().map(|c| (c.id, true)).collect();
        let index_case_visible = snapshot.index_cases.iter().map(|ic| (ic.id, true)).collect();
        Self {
            snapshot,
            customer_visible,
            index_case_visible,
            subscribers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Receive every future FilterEvent. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<FilterEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn visible_customers(&self) -> Vec<Customer> {
        self.snapshot
            .customers
            .iter()
            .filter(|c| self.customer_visible.get(&c.id).copied().unwrap_or(true))
            .cloned()
            .collect()
    }

    pub fn visible_index_cases(&self) -> Vec<IndexCase> {
        self.snapshot
            .index_cases
            .iter()
            .filter(|ic| self.index_case_visible.get(&ic.id).copied().unwrap_or(true))
            .cloned()
            .collect()
    }

    pub fn is_customer_visible(&self, id: CustomerId) -> Option<bool> {
        self.customer_visible.get(&id).copied()
    }

    pub fn is_index_case_visible(&self, id: IndexCaseId) -> Option<bool> {
        self.index_case_visible.get(&id).copied()
    }

    /// Returns true if the flag actually changed (and an event was sent).
    pub fn set_customer_visible(&mut self, id: CustomerId, visible: bool) -> EngineResult<bool> {
        let flag = self
            .customer_visible
            .get_mut(&id)
            .ok_or(EngineError::UnknownCustomer { id })?;
        if *flag == visible {
            return Ok(false);
        }
        *flag = visible;

        log::info!("customer {id} visibility changed to {visible}");
        self.publish(FilterEvent::CustomerVisibilityChanged { customer_id: id, visible });
        Ok(true)
    }

    /// Returns true if the flag actually changed (and an event was sent).
    pub fn set_index_case_visible(&mut self, id: IndexCaseId, visible: bool) -> EngineResult<bool> {
        let flag = self
            .index_case_visible
            .get_mut(&id)
            .ok_or(EngineError::UnknownIndexCase { id })?;
        if *flag == visible {
            return Ok(false);
        }
        *flag = visible;

        log::info!("index case {id} visibility changed to {visible}");
        self.publish(FilterEvent::IndexCaseVisibilityChanged { index_case_id: id, visible });
        Ok(true)
    }

    /// Make everything visible again.
    pub fn show_all(&mut self) {
        self.customer_visible.values_mut().for_each(|v| *v = true);
        self.index_case_visible.values_mut().for_each(|v| *v = true);
        log::info!("filter reset: all customers and index cases visible");
        self.publish(FilterEvent::Reset);
    }

    fn publish(&mut self, event: FilterEvent) {
        // A failed send means the receiver is gone.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
