use std::sync::mpsc::Receiver;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{FuelEntry, FuelEntryId, FuelEntryUpdate};

use super::{StoreEvent, Subscribers};

/// In-memory, insertion-ordered log of fuel purchases.
///
/// Same miss policy as [`VehicleStore`](super::VehicleStore): unknown ids
/// and positions leave the ledger untouched and are reported through the
/// return value only.
#[derive(Debug, Default)]
pub struct FuelLedger {
    entries: Vec<FuelEntry>,
    subscribers: Subscribers,
}

impl FuelLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive a [`StoreEvent`] for every successful mutation from now on.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }

    /// Append a copy of `entry` stamped with `car_model` and a fresh id.
    pub fn add(&mut self, entry: FuelEntry, car_model: &str) -> FuelEntryId {
        let mut entry = entry.with_car_model(car_model);
        entry.id = self.next_id();
        let id = entry.id;

        debug!(%id, car_model, cost = entry.cost, "fuel entry added");
        self.entries.push(entry);
        self.subscribers.notify(StoreEvent::FuelEntryAdded(id));
        id
    }

    /// Apply a partial update to the entry with the given id.
    /// Returns `false` if no such entry exists.
    pub fn update(&mut self, id: FuelEntryId, update: FuelEntryUpdate) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!(%id, "fuel entry update ignored: not found");
            return false;
        };

        update.apply_to(entry);
        debug!(%id, "fuel entry updated");
        self.subscribers.notify(StoreEvent::FuelEntryUpdated(id));
        true
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: FuelEntryId) -> Option<FuelEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.remove_at(index)
    }

    /// Remove the entry at a list position.
    pub fn remove_at(&mut self, index: usize) -> Option<FuelEntry> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        debug!(id = %removed.id, index, "fuel entry removed");
        self.subscribers.notify(StoreEvent::FuelEntryRemoved(removed.id));
        Some(removed)
    }

    /// Remove several list positions at once. Positions refer to the list
    /// before any removal; out-of-range and repeated positions are ignored.
    pub fn remove_at_offsets(&mut self, offsets: &[usize]) -> usize {
        let mut offsets: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|&i| i < self.entries.len())
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        offsets
            .into_iter()
            .rev()
            .filter_map(|index| self.remove_at(index))
            .count()
    }

    pub fn get(&self, id: FuelEntryId) -> Option<&FuelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&FuelEntry> {
        self.entries.get(index)
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[FuelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&self) -> FuelEntryId {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
