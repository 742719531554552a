use std::sync::mpsc::Receiver;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{Vehicle, VehicleId};

use super::{StoreEvent, Subscribers};

/// In-memory, insertion-ordered collection of tracked vehicles.
///
/// Lookups that miss are not errors: `update` reports `false` and the
/// removals return `None`, leaving the store untouched.
#[derive(Debug, Default)]
pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
    subscribers: Subscribers,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive a [`StoreEvent`] for every successful mutation from now on.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }

    /// Append a vehicle under a freshly assigned id and return that id.
    pub fn add(&mut self, vehicle: Vehicle) -> VehicleId {
        let mut vehicle = vehicle;
        vehicle.id = self.next_id();
        let id = vehicle.id;

        debug!(%id, model = %vehicle.model, "vehicle added");
        self.vehicles.push(vehicle);
        self.subscribers.notify(StoreEvent::VehicleAdded(id));
        id
    }

    /// Replace the stored vehicle with the same id.
    /// Returns `false` if no such vehicle exists.
    pub fn update(&mut self, vehicle: Vehicle) -> bool {
        let Some(slot) = self.vehicles.iter_mut().find(|v| v.id == vehicle.id) else {
            debug!(id = %vehicle.id, "vehicle update ignored: not found");
            return false;
        };

        let id = vehicle.id;
        *slot = vehicle;
        debug!(%id, "vehicle updated");
        self.subscribers.notify(StoreEvent::VehicleUpdated(id));
        true
    }

    /// Remove a vehicle by id.
    pub fn remove(&mut self, id: VehicleId) -> Option<Vehicle> {
        let index = self.vehicles.iter().position(|v| v.id == id)?;
        self.remove_at(index)
    }

    /// Remove the vehicle at a list position.
    pub fn remove_at(&mut self, index: usize) -> Option<Vehicle> {
        if index >= self.vehicles.len() {
            return None;
        }

        let removed = self.vehicles.remove(index);
        debug!(id = %removed.id, index, "vehicle removed");
        self.subscribers.notify(StoreEvent::VehicleRemoved(removed.id));
        Some(removed)
    }

    /// Remove several list positions at once, as a multi-row delete does.
    /// Positions refer to the list before any removal; out-of-range and
    /// repeated positions are ignored. Returns how many vehicles were removed.
    pub fn remove_at_offsets(&mut self, offsets: &[usize]) -> usize {
        let mut offsets: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|&i| i < self.vehicles.len())
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        offsets
            .into_iter()
            .rev()
            .filter_map(|index| self.remove_at(index))
            .count()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    /// All vehicles in insertion order.
    pub fn list(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    fn next_id(&self) -> VehicleId {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
