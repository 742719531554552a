mod events;
mod fuel_ledger;
mod vehicle_store;

pub use events::StoreEvent;
pub use fuel_ledger::*;
pub use vehicle_store::*;

pub(crate) use events::Subscribers;
