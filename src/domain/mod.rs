mod fuel;
pub mod metrics;
mod quantity;
mod units;
mod vehicle;

pub use fuel::*;
pub use metrics::{
    MonthlyTotal, economy, find_vehicle_by_model, mileage_display, monthly_breakdown,
    monthly_total,
};
pub use quantity::*;
pub use units::*;
pub use vehicle::*;
