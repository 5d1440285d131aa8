//! Catalog payloads: ratings, part inventory and kit visibility.

mod inventory;
mod rating;
mod visibility;

pub use inventory::{AdjustmentType, InventoryAdjustment, InventoryIncome};
pub use rating::{Review, SetRatingSummary};
pub use visibility::VisibilityUpdate;
