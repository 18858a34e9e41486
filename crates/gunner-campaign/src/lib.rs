//! Persistent economy for GUNNER.
//!
//! The on-disk Save Store, the upgrade shop and level-select queries.
//! Nothing here runs during a tick; the engine only reaches this crate
//! through the `SaveStore` trait.

pub mod shop;
pub mod store;

pub use shop::{ShopError, ShopOffer};
pub use store::JsonFileStore;
