//! WARES Core - domain types for the goods catalog.
//!
//! This crate defines the `Goods` entity, the request payloads accepted
//! by the catalog, the error taxonomy shared across layers, and the
//! declarative validation rules. It performs no I/O; the storage and API
//! crates build on top of these types.

pub mod error;
pub mod goods;
pub mod validation;

pub use error::{CacheError, GoodsError, GoodsResult, StoreError, ValidationError};
pub use goods::{CreateGoods, Goods, UpdateGoods};
pub use validation::{apply_rules, Rule};
