//! Domain models for the Inventory Management Platform
//!
//! Re-exports models from the shared crate; persisted row shapes live with
//! the services that own them.

pub use shared::models::*;
