//! Shared types and domain logic for the Inventory Management Platform
//!
//! This crate contains the domain vocabulary, system settings, and pure
//! computation (stock classification, money math, code validation) shared
//! between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
