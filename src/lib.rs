//! Rustle Provision - ansible play provisioning plans
//!
//! This crate validates loosely typed provisioner documents, decodes them into
//! self-contained plays with provisioner defaults resolved field by field, and
//! renders the inventory document and command line each play runs with.

pub mod cli;
pub mod execution;
pub mod inventory;
pub mod provisioner;
pub mod types;

pub use inventory::{InventoryMode, InventoryRenderer};
pub use provisioner::{decode, prepare, validate, ValidationResult};
pub use types::*;
