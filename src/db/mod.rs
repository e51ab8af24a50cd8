// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export the community store contract and its adapters

pub mod memory_store;
pub mod repository;
pub mod store;

pub use memory_store::*;
pub use repository::*;
pub use store::*;
