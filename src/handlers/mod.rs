// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod community;
pub mod health;

pub use community::config as community_config;
pub use health::config as health_config;
