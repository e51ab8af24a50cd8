// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod community_service;
pub mod diagnostics;
pub mod supabase_client;

pub use community_service::*;
pub use diagnostics::*;
pub use supabase_client::*;
