// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod place;
pub mod post;
pub mod saved_place;
pub mod user;

pub use place::*;
pub use post::*;
pub use saved_place::*;
pub use user::*;
