// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod album_service;
pub mod photo_service;

pub use album_service::*;
pub use photo_service::*;
