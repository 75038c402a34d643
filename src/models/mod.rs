// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod album;
pub mod envelope;
pub mod photo;

pub use album::*;
pub use envelope::*;
pub use photo::*;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
/// in partial-update bodies. Use with `#[serde(default)]`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Generate a new opaque document identifier
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
