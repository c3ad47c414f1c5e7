//! Identification result record

use serde::{Deserialize, Serialize};

/// A plant identified from a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    /// Common name, e.g. "Rose"
    pub name: String,
    /// Brief free-text description
    pub description: String,
}
