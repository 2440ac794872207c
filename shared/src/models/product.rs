//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Immutable reference data, loaded once from the POS at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}
