use serde::{Deserialize, Serialize};

/// A hiring company. `is_verified` only ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub description: String,
    pub industry: String,
    pub website: String,
    pub is_verified: bool,
}
