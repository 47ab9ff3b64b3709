use serde::{Deserialize, Serialize};

/// Storage model for a hospital directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub contact: String,
}
