use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// A hospital from the reference list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub contact: String,
}

/// An emergency service and its phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct EmergencyContact {
    pub service: String,
    pub number: String,
}
