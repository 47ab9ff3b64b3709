// Public entities for the Health Records API
// Request and response shapes that only exist at the HTTP boundary

// Error responses shared by every handler
pub mod common;

// Report comparison response
pub mod comparison;

pub use common::ErrorResponse;
pub use comparison::ComparisonResponse;
