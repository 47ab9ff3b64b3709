pub mod diseases;
pub mod directory;
pub mod export;
pub mod health;
pub mod patients;
pub mod reminders;
pub mod reports;

// Re-export handlers for easier imports
pub use health::health_check;
