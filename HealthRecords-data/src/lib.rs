// Health Records Data
// This crate owns the SQLite store: connection handle, schema, repositories

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;

// CSV serialization of query results
pub mod export;
