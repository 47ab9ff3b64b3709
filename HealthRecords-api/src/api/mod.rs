pub mod handlers;
pub mod routes;


use axum::Router;

use health_records_domain::database::Database;

/// Create the application router
pub fn create_application(db: &Database) -> Router {
    routes::create_app(db)
}
