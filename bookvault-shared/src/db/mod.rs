/// Database utilities
///
/// - `pool`: PostgreSQL connection pool creation and health check
/// - `migrations`: migration runner backed by `sqlx::migrate!`

pub mod migrations;
pub mod pool;
