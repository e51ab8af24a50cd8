// src/lib.rs
// DOCUMENTATION: Library root shared by the HTTP service and the diagnostic binaries

pub mod clock;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod report;
pub mod services;

/// Initialize env_logger, honoring RUST_LOG first and LOG_LEVEL second
pub fn init_logging(log_level: &str) {
    if std::env::var("RUST_LOG").is_err() {
        let level = if !log_level.is_empty() {
            log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", level);
    }
    env_logger::init();
}
