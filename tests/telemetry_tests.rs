//! Global telemetry setup when another `log` logger already exists.
//!
//! Kept in its own test binary because the logger and subscriber are
//! process-wide.

use roster::{config::AppConfig, telemetry::init_tracing};

struct SilentLogger;

impl log::Log for SilentLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _: &log::Record<'_>) {}

    fn flush(&self) {}
}

static SILENT: SilentLogger = SilentLogger;

#[test]
fn foreign_log_logger_does_not_fail_init() {
    log::set_logger(&SILENT).expect("no logger installed yet in this binary");

    let config = AppConfig::default();

    assert!(init_tracing(&config).is_ok());
    assert!(init_tracing(&config).is_ok());
    tracing::info!("subscriber still receives events");
}
