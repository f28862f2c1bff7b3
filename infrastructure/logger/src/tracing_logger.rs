use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// [`Logger`] port backed by `tracing`; events are emitted under the
/// `product_service` target so they can be filtered with `RUST_LOG`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "product_service", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "product_service", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "product_service", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "product_service", "{}", message);
    }
}
