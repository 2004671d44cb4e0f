//! # Builder: assembles a [`Bus`] from a [`Config`] and optional collaborators.

use std::sync::Arc;

use super::{Bus, Config};
use crate::loggers::{Log, TracingLog};

/// Builder for constructing a [`Bus`] with optional collaborators.
pub struct BusBuilder {
    cfg: Config,
    logger: Option<Arc<dyn Log>>,
}

impl BusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg, logger: None }
    }

    /// Sets the logging collaborator.
    ///
    /// Receives capacity warnings, failures collected by `continue_on_error`
    /// passes, scheduled listener failures and telemetry summaries.
    /// Defaults to [`TracingLog`].
    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds and returns the bus.
    pub fn build(self) -> Bus {
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLog::new()) as Arc<dyn Log>);
        Bus::from_parts(self.cfg, logger)
    }
}
