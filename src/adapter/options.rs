//! Building the immutable `Mif` configuration.
//!
//! Options are applied in order, so a later option overrides an earlier
//! one for the same field. `MifBuilder` is the chained-setter spelling of
//! the same sequence.

use std::fmt;
use std::sync::Arc;

use crate::config::schema::{AdapterConfig, JsonConfig};
use crate::observability::logger::{Logger, NoopLogger, StdLogger, StdLoggerAdapter, TracingLogger};

/// Conversion layer settings, shared read-only by every wrapped handler.
#[derive(Clone)]
pub struct Mif {
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) json: JsonConfig,
    pub(crate) disable_panic: bool,
}

impl Default for Mif {
    fn default() -> Self {
        Self {
            logger: Arc::new(NoopLogger),
            json: JsonConfig::default(),
            disable_panic: false,
        }
    }
}

impl fmt::Debug for Mif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mif")
            .field("json", &self.json)
            .field("disable_panic", &self.disable_panic)
            .finish_non_exhaustive()
    }
}

/// One configuration step.
pub enum Opt {
    /// Use this logger as is. [`Opt::std_logger`] lands here too, with the
    /// sink wrapped in a [`StdLoggerAdapter`].
    Logger(Arc<dyn Logger>),
    /// Discard every error.
    NoopLogger,
    /// Report errors through `tracing::error!`.
    TracingLogger,
    /// JSON prefix/indent pair.
    JsonConfig(JsonConfig),
    /// Log and answer 500 on a bad `not_json` payload instead of panicking.
    DisablePanic,
}

impl Opt {
    pub fn logger(logger: impl Logger + 'static) -> Self {
        Opt::Logger(Arc::new(logger))
    }

    pub fn std_logger(logger: impl StdLogger + 'static) -> Self {
        Opt::Logger(Arc::new(StdLoggerAdapter::new(logger)))
    }

    fn apply(self, mif: &mut Mif) {
        match self {
            Opt::Logger(logger) => mif.logger = logger,
            Opt::NoopLogger => mif.logger = Arc::new(NoopLogger),
            Opt::TracingLogger => mif.logger = Arc::new(TracingLogger),
            Opt::JsonConfig(json) => mif.json = json,
            Opt::DisablePanic => mif.disable_panic = true,
        }
    }
}

impl Mif {
    /// Apply `opts` in order on top of the defaults: no-op logger, compact
    /// JSON, panic on a bad `not_json` payload.
    pub fn new(opts: impl IntoIterator<Item = Opt>) -> Self {
        let mut mif = Mif::default();
        for opt in opts {
            opt.apply(&mut mif);
        }
        mif
    }

    pub fn builder() -> MifBuilder {
        MifBuilder::default()
    }

    /// Settings from a loaded configuration file, reporting through tracing.
    pub fn from_config(config: &AdapterConfig) -> Self {
        let mut builder = Mif::builder()
            .tracing_logger()
            .json_config(config.json.clone());
        if config.disable_panic_on_bad_payload {
            builder = builder.disable_panic();
        }
        builder.build()
    }

    pub fn json_config(&self) -> &JsonConfig {
        &self.json
    }

    pub fn panic_disabled(&self) -> bool {
        self.disable_panic
    }

    pub(crate) fn log(&self, message: &dyn fmt::Display) {
        self.logger.error(message);
    }
}

/// Chained setters over the same [`Opt`] sequence.
#[derive(Default)]
pub struct MifBuilder {
    opts: Vec<Opt>,
}

impl MifBuilder {
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.opts.push(Opt::logger(logger));
        self
    }

    pub fn std_logger(mut self, logger: impl StdLogger + 'static) -> Self {
        self.opts.push(Opt::std_logger(logger));
        self
    }

    pub fn noop_logger(mut self) -> Self {
        self.opts.push(Opt::NoopLogger);
        self
    }

    pub fn tracing_logger(mut self) -> Self {
        self.opts.push(Opt::TracingLogger);
        self
    }

    pub fn json_config(mut self, json: JsonConfig) -> Self {
        self.opts.push(Opt::JsonConfig(json));
        self
    }

    pub fn disable_panic(mut self) -> Self {
        self.opts.push(Opt::DisablePanic);
        self
    }

    pub fn build(self) -> Mif {
        Mif::new(self.opts)
    }
}
