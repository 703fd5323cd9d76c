//! Test fixture wiring a scripted engine and a recording reporter into a
//! query service

use super::mock_engine::MockEngine;
use parking_lot::Mutex;
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use tdquery::{QueryService, Reporter, ServiceConfig};

/// One captured report
#[derive(Debug, Clone)]
pub struct Report {
    pub message: String,
    pub error: String,
    pub context: Value,
}

/// Reporter that keeps everything it is given
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str, error: &(dyn StdError + 'static), context: Value) {
        self.reports.lock().push(Report {
            message: message.to_string(),
            error: error.to_string(),
            context,
        });
    }
}

pub struct TestFixture {
    pub engine: Arc<MockEngine>,
    pub reporter: Arc<RecordingReporter>,
    pub service: QueryService,
}

impl TestFixture {
    /// Fixture with a 10ms poll interval
    pub fn new(engine: MockEngine) -> Self {
        Self::with_config(
            engine,
            ServiceConfig::new("12345").with_poll_interval(Duration::from_millis(10)),
        )
    }

    pub fn with_config(engine: MockEngine, config: ServiceConfig) -> Self {
        init_logging();

        let engine = Arc::new(engine);
        let reporter = Arc::new(RecordingReporter::default());
        let service = QueryService::with_reporter(engine.clone(), reporter.clone(), config);

        TestFixture {
            engine,
            reporter,
            service,
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
