//! Test utilities for tdquery integration tests
//!
//! - MockEngine: scripted engine that records every call
//! - TestFixture: query service wired to a MockEngine and a RecordingReporter
#![allow(dead_code)]

pub mod mock_engine;
pub mod test_fixture;
