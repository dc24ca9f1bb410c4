//! Connectivity tests for named clusters.
//!
//! Responsibilities:
//! - Define the six fixed test categories and their result types.
//! - Probe cluster endpoints (TCP, Oozie HTTP, shim availability).
//! - Drive probes concurrently and report progress to a sink.
//!
//! Invariants:
//! - A run always yields one `TestCategory` per `TestCategoryKind`, in
//!   `TestCategoryKind::ALL` order, whatever the individual outcomes.
//! - Progress reports arrive in completion order; the final report has `done = true`.

mod category;
mod probes;
mod runner;

pub use category::{
    ProgressSink, RuntimeTestStatus, TestCategory, TestCategoryKind, TestResult, TestStatus,
};
pub use probes::{CategoryProbe, OozieProbe, ShimProbe, TcpProbe};
pub use runner::TestRunner;
