pub mod context;
pub mod executor;
pub mod registry;
pub mod reporter;
pub mod types;

pub use context::{Abort, TestContext, TestFlow};
pub use executor::TestExecutor;
pub use registry::{Registry, TestCase, TestFunc};
pub use reporter::{JsonReporter, ListReporter, Reporter};
pub use types::{Report, RunSummary, Status};
