pub mod assertions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{count_of, drain, significant_types};
#[allow(unused_imports)]
pub use mocks::{EventRecorder, ScriptedGateway};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
