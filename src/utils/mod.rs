pub mod diagnostics;
pub mod errors;

pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use errors::ChartError;
