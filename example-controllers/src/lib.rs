//! Example session controllers.
//!
//! - `Sequential` - Asks the survey's questions one after the other
//! - `Report` - Builds an analysis report from the typed answer values

pub mod report;
pub mod sequential;

pub use report::{REPORT_VERSION, Report};
pub use sequential::Sequential;
