pub mod providers;
pub mod submission;

pub use submission::{SubmissionHandler, SubmissionOutcome};
