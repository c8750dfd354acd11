//! Document intake, lookup, and retrieval services.

pub mod intake;
pub mod lookup;
pub mod naming;
pub mod pdf;
pub mod retrieval;
pub mod submitter;

pub use intake::{IntakeOutcome, IntakeRequest, IntakeService, UploadedFile};
pub use lookup::{DocumentQuery, LookupService};
pub use retrieval::{DownloadResult, RetrievalService};
pub use submitter::Submitter;

#[cfg(test)]
pub(crate) mod testing;
