use thiserror::Error;

use crate::api::error::ApiError;

/// Where the caller should go after a view finishes or gives up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Back to the directory listing.
    Back,
    /// To the detail view of the given contact.
    ToDetail(String),
}

/// A detail or edit view could not load its contact. The view has nothing
/// to show, so the caller should report the error and go back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not load contact {id}: {source}")]
pub struct LoadError {
    pub id: String,
    #[source]
    pub source: ApiError,
}

impl LoadError {
    pub fn navigation(&self) -> Navigation {
        Navigation::Back
    }
}
