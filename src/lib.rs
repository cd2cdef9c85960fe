//! Headless client for a contact directory REST service: a searchable,
//! paginated listing, single-contact detail and add/edit flows, all backed
//! by one injectable [`ContactStore`].

pub mod api;
pub mod app;
pub mod confirm;
pub mod detail;
pub mod directory;
pub mod editor;
pub mod form;
pub mod navigation;
pub mod pagination;
pub mod utils;
pub mod validation;

pub use api::ContactStore;
pub use api::client::ApiClient;
pub use api::error::ApiError;
pub use api::models::{
    Contact, ContactFormData, ContactPatch, ContactsResponse, ListQuery, PaginationInfo, SortOrder,
};
pub use app::{App, AppConfig, ConfigError};
pub use confirm::PendingDelete;
pub use detail::ContactDetail;
pub use directory::{Directory, DirectoryError, DirectoryViewState, FetchOutcome};
pub use editor::{ContactEditor, EditorError, EditorMode, Saved};
pub use form::ContactForm;
pub use navigation::{LoadError, Navigation};
pub use validation::{Field, FieldErrors, validate};
