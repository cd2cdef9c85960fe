pub mod client;
pub mod error;
pub mod models;

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactFormData, ContactPatch, ContactsResponse, ListQuery};

/// The five operations the views need from the contact store. `ApiClient`
/// talks to the REST backend; tests plug in their own implementation.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ContactsResponse, ApiError>;

    async fn get(&self, id: &str) -> Result<Contact, ApiError>;

    async fn create(&self, data: &ContactFormData) -> Result<Contact, ApiError>;

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
