use std::sync::Arc;

use log::warn;

use crate::api::ContactStore;
use crate::api::error::ApiError;
use crate::api::models::Contact;
use crate::confirm::PendingDelete;
use crate::navigation::{LoadError, Navigation};

/// Single-contact view.
pub struct ContactDetail {
    store: Arc<dyn ContactStore>,
    contact: Contact,
}

impl ContactDetail {
    pub async fn open(store: Arc<dyn ContactStore>, id: &str) -> Result<Self, LoadError> {
        match store.get(id).await {
            Ok(contact) => Ok(Self { store, contact }),
            Err(source) => {
                warn!("cannot open contact {id}: {source}");
                Err(LoadError {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn request_delete(&self) -> PendingDelete {
        PendingDelete::new(self.contact.id())
    }

    /// Deletes the shown contact. On success the view is done and the caller
    /// goes back to the listing; on failure the view stays as it is.
    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<Navigation, ApiError> {
        let id = pending.into_id();
        self.store.delete(&id).await.map_err(|err| {
            warn!("deleting contact {id} failed: {err}");
            err
        })?;
        Ok(Navigation::Back)
    }
}
