use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use thiserror::Error;

use crate::api::ContactStore;
use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactPatch};
use crate::form::ContactForm;
use crate::navigation::{LoadError, Navigation};
use crate::validation::{Field, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("form has errors: {0}")]
    Invalid(FieldErrors),
    #[error("a save is already in progress")]
    Busy,
    #[error(transparent)]
    Remote(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub contact: Contact,
    pub navigation: Navigation,
}

struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Add/edit contact flow: holds the form, validates it locally and sends it
/// to the store. A failed save keeps the form so the user can retry.
pub struct ContactEditor {
    store: Arc<dyn ContactStore>,
    mode: EditorMode,
    form: Mutex<ContactForm>,
    saving: AtomicBool,
}

impl ContactEditor {
    pub fn create(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            mode: EditorMode::Create,
            form: Mutex::new(ContactForm::blank()),
            saving: AtomicBool::new(false),
        }
    }

    /// Loads the contact and prefills the form with it.
    pub async fn edit(store: Arc<dyn ContactStore>, id: &str) -> Result<Self, LoadError> {
        let contact = store.get(id).await.map_err(|source| {
            warn!("cannot edit contact {id}: {source}");
            LoadError {
                id: id.to_string(),
                source,
            }
        })?;
        Ok(Self {
            store,
            mode: EditorMode::Edit {
                id: contact.id().to_string(),
            },
            form: Mutex::new(ContactForm::from_contact(&contact)),
            saving: AtomicBool::new(false),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn form(&self) -> ContactForm {
        self.lock().clone()
    }

    pub fn set(&self, field: Field, value: impl Into<String>) {
        self.lock().set(field, value);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Validates, then creates or updates. Nothing is sent while the form
    /// has errors or while another save is still running.
    pub async fn submit(&self) -> Result<Saved, EditorError> {
        let data = {
            let mut form = self.lock();
            if !form.validate() {
                return Err(EditorError::Invalid(form.errors().clone()));
            }
            form.data().clone()
        };

        if self.saving.swap(true, Ordering::SeqCst) {
            return Err(EditorError::Busy);
        }
        let _guard = SavingGuard(&self.saving);

        let result = match &self.mode {
            EditorMode::Create => self.store.create(&data).await,
            EditorMode::Edit { id } => self.store.update(id, &ContactPatch::from(data)).await,
        };
        let contact = result.map_err(|err| {
            warn!("saving contact failed: {err}");
            err
        })?;

        debug!("contact {} saved", contact.id());
        Ok(Saved {
            navigation: Navigation::ToDetail(contact.id().to_string()),
            contact,
        })
    }
}
