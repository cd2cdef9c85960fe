use crate::api::models::{Contact, ContactFormData};
use crate::validation::{self, Field, FieldErrors};

/// Editable state behind the add/edit contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    data: ContactFormData,
    errors: FieldErrors,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl ContactForm {
    /// Every field present and empty, ready for a new contact.
    pub fn blank() -> Self {
        let empty = Some(String::new());
        Self {
            data: ContactFormData {
                phone: empty.clone(),
                address: empty.clone(),
                city: empty.clone(),
                country: empty.clone(),
                notes: empty,
                ..Default::default()
            },
            errors: FieldErrors::default(),
        }
    }

    /// Prefilled from an existing contact; missing optional fields become
    /// empty strings so clearing one is sent back as an explicit "".
    pub fn from_contact(contact: &Contact) -> Self {
        let mut form = Self::blank();
        for field in Field::ALL {
            let value = match field {
                Field::FirstName => Some(&contact.first_name),
                Field::LastName => Some(&contact.last_name),
                Field::Email => Some(&contact.email),
                Field::Phone => contact.phone.as_ref(),
                Field::Address => contact.address.as_ref(),
                Field::City => contact.city.as_ref(),
                Field::Country => contact.country.as_ref(),
                Field::Notes => contact.notes.as_ref(),
            };
            if let Some(v) = value {
                form.slot(field).clone_from(v);
            }
        }
        form
    }

    pub fn get(&self, field: Field) -> &str {
        let d = &self.data;
        match field {
            Field::FirstName => &d.first_name,
            Field::LastName => &d.last_name,
            Field::Email => &d.email,
            Field::Phone => d.phone.as_deref().unwrap_or_default(),
            Field::Address => d.address.as_deref().unwrap_or_default(),
            Field::City => d.city.as_deref().unwrap_or_default(),
            Field::Country => d.country.as_deref().unwrap_or_default(),
            Field::Notes => d.notes.as_deref().unwrap_or_default(),
        }
    }

    /// Updates one field and drops its pending error; other errors stay until
    /// the next `validate`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
        self.errors.clear(field);
    }

    /// Recomputes errors for the whole form. Returns whether it can be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate(&self.data);
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    fn slot(&mut self, field: Field) -> &mut String {
        let d = &mut self.data;
        match field {
            Field::FirstName => &mut d.first_name,
            Field::LastName => &mut d.last_name,
            Field::Email => &mut d.email,
            Field::Phone => d.phone.get_or_insert_with(String::new),
            Field::Address => d.address.get_or_insert_with(String::new),
            Field::City => d.city.get_or_insert_with(String::new),
            Field::Country => d.country.get_or_insert_with(String::new),
            Field::Notes => d.notes.get_or_insert_with(String::new),
        }
    }
}
