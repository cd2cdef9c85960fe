/// First half of a destructive action. Nothing has been sent yet: pass the
/// token back to `confirm_delete` to go ahead, or drop it (or call
/// [`PendingDelete::decline`]) to do nothing.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending delete does nothing until it is confirmed"]
pub struct PendingDelete {
    id: String,
}

impl PendingDelete {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn decline(self) {}

    pub(crate) fn into_id(self) -> String {
        self.id
    }
}
