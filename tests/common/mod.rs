#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use contacts_client::{
    ApiError, Contact, ContactFormData, ContactPatch, ContactStore, ContactsResponse, ListQuery,
    PaginationInfo,
};
use serde_json::json;
use tokio::sync::oneshot;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn contact(id: &str, first: &str, last: &str) -> Contact {
    serde_json::from_value(json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "email": format!("{}@example.fr", first.to_lowercase()),
        "createdAt": "2024-05-01T08:00:00.000Z",
        "updatedAt": "2024-05-01T08:00:00.000Z"
    }))
    .unwrap()
}

pub fn page_of(contacts: Vec<Contact>, page: u32, limit: u32, total: u64) -> ContactsResponse {
    ContactsResponse {
        data: contacts,
        pagination: PaginationInfo::new(page, limit, total),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(String),
    Create(ContactFormData),
    Update(String, ContactPatch),
    Delete(String),
}

type ListReply = Result<ContactsResponse, ApiError>;
type SaveReply = Result<Contact, ApiError>;

/// Scripted store. Replies are taken from per-operation queues; when
/// `hold_lists` (or `hold_saves`) is on, list (or create/update) calls park
/// until the test answers them.
#[derive(Default)]
pub struct FakeStore {
    calls: Mutex<Vec<Call>>,
    list_replies: Mutex<VecDeque<ListReply>>,
    held: Mutex<Vec<oneshot::Sender<ListReply>>>,
    hold_lists: AtomicBool,
    get_replies: Mutex<VecDeque<Result<Contact, ApiError>>>,
    save_replies: Mutex<VecDeque<SaveReply>>,
    held_saves: Mutex<Vec<oneshot::Sender<SaveReply>>>,
    hold_saves: AtomicBool,
    delete_replies: Mutex<VecDeque<Result<(), ApiError>>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding_lists() -> Self {
        let store = Self::default();
        store.hold_lists.store(true, Ordering::SeqCst);
        store
    }

    pub fn holding_saves() -> Self {
        let store = Self::default();
        store.hold_saves.store(true, Ordering::SeqCst);
        store
    }

    pub fn push_list(&self, reply: ListReply) {
        self.list_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_get(&self, reply: Result<Contact, ApiError>) {
        self.get_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_save(&self, reply: Result<Contact, ApiError>) {
        self.save_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_delete(&self, reply: Result<(), ApiError>) {
        self.delete_replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn held_count(&self) -> usize {
        self.held.lock().unwrap().len()
    }

    /// Answers the `index`-th parked list call (in issue order).
    pub fn answer(&self, index: usize, reply: ListReply) {
        let mut held = self.held.lock().unwrap();
        let (tx, _) = oneshot::channel();
        let sender = std::mem::replace(&mut held[index], tx);
        let _ = sender.send(reply);
    }

    pub fn held_save_count(&self) -> usize {
        self.held_saves.lock().unwrap().len()
    }

    /// Answers the `index`-th parked create/update call (in issue order).
    pub fn answer_save(&self, index: usize, reply: SaveReply) {
        let mut held = self.held_saves.lock().unwrap();
        let (tx, _) = oneshot::channel();
        let sender = std::mem::replace(&mut held[index], tx);
        let _ = sender.send(reply);
    }

    async fn save_reply(&self) -> SaveReply {
        if self.hold_saves.load(Ordering::SeqCst) {
            let (tx, rx) = oneshot::channel();
            self.held_saves.lock().unwrap().push(tx);
            return rx.await.unwrap_or_else(|_| Err(unscripted()));
        }
        let reply = self.save_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(unscripted()))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted() -> ApiError {
    ApiError::Remote {
        status: None,
        message: "no scripted reply".into(),
    }
}

#[async_trait]
impl ContactStore for FakeStore {
    async fn list(&self, query: &ListQuery) -> Result<ContactsResponse, ApiError> {
        self.record(Call::List(query.clone()));
        if self.hold_lists.load(Ordering::SeqCst) {
            let (tx, rx) = oneshot::channel();
            self.held.lock().unwrap().push(tx);
            return rx.await.unwrap_or_else(|_| Err(unscripted()));
        }
        let reply = self.list_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| {
            Ok(page_of(
                Vec::new(),
                query.page.unwrap_or(1),
                query.limit.unwrap_or(10),
                0,
            ))
        })
    }

    async fn get(&self, id: &str) -> Result<Contact, ApiError> {
        self.record(Call::Get(id.to_string()));
        let reply = self.get_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(unscripted()))
    }

    async fn create(&self, data: &ContactFormData) -> Result<Contact, ApiError> {
        self.record(Call::Create(data.clone()));
        self.save_reply().await
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, ApiError> {
        self.record(Call::Update(id.to_string(), patch.clone()));
        self.save_reply().await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()));
        let reply = self.delete_replies.lock().unwrap().pop_front();
        reply.unwrap_or(Ok(()))
    }
}
