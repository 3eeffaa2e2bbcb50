// Shared fakes for directory integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use sheetbase::{ClientError, DraftProvider, GenerationError, RemoteStore};
use shared::{Record, RecordDraft, RecordStatus};
use sheet_client::ClientResult;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// One call seen by [`FakeRemote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(String),
    Update(String),
    Delete(String),
}

/// In-memory endpoint that mints uuid ids and can fail on demand
#[derive(Default)]
pub struct FakeRemote {
    rows: Mutex<Vec<Record>>,
    calls: Mutex<Vec<Call>>,
    /// 1-based create attempt that fails with a remote error
    fail_create_at: Option<usize>,
    fail_list: AtomicBool,
    /// Id handed out for every create instead of a fresh uuid
    fixed_id: Option<String>,
    creates: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn failing_create_at(mut self, attempt: usize) -> Self {
        self.fail_create_at = Some(attempt);
        self
    }

    pub fn minting_fixed_id(mut self, id: &str) -> Self {
        self.fixed_id = Some(id.to_string());
        self
    }

    /// Make every later `list` fail with a transport-class error
    pub fn break_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    /// Drop a row behind the client's back
    pub fn remove_row(&self, id: &str) {
        self.rows.lock().unwrap().retain(|r| r.id != id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    pub fn rows(&self) -> Vec<Record> {
        self.rows.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        self.record(Call::List);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::InvalidResponse("HTTP 502 Bad Gateway".into()));
        }
        Ok(self.rows())
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        self.record(Call::Create(draft.name.clone()));
        self.enter();
        tokio::task::yield_now().await;
        let attempt = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        let result = if self.fail_create_at == Some(attempt) {
            Err(ClientError::Remote("Lock timeout".into()))
        } else {
            let id = self
                .fixed_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let record = draft.clone().into_record(id);
            self.rows.lock().unwrap().push(record.clone());
            Ok(record)
        };
        self.leave();
        result
    }

    async fn update(&self, record: &Record) -> ClientResult<Record> {
        self.record(Call::Update(record.id.clone()));
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(record.clone())
            }
            None => Err(ClientError::Remote("ID not found".into())),
        }
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.record(Call::Delete(id.to_string()));
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(ClientError::Remote("ID not found".into()));
        }
        Ok(())
    }
}

/// Provider returning a fixed batch; `None` behaves like a missing key
pub struct FakeProvider {
    drafts: Option<Vec<RecordDraft>>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_drafts(drafts: Vec<RecordDraft>) -> Self {
        Self {
            drafts: Some(drafts),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn without_key() -> Self {
        Self {
            drafts: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftProvider for FakeProvider {
    async fn generate(&self) -> Result<Vec<RecordDraft>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.drafts
            .clone()
            .ok_or(GenerationError::MissingCredential)
    }
}

pub fn draft(name: &str, role: &str, department: &str) -> RecordDraft {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    RecordDraft::new(name, role, department, email, RecordStatus::Active)
}

pub fn record(id: &str, name: &str, role: &str, department: &str) -> Record {
    draft(name, role, department).into_record(id)
}

pub fn batch(size: usize) -> Vec<RecordDraft> {
    (1..=size)
        .map(|i| draft(&format!("Person {i}"), "Engineer", "Engineering"))
        .collect()
}
