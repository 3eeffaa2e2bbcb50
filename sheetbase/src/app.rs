//! Directory controller
//!
//! Owns the record store and the transient UI state (open form, search
//! query, error banner) and implements the user actions against the remote
//! store. Every mutating action takes `&mut self`, so a second action cannot
//! start while one is still outstanding.
//!
//! Known limitation: two processes editing the same sheet are not
//! reconciled. Overlapping updates to one id resolve as last response wins;
//! only `load` brings in changes made elsewhere.

use crate::bulk::{self, BulkReport};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult, Notice};
use crate::filter;
use crate::generator::{DraftProvider, GeminiProvider};
use crate::store::{RecordStore, StoreError};
use sheet_client::{RemoteStore, SheetClient};
use shared::{Record, RecordDraft};

/// Which screen the directory is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// No endpoint configured
    Setup,
    List,
}

/// Create/edit form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    /// `Some` when editing an existing record
    pub editing_id: Option<String>,
    pub draft: RecordDraft,
}

impl RecordForm {
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

pub struct Directory<R, P> {
    remote: Option<R>,
    provider: P,
    store: RecordStore,
    form: Option<RecordForm>,
    banner: Option<Notice>,
    query: String,
}

impl Directory<SheetClient, GeminiProvider> {
    /// Wire the directory to the configured endpoint and provider
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let remote = config
            .client_config()
            .map(|c| SheetClient::new(&c))
            .transpose()?;
        let provider = GeminiProvider::from_config(config)?;
        if !provider.has_credential() {
            tracing::debug!("API_KEY is not set; generation disabled");
        }
        if remote.is_none() {
            tracing::warn!("GOOGLE_SHEET_SCRIPT_URL is not set; remote operations disabled");
        }
        Ok(Self::new(remote, provider))
    }
}

impl<R, P> Directory<R, P>
where
    R: RemoteStore,
    P: DraftProvider,
{
    /// `remote: None` puts the directory in the setup-required state
    pub fn new(remote: Option<R>, provider: P) -> Self {
        Self {
            remote,
            provider,
            store: RecordStore::new(),
            form: None,
            banner: None,
            query: String::new(),
        }
    }

    pub fn view(&self) -> View {
        if self.remote.is_some() {
            View::List
        } else {
            View::Setup
        }
    }

    pub fn is_setup_required(&self) -> bool {
        self.view() == View::Setup
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Persistent banner left by the last failed load
    pub fn banner(&self) -> Option<&Notice> {
        self.banner.as_ref()
    }

    // ========== Loading ==========

    /// Refresh the store from the remote list. On failure the store keeps its
    /// previous contents and the banner is set.
    pub async fn load(&mut self) -> AppResult<usize> {
        let remote = self.remote.as_ref().ok_or(AppError::SetupRequired)?;
        match remote.list().await {
            Ok(records) => {
                self.store.replace_all(records);
                self.banner = None;
                tracing::info!(count = self.store.len(), "records loaded");
                Ok(self.store.len())
            }
            Err(e) => {
                let err = AppError::from(e);
                self.banner = Some(Notice::for_load(&err));
                Err(err)
            }
        }
    }

    // ========== Form ==========

    /// Open an empty create form
    pub fn open_create_form(&mut self) -> &mut RecordForm {
        self.form.insert(RecordForm {
            editing_id: None,
            draft: RecordDraft::default(),
        })
    }

    /// Open an edit form prefilled from the stored record
    pub fn open_edit_form(&mut self, id: &str) -> AppResult<&mut RecordForm> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::UnknownRecord(id.to_string()))?;
        let form = RecordForm {
            editing_id: Some(record.id.clone()),
            draft: record.to_draft(),
        };
        Ok(self.form.insert(form))
    }

    pub fn form(&self) -> Option<&RecordForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        self.form.as_mut()
    }

    /// Discard the open form
    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Validate and send the open form. Success closes the form; any failure
    /// leaves it open and the store untouched.
    pub async fn submit_form(&mut self) -> AppResult<Record> {
        let remote = self.remote.as_ref().ok_or(AppError::SetupRequired)?;
        let form = self.form.as_ref().ok_or(AppError::NoForm)?;
        form.draft.validate()?;

        let saved = match &form.editing_id {
            Some(id) => {
                let record = form.draft.clone().into_record(id.clone());
                let updated = remote.update(&record).await?;
                if let Err(e) = self.store.apply_update(id, updated.clone()) {
                    tracing::warn!(
                        id = %updated.id,
                        error = %e,
                        "updated remotely but rejected by the store"
                    );
                    return Err(e.into());
                }
                tracing::info!(id = %updated.id, "record updated");
                updated
            }
            None => {
                let created = remote.create(&form.draft).await?;
                if let Err(e) = self.store.apply_create(created.clone()) {
                    tracing::warn!(
                        id = %created.id,
                        error = %e,
                        "created remotely but rejected by the store"
                    );
                    return Err(e.into());
                }
                tracing::info!(id = %created.id, "record created");
                created
            }
        };

        self.form = None;
        Ok(saved)
    }

    // ========== Delete ==========

    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        let remote = self.remote.as_ref().ok_or(AppError::SetupRequired)?;
        remote.delete(id).await?;
        if !self.store.apply_delete(id) {
            tracing::debug!(id, "deleted record was not in the store");
        }
        if self.form.as_ref().and_then(|f| f.editing_id.as_deref()) == Some(id) {
            self.form = None;
        }
        tracing::info!(id, "record deleted");
        Ok(())
    }

    // ========== Generate ==========

    /// Generate a batch of drafts and commit them one by one
    pub async fn generate(&mut self) -> AppResult<BulkReport> {
        let remote = self.remote.as_ref().ok_or(AppError::SetupRequired)?;
        let report = bulk::generate_and_commit(&self.provider, remote, &mut self.store).await?;
        tracing::info!(count = report.count(), "generated records committed");
        Ok(report)
    }

    // ========== Search ==========

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Store contents filtered by the current query
    pub fn visible(&self) -> Vec<&Record> {
        filter::filter(self.store.records(), &self.query)
    }
}
