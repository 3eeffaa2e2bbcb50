//! Bulk generation - 批量生成
//!
//! Drafts from a [`DraftProvider`] are committed one at a time: each create
//! is awaited and applied to the store before the next one is sent.
//!
//! The ordering is load-bearing. The endpoint takes a script-wide lock with a
//! short acquisition timeout for every call, so concurrent creates fail
//! intermittently under contention. Do not turn this loop into a join.

use crate::error::{AppError, AppResult};
use crate::generator::{DraftProvider, GenerationError};
use crate::store::RecordStore;
use sheet_client::RemoteStore;
use shared::RecordDraft;

/// Outcome of a fully committed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    /// Ids minted by the endpoint, in commit order
    pub created: Vec<String>,
}

impl BulkReport {
    pub fn count(&self) -> usize {
        self.created.len()
    }
}

/// Generate a batch and commit it serially.
///
/// Provider failure aborts before any create. The first failing draft aborts
/// the rest of the batch; records committed before it stay (the endpoint has
/// no transactions to roll back) and the failure comes back as
/// [`AppError::BulkAborted`].
pub async fn generate_and_commit<P, R>(
    provider: &P,
    remote: &R,
    store: &mut RecordStore,
) -> AppResult<BulkReport>
where
    P: DraftProvider + ?Sized,
    R: RemoteStore + ?Sized,
{
    let drafts = provider.generate().await?;
    if drafts.is_empty() {
        return Err(GenerationError::Empty.into());
    }

    let total = drafts.len();
    tracing::info!(total, "committing generated drafts");

    let mut created = Vec::with_capacity(total);
    for (index, draft) in drafts.into_iter().enumerate() {
        match commit_one(remote, store, &draft).await {
            Ok(id) => {
                tracing::info!(id = %id, step = index + 1, total, "draft committed");
                created.push(id);
            }
            Err(failure) => {
                // A create the endpoint confirmed still counts, even when the
                // store refused it afterwards.
                let committed = created.len() + usize::from(failure.remote_id.is_some());
                tracing::warn!(
                    step = index + 1,
                    total,
                    committed,
                    error = %failure.error,
                    "bulk generation aborted"
                );
                return Err(AppError::BulkAborted {
                    created: committed,
                    total,
                    source: Box::new(failure.error),
                });
            }
        }
    }

    Ok(BulkReport { created })
}

struct CommitFailure {
    /// Set when the endpoint created the row before the failure
    remote_id: Option<String>,
    error: AppError,
}

impl CommitFailure {
    fn before_create(error: impl Into<AppError>) -> Self {
        Self {
            remote_id: None,
            error: error.into(),
        }
    }
}

async fn commit_one<R>(
    remote: &R,
    store: &mut RecordStore,
    draft: &RecordDraft,
) -> Result<String, CommitFailure>
where
    R: RemoteStore + ?Sized,
{
    draft.validate().map_err(CommitFailure::before_create)?;
    let record = remote
        .create(draft)
        .await
        .map_err(CommitFailure::before_create)?;
    let id = record.id.clone();
    if let Err(e) = store.apply_create(record) {
        tracing::warn!(id = %id, error = %e, "created remotely but rejected by the store");
        return Err(CommitFailure {
            remote_id: Some(id),
            error: e.into(),
        });
    }
    Ok(id)
}
