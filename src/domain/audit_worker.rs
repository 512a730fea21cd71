//! Background writer for the audit trail.
//!
//! Classification handlers never wait on audit persistence. They hand a
//! [`NewAuditEntry`] to [`AuditRecorder::record`], which enqueues it without
//! blocking; [`run_audit_worker`] drains the queue and appends each entry to
//! the audit log and, for authenticated callers, to the per-user history.
//!
//! Every failure on this path (queue full, queue closed, store error) is
//! logged and counted, then discarded. Nothing is retried.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::entities::NewAuditEntry;
use crate::domain::repositories::{AuditRepository, HistoryRepository};

/// Non-blocking handle used to submit audit entries.
#[derive(Clone)]
pub struct AuditRecorder {
    sender: mpsc::Sender<NewAuditEntry>,
}

impl AuditRecorder {
    pub fn new(sender: mpsc::Sender<NewAuditEntry>) -> Self {
        Self { sender }
    }

    /// Creates a recorder and the receiving end for [`run_audit_worker`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NewAuditEntry>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Enqueues an entry. Drops it with a warning if the queue is full or closed.
    pub fn record(&self, entry: NewAuditEntry) {
        if let Err(e) = self.sender.try_send(entry) {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "queue closed",
            };
            metrics::counter!("audit_events_dropped_total", "reason" => reason).increment(1);
            tracing::warn!(reason, "Audit entry dropped");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Remaining free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Drains the audit queue until every [`AuditRecorder`] is dropped.
pub async fn run_audit_worker(
    mut rx: mpsc::Receiver<NewAuditEntry>,
    audit_repository: Arc<dyn AuditRepository>,
    history_repository: Arc<dyn HistoryRepository>,
) {
    while let Some(entry) = rx.recv().await {
        persist_entry(entry, audit_repository.as_ref(), history_repository.as_ref()).await;
    }

    tracing::info!("Audit worker stopped");
}

/// Writes one entry to the audit log and, if it carries a user, the history.
///
/// The two writes are independent: a failed audit append does not prevent
/// the history append.
pub async fn persist_entry(
    entry: NewAuditEntry,
    audit_repository: &dyn AuditRepository,
    history_repository: &dyn HistoryRepository,
) {
    let user_id = entry.user_id;
    let history_entry = user_id.map(|id| (id, entry.clone()));

    if let Err(e) = audit_repository.append(entry).await {
        metrics::counter!("audit_writes_failed_total", "store" => "audit").increment(1);
        tracing::warn!(error = %e, "Failed to write audit entry");
    }

    if let Some((user_id, entry)) = history_entry
        && let Err(e) = history_repository.append(user_id, entry).await
    {
        metrics::counter!("audit_writes_failed_total", "store" => "history").increment(1);
        tracing::warn!(error = %e, user_id, "Failed to write history entry");
    }
}
