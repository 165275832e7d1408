//! Batch attachment upload with partial-failure isolation.
//!
//! Every staged attachment runs its own upload-then-register operation; the
//! batch awaits all of them regardless of individual failure (settle-all)
//! and reports succeeded names and a failure count. Partial success is a
//! distinct outcome from total success and total failure — the presenter
//! shows "3 of 5 uploaded", never a collapsed pass/fail.
//!
//! The same orchestrator serves all three call sites with identical
//! semantics: ticket-creation attachments, mark-for-verification evidence,
//! and remark attachments.

use std::path::PathBuf;

use futures::future::join_all;

use crate::client::MaintenanceApi;
use crate::error::Result;
use crate::lifecycle::{self, TicketAction};
use crate::ticket::{NewAttachment, NewTicket, Remark, Ticket};

/// A locally-staged attachment awaiting upload.
#[derive(Debug, Clone)]
pub struct PendingAttachment {
    /// Local file location (picker output, camera roll path, ...).
    pub local_path: PathBuf,
    /// Name shown to the user and registered server-side.
    pub display_name: String,
    pub mime_type: String,
    pub size: Option<u64>,
}

/// Result of a batch upload: which attachments made it, how many did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Display names of successfully registered attachments.
    pub succeeded: Vec<String>,
    /// Count of operations that failed. Failures are not retried here;
    /// retry is a user-initiated re-attempt.
    pub failed: usize,
}

/// The three user-visible outcomes of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    AllSucceeded,
    Partial,
    AllFailed,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed
    }

    /// An empty batch counts as success: there was nothing to do.
    pub fn outcome(&self) -> BatchOutcome {
        match (self.succeeded.is_empty(), self.failed) {
            (_, 0) => BatchOutcome::AllSucceeded,
            (true, _) => BatchOutcome::AllFailed,
            (false, _) => BatchOutcome::Partial,
        }
    }

    /// Summary line for the presenter's alert ("3 of 5 uploaded").
    pub fn summary(&self) -> String {
        format!("{} of {} uploaded", self.succeeded.len(), self.total())
    }
}

/// Upload and register a batch of attachments against a ticket.
///
/// All operations run concurrently and settle independently — one failure
/// never aborts or rolls back the others. Each success creates exactly one
/// attachment record; no compensating deletion is attempted on partial
/// failure.
pub async fn upload_batch<A: MaintenanceApi>(
    api: &A,
    ticket_id: u64,
    actor_account_id: u64,
    staged: Vec<PendingAttachment>,
) -> BatchReport {
    let operations = staged.into_iter().map(|item| async move {
        let name = item.display_name.clone();
        match upload_one(api, ticket_id, actor_account_id, item).await {
            Ok(()) => Ok(name),
            Err(err) => {
                tracing::warn!("attachment '{name}' failed for ticket {ticket_id}: {err}");
                Err(())
            }
        }
    });

    let settled = join_all(operations).await;

    let mut succeeded = Vec::new();
    let mut failed = 0;
    for result in settled {
        match result {
            Ok(name) => succeeded.push(name),
            Err(()) => failed += 1,
        }
    }

    BatchReport { succeeded, failed }
}

async fn upload_one<A: MaintenanceApi>(
    api: &A,
    ticket_id: u64,
    actor_account_id: u64,
    item: PendingAttachment,
) -> Result<()> {
    let filepath = api.upload_file(&item).await?;
    let meta = NewAttachment {
        uploaded_by: actor_account_id,
        file_path: filepath,
        file_name: item.display_name,
        file_type: item.mime_type,
        file_size: item.size,
    };
    api.create_attachment(ticket_id, &meta).await?;
    Ok(())
}

/// Create a ticket and upload its initial attachments.
///
/// The ticket creation itself is all-or-nothing; the attachment batch then
/// reports independently, so a created ticket with some failed attachments
/// surfaces as a partial outcome rather than a rolled-back creation.
pub async fn create_ticket_with_attachments<A: MaintenanceApi>(
    api: &A,
    new: NewTicket,
    staged: Vec<PendingAttachment>,
) -> Result<(Ticket, BatchReport)> {
    let actor = new.created_by;
    let ticket = api.create_ticket(&new).await?;
    let report = upload_batch(api, ticket.id, actor, staged).await;
    Ok((ticket, report))
}

/// Post a remark with optional attachments.
///
/// Checked against the lifecycle table first: commenting endpoints must not
/// be called for view-only tickets.
pub async fn add_remark_with_attachments<A: MaintenanceApi>(
    api: &A,
    ticket: &Ticket,
    actor_account_id: u64,
    text: &str,
    staged: Vec<PendingAttachment>,
) -> Result<(Remark, BatchReport)> {
    lifecycle::ensure_permitted(ticket.status, TicketAction::Comment)?;

    let remark = api.create_remark(ticket.id, actor_account_id, text).await?;
    let report = upload_batch(api, ticket.id, actor_account_id, staged).await;
    Ok((remark, report))
}
