//! Cancellation requests and the point-in-time snapshot they produce.
//!
//! Approving a cancellation fixes `CancelApprovedAt` on the ticket. From
//! then on, every read of that ticket's remarks/attachments/events for the
//! cancelled-history view passes that instant as the `before` bound — a
//! deliberate snapshot, not a soft delete. The ticket may later be
//! reassigned under the same id; the new cycle's activity never appears in
//! the frozen view.

use crate::client::MaintenanceApi;
use crate::error::{BantayError, Result};
use crate::lifecycle::{self, TicketAction};
use crate::ticket::Ticket;
use crate::timeline::{self, TimelineEntry};

/// Validate a cancellation reason: non-empty after trimming.
///
/// Checked client-side so an empty reason never costs a network call.
pub fn validate_reason(reason: &str) -> Result<&str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(BantayError::Validation(
            "cancellation reason must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Submit a cancellation request for a pending ticket.
///
/// Fails fast on an empty reason or a status with no cancel edge; on
/// success the server moves the ticket to `Cancel Requested`. Approval is
/// observed only via a later fetch (the ticket arrives cancelled with
/// `CancelApprovedAt` set); rejection returns it to pending with no cutoff.
pub async fn request_cancellation<A: MaintenanceApi>(
    api: &A,
    ticket: &Ticket,
    actor_account_id: u64,
    reason: &str,
) -> Result<Ticket> {
    let reason = validate_reason(reason)?;
    lifecycle::ensure_permitted(ticket.status, TicketAction::RequestCancel)?;

    api.request_cancel(ticket.id, actor_account_id, reason).await
}

/// Load the frozen history of a cancelled ticket.
///
/// Composes the timeline bounded to the cancellation-approval instant.
/// Calling this for a ticket without a cutoff is a caller bug (the live
/// view should be loaded instead), reported as a validation error.
pub async fn load_cancelled_history<A: MaintenanceApi>(
    api: &A,
    ticket: &Ticket,
    viewer_account_id: u64,
) -> Result<Vec<TimelineEntry>> {
    let cutoff = ticket.history_cutoff().ok_or_else(|| {
        BantayError::Validation(format!(
            "ticket {} has no cancellation snapshot to display",
            ticket.id
        ))
    })?;

    timeline::load_timeline(api, ticket.id, viewer_account_id, Some(cutoff)).await
}
