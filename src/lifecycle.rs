//! Ticket lifecycle state machine.
//!
//! The authoritative status graph and the transition-trigger table consumed
//! by both the store and the card presenter. Every mutating UI action is
//! checked here *before* a network call is attempted — an action the table
//! does not permit fails fast client-side, it never costs a round trip.
//!
//! The server is the single writer of `Status`; this module only answers
//! "may this actor attempt that transition from here", it never recomputes
//! status from the event log.

use std::fmt;

use crate::error::{BantayError, Result};
use crate::types::TicketStatus;

/// Actions an actor can attempt on a ticket.
///
/// `Comment` and `Attach` are not transitions; they gate the composer on
/// statuses where the commenting/mutation endpoints may be called at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketAction {
    /// Staff accepts a requested ticket and assigns it.
    Accept,
    /// Operator submits finished work for staff review.
    MarkForVerification,
    /// Operator asks staff to cancel the assignment (requires a reason).
    RequestCancel,
    /// Staff approves verified work.
    ApproveVerification,
    /// Staff rejects submitted work back to pending.
    RejectVerification,
    /// Staff approves a cancellation request (fixes the snapshot cutoff).
    ApproveCancel,
    /// Staff rejects a cancellation request back to pending.
    RejectCancel,
    /// Post a free-text remark.
    Comment,
    /// Attach a file.
    Attach,
}

impl fmt::Display for TicketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketAction::Accept => write!(f, "accept"),
            TicketAction::MarkForVerification => write!(f, "mark for verification"),
            TicketAction::RequestCancel => write!(f, "request cancellation"),
            TicketAction::ApproveVerification => write!(f, "approve verification"),
            TicketAction::RejectVerification => write!(f, "reject verification"),
            TicketAction::ApproveCancel => write!(f, "approve cancellation"),
            TicketAction::RejectCancel => write!(f, "reject cancellation"),
            TicketAction::Comment => write!(f, "comment"),
            TicketAction::Attach => write!(f, "attach"),
        }
    }
}

/// The transition table: where a trigger leads from a given status.
///
/// Returns `None` when the table has no such edge. Terminal statuses
/// (`Done`, `Canceled`) have no outgoing edges; re-opening a ticket is a
/// server-side operation modeled as a fresh assignment cycle.
pub fn next_status(from: TicketStatus, action: TicketAction) -> Option<TicketStatus> {
    use TicketAction::*;
    use TicketStatus::*;

    match (from, action) {
        (Requested, Accept) => Some(Pending),
        (Pending, MarkForVerification) => Some(ForReview),
        (Pending, RequestCancel) => Some(CancelRequested),
        (ForReview, RejectVerification) => Some(Pending),
        (ForReview, ApproveVerification) => Some(Done),
        (CancelRequested, ApproveCancel) => Some(Canceled),
        (CancelRequested, RejectCancel) => Some(Pending),
        _ => None,
    }
}

/// Whether remarks/attachments may be posted at this status.
///
/// `Requested` has no assignee yet, so the commenting endpoints must not be
/// called; terminal statuses are read-only history.
pub fn can_comment(status: TicketStatus) -> bool {
    matches!(status, TicketStatus::Pending | TicketStatus::ForReview)
}

/// Whether the presenter should render the ticket read-only.
pub fn is_view_only(status: TicketStatus) -> bool {
    matches!(
        status,
        TicketStatus::Done | TicketStatus::Canceled | TicketStatus::Requested
    )
}

/// Whether an action may be attempted from this status.
pub fn permits(status: TicketStatus, action: TicketAction) -> bool {
    match action {
        TicketAction::Comment | TicketAction::Attach => can_comment(status),
        _ => next_status(status, action).is_some(),
    }
}

/// Fail-fast guard used by every mutating call path.
pub fn ensure_permitted(status: TicketStatus, action: TicketAction) -> Result<()> {
    if permits(status, action) {
        Ok(())
    } else {
        Err(BantayError::NotPermitted { action, status })
    }
}

/// Actions the presenter should enable for a ticket at this status.
pub fn enabled_actions(status: TicketStatus) -> &'static [TicketAction] {
    use TicketAction::*;

    match status {
        TicketStatus::Requested => &[Accept],
        TicketStatus::Pending => &[MarkForVerification, RequestCancel, Comment, Attach],
        TicketStatus::ForReview => &[
            ApproveVerification,
            RejectVerification,
            Comment,
            Attach,
        ],
        TicketStatus::CancelRequested => &[ApproveCancel, RejectCancel],
        TicketStatus::Done | TicketStatus::Canceled => &[],
    }
}
