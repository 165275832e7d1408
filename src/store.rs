//! Ticket store: the one piece of shared mutable ticket state.
//!
//! `refresh` pulls the "assigned to me" and "my cancelled history" lists,
//! deduplicates them by ticket id, and partitions the result into status
//! buckets for the presenter. Mutating actions go through the lifecycle
//! table, hit the service, and then re-fetch — no optimistic patching, so
//! the local list never diverges from the server.
//!
//! A failed refresh keeps the previous snapshot visible and records a
//! retryable error: stale-but-visible beats blank.

use std::collections::HashMap;

use crate::client::MaintenanceApi;
use crate::error::{BantayError, Result};
use crate::lifecycle::{self, TicketAction};
use crate::snapshot;
use crate::ticket::Ticket;
use crate::types::TicketStatus;
use crate::upload::{BatchReport, PendingAttachment, upload_batch};

/// Tickets partitioned by status for the presenter's list view.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub requested: Vec<&'a Ticket>,
    pub pending: Vec<&'a Ticket>,
    pub for_review: Vec<&'a Ticket>,
    pub cancel_requested: Vec<&'a Ticket>,
    pub done: Vec<&'a Ticket>,
    pub canceled: Vec<&'a Ticket>,
}

impl<'a> Buckets<'a> {
    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
            && self.pending.is_empty()
            && self.for_review.is_empty()
            && self.cancel_requested.is_empty()
            && self.done.is_empty()
            && self.canceled.is_empty()
    }

    pub fn bucket(&self, status: TicketStatus) -> &[&'a Ticket] {
        match status {
            TicketStatus::Requested => &self.requested,
            TicketStatus::Pending => &self.pending,
            TicketStatus::ForReview => &self.for_review,
            TicketStatus::CancelRequested => &self.cancel_requested,
            TicketStatus::Done => &self.done,
            TicketStatus::Canceled => &self.canceled,
        }
    }
}

/// Fetch/partition store for one signed-in operator.
pub struct TicketStore<A: MaintenanceApi> {
    api: A,
    account_id: Option<u64>,
    tickets: Vec<Ticket>,
    last_error: Option<String>,
}

impl<A: MaintenanceApi> TicketStore<A> {
    /// `account_id` is the signed-in actor; `None` means no session, which
    /// makes every operation fail fast with an auth error.
    pub fn new(api: A, account_id: Option<u64>) -> Self {
        Self {
            api,
            account_id,
            tickets: Vec::new(),
            last_error: None,
        }
    }

    /// Missing identity is a fatal precondition, never retried
    /// automatically.
    fn require_account(&self) -> Result<u64> {
        self.account_id
            .ok_or_else(|| BantayError::Auth("no signed-in account".to_string()))
    }

    /// Fetch both source lists, deduplicate, and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and the error is recorded
    /// as retryable state before being propagated.
    pub async fn refresh(&mut self) -> Result<()> {
        let me = self.require_account()?;

        let (assigned, cancelled) =
            tokio::join!(self.api.list_assigned(me), self.api.cancelled_history(me));

        match (assigned, cancelled) {
            (Ok(assigned), Ok(cancelled)) => {
                self.tickets = dedupe_tickets(assigned, cancelled);
                self.last_error = None;
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!("ticket refresh failed, keeping stale data: {err}");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// The underlying service client, for per-ticket reads that bypass the
    /// shared list (timeline loads, remark posting).
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn get(&self, ticket_id: u64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == ticket_id)
    }

    /// Retryable error from the most recent failed refresh, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Partition the current snapshot into status buckets.
    pub fn buckets(&self) -> Buckets<'_> {
        let mut buckets = Buckets::default();
        for ticket in &self.tickets {
            match ticket.status {
                TicketStatus::Requested => buckets.requested.push(ticket),
                TicketStatus::Pending => buckets.pending.push(ticket),
                TicketStatus::ForReview => buckets.for_review.push(ticket),
                TicketStatus::CancelRequested => buckets.cancel_requested.push(ticket),
                TicketStatus::Done => buckets.done.push(ticket),
                TicketStatus::Canceled => buckets.canceled.push(ticket),
            }
        }
        buckets
    }

    fn find_ticket(&self, ticket_id: u64) -> Result<&Ticket> {
        self.get(ticket_id)
            .ok_or(BantayError::TicketNotFound(ticket_id))
    }

    /// Accept a requested ticket (staff role), then re-fetch.
    pub async fn accept_ticket(&mut self, ticket_id: u64) -> Result<()> {
        let me = self.require_account()?;
        let ticket = self.find_ticket(ticket_id)?;
        lifecycle::ensure_permitted(ticket.status, TicketAction::Accept)?;

        self.api.accept_ticket(ticket_id, me).await?;
        self.refresh().await
    }

    /// Submit finished work for verification, uploading evidence first.
    ///
    /// Zero attachments is a valid submission. The attachment batch report
    /// is returned so the presenter can surface partial outcomes alongside
    /// the status change.
    pub async fn submit_for_verification(
        &mut self,
        ticket_id: u64,
        attachments: Vec<PendingAttachment>,
    ) -> Result<BatchReport> {
        let me = self.require_account()?;
        let ticket = self.find_ticket(ticket_id)?;
        lifecycle::ensure_permitted(ticket.status, TicketAction::MarkForVerification)?;

        let report = upload_batch(&self.api, ticket_id, me, attachments).await;
        self.api.mark_for_verification(ticket_id, me).await?;
        self.refresh().await?;
        Ok(report)
    }

    /// Submit a cancellation request with a mandatory reason, then
    /// re-fetch.
    pub async fn submit_cancel_request(&mut self, ticket_id: u64, reason: &str) -> Result<()> {
        let me = self.require_account()?;
        let ticket = self.find_ticket(ticket_id)?;

        snapshot::request_cancellation(&self.api, ticket, me, reason).await?;
        self.refresh().await
    }
}

/// Deduplicate the two source lists by ticket id.
///
/// Last-seen wins, and the cancelled-history list is applied last so its
/// copy (which carries the authoritative `CancelApprovedAt`) takes
/// precedence. When the winning copy lacks a cancellation timestamp that
/// the losing copy had, the timestamp survives the merge.
fn dedupe_tickets(assigned: Vec<Ticket>, cancelled_history: Vec<Ticket>) -> Vec<Ticket> {
    let mut order: Vec<u64> = Vec::new();
    let mut by_id: HashMap<u64, Ticket> = HashMap::new();

    for ticket in assigned.into_iter().chain(cancelled_history) {
        match by_id.get_mut(&ticket.id) {
            Some(existing) => {
                let mut incoming = ticket;
                if incoming.cancel_approved_at.is_none() {
                    incoming.cancel_approved_at = existing.cancel_approved_at.take();
                }
                *existing = incoming;
            }
            None => {
                order.push(ticket.id);
                by_id.insert(ticket.id, ticket);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}
