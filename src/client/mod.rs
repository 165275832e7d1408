//! Service client for the maintenance REST API.
//!
//! [`MaintenanceApi`] is the seam between the workflow engine and the
//! transport: the store, the timeline loader, and the upload orchestrator
//! are all generic over it, so tests drive them with an in-memory fake while
//! production uses the reqwest-backed [`HttpMaintenanceClient`].

pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::ticket::{
    Attachment, Event, MaintenancePriority, NewAttachment, NewTicket, Remark, Ticket,
};
use crate::upload::PendingAttachment;

pub use http::HttpMaintenanceClient;

/// Typed REST calls for tickets, remarks, attachments, events, and
/// priorities.
///
/// The `before` parameter on the list calls is the snapshot bound: when set,
/// the server returns only records with `createdAt <= before`. Cancelled
/// tickets pass their `CancelApprovedAt` here so history is frozen at the
/// cancellation-approval instant.
#[async_trait]
pub trait MaintenanceApi: Send + Sync {
    async fn list_priorities(&self) -> Result<Vec<MaintenancePriority>>;

    async fn create_ticket(&self, new: &NewTicket) -> Result<Ticket>;

    /// Tickets currently assigned to an operator.
    async fn list_assigned(&self, operator_account_id: u64) -> Result<Vec<Ticket>>;

    /// Tickets created by a requester, optionally filtered by status.
    async fn list_created_by(
        &self,
        requester_account_id: u64,
        status: Option<crate::types::TicketStatus>,
    ) -> Result<Vec<Ticket>>;

    /// An operator's cancelled tickets; each carries `CancelApprovedAt`.
    async fn cancelled_history(&self, operator_account_id: u64) -> Result<Vec<Ticket>>;

    async fn accept_ticket(&self, ticket_id: u64, operator_account_id: u64) -> Result<Ticket>;

    async fn mark_for_verification(
        &self,
        ticket_id: u64,
        operator_account_id: u64,
    ) -> Result<Ticket>;

    async fn request_cancel(
        &self,
        ticket_id: u64,
        actor_account_id: u64,
        reason: &str,
    ) -> Result<Ticket>;

    async fn list_remarks(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Remark>>;

    async fn create_remark(
        &self,
        ticket_id: u64,
        actor_account_id: u64,
        text: &str,
    ) -> Result<Remark>;

    async fn list_attachments(
        &self,
        ticket_id: u64,
        before: Option<&str>,
    ) -> Result<Vec<Attachment>>;

    async fn create_attachment(
        &self,
        ticket_id: u64,
        meta: &NewAttachment,
    ) -> Result<Attachment>;

    async fn list_events(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Event>>;

    /// Push a staged file to remote storage; returns the remote `filepath`
    /// to be registered via [`MaintenanceApi::create_attachment`].
    async fn upload_file(&self, staged: &PendingAttachment) -> Result<String>;
}
