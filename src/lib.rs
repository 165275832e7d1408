//! Maintenance ticket workflow and timeline client for municipal
//! waste-collection operations.
//!
//! The crate models a maintenance ticket's lifecycle (creation → assignment
//! → completion/cancellation), merges the three independently fetched record
//! streams — status events, remarks, attachments — into one time-ordered
//! conversation view, snapshots cancelled-ticket history at the
//! cancellation-approval instant, and uploads attachment batches with
//! partial-failure isolation. Presentation and transport beyond the typed
//! REST client are external collaborators.

pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod snapshot;
pub mod store;
pub mod ticket;
pub mod timeline;
pub mod types;
pub mod upload;

pub use client::{HttpMaintenanceClient, MaintenanceApi};
pub use config::Config;
pub use error::{BantayError, Result};
pub use lifecycle::{TicketAction, can_comment, enabled_actions, is_view_only};
pub use snapshot::{load_cancelled_history, request_cancellation, validate_reason};
pub use store::{Buckets, TicketStore};
pub use ticket::{
    Attachment, Event, MaintenancePriority, NewAttachment, NewTicket, Remark, Ticket,
};
pub use timeline::{TimelineBody, TimelineEntry, compose, load_timeline};
pub use types::{EventType, TicketPriority, TicketStatus, VALID_PRIORITIES, VALID_STATUSES};
pub use upload::{
    BatchOutcome, BatchReport, PendingAttachment, add_remark_with_attachments,
    create_ticket_with_attachments, upload_batch,
};
