//! Wire records for the maintenance REST API.
//!
//! Field names on the wire are the backend's mixed PascalCase/underscore
//! spelling (`Request_Id`, `CancelApprovedAt`, ...); serde renames keep the
//! Rust side idiomatic. All records are read-mostly projections owned by the
//! backend — the client mutates tickets only through explicit action calls,
//! never by editing fields and writing them back.

use serde::{Deserialize, Serialize};

use crate::types::{EventType, TicketPriority, TicketStatus};

/// A maintenance request tracked through the lifecycle state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "Request_Id")]
    pub id: u64,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Details")]
    pub details: String,

    #[serde(rename = "Priority")]
    pub priority: TicketPriority,

    #[serde(rename = "Status")]
    pub status: TicketStatus,

    #[serde(rename = "Created_by")]
    pub created_by: u64,

    #[serde(rename = "Assigned_to", default)]
    pub assigned_to: Option<u64>,

    #[serde(rename = "CreatedByName", default)]
    pub created_by_name: Option<String>,

    #[serde(rename = "AssignedToName", default)]
    pub assigned_to_name: Option<String>,

    #[serde(rename = "Request_date")]
    pub request_date: String,

    #[serde(rename = "Due_date", default)]
    pub due_date: Option<String>,

    #[serde(rename = "CancelLogReason", default)]
    pub cancel_log_reason: Option<String>,

    #[serde(rename = "CancelRequestedAt", default)]
    pub cancel_requested_at: Option<String>,

    #[serde(rename = "CancelApprovedAt", default)]
    pub cancel_approved_at: Option<String>,
}

/// Body for `POST /api/maintenance`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub details: String,
    pub priority: TicketPriority,
    pub created_by: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// A free-text comment on a ticket. Immutable once created, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remark {
    #[serde(rename = "Remark_Id")]
    pub id: u64,

    #[serde(rename = "Request_Id")]
    pub ticket_id: u64,

    #[serde(rename = "Remark_text")]
    pub text: String,

    #[serde(rename = "Created_by")]
    pub created_by: u64,

    #[serde(rename = "Created_at")]
    pub created_at: String,

    #[serde(rename = "CreatedByName", default)]
    pub created_by_name: Option<String>,

    #[serde(rename = "CreatedByRoleId", default)]
    pub created_by_role_id: Option<u64>,

    #[serde(rename = "CreatedByRoleName", default)]
    pub created_by_role_name: Option<String>,
}

/// A file attached as evidence to a ticket. Immutable, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "Attachment_Id")]
    pub id: u64,

    #[serde(rename = "Request_Id")]
    pub ticket_id: u64,

    #[serde(rename = "Uploaded_by")]
    pub uploaded_by: u64,

    #[serde(rename = "File_path")]
    pub file_path: String,

    #[serde(rename = "File_name")]
    pub file_name: String,

    #[serde(rename = "File_type")]
    pub file_type: String,

    #[serde(rename = "File_size", default)]
    pub file_size: Option<u64>,

    #[serde(rename = "Uploaded_at")]
    pub uploaded_at: String,

    #[serde(rename = "UploadedByName", default)]
    pub uploaded_by_name: Option<String>,
}

/// Body for `POST /api/maintenance/{id}/attachments`, sent after the file
/// itself has been pushed to remote storage.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttachment {
    #[serde(rename = "Uploaded_by")]
    pub uploaded_by: u64,

    #[serde(rename = "File_path")]
    pub file_path: String,

    #[serde(rename = "File_name")]
    pub file_name: String,

    #[serde(rename = "File_type")]
    pub file_type: String,

    #[serde(rename = "File_size", skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// One row of the append-only audit log: a status transition or actor action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Event_Id")]
    pub id: u64,

    #[serde(rename = "Request_Id")]
    pub ticket_id: u64,

    #[serde(rename = "Event_type")]
    pub event_type: EventType,

    #[serde(rename = "Actor_Account_Id")]
    pub actor_account_id: u64,

    #[serde(rename = "ActorName", default)]
    pub actor_name: Option<String>,

    /// Free-text notes; meaningful only for CANCEL_REQUESTED, where it
    /// carries the cancellation reason.
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,

    #[serde(rename = "Created_At")]
    pub created_at: String,

    /// Destination operator for REASSIGNED events.
    #[serde(rename = "To_Account_Id", default)]
    pub to_account_id: Option<u64>,

    #[serde(rename = "ToAccountName", default)]
    pub to_account_name: Option<String>,
}

/// One row of the priorities lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePriority {
    #[serde(rename = "Priority_Id")]
    pub id: u64,

    #[serde(rename = "Priority_Name")]
    pub name: String,
}

impl Ticket {
    /// Snapshot bound for cancelled-history views.
    ///
    /// Returns the cancellation-approval instant when this ticket is
    /// cancelled; every child-record read for display must then pass this as
    /// the `before` bound so activity from a later reassignment of the same
    /// ticket id never bleeds into the cancelled view.
    pub fn history_cutoff(&self) -> Option<&str> {
        if self.status == TicketStatus::Canceled {
            self.cancel_approved_at.as_deref()
        } else {
            None
        }
    }
}
