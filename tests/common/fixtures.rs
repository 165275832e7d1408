//! Record builders shared by the integration tests.

use std::path::PathBuf;

use bantay::ticket::{Attachment, Event, Remark, Ticket};
use bantay::types::{EventType, TicketPriority, TicketStatus};
use bantay::upload::PendingAttachment;

pub const OPERATOR: u64 = 12;
pub const HOUSEHOLD: u64 = 7;

pub fn ticket(id: u64, status: TicketStatus) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {id}"),
        details: "Collection truck hydraulic leak".to_string(),
        priority: TicketPriority::Urgent,
        status,
        created_by: HOUSEHOLD,
        assigned_to: Some(OPERATOR),
        created_by_name: Some("Household A".to_string()),
        assigned_to_name: Some("Operator B".to_string()),
        request_date: "2024-03-01T08:00:00Z".to_string(),
        due_date: None,
        cancel_log_reason: None,
        cancel_requested_at: None,
        cancel_approved_at: None,
    }
}

pub fn cancelled_ticket(id: u64, approved_at: &str) -> Ticket {
    let mut t = ticket(id, TicketStatus::Canceled);
    t.cancel_approved_at = Some(approved_at.to_string());
    t
}

pub fn event(id: u64, ticket_id: u64, event_type: EventType, at: &str) -> Event {
    Event {
        id,
        ticket_id,
        event_type,
        actor_account_id: OPERATOR,
        actor_name: Some("Operator B".to_string()),
        notes: None,
        created_at: at.to_string(),
        to_account_id: None,
        to_account_name: None,
    }
}

pub fn remark(id: u64, ticket_id: u64, author: u64, at: &str) -> Remark {
    Remark {
        id,
        ticket_id,
        text: format!("remark {id}"),
        created_by: author,
        created_at: at.to_string(),
        created_by_name: None,
        created_by_role_id: None,
        created_by_role_name: None,
    }
}

pub fn attachment(id: u64, ticket_id: u64, uploader: u64, at: &str) -> Attachment {
    Attachment {
        id,
        ticket_id,
        uploaded_by: uploader,
        file_path: format!("https://files.example/{id}.jpg"),
        file_name: format!("photo-{id}.jpg"),
        file_type: "image/jpeg".to_string(),
        file_size: Some(2048),
        uploaded_at: at.to_string(),
        uploaded_by_name: None,
    }
}

pub fn staged(name: &str) -> PendingAttachment {
    PendingAttachment {
        local_path: PathBuf::from(format!("/tmp/staged/{name}")),
        display_name: name.to_string(),
        mime_type: "image/jpeg".to_string(),
        size: Some(2048),
    }
}
