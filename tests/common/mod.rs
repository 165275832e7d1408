//! Shared in-memory fake of the maintenance API.
//!
//! Records every call it receives (method + path, teacher-readable) and lets
//! tests script failures per endpoint or per staged attachment name.

pub mod fixtures;

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use bantay::error::{BantayError, Result};
use bantay::ticket::{
    Attachment, Event, MaintenancePriority, NewAttachment, NewTicket, Remark, Ticket,
};
use bantay::types::TicketStatus;
use bantay::upload::PendingAttachment;
use bantay::MaintenanceApi;

fn ts(raw: &str) -> jiff::Timestamp {
    raw.parse().expect("fixture timestamp must parse")
}

fn within(created_at: &str, before: Option<&str>) -> bool {
    match before {
        Some(bound) => ts(created_at) <= ts(bound),
        None => true,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub assigned: Mutex<Vec<Ticket>>,
    pub cancelled: Mutex<Vec<Ticket>>,
    pub remarks: Mutex<Vec<Remark>>,
    pub attachments: Mutex<Vec<Attachment>>,
    pub events: Mutex<Vec<Event>>,

    /// Every call received, as "METHOD path[?query]".
    pub calls: Mutex<Vec<String>>,

    /// Display names whose upload should fail.
    pub failing_uploads: Mutex<HashSet<String>>,
    /// When set, the next list_assigned call fails once.
    pub fail_next_assigned: Mutex<bool>,

    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Self::default()
        }
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_upload_of(&self, display_name: &str) {
        self.failing_uploads
            .lock()
            .unwrap()
            .insert(display_name.to_string());
    }

    fn alloc_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn server_error(message: &str) -> BantayError {
        BantayError::Api {
            status: Some(500),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl MaintenanceApi for FakeApi {
    async fn list_priorities(&self) -> Result<Vec<MaintenancePriority>> {
        self.record("GET /api/maintenance/priorities");
        Ok(vec![
            MaintenancePriority {
                id: 1,
                name: "Critical".to_string(),
            },
            MaintenancePriority {
                id: 2,
                name: "Urgent".to_string(),
            },
            MaintenancePriority {
                id: 3,
                name: "Mild".to_string(),
            },
        ])
    }

    async fn create_ticket(&self, new: &NewTicket) -> Result<Ticket> {
        self.record("POST /api/maintenance");
        let ticket = Ticket {
            id: self.alloc_id(),
            title: new.title.clone(),
            details: new.details.clone(),
            priority: new.priority,
            status: TicketStatus::Requested,
            created_by: new.created_by,
            assigned_to: None,
            created_by_name: None,
            assigned_to_name: None,
            request_date: "2024-03-01T08:00:00Z".to_string(),
            due_date: new.due_date.clone(),
            cancel_log_reason: None,
            cancel_requested_at: None,
            cancel_approved_at: None,
        };
        self.assigned.lock().unwrap().push(ticket.clone());
        Ok(ticket)
    }

    async fn list_assigned(&self, operator_account_id: u64) -> Result<Vec<Ticket>> {
        self.record(format!(
            "GET /api/maintenance?assigned_to={operator_account_id}"
        ));
        let mut fail = self.fail_next_assigned.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(Self::server_error("list_assigned unavailable"));
        }
        Ok(self.assigned.lock().unwrap().clone())
    }

    async fn list_created_by(
        &self,
        requester_account_id: u64,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>> {
        self.record(match status {
            Some(s) => format!(
                "GET /api/maintenance?created_by={requester_account_id}&status={}",
                s.as_wire()
            ),
            None => format!("GET /api/maintenance?created_by={requester_account_id}"),
        });
        Ok(self
            .assigned
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.created_by == requester_account_id)
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect())
    }

    async fn cancelled_history(&self, operator_account_id: u64) -> Result<Vec<Ticket>> {
        self.record(format!(
            "GET /api/maintenance/operator-cancelled-history?operator_account_id={operator_account_id}"
        ));
        Ok(self.cancelled.lock().unwrap().clone())
    }

    async fn accept_ticket(&self, ticket_id: u64, _operator_account_id: u64) -> Result<Ticket> {
        self.record(format!("PUT /api/maintenance/{ticket_id}/ongoing"));
        let mut assigned = self.assigned.lock().unwrap();
        let ticket = assigned
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(BantayError::TicketNotFound(ticket_id))?;
        ticket.status = TicketStatus::Pending;
        Ok(ticket.clone())
    }

    async fn mark_for_verification(
        &self,
        ticket_id: u64,
        _operator_account_id: u64,
    ) -> Result<Ticket> {
        self.record(format!("PUT /api/maintenance/{ticket_id}/for-verification"));
        let mut assigned = self.assigned.lock().unwrap();
        let ticket = assigned
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(BantayError::TicketNotFound(ticket_id))?;
        ticket.status = TicketStatus::ForReview;
        Ok(ticket.clone())
    }

    async fn request_cancel(
        &self,
        ticket_id: u64,
        _actor_account_id: u64,
        reason: &str,
    ) -> Result<Ticket> {
        self.record(format!("PUT /api/maintenance/{ticket_id}/cancel"));
        let mut assigned = self.assigned.lock().unwrap();
        let ticket = assigned
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(BantayError::TicketNotFound(ticket_id))?;
        ticket.status = TicketStatus::CancelRequested;
        ticket.cancel_log_reason = Some(reason.to_string());
        Ok(ticket.clone())
    }

    async fn list_remarks(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Remark>> {
        self.record(match before {
            Some(bound) => format!("GET /api/maintenance/{ticket_id}/remarks?before={bound}"),
            None => format!("GET /api/maintenance/{ticket_id}/remarks"),
        });
        Ok(self
            .remarks
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.ticket_id == ticket_id && within(&r.created_at, before))
            .cloned()
            .collect())
    }

    async fn create_remark(
        &self,
        ticket_id: u64,
        actor_account_id: u64,
        text: &str,
    ) -> Result<Remark> {
        self.record(format!("POST /api/maintenance/{ticket_id}/remarks"));
        let remark = Remark {
            id: self.alloc_id(),
            ticket_id,
            text: text.to_string(),
            created_by: actor_account_id,
            created_at: "2024-03-09T12:00:00Z".to_string(),
            created_by_name: None,
            created_by_role_id: None,
            created_by_role_name: None,
        };
        self.remarks.lock().unwrap().push(remark.clone());
        Ok(remark)
    }

    async fn list_attachments(
        &self,
        ticket_id: u64,
        before: Option<&str>,
    ) -> Result<Vec<Attachment>> {
        self.record(match before {
            Some(bound) => format!("GET /api/maintenance/{ticket_id}/attachments?before={bound}"),
            None => format!("GET /api/maintenance/{ticket_id}/attachments"),
        });
        Ok(self
            .attachments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.ticket_id == ticket_id && within(&a.uploaded_at, before))
            .cloned()
            .collect())
    }

    async fn create_attachment(
        &self,
        ticket_id: u64,
        meta: &NewAttachment,
    ) -> Result<Attachment> {
        self.record(format!("POST /api/maintenance/{ticket_id}/attachments"));
        let attachment = Attachment {
            id: self.alloc_id(),
            ticket_id,
            uploaded_by: meta.uploaded_by,
            file_path: meta.file_path.clone(),
            file_name: meta.file_name.clone(),
            file_type: meta.file_type.clone(),
            file_size: meta.file_size,
            uploaded_at: "2024-03-09T12:00:00Z".to_string(),
            uploaded_by_name: None,
        };
        self.attachments.lock().unwrap().push(attachment.clone());
        Ok(attachment)
    }

    async fn list_events(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Event>> {
        self.record(match before {
            Some(bound) => format!("GET /api/maintenance/{ticket_id}/events?before={bound}"),
            None => format!("GET /api/maintenance/{ticket_id}/events"),
        });
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.ticket_id == ticket_id && within(&e.created_at, before))
            .cloned()
            .collect())
    }

    async fn upload_file(&self, staged: &PendingAttachment) -> Result<String> {
        self.record(format!("POST /api/upload ({})", staged.display_name));
        if self
            .failing_uploads
            .lock()
            .unwrap()
            .contains(&staged.display_name)
        {
            return Err(Self::server_error("storage rejected the file"));
        }
        Ok(format!("https://files.example/{}", staged.display_name))
    }
}
