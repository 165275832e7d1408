//! Core enums shared across the crate: ticket status, priority, and audit
//! event types, together with their wire (REST) representations.
//!
//! The backend speaks a fixed set of case-sensitive status strings
//! (`"On-going"`, `"For Verification"`, ...). The client works with its own
//! names (`Pending`, `ForReview`, ...); mapping between the two lives here so
//! no other module has to care about wire spelling.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BantayError;

/// Client-side ticket status.
///
/// `Requested` has no assignee yet; `Pending` is assigned/on-going work;
/// `Done` and `Canceled` are terminal (the server may start a fresh
/// assignment cycle for the same ticket id, but the client never performs
/// that transition itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TicketStatus {
    Requested,
    #[default]
    Pending,
    ForReview,
    CancelRequested,
    Done,
    Canceled,
}

impl TicketStatus {
    /// Map a wire status string to a client status.
    ///
    /// Unrecognized input deliberately defaults to `Pending` rather than
    /// failing the whole list fetch; the fallback is logged so it is never
    /// silent.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "Requested" => TicketStatus::Requested,
            "On-going" => TicketStatus::Pending,
            "For Verification" => TicketStatus::ForReview,
            "Cancel Requested" => TicketStatus::CancelRequested,
            "Completed" => TicketStatus::Done,
            "Cancelled" => TicketStatus::Canceled,
            other => {
                tracing::warn!("unmapped ticket status '{other}', defaulting to Pending");
                TicketStatus::Pending
            }
        }
    }

    /// The wire string the backend expects for this status.
    pub fn as_wire(&self) -> &'static str {
        match self {
            TicketStatus::Requested => "Requested",
            TicketStatus::Pending => "On-going",
            TicketStatus::ForReview => "For Verification",
            TicketStatus::CancelRequested => "Cancel Requested",
            TicketStatus::Done => "Completed",
            TicketStatus::Canceled => "Cancelled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Requested => write!(f, "requested"),
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::ForReview => write!(f, "for review"),
            TicketStatus::CancelRequested => write!(f, "cancel requested"),
            TicketStatus::Done => write!(f, "done"),
            TicketStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = BantayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(TicketStatus::Requested),
            "pending" => Ok(TicketStatus::Pending),
            "for review" => Ok(TicketStatus::ForReview),
            "cancel requested" => Ok(TicketStatus::CancelRequested),
            "done" => Ok(TicketStatus::Done),
            "canceled" => Ok(TicketStatus::Canceled),
            _ => Err(BantayError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &[
    "requested",
    "pending",
    "for review",
    "cancel requested",
    "done",
    "canceled",
];

// Tickets arrive with wire status strings; (de)serialization goes through
// the wire mapping, not the client-facing Display names.
impl Serialize for TicketStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TicketStatus::from_wire(&s))
    }
}

/// Ticket priority as defined by the maintenance backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketPriority {
    Critical,
    Urgent,
    #[default]
    Mild,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPriority::Critical => write!(f, "Critical"),
            TicketPriority::Urgent => write!(f, "Urgent"),
            TicketPriority::Mild => write!(f, "Mild"),
        }
    }
}

impl FromStr for TicketPriority {
    type Err = BantayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(TicketPriority::Critical),
            "urgent" => Ok(TicketPriority::Urgent),
            "mild" => Ok(TicketPriority::Mild),
            _ => Err(BantayError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["critical", "urgent", "mild"];

/// Audit event types recorded by the server, one per lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Requested,
    Accepted,
    Reassigned,
    ForVerification,
    CancelRequested,
    Cancelled,
    Completed,
    Deleted,
}

impl EventType {
    /// Base label used when composing timeline headlines.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Requested => "Requested",
            EventType::Accepted => "Accepted",
            EventType::Reassigned => "Reassigned",
            EventType::ForVerification => "Submitted for verification",
            EventType::CancelRequested => "Cancellation requested",
            EventType::Cancelled => "Cancelled",
            EventType::Completed => "Completed",
            EventType::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
