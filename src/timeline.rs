//! Timeline composition: merging events, remarks, and attachments into one
//! time-ordered, role-attributed conversation view.
//!
//! The three record streams are fetched independently; `compose` is pure
//! relative to its inputs and performs no I/O. The network side (including
//! the `before` cutoff bound that implements cancelled-history snapshots)
//! lives in [`load_timeline`], which only composes after all three fetches
//! have resolved — partial results are never rendered and then visibly
//! re-sorted.

use jiff::Timestamp;

use crate::client::MaintenanceApi;
use crate::error::Result;
use crate::ticket::{Attachment, Event, Remark};
use crate::types::EventType;

/// One item of the merged timeline: a tagged union over the three record
/// kinds with a common timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Stable key, unique within one ticket's timeline
    /// (`"event-12"`, `"remark-5"`, `"attachment-3"`).
    pub key: String,

    /// Raw wire timestamp of the underlying record.
    pub created_at: String,

    /// Whether the viewer authored this item. Always false for events;
    /// events are system history, not conversation.
    pub is_mine: bool,

    pub body: TimelineBody,
}

/// Kind-specific payload of a timeline entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineBody {
    Event {
        event_type: EventType,
        /// Human-readable headline ("Reassigned to Operator C", ...).
        title: String,
        actor: String,
        /// Cancellation reason; populated only for CANCEL_REQUESTED.
        reason: Option<String>,
    },
    Remark {
        text: String,
        author: String,
        role: Option<String>,
    },
    Attachment {
        file_name: String,
        file_type: String,
        url: String,
        uploaded_by: String,
    },
}

/// Merge the three streams into one ascending sequence.
///
/// Sorting is stable on the parsed timestamp; at equal instants the
/// deterministic tie-break is events, then remarks, then attachments (the
/// concatenation order). When `cutoff` is set, entries after the cutoff are
/// dropped here as well — the authoritative bound is the `before` query
/// parameter the loader passes server-side, this is the second line of
/// defence so a stale cache can never leak post-cutoff items.
///
/// Empty inputs yield an empty sequence; the presenter renders that as
/// "no history yet", not as an error.
pub fn compose(
    events: &[Event],
    remarks: &[Remark],
    attachments: &[Attachment],
    viewer: u64,
    cutoff: Option<&str>,
) -> Vec<TimelineEntry> {
    let cutoff_ts = cutoff.and_then(|raw| match raw.parse::<Timestamp>() {
        Ok(ts) => Some(ts),
        Err(err) => {
            tracing::warn!(
                "unparsable cutoff '{raw}' ({err}); relying on the server-side before filter alone"
            );
            None
        }
    });

    let mut items: Vec<(Option<Timestamp>, TimelineEntry)> = Vec::with_capacity(
        events.len() + remarks.len() + attachments.len(),
    );

    for event in events {
        items.push((parse_timestamp(&event.created_at), event_entry(event)));
    }
    for remark in remarks {
        items.push((parse_timestamp(&remark.created_at), remark_entry(remark, viewer)));
    }
    for attachment in attachments {
        items.push((
            parse_timestamp(&attachment.uploaded_at),
            attachment_entry(attachment, viewer),
        ));
    }

    if let Some(bound) = cutoff_ts {
        // Entries without a parsable timestamp cannot be proven to predate
        // the cutoff, so a snapshotted view excludes them.
        items.retain(|(ts, _)| matches!(ts, Some(t) if *t <= bound));
    }

    // Stable sort: ties keep concatenation order (events < remarks <
    // attachments). Unparsable timestamps sort after everything parsable.
    items.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    items.into_iter().map(|(_, entry)| entry).collect()
}

/// Fetch all three streams concurrently and compose them.
///
/// For cancelled-history views, `cutoff` must be the ticket's
/// `CancelApprovedAt`; it is passed as the `before` bound on every stream so
/// the server filters authoritatively (pagination may already have excluded
/// later items client-side, so client-only filtering is not sufficient).
pub async fn load_timeline<A: MaintenanceApi>(
    api: &A,
    ticket_id: u64,
    viewer: u64,
    cutoff: Option<&str>,
) -> Result<Vec<TimelineEntry>> {
    let (events, remarks, attachments) = tokio::join!(
        api.list_events(ticket_id, cutoff),
        api.list_remarks(ticket_id, cutoff),
        api.list_attachments(ticket_id, cutoff),
    );

    Ok(compose(&events?, &remarks?, &attachments?, viewer, cutoff))
}

fn event_entry(event: &Event) -> TimelineEntry {
    // Raw notes must not leak into the rendered reason for other event
    // types; only CANCEL_REQUESTED carries a user-facing reason.
    let reason = if event.event_type == EventType::CancelRequested {
        event.notes.clone()
    } else {
        None
    };

    TimelineEntry {
        key: format!("event-{}", event.id),
        created_at: event.created_at.clone(),
        is_mine: false,
        body: TimelineBody::Event {
            event_type: event.event_type,
            title: event_title(event),
            actor: actor_label(event.actor_name.as_deref(), event.actor_account_id),
            reason,
        },
    }
}

fn remark_entry(remark: &Remark, viewer: u64) -> TimelineEntry {
    TimelineEntry {
        key: format!("remark-{}", remark.id),
        created_at: remark.created_at.clone(),
        is_mine: remark.created_by == viewer,
        body: TimelineBody::Remark {
            text: remark.text.clone(),
            author: actor_label(remark.created_by_name.as_deref(), remark.created_by),
            role: remark.created_by_role_name.clone(),
        },
    }
}

fn attachment_entry(attachment: &Attachment, viewer: u64) -> TimelineEntry {
    TimelineEntry {
        key: format!("attachment-{}", attachment.id),
        created_at: attachment.uploaded_at.clone(),
        is_mine: attachment.uploaded_by == viewer,
        body: TimelineBody::Attachment {
            file_name: attachment.file_name.clone(),
            file_type: attachment.file_type.clone(),
            url: attachment.file_path.clone(),
            uploaded_by: actor_label(
                attachment.uploaded_by_name.as_deref(),
                attachment.uploaded_by,
            ),
        },
    }
}

/// Human-readable headline for an audit event.
fn event_title(event: &Event) -> String {
    let actor = actor_label(event.actor_name.as_deref(), event.actor_account_id);

    match event.event_type {
        EventType::Requested => format!("Requested by {actor}"),
        EventType::Accepted => format!("Accepted by {actor}"),
        EventType::Reassigned => match (&event.to_account_name, event.to_account_id) {
            (Some(name), _) => format!("Reassigned to {name}"),
            (None, Some(id)) => format!("Reassigned to account {id}"),
            (None, None) => "Reassigned".to_string(),
        },
        EventType::ForVerification => format!("Submitted for verification by {actor}"),
        EventType::CancelRequested => format!("Cancellation requested by {actor}"),
        EventType::Cancelled => "Cancellation approved".to_string(),
        EventType::Completed => "Marked as completed".to_string(),
        EventType::Deleted => "Deleted".to_string(),
    }
}

fn actor_label(name: Option<&str>, account_id: u64) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Account {account_id}"),
    }
}

/// Parse a wire timestamp. An unparsable timestamp is a defect: loud in
/// development, logged and sorted last in production.
fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    match raw.parse::<Timestamp>() {
        Ok(ts) => Some(ts),
        Err(err) => {
            debug_assert!(false, "unparsable wire timestamp '{raw}': {err}");
            tracing::error!("unparsable wire timestamp '{raw}': {err}");
            None
        }
    }
}
