use chrono::{DateTime, Utc};

/// Local event as consumed by the bridge.
///
/// The event itself is owned by the wider application's CRUD layer; the
/// bridge only reads it to mirror a scheduled event into the linked guild.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    /// Organization hosting the event.
    pub organization_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location: Option<String>,
    /// Maximum number of participants, when the event is capped.
    pub participant_cap: Option<u32>,
}
