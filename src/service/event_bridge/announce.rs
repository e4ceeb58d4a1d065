//! Announcement embed construction for synced events.

use serenity::builder::CreateEmbed;

use crate::model::event::Event;

/// Fallback description line for events without one.
const DEFAULT_DESCRIPTION: &str = "No description provided.";

/// Builds the announcement embed for a synced event.
///
/// Field order is fixed: title, description, start, end, organization, then
/// location and participant cap only when present. Absent optional fields
/// are omitted rather than emitted empty, so the embed is deterministic for
/// a given event.
pub fn build_event_announcement(event: &Event, organization_name: &str, app_url: &str) -> CreateEmbed {
    let description = event
        .description
        .clone()
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let mut embed = CreateEmbed::new()
        .title(&event.title)
        .url(app_url)
        .description(description)
        .field("Starts", format!("<t:{}:F>", event.starts_at.timestamp()), false)
        .field("Ends", format!("<t:{}:F>", event.ends_at.timestamp()), false)
        .field("Organization", organization_name, false);

    if let Some(location) = event.location.as_deref().filter(|location| !location.is_empty()) {
        embed = embed.field("Location", location, false);
    }

    if let Some(cap) = event.participant_cap {
        embed = embed.field("Participants", format!("up to {}", cap), false);
    }

    embed
}
