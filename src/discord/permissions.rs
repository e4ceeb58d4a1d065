use serenity::all::Permissions;

/// Capabilities the bot needs in a linked guild: scheduled-event management,
/// message sending, link embedding, history reading, and channel viewing.
pub const REQUIRED_BOT_PERMISSIONS: Permissions = Permissions::MANAGE_EVENTS
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::EMBED_LINKS)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::VIEW_CHANNEL);

/// Guild-management authority: administrators or Manage Server holders.
///
/// Guild owners compute to all permissions upstream, so they pass here too.
pub fn has_management_authority(permissions: Permissions) -> bool {
    permissions.contains(Permissions::ADMINISTRATOR)
        || permissions.contains(Permissions::MANAGE_GUILD)
}
