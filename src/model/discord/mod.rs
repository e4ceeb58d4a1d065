//! Wire models for the Discord REST endpoints the bridge consumes.

pub mod guild;
pub mod member;
pub mod scheduled_event;

pub use guild::{GuildInfo, GuildRole};
pub use member::{GuildMember, MemberUser};
pub use scheduled_event::ScheduledEvent;
