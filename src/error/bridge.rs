use serenity::all::Permissions;
use thiserror::Error;

use crate::discord::api::ApiError;

/// Failures surfaced by the event bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The guild has no organization link, so there is nothing to sync
    /// against.
    #[error("guild {guild_id} is not linked to an organization")]
    GuildNotLinked {
        /// Discord guild id the operation targeted
        guild_id: u64,
    },

    /// The recorded bot permission bitmask is missing required capabilities.
    ///
    /// Routed straight back to the caller, never to the retry queue: a
    /// permission shortfall does not heal by waiting.
    #[error("bot is missing required permissions: {missing:?}")]
    MissingPermissions {
        /// Required capabilities absent from the recorded bitmask
        missing: Permissions,
    },

    /// The retry queue dropped the task after exhausting its retry budget.
    #[error("retry budget exhausted for task {task_id}")]
    RetriesExhausted {
        /// Id of the dropped task
        task_id: String,
    },

    /// An event timestamp could not be converted to Discord's format,
    /// typically because it is out of range.
    #[error("invalid event timestamp {timestamp}: {reason}")]
    InvalidTimestamp {
        /// The Unix timestamp that failed to convert
        timestamp: i64,
        /// The reason for conversion failure
        reason: String,
    },

    /// Remote API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failure from one of the persistence collaborators.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}
