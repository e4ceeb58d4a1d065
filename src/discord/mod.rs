//! Discord REST integration: the client interface, permission requirements,
//! and slash-command registration.

pub mod api;
pub mod client;
pub mod commands;
pub mod mock;
pub mod permissions;
