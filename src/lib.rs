//! Discord bridge backend for the orgboard application.
//!
//! This crate implements the part of orgboard that talks to Discord: inbound
//! interaction webhooks, the `/orgboard` slash command, and the mirroring of
//! local events into guild scheduled events. The backend uses Axum as the web
//! framework, SeaORM for database operations, and a reqwest-based REST client
//! for Discord API calls.
//!
//! # Architecture
//!
//! The crate follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers for the
//!   interaction webhook and health endpoint
//! - **Service Layer** (`service/`) - The command router and event bridge
//! - **Data Layer** (`data/`) - Repositories and the narrow store interfaces
//!   consumed from the wider application
//! - **Model Layer** (`model/`) - Domain models and wire types
//! - **Error Layer** (`error/`) - Application error types and HTTP response
//!   mapping
//!
//! # Infrastructure
//!
//! - **Discord** (`discord/`) - REST client, permission requirements, and
//!   slash-command definitions
//! - **Scheduler** (`scheduler/`) - Rate-limit-aware retry queue for
//!   outbound Discord calls
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database connection and migrations
//! - **Router** (`router`) - Axum route configuration
//!
//! # Request Flow
//!
//! An inbound interaction flows through these layers:
//!
//! 1. **Router** receives the webhook POST and routes to the controller
//! 2. **Controller** verifies the request signature, then parses the payload
//! 3. **CommandRouter** dispatches the subcommand, checking permissions and
//!    touching the guild-link store and the Discord API as needed
//! 4. **Controller** returns exactly one interaction response
//!
//! Outbound event syncing flows the other way: application logic calls the
//! **EventBridge**, which talks to Discord and hands rate-limited calls to
//! the **RetryScheduler** until they terminally succeed or fail.

pub mod config;
pub mod controller;
pub mod data;
pub mod discord;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
