// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! EquipTrack REST API server
//!
//! Implements the equipment-tracking REST API for the IT services office:
//! equipment inventory with status and location history, faculty and admin
//! accounts, dashboard aggregation, and the faculty password-reset workflow.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
