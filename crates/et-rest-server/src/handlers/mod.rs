//! Request handlers

pub mod activities;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod faculty;
pub mod health;
pub mod location_history;
pub mod password_requests;
pub mod rooms;
pub mod status_history;
pub mod users;
