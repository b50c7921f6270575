// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use std::net::SocketAddr;

/// JWT secret used when none is configured. Only acceptable for local
/// development; `main` warns loudly when it is in effect.
pub const DEFAULT_JWT_SECRET: &str = "dev_secret";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Path to SQLite database
    pub database_path: String,

    /// Enable permissive CORS headers for development
    pub enable_cors: bool,

    /// JWT secret for token signing and validation
    pub jwt_secret: String,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().expect("valid socket address"),
            database_path: ":memory:".to_string(),
            enable_cors: false,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// True when the server is still running on the development secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per minute per IP
    pub requests_per_minute: u64,

    /// Burst size
    pub burst_size: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            burst_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_only() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3001".parse().unwrap());
        assert_eq!(config.database_path, ":memory:");
        assert!(!config.enable_cors);
        assert!(config.uses_default_secret());
        assert_eq!(config.rate_limit.requests_per_minute, 60);
    }
}
