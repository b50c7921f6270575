// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! EquipTrack REST API server binary

use clap::Parser;
use et_logging::{init, CliLogLevel, Level, LogFormat};
use et_rest_server::{Server, ServerConfig};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the server
    #[arg(short, long, default_value = "127.0.0.1:3001")]
    bind: SocketAddr,

    /// Database path (SQLite)
    #[arg(short, long, default_value = ":memory:")]
    database: String,

    /// Enable permissive CORS for development
    #[arg(long)]
    cors: bool,

    /// Secret used to sign JWTs
    #[arg(long, env = "JWT_SECRET", default_value = et_rest_server::config::DEFAULT_JWT_SECRET)]
    jwt_secret: String,

    /// Log level
    #[arg(short, long, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Plaintext)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level: Level = args.log_level.into();
    init("et-rest-server", default_level, args.log_format)?;

    tracing::info!("Starting EquipTrack REST API server");

    let config = ServerConfig {
        bind_addr: args.bind,
        database_path: args.database,
        enable_cors: args.cors,
        jwt_secret: args.jwt_secret,
        ..Default::default()
    };

    if config.uses_default_secret() {
        tracing::warn!("running with the default JWT secret; set JWT_SECRET in production");
    }

    let server = Server::new(config).await?;
    server.run().await?;

    Ok(())
}
