//! MCP Server Entry Point
//!
//! Loads configuration, checks that the Hex API is reachable with the
//! configured token, then serves the tool catalog on the configured
//! transport. Any startup failure exits with an error.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use hex_mcp_server::core::config::DEFAULT_HEX_API_URL;
use hex_mcp_server::core::{Config, HexGateway, McpServer, TransportService};
use hex_mcp_server::domains::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.hex.base_url != DEFAULT_HEX_API_URL {
        info!("Using custom Hex API endpoint: {}", config.hex.base_url);
    }
    if config.hex.debug {
        info!("HEX_DEBUG enabled: request and response bodies will be logged");
    }

    config
        .hex
        .validate()
        .context("Hex configuration is invalid")?;

    let gateway = HexGateway::new(config.hex.clone())?;
    gateway
        .initialize()
        .await
        .context("Could not reach the Hex API")?;

    let registry = ToolRegistry::with_default_groups(Arc::new(gateway))?;
    info!("Registered tools: {}", registry.tool_names().join(", "));

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, registry);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the STDIO transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
