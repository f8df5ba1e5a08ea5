//! Serve command
//!
//! Runs the HTTP API.

use super::CommandContext;
use ansible_builder::api::{ApiConfig, ApiServer};
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

/// Arguments for the serve command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.bind_address`)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let mut api_config = match ApiConfig::from_server_config(&ctx.config.server) {
            Ok(config) => config,
            Err(e) => return Ok(ctx.fail(&e)),
        };
        if let Some(addr) = self.bind {
            api_config = api_config.with_address(addr);
        }

        ctx.output
            .info(&format!("Listening on http://{}", api_config.bind_address));

        ApiServer::new(api_config, &ctx.config)
            .run()
            .await
            .context("API server failed")?;

        Ok(0)
    }
}
