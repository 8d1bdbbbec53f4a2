pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod reply;
pub mod responder;
pub mod server;
pub mod sse;
pub mod widget;

use cli::Args;
use config::ChatConfig;
use log::info;
use reply::new_strategy;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = ChatConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Mode: {}", config.mode);
    info!("Chat Model: {}", config.model);
    info!("Chat Base URL: {}", config.base_url.as_deref().unwrap_or("adapter default"));
    info!("Temperature: {}", config.temperature);
    info!("Max Tokens: {}", config.max_tokens);
    info!("API Key Configured: {}", config.has_credential());
    info!("Persona Source: {}", args.persona_path.as_deref().unwrap_or("built-in"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let strategy = new_strategy(&config)?;
    let server = Server::new(args.server_addr.clone(), strategy, args.clone());
    server.run().await?;

    Ok(())
}
