//! Service entry point: wires logging, configuration, and the HTTP
//! server.

mod server;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    let addr = config.bind_addr();
    let server = server::create_server(&config)?;
    info!(%addr, "listening");
    server.await
}
