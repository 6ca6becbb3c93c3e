//! HTTP server configuration parsed from the command line and
//! environment.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// Listener configuration for the user directory service.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster", about = "In-memory user directory REST API")]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "ROSTER_BIND_ADDR", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "ROSTER_PORT", default_value_t = 3131)]
    port: u16,
}

impl ServerConfig {
    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
