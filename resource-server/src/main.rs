//! Resource server - in-memory remote API for expenses, groups and user profiles.

use std::net::SocketAddr;

use clap::Parser;
use resource_server::app;
use resource_server::state::AppState;
use tracing::info;

#[derive(Parser)]
#[command(name = "resource-server")]
#[command(about = "In-memory REST API for expenses, groups and user profiles")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resource_server=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(AppState::new())).await?;

    Ok(())
}
