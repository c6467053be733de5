//! Demo service for the `mif` handler adapters.
//!
//! Serves one route per conversion style:
//!
//! ```text
//! GET  /health    simple     handler writes "ok" itself
//! POST /echo      wrap       request body returned as RawData
//! GET  /inspect   wrap_json  request description encoded as JSON
//! GET  /greeting  wrap_json  not_json text passed through verbatim
//! GET  /broken    wrap_json  handler error → canned JSON 500
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mif::config::{load_config, override_bind_address, ServiceConfig};
use mif::http::server::shutdown_signal;
use mif::observability::logging;
use mif::HttpServer;

#[derive(Parser)]
#[command(name = "mif-demo")]
#[command(about = "Demo service for the mif handler adapters", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config = override_bind_address(config, bind)?;
    }

    logging::init(&config.logging);

    tracing::info!("mif-demo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        json_indent = ?config.adapter.json.indent,
        disable_panic = config.adapter.disable_panic_on_bad_payload,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
