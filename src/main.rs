use anyhow::{Context, Result};
use clap::Parser;
use leximind::{api, config, logging, processing, rate_limit::RateLimiter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve summaries, document questions, and translations for legal judgments over HTTP.
#[derive(Debug, Parser)]
#[command(name = "leximind", version, about)]
struct Args {
    /// Port to listen on; defaults to the first free port in 5000-5099.
    #[arg(long)]
    port: Option<u16>,
    /// Directory holding processed text and persisted indexes.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    config::init_config_with(|config| {
        if let Some(port) = args.port {
            config.server_port = Some(port);
        }
        if let Some(data_dir) = args.data_dir {
            config.data_dir = data_dir;
        }
    });
    logging::init_tracing(config::get_config());

    let config = config::get_config();
    let service = processing::ProcessingService::new(config)
        .context("failed to initialize processing service")?;
    let limiter = Arc::new(RateLimiter::new(config.translate_rate_limit));
    let app = api::create_router(Arc::new(service), limiter, config.max_upload_bytes);

    let (listener, port) = bind_listener().await.context("failed to bind listener")?;
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server terminated unexpectedly")?;
    Ok(())
}

async fn bind_listener() -> Result<(TcpListener, u16), std::io::Error> {
    use std::net::Ipv4Addr;

    let config = config::get_config();
    if let Some(port) = config.server_port {
        return TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .map(|listener| (listener, port));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 5000..=5099;
    for port in PORT_RANGE {
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                return Ok((listener, port));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 5000-5099",
    ))
}
