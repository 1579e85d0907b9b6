use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::Bridge;
use crate::configs::Settings;
use crate::services::{FrameParser, SerialTransport};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod middlewares;
pub mod models;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let transport = SerialTransport::open(&settings.embedded);
    let bridge = Bridge::new(transport, FrameParser::new(settings.embedded.frame_layout));

    let tasks = bridge.start_tasks(settings)?;

    let ip_addr = settings.server.host.parse::<IpAddr>()?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    axum::serve(listener, bridge.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for task in tasks {
        task.stop().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => {
            tracing::error!("unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
