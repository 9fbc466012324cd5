// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tokio::sync::oneshot;
use tracing::{info, warn};

use kube_walkthrough::config::Config;
use kube_walkthrough::kubernetes::connect;
use kube_walkthrough::walkthrough;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, label_selector={}",
        config.namespace, config.label_selector
    );

    println!("1. Connecting to k8s cluster");
    let client = connect(&config).await?;
    info!("Connected to Kubernetes cluster");

    // Listen for Ctrl-C from the start so an interrupt during the pause still cleans up
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    walkthrough::run(&client, &config, async {
        let _ = shutdown_rx.await;
    })
    .await?;

    info!("Walkthrough finished");
    Ok(())
}
