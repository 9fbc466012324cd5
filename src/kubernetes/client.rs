// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from a kubeconfig file or the inferred default

use crate::config::Config;
use crate::error::{Result, WalkthroughError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Connect to the cluster described by the configuration
#[instrument(skip(config), fields(kubeconfig = ?config.kubeconfig))]
pub async fn connect(config: &Config) -> Result<Client> {
    match config.kubeconfig.as_deref() {
        Some(path) => client_from_kubeconfig_file(path).await,
        None => {
            debug!("No kubeconfig path configured, inferring client configuration");
            Client::try_default().await.map_err(|e| {
                WalkthroughError::KubeconfigError(format!("Failed to infer config: {}", e))
            })
        }
    }
}

/// Create a client from a kubeconfig file on disk
async fn client_from_kubeconfig_file(path: &Path) -> Result<Client> {
    info!("Reading kubeconfig from {}", path.display());

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        WalkthroughError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    client_from_kubeconfig_str(&contents).await
}

/// Create a Kubernetes client from a kubeconfig string
pub async fn client_from_kubeconfig_str(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed = parse_kubeconfig(kubeconfig)?;

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                WalkthroughError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| WalkthroughError::KubeconfigError(format!("Failed to create client: {}", e)))
}

fn parse_kubeconfig(kubeconfig: &str) -> Result<Kubeconfig> {
    serde_yaml::from_str(kubeconfig)
        .map_err(|e| WalkthroughError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))
}
