// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env as vars};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Walkthrough configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Kubeconfig file to connect with; the default client config is inferred when unset
    pub kubeconfig: Option<PathBuf>,
    /// Namespace created for the hello-world pod
    pub namespace: String,
    pub label_selector: String,
    pub image: String,
    /// How long to leave the hello-world pod running before deleting it
    pub pause: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kubeconfig = lookup(vars::KUBECONFIG)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let pause_secs = match lookup(vars::PAUSE_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", vars::PAUSE_SECS, raw))?,
            None => defaults::PAUSE_SECS,
        };

        Ok(Config {
            kubeconfig,
            namespace: lookup(vars::NAMESPACE).unwrap_or_else(|| defaults::NAMESPACE.to_string()),
            label_selector: lookup(vars::LABEL_SELECTOR)
                .unwrap_or_else(|| defaults::LABEL_SELECTOR.to_string()),
            image: lookup(vars::IMAGE).unwrap_or_else(|| defaults::IMAGE.to_string()),
            pause: Duration::from_secs(pause_secs),
        })
    }
}
