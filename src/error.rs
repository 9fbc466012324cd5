// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkthroughError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Namespace creation failed: {0}")]
    NamespaceError(String),

    #[error("Pod operation failed: {0}")]
    PodError(String),

    #[error("Informer failed: {0}")]
    InformerError(String),
}

pub type Result<T> = std::result::Result<T, WalkthroughError>;
