// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace listing and creation

use crate::error::{Result, WalkthroughError};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ListParams, ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, info, instrument};

/// Outcome of a namespace creation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceCreation {
    Created,
    AlreadyExisted,
}

/// List every namespace in the cluster
#[instrument(skip(client))]
pub async fn list_namespaces(client: &Client) -> Result<Vec<Namespace>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let list = namespaces.list(&ListParams::default()).await?;
    debug!("Listed {} namespaces", list.items.len());
    Ok(list.items)
}

/// Namespace names in the order the API returned them
pub fn namespace_names(namespaces: &[Namespace]) -> Vec<String> {
    namespaces.iter().map(|ns| ns.name_any()).collect()
}

/// Create a namespace, tolerating one that already exists
#[instrument(skip(client))]
pub async fn create_namespace(client: &Client, name: &str) -> Result<NamespaceCreation> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    match namespaces.create(&PostParams::default(), &ns).await {
        Ok(_) => {
            info!("Namespace {} created successfully", name);
            Ok(NamespaceCreation::Created)
        }
        Err(kube::Error::Api(err)) if err.code == 409 && err.reason == "AlreadyExists" => {
            debug!("Namespace {} already exists", name);
            Ok(NamespaceCreation::AlreadyExisted)
        }
        Err(e) => Err(WalkthroughError::NamespaceError(format!(
            "Failed to create namespace {}: {}",
            name, e
        ))),
    }
}
