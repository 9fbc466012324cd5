// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod creation, label queries and deletion

use crate::constants::hello_world;
use crate::error::{Result, WalkthroughError};
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use kube::{
    api::{DeleteParams, ListParams, ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::fmt;
use tracing::{debug, info, instrument};

/// A pod located by namespace and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Build the hello-world pod that echoes a greeting every ten seconds
pub fn hello_world_pod(namespace: &str, image: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(hello_world::POD_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: hello_world::CONTAINER_NAME.to_string(),
                image: Some(image.to_string()),
                command: Some(vec![hello_world::COMMAND.to_string()]),
                args: Some(vec!["-c".to_string(), hello_world::SCRIPT.to_string()]),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create a pod in the namespace named by its metadata
#[instrument(skip(client, pod), fields(pod = %pod.name_any()))]
pub async fn create_pod(client: &Client, pod: &Pod) -> Result<Pod> {
    let namespace = pod.namespace().ok_or_else(|| {
        WalkthroughError::PodError(format!("Pod {} has no namespace", pod.name_any()))
    })?;
    let pods: Api<Pod> = Api::namespaced(client.clone(), &namespace);

    let created = pods.create(&PostParams::default(), pod).await?;
    info!("Pod {}/{} created", namespace, created.name_any());
    Ok(created)
}

/// Query each namespace in turn for pods matching a label selector
#[instrument(skip(client, namespaces))]
pub async fn pods_with_label(
    client: &Client,
    namespaces: &[String],
    label_selector: &str,
) -> Result<Vec<PodRef>> {
    let lp = ListParams::default().labels(label_selector);
    let mut found = Vec::new();

    for namespace in namespaces {
        let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
        let list = pods.list(&lp).await?;
        debug!("{} pods match in namespace {}", list.items.len(), namespace);

        found.extend(list.items.iter().map(|pod| PodRef {
            namespace: namespace.clone(),
            name: pod.name_any(),
        }));
    }

    Ok(found)
}

/// Delete a pod with default delete options
#[instrument(skip(client))]
pub async fn delete_pod(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);

    pods.delete(name, &DeleteParams::default())
        .await?
        .map_left(|pod| debug!("Deleting pod {}/{}", namespace, pod.name_any()))
        .map_right(|status| debug!("Deleted pod {}/{}: {:?}", namespace, name, status));

    Ok(())
}
