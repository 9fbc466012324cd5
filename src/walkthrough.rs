// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The linear walkthrough: namespaces, a hello-world pod, a label query and a secrets informer.

use crate::config::Config;
use crate::constants::hello_world;
use crate::error::Result;
use crate::informer::{Informer, Lister, ResourceEventHandler};
use crate::kubernetes::{
    create_namespace, create_pod, delete_pod, hello_world_pod, list_namespaces, namespace_names,
    pods_with_label, NamespaceCreation,
};
use k8s_openapi::api::core::v1::Secret;
use kube::core::Selector;
use kube::{Api, Client, ResourceExt};
use kube_runtime::watcher;
use std::future::Future;
use std::pin::pin;
use tracing::{info, instrument, warn};

/// Prints every secret notification to stdout
pub struct SecretPrinter;

impl SecretPrinter {
    pub fn describe_add(secret: &Secret) -> String {
        format!("add event received for {}", qualified_name(secret))
    }

    // Only metadata is printed; secret payloads never reach the console.
    pub fn describe_update(old: &Secret, new: &Secret) -> String {
        format!(
            "update event received for {} (resourceVersion {} -> {})",
            qualified_name(new),
            old.resource_version().unwrap_or_default(),
            new.resource_version().unwrap_or_default()
        )
    }

    pub fn describe_delete(secret: &Secret) -> String {
        format!("delete event received for {}", qualified_name(secret))
    }
}

impl ResourceEventHandler<Secret> for SecretPrinter {
    fn on_add(&self, obj: &Secret) {
        println!("{}", Self::describe_add(obj));
    }

    fn on_update(&self, old: &Secret, new: &Secret) {
        println!("{}", Self::describe_update(old, new));
    }

    fn on_delete(&self, obj: &Secret) {
        println!("{}", Self::describe_delete(obj));
    }
}

fn qualified_name<K: ResourceExt>(obj: &K) -> String {
    format!("{}/{}", obj.namespace().unwrap_or_default(), obj.name_any())
}

/// Run every step after connecting, then block on `shutdown`.
///
/// `shutdown` is watched from the pause onwards: resolving it during the pause still
/// deletes the hello-world pod but skips the informer.
pub async fn run(client: &Client, config: &Config, shutdown: impl Future<Output = ()>) -> Result<()> {
    let mut shutdown = pin!(shutdown);

    let namespaces = show_namespaces(client).await?;
    ensure_demo_namespace(client, &config.namespace).await?;
    start_hello_world(client, config).await?;
    show_labelled_pods(client, &namespaces, &config.label_selector).await?;

    println!("sleeping for {} seconds", config.pause.as_secs());
    let interrupted = tokio::select! {
        _ = tokio::time::sleep(config.pause) => false,
        _ = &mut shutdown => true,
    };

    remove_hello_world(client, &config.namespace).await;
    if interrupted {
        info!("Shutdown requested during the pause, skipping the informer");
        return Ok(());
    }

    watch_secrets(client, shutdown).await?;
    Ok(())
}

/// Step 2: print every namespace name, returning them for the label query
#[instrument(skip(client))]
pub async fn show_namespaces(client: &Client) -> Result<Vec<String>> {
    let names = namespace_names(&list_namespaces(client).await?);
    println!("2. Current Namespaces");
    for name in &names {
        println!("{}", name);
    }
    Ok(names)
}

/// Step 3: create the demo namespace; an existing one is only logged
pub async fn ensure_demo_namespace(client: &Client, namespace: &str) -> Result<NamespaceCreation> {
    println!("3. creating a namespace called '{}'", namespace);
    let outcome = create_namespace(client, namespace).await?;
    if outcome == NamespaceCreation::AlreadyExisted {
        warn!("namespaces \"{}\" already exists", namespace);
    }
    Ok(outcome)
}

/// Step 4
pub async fn start_hello_world(client: &Client, config: &Config) -> Result<()> {
    println!(
        "4. Creating a pod running a hello-world container in the '{}' namespace",
        config.namespace
    );
    create_pod(client, &hello_world_pod(&config.namespace, &config.image)).await?;
    Ok(())
}

/// Step 5: print `namespace/pod` for every pod matching the selector
pub async fn show_labelled_pods(
    client: &Client,
    namespaces: &[String],
    label_selector: &str,
) -> Result<()> {
    println!(
        "5. print out pod names and the namespace they are in for any pods that have a label of '{}'",
        label_selector
    );
    println!("formatting as namespace/pod-name");
    for pod in pods_with_label(client, namespaces, label_selector).await? {
        println!("-> {}", pod);
    }
    Ok(())
}

/// Step 6: delete the hello-world pod; failure is logged and ignored
pub async fn remove_hello_world(client: &Client, namespace: &str) {
    println!("6. delete the hello-world pod created from above");
    if let Err(e) = delete_pod(client, namespace, hello_world::POD_NAME).await {
        warn!(
            "Failed to delete pod {}/{}: {}",
            namespace,
            hello_world::POD_NAME,
            e
        );
    }
}

/// One `ns/name secret` line per cached secret, in lister order
pub fn describe_cache(lister: &Lister<Secret>) -> Vec<String> {
    lister
        .list(&Selector::default())
        .iter()
        .map(|secret| format!("{} secret", qualified_name(secret.as_ref())))
        .collect()
}

/// Step 7: run a secrets informer, list its cache, and keep printing events until `shutdown`.
///
/// Returns the cache listing that was printed; it is empty when `shutdown` resolved
/// before the first full list arrived.
pub async fn watch_secrets(client: &Client, shutdown: impl Future<Output = ()>) -> Result<Vec<String>> {
    let mut shutdown = pin!(shutdown);
    println!("7. extra credit - show how an informer works");
    println!("using an informer for v1/secrets");

    let mut informer = Informer::new(Api::<Secret>::all(client.clone()), watcher::Config::default());
    informer.add_event_handler(SecretPrinter);
    let handle = informer.spawn();

    println!("using an informer, listing all secrets from the local cache");
    let synced = tokio::select! {
        res = handle.lister().wait_for_sync() => {
            res?;
            true
        }
        _ = &mut shutdown => false,
    };
    if !synced {
        info!("Shutdown requested before the secrets cache synced");
        handle.stop().await?;
        return Ok(Vec::new());
    }

    let listing = describe_cache(handle.lister());
    for line in &listing {
        println!("{}", line);
    }

    shutdown.await;
    info!("Shutdown requested, stopping informer");
    handle.stop().await?;
    Ok(listing)
}
