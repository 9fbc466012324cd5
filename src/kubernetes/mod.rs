// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-shot Kubernetes API calls: connecting, namespaces and pods.

pub mod client;
pub mod namespaces;
pub mod pods;

pub use client::connect;
pub use namespaces::{create_namespace, list_namespaces, namespace_names, NamespaceCreation};
pub use pods::{create_pod, delete_pod, hello_world_pod, pods_with_label, PodRef};
