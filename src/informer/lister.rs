// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read access to an informer's local cache

use crate::error::{Result, WalkthroughError};
use kube::core::{Selector, SelectorExt};
use kube::{Resource, ResourceExt};
use kube_runtime::reflector::{ObjectRef, Store};
use std::hash::Hash;
use std::sync::Arc;

/// Lists and gets objects from the cache without calling the API server
pub struct Lister<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone,
{
    store: Store<K>,
}

impl<K> Clone for Lister<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<K> Lister<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone + Default,
{
    pub fn new(store: Store<K>) -> Self {
        Self { store }
    }

    /// Wait until the first full list has landed in the cache
    pub async fn wait_for_sync(&self) -> Result<()> {
        self.store.wait_until_ready().await.map_err(|e| {
            WalkthroughError::InformerError(format!("Cache never became ready: {}", e))
        })
    }

    /// Cached objects matching the selector, ordered by namespace then name
    pub fn list(&self, selector: &Selector) -> Vec<Arc<K>> {
        let mut objects: Vec<Arc<K>> = self
            .store
            .state()
            .into_iter()
            .filter(|obj| selector.matches(obj.labels()))
            .collect();
        objects.sort_by_key(|obj| (obj.namespace(), obj.name_any()));
        objects
    }

    /// Like [`Lister::list`], restricted to one namespace
    pub fn list_namespaced(&self, namespace: &str, selector: &Selector) -> Vec<Arc<K>> {
        self.list(selector)
            .into_iter()
            .filter(|obj| obj.namespace().as_deref() == Some(namespace))
            .collect()
    }

    /// Look up one object; `None` namespace addresses cluster-scoped objects
    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<Arc<K>> {
        let key = match namespace {
            Some(ns) => ObjectRef::new(name).within(ns),
            None => ObjectRef::new(name),
        };
        self.store.get(&key)
    }
}
