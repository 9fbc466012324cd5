// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Event handlers notified by an informer

use std::sync::Arc;

/// Receives add, update and delete notifications for a watched resource.
///
/// Handlers are called from the informer task, before the event is written to the
/// local cache, so a lister read inside a handler still sees the previous state.
pub trait ResourceEventHandler<K>: Send + Sync {
    fn on_add(&self, obj: &K);
    fn on_update(&self, old: &K, new: &K);
    fn on_delete(&self, obj: &K);
}

/// A single change derived from a watch event, before it reaches the handlers
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<K> {
    Add(Arc<K>),
    Update { old: Arc<K>, new: Arc<K> },
    Delete(Arc<K>),
}

impl<K> Notification<K> {
    /// Hand this notification to the matching handler method
    pub fn deliver(&self, handler: &dyn ResourceEventHandler<K>) {
        match self {
            Notification::Add(obj) => handler.on_add(obj),
            Notification::Update { old, new } => handler.on_update(old, new),
            Notification::Delete(obj) => handler.on_delete(obj),
        }
    }
}

type ObjFn<K> = Box<dyn Fn(&K) + Send + Sync>;
type UpdateFn<K> = Box<dyn Fn(&K, &K) + Send + Sync>;

/// A handler assembled from closures; missing closures ignore their events
pub struct EventHandlerFuncs<K> {
    add: Option<ObjFn<K>>,
    update: Option<UpdateFn<K>>,
    delete: Option<ObjFn<K>>,
}

impl<K> EventHandlerFuncs<K> {
    pub fn new() -> Self {
        Self {
            add: None,
            update: None,
            delete: None,
        }
    }

    pub fn add_func(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
        self.add = Some(Box::new(f));
        self
    }

    pub fn update_func(mut self, f: impl Fn(&K, &K) + Send + Sync + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn delete_func(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
        self.delete = Some(Box::new(f));
        self
    }
}

impl<K> Default for EventHandlerFuncs<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ResourceEventHandler<K> for EventHandlerFuncs<K> {
    fn on_add(&self, obj: &K) {
        if let Some(f) = &self.add {
            f(obj);
        }
    }

    fn on_update(&self, old: &K, new: &K) {
        if let Some(f) = &self.update {
            f(old, new);
        }
    }

    fn on_delete(&self, obj: &K) {
        if let Some(f) = &self.delete {
            f(obj);
        }
    }
}
