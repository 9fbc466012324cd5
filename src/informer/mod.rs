// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch-backed local cache that turns watch events into add/update/delete notifications.

pub mod handler;
pub mod lister;

pub use handler::{EventHandlerFuncs, Notification, ResourceEventHandler};
pub use lister::Lister;

use crate::error::{Result, WalkthroughError};
use futures::{Stream, StreamExt};
use kube::{Api, Resource};
use kube_runtime::reflector::{store::Writer, ObjectRef, Store};
use kube_runtime::watcher::{self, watcher, Event};
use kube_runtime::WatchStreamExt;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Informer over a single resource type.
///
/// Register handlers with [`Informer::add_event_handler`], then [`Informer::spawn`] it
/// to keep the cache current in the background.
pub struct Informer<K>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync,
{
    api: Api<K>,
    watcher_config: watcher::Config,
    dispatch: Dispatch<K>,
}

impl<K> Informer<K>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync,
{
    pub fn new(api: Api<K>, watcher_config: watcher::Config) -> Self {
        Self {
            api,
            watcher_config,
            dispatch: Dispatch::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: impl ResourceEventHandler<K> + 'static) {
        self.dispatch.handlers.push(Box::new(handler));
    }

    pub fn lister(&self) -> Lister<K> {
        Lister::new(self.dispatch.store.clone())
    }

    /// Watch until `stop` resolves or the watch stream ends
    pub async fn run(mut self, stop: impl Future<Output = ()>) -> Result<()> {
        let stream = watcher(self.api, self.watcher_config).default_backoff();
        self.dispatch.drive(stream, stop).await
    }

    /// Run the informer on a background task
    pub fn spawn(self) -> InformerHandle<K> {
        let lister = self.lister();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(self.run(async move {
            // a dropped sender stops the informer as well
            let _ = stop_rx.await;
        }));

        InformerHandle {
            lister,
            stop_tx,
            task,
        }
    }
}

/// Handle onto a spawned informer
pub struct InformerHandle<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone,
{
    lister: Lister<K>,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<Result<()>>,
}

impl<K> InformerHandle<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone,
{
    pub fn lister(&self) -> &Lister<K> {
        &self.lister
    }

    /// Signal the informer task to stop and wait for it to finish
    pub async fn stop(self) -> Result<()> {
        // the task may already have exited, in which case the join below reports why
        let _ = self.stop_tx.send(());
        self.task
            .await
            .map_err(|e| WalkthroughError::InformerError(format!("Informer task failed: {}", e)))?
    }
}

/// Classifies watch events against the cache and applies them to it
struct Dispatch<K>
where
    K: Resource + Clone + 'static,
    K::DynamicType: Eq + Hash + Clone,
{
    writer: Writer<K>,
    store: Store<K>,
    handlers: Vec<Box<dyn ResourceEventHandler<K>>>,
    /// Keys seen since the last `Init`, while a relist is in progress
    relisted: Option<HashSet<ObjectRef<K>>>,
}

impl<K> Dispatch<K>
where
    K: Resource + Clone + Debug + 'static,
    K::DynamicType: Default + Eq + Hash + Clone,
{
    fn new() -> Self {
        let writer = Writer::default();
        let store = writer.as_reader();
        Self {
            writer,
            store,
            handlers: Vec::new(),
            relisted: None,
        }
    }

    async fn drive<S, F>(&mut self, stream: S, stop: F) -> Result<()>
    where
        S: Stream<Item = std::result::Result<Event<K>, watcher::Error>>,
        F: Future<Output = ()>,
    {
        let mut stream = pin!(stream);
        let mut stop = pin!(stop);

        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Informer stopped");
                    return Ok(());
                }
                next = stream.next() => match next {
                    Some(Ok(event)) => self.process(event),
                    Some(Err(e)) => warn!("Watch stream error, retrying: {}", e),
                    None => {
                        debug!("Watch stream ended");
                        return Ok(());
                    }
                },
            }
        }
    }

    fn process(&mut self, event: Event<K>) {
        for notification in self.notifications(&event) {
            self.handlers
                .iter()
                .for_each(|h| notification.deliver(h.as_ref()));
        }

        self.writer.apply_watcher_event(&event);
    }

    /// Classify an event against the cache as it stood before the event
    fn notifications(&mut self, event: &Event<K>) -> Vec<Notification<K>> {
        match event {
            Event::Init => {
                debug!("Relist started");
                self.relisted = Some(HashSet::new());
                Vec::new()
            }
            Event::InitApply(obj) => {
                let key = ObjectRef::from_obj(obj);
                let notification = self.applied(&key, obj);
                if let Some(seen) = self.relisted.as_mut() {
                    seen.insert(key);
                }
                vec![notification]
            }
            Event::InitDone => {
                let gone = match self.relisted.take() {
                    Some(seen) => self
                        .store
                        .state()
                        .into_iter()
                        .filter(|old| !seen.contains(&ObjectRef::from_obj(old.as_ref())))
                        .map(Notification::Delete)
                        .collect(),
                    None => Vec::new(),
                };
                debug!("Relist done, {} objects gone", gone.len());
                gone
            }
            Event::Apply(obj) => {
                let key = ObjectRef::from_obj(obj);
                vec![self.applied(&key, obj)]
            }
            Event::Delete(obj) => vec![Notification::Delete(Arc::new(obj.clone()))],
        }
    }

    fn applied(&self, key: &ObjectRef<K>, obj: &K) -> Notification<K> {
        let new = Arc::new(obj.clone());
        match self.store.get(key) {
            Some(old) => Notification::Update { old, new },
            None => Notification::Add(new),
        }
    }
}
