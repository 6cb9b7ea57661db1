//! Name registry for behavior nodes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Behavior, NodeRef, Result, Status, Task, TreeError};

/// Maps names to shared, immutable nodes.
///
/// A registry has an explicit owner and lifetime; create one per process or per
/// test. Drivers borrow it for each tick, so nodes registered or replaced between
/// ticks are picked up on the next tick.
pub struct Registry<B> {
    nodes: HashMap<String, Arc<dyn Behavior<B>>>,
}

impl<B> Registry<B> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Registers `node` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, node: impl Behavior<B> + 'static) {
        self.insert(name.into(), Arc::new(node));
    }

    /// Registers an already shared node under `name`.
    pub fn register_shared(&mut self, name: impl Into<String>, node: Arc<dyn Behavior<B>>) {
        self.insert(name.into(), node);
    }

    /// Registers a bare callable as an anonymous task with only `run` set.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, run: F)
    where
        B: 'static,
        F: Fn(&mut B) -> Status + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(Task::new(run)));
    }

    fn insert(&mut self, name: String, node: Arc<dyn Behavior<B>>) {
        if self.nodes.insert(name.clone(), node).is_some() {
            tracing::debug!("Registry: replaced node '{}'", name);
        }
    }

    /// Resolves a reference to a node.
    ///
    /// Inline references resolve to themselves. Named references are looked up
    /// and fail with [`TreeError::Lookup`] if nothing is registered under the name.
    pub fn resolve<'a>(&'a self, node: &'a NodeRef<B>) -> Result<&'a dyn Behavior<B>> {
        match node {
            NodeRef::Inline(node) => Ok(node.as_ref()),
            NodeRef::Named(name) => self
                .nodes
                .get(name)
                .map(|node| node.as_ref())
                .ok_or_else(|| TreeError::Lookup { name: name.clone() }),
        }
    }

    /// Finds a node by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Behavior<B>>> {
        self.nodes.get(name)
    }

    /// Returns `true` if a node is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over registered names (for debugging).
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Removes every registered node.
    pub fn clear(&mut self) {
        tracing::debug!("Registry: cleared {} nodes", self.nodes.len());
        self.nodes.clear();
    }
}

impl<B> Default for Registry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.nodes.keys().collect::<Vec<_>>())
            .finish()
    }
}
