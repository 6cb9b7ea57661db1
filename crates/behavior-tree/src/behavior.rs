//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes, together with the two values threaded
//! through every call: [`NodeRef`], a reference to a child node, and
//! [`Continuation`], which tells a node where the previous tick left off.
//!
//! Nodes are immutable. Everything a tree needs to resume a running leaf lives
//! in the [`Outcome`] handed back to the driver, so one node graph can be shared
//! by any number of drivers.

use std::fmt;
use std::sync::Arc;

use crate::{Introspector, Outcome, Registry, Result};

/// A behavior tree node that can be evaluated against a blackboard.
pub trait Behavior<B>: Send + Sync {
    /// Evaluate this behavior node against the given blackboard.
    ///
    /// # Arguments
    ///
    /// * `blackboard` - Mutable reference to the caller's context. Nodes read
    ///   decision inputs from it and store task-local state in it.
    /// * `cont` - Where this node resumes, plus the registry used to resolve
    ///   named children and the optional trace recorder.
    ///
    /// # Returns
    ///
    /// - `Outcome::Terminal(status)` once the node has finished
    /// - `Outcome::Suspended(path)` if a leaf at `path` below this node is still running
    fn run(&self, blackboard: &mut B, cont: Continuation<'_, B>) -> Result<Outcome>;

    /// Label used in traces and logs.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Blanket implementation for shared behaviors.
impl<B> Behavior<B> for Arc<dyn Behavior<B>> {
    #[inline]
    fn run(&self, blackboard: &mut B, cont: Continuation<'_, B>) -> Result<Outcome> {
        (**self).run(blackboard, cont)
    }

    #[inline]
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// Reference from a parent (or the driver) to a node.
///
/// Named references are resolved through the [`Registry`] every time they are
/// evaluated, so registry edits between ticks take effect on the next tick.
pub enum NodeRef<B> {
    /// A node looked up by name at evaluation time.
    Named(String),

    /// A node owned inline.
    Inline(Arc<dyn Behavior<B>>),
}

impl<B> NodeRef<B> {
    /// References a registered node by name.
    pub fn named(name: impl Into<String>) -> Self {
        NodeRef::Named(name.into())
    }

    /// Wraps a node inline.
    pub fn node(node: impl Behavior<B> + 'static) -> Self {
        NodeRef::Inline(Arc::new(node))
    }
}

impl<B> Clone for NodeRef<B> {
    fn clone(&self) -> Self {
        match self {
            NodeRef::Named(name) => NodeRef::Named(name.clone()),
            NodeRef::Inline(node) => NodeRef::Inline(Arc::clone(node)),
        }
    }
}

impl<B> fmt::Debug for NodeRef<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            NodeRef::Inline(node) => f.debug_tuple("Inline").field(&node.name()).finish(),
        }
    }
}

impl<B> From<&str> for NodeRef<B> {
    fn from(name: &str) -> Self {
        NodeRef::Named(name.to_owned())
    }
}

impl<B> From<String> for NodeRef<B> {
    fn from(name: String) -> Self {
        NodeRef::Named(name)
    }
}

impl<B> From<Arc<dyn Behavior<B>>> for NodeRef<B> {
    fn from(node: Arc<dyn Behavior<B>>) -> Self {
        NodeRef::Inline(node)
    }
}

/// Resumption state handed to a node for one `run`.
///
/// `path` is the remainder of the continuation path below this node and
/// `resuming` is `true` only along the path the previous tick suspended on.
pub struct Continuation<'a, B> {
    path: &'a [usize],
    resuming: bool,
    registry: &'a Registry<B>,
    tracer: Option<&'a mut Introspector>,
}

impl<'a, B> Continuation<'a, B> {
    /// Creates the continuation for the root of a tree.
    pub fn new(
        path: &'a [usize],
        resuming: bool,
        registry: &'a Registry<B>,
        tracer: Option<&'a mut Introspector>,
    ) -> Self {
        Self {
            path,
            resuming,
            registry,
            tracer,
        }
    }

    /// Remaining child indices below this node.
    #[inline]
    pub fn path(&self) -> &'a [usize] {
        self.path
    }

    /// Whether this node is on the path the previous tick suspended on.
    #[inline]
    pub fn resuming(&self) -> bool {
        self.resuming
    }

    /// Registry used to resolve named children.
    #[inline]
    pub fn registry(&self) -> &'a Registry<B> {
        self.registry
    }

    /// Trace recorder, if this tick is being traced.
    #[inline]
    pub fn tracer(&mut self) -> Option<&mut Introspector> {
        self.tracer.as_deref_mut()
    }

    /// Index of the child a composite starts from.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.path.first().copied().unwrap_or(0)
    }

    /// Continuation for a child one level down.
    ///
    /// The child the path points at (`on_path`) receives the rest of the path and
    /// inherits `resuming`. Any other child starts fresh with an empty path.
    pub fn descend(&mut self, on_path: bool) -> Continuation<'_, B> {
        let (path, resuming) = if on_path {
            (self.path.get(1..).unwrap_or(&[]), self.resuming)
        } else {
            (&[][..], false)
        };
        Continuation {
            path,
            resuming,
            registry: self.registry,
            tracer: self.tracer.as_deref_mut(),
        }
    }

    /// Continuation for a single child at the same level (decorators).
    pub fn reborrow(&mut self) -> Continuation<'_, B> {
        Continuation {
            path: self.path,
            resuming: self.resuming,
            registry: self.registry,
            tracer: self.tracer.as_deref_mut(),
        }
    }
}
