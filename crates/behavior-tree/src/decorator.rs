//! Decorator behavior nodes.
//!
//! A [`Decorator`] wraps a single child and rewrites its terminal status according
//! to a [`Transform`]. Decorators pass the continuation through unchanged: with only
//! one child there is no index to record, so they add no level to the path.

use crate::{Behavior, Continuation, NodeRef, Outcome, Result, Status};

/// How a decorator rewrites its child's terminal status.
///
/// `Running` always passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Success becomes Failure and vice versa (logical NOT).
    Invert,

    /// Failure becomes Success.
    ///
    /// This is useful for:
    /// - Optional behaviors that shouldn't cause a sequence to fail
    /// - Error suppression in non-critical paths
    AlwaysSucceed,

    /// Success becomes Failure.
    AlwaysFail,
}

impl Transform {
    /// Applies the transform to a status.
    pub fn apply(self, status: Status) -> Status {
        match (self, status) {
            (_, Status::Running) => Status::Running,
            (Transform::Invert, status) => status.invert(),
            (Transform::AlwaysSucceed, _) => Status::Success,
            (Transform::AlwaysFail, _) => Status::Failure,
        }
    }
}

/// Single-child node that transforms its child's result.
pub struct Decorator<B> {
    name: Option<String>,
    child: NodeRef<B>,
    transform: Transform,
}

impl<B> Decorator<B> {
    /// Creates a new anonymous decorator around `child`.
    pub fn new(child: NodeRef<B>, transform: Transform) -> Self {
        Self {
            name: None,
            child,
            transform,
        }
    }

    /// Shorthand for a decorator with [`Transform::Invert`].
    pub fn invert(child: NodeRef<B>) -> Self {
        Self::new(child, Transform::Invert)
    }

    /// Sets the label shown in traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The transform applied to the child's status.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

impl<B> Behavior<B> for Decorator<B> {
    fn run(&self, blackboard: &mut B, mut cont: Continuation<'_, B>) -> Result<Outcome> {
        if let Some(tracer) = cont.tracer() {
            tracer.open_frame();
        }

        let child = cont.registry().resolve(&self.child)?;
        let outcome = match child.run(blackboard, cont.reborrow())? {
            Outcome::Terminal(status) => Outcome::Terminal(self.transform.apply(status)),
            suspended => suspended,
        };

        if let Some(tracer) = cont.tracer() {
            tracer.close_frame(self.name.as_deref(), outcome.status());
        }
        Ok(outcome)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
