//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors:
//! [`Sequence`] (AND logic) and [`Selector`] (OR logic).
//!
//! # Resumption
//!
//! A composite never remembers which child it was on. When a child suspends, the
//! composite prepends that child's index to the returned path. On the next tick
//! the first index of the incoming path tells the composite where to start;
//! children before it are not visited again.

use crate::{Behavior, Continuation, NodeRef, Outcome, Result, Status, TreeError};

/// Combination rule shared by [`Sequence`] and [`Selector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Continue while children succeed.
    And,
    /// Continue while children fail.
    Or,
}

impl Policy {
    /// The status that lets evaluation move on to the next child. It is also
    /// the overall result when every child produced it.
    fn pass(self) -> Status {
        match self {
            Policy::And => Status::Success,
            Policy::Or => Status::Failure,
        }
    }
}

fn run_children<B>(
    policy: Policy,
    name: Option<&str>,
    children: &[NodeRef<B>],
    blackboard: &mut B,
    mut cont: Continuation<'_, B>,
) -> Result<Outcome> {
    let start = cont.start_index();
    if !cont.path().is_empty() && start >= children.len() {
        return Err(TreeError::PathOutOfRange {
            index: start,
            len: children.len(),
        });
    }

    if let Some(tracer) = cont.tracer() {
        tracer.open_frame();
    }

    let registry = cont.registry();
    let mut outcome = Outcome::Terminal(policy.pass());

    for (index, child_ref) in children.iter().enumerate().skip(start) {
        let child = registry.resolve(child_ref)?;
        let child_outcome = child.run(blackboard, cont.descend(index == start))?;

        if child_outcome == Outcome::Terminal(policy.pass()) {
            continue;
        }

        tracing::trace!(
            "Composite {:?} stopped at child {} with {:?}",
            name,
            index,
            child_outcome.status()
        );
        outcome = child_outcome.prefixed(index);
        break;
    }

    if let Some(tracer) = cont.tracer() {
        tracer.close_frame(name, outcome.status());
    }
    Ok(outcome)
}

/// Executes child behaviors in sequence until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child is `Running`, the sequence stops and suspends on that child
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<B> {
    name: Option<String>,
    children: Vec<NodeRef<B>>,
}

impl<B> Sequence<B> {
    /// Creates a new anonymous sequence with the given children.
    pub fn new(children: Vec<NodeRef<B>>) -> Self {
        Self {
            name: None,
            children,
        }
    }

    /// Sets the label shown in traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<B> Behavior<B> for Sequence<B> {
    fn run(&self, blackboard: &mut B, cont: Continuation<'_, B>) -> Result<Outcome> {
        run_children(
            Policy::And,
            self.name.as_deref(),
            &self.children,
            blackboard,
            cont,
        )
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Executes child behaviors in sequence until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child is `Running`, the selector stops and suspends on that child
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<B> {
    name: Option<String>,
    children: Vec<NodeRef<B>>,
}

impl<B> Selector<B> {
    /// Creates a new anonymous selector with the given children.
    pub fn new(children: Vec<NodeRef<B>>) -> Self {
        Self {
            name: None,
            children,
        }
    }

    /// Sets the label shown in traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<B> Behavior<B> for Selector<B> {
    fn run(&self, blackboard: &mut B, cont: Continuation<'_, B>) -> Result<Outcome> {
        run_children(
            Policy::Or,
            self.name.as_deref(),
            &self.children,
            blackboard,
            cont,
        )
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
