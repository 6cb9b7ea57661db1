//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `NodeRef::node(Sequence::new(vec![...]))`, you can use shorter functions like
//! `sequence(vec![...])`. Every helper returns a [`NodeRef`], so results nest
//! directly and mix with registered names via [`named`].

use crate::{Decorator, NodeRef, Selector, Sequence, Status, Task, Transform};

/// References a registered node by name.
#[inline]
pub fn named<B>(name: impl Into<String>) -> NodeRef<B> {
    NodeRef::named(name)
}

/// Creates an anonymous task with only a `run` callback.
///
/// Shorthand for `NodeRef::node(Task::new(run))`.
#[inline]
pub fn task<B: 'static, F>(run: F) -> NodeRef<B>
where
    F: Fn(&mut B) -> Status + Send + Sync + 'static,
{
    NodeRef::node(Task::new(run))
}

/// Creates a sequence node.
///
/// Shorthand for `NodeRef::node(Sequence::new(children))`.
#[inline]
pub fn sequence<B: 'static>(children: Vec<NodeRef<B>>) -> NodeRef<B> {
    NodeRef::node(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `NodeRef::node(Selector::new(children))`.
#[inline]
pub fn selector<B: 'static>(children: Vec<NodeRef<B>>) -> NodeRef<B> {
    NodeRef::node(Selector::new(children))
}

/// Creates an inverter node.
///
/// Shorthand for `NodeRef::node(Decorator::new(child, Transform::Invert))`.
#[inline]
pub fn invert<B: 'static>(child: NodeRef<B>) -> NodeRef<B> {
    NodeRef::node(Decorator::new(child, Transform::Invert))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<B: 'static>(child: NodeRef<B>) -> NodeRef<B> {
    NodeRef::node(Decorator::new(child, Transform::AlwaysSucceed))
}

/// Creates an always-fail node.
#[inline]
pub fn always_fail<B: 'static>(child: NodeRef<B>) -> NodeRef<B> {
    NodeRef::node(Decorator::new(child, Transform::AlwaysFail))
}
