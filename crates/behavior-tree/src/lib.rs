//! Resumable behavior tree engine.
//!
//! Trees are evaluated in discrete ticks driven by an external loop. Leaf tasks
//! may take many ticks to finish; when one returns `Running` the tree records
//! where it stopped as a plain list of child indices and resumes there on the
//! next tick, without threads or coroutines.
//!
//! - **Immutable nodes**: node graphs hold no per-run state and can be shared
//! - **Data continuations**: the suspension point is an [`Outcome`] owned by the driver
//! - **Late binding**: children may be referenced by name and resolved every tick
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`] / [`Outcome`]: Node results and continuation paths
//! - Leaf node: [`Task`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator node: [`Decorator`] with a [`Transform`]
//! - [`Registry`]: Name to node map
//! - [`BehaviorTree`]: Tick driver owning the blackboard
//! - [`Introspector`]: Optional per-tick trace recorder

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod introspector;
pub mod registry;
pub mod status;
pub mod task;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Continuation, NodeRef};
pub use composite::{Selector, Sequence};
pub use decorator::{Decorator, Transform};
pub use error::{Result, TreeError};
pub use introspector::{Introspector, IntrospectorConfig, Trace, TraceNode};
pub use registry::Registry;
pub use status::{ContinuationPath, Outcome, Status};
pub use task::{Action, Task};
pub use tree::BehaviorTree;
