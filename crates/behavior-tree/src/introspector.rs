//! Per-tick execution traces.
//!
//! An [`Introspector`] is handed to [`BehaviorTree::tick_traced`] and records the
//! part of the tree that actually ran during that tick. Siblings skipped by a
//! short-circuit or by resumption do not appear in the trace.
//!
//! Nodes report through three calls:
//! - [`Introspector::record`] for leaves
//! - [`Introspector::open_frame`] before a branching node evaluates its children
//! - [`Introspector::close_frame`] after it, attaching the collected children
//!
//! Recording is observation only; it never changes what the tree does.
//!
//! [`BehaviorTree::tick_traced`]: crate::BehaviorTree::tick_traced

use std::collections::VecDeque;

use crate::Status;

/// One executed node in a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceNode {
    /// The node's configured name; `None` for anonymous nodes.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "name", default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,

    /// The node's own result for the tick, `Running` for a suspended node.
    pub result: Status,

    /// Children evaluated this tick, in evaluation order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    /// Creates a trace entry without children.
    pub fn leaf(label: Option<&str>, result: Status) -> Self {
        Self {
            label: label.map(str::to_owned),
            result,
            children: Vec::new(),
        }
    }
}

/// The top-level entries captured during one tick.
pub type Trace = Vec<TraceNode>;

/// Introspector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntrospectorConfig {
    /// Maximum number of traces kept in history. `None` keeps every trace.
    pub history_limit: Option<usize>,
}

/// Records traces of traced ticks.
#[derive(Debug, Default)]
pub struct Introspector {
    config: IntrospectorConfig,
    // Frame stack for the tick in progress; empty when no capture is open.
    frames: Vec<Vec<TraceNode>>,
    last_trace: Option<Trace>,
    history: VecDeque<Trace>,
}

impl Introspector {
    /// Creates an introspector that keeps every trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an introspector with the given configuration.
    pub fn with_config(config: IntrospectorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Trace of the most recent completed tick.
    pub fn last_trace(&self) -> Option<&Trace> {
        self.last_trace.as_ref()
    }

    /// Traces of completed ticks, oldest first.
    pub fn history(&self) -> &VecDeque<Trace> {
        &self.history
    }

    /// Forgets all recorded traces.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.last_trace = None;
        self.history.clear();
    }

    /// Opens the capture for a new tick.
    pub fn start(&mut self) {
        if !self.frames.is_empty() {
            tracing::warn!(
                "Introspector: discarding unfinished capture with {} open frames",
                self.frames.len()
            );
        }
        self.frames.clear();
        self.frames.push(Vec::new());
    }

    /// Closes the capture and appends it to the history.
    pub fn end(&mut self) {
        let trace = self.frames.drain(..).next().unwrap_or_default();

        self.history.push_back(trace.clone());
        if let Some(limit) = self.config.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
        self.last_trace = Some(trace);
    }

    /// Drops the capture of a tick that aborted with an error.
    pub fn abort(&mut self) {
        self.frames.clear();
    }

    /// Records a leaf in the current frame.
    pub fn record(&mut self, label: Option<&str>, result: Status) {
        self.push(TraceNode::leaf(label, result));
    }

    /// Opens a frame collecting the children of a branching node.
    pub fn open_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost frame and records it as the children of a
    /// branching node.
    pub fn close_frame(&mut self, label: Option<&str>, result: Status) {
        let children = self.frames.pop().unwrap_or_default();
        self.push(TraceNode {
            label: label.map(str::to_owned),
            result,
            children,
        });
    }

    fn push(&mut self, node: TraceNode) {
        match self.frames.last_mut() {
            Some(frame) => frame.push(node),
            None => tracing::debug!("Introspector: dropping trace entry outside of a capture"),
        }
    }
}
