//! The tick driver.
//!
//! A [`BehaviorTree`] pairs one root reference with one blackboard and remembers
//! the outcome of its previous tick. That outcome is the only suspension state in
//! the system: if it carries a continuation path the next tick resumes along it,
//! otherwise the next tick starts from scratch.
//!
//! The driver never schedules itself. The embedding loop decides when to tick,
//! and abandoning a tree is simply a matter of no longer ticking it.

use crate::{Continuation, Introspector, NodeRef, Outcome, Registry, Result};

/// Drives one tree with one blackboard across ticks.
///
/// Node graphs and registries may be shared between any number of drivers; the
/// blackboard and last outcome belong to this driver alone.
pub struct BehaviorTree<B> {
    tree: NodeRef<B>,
    blackboard: B,
    last_outcome: Option<Outcome>,
}

impl<B> BehaviorTree<B> {
    /// Creates a driver for `tree`, which may be a name or an inline node.
    pub fn new(tree: impl Into<NodeRef<B>>, blackboard: B) -> Self {
        Self {
            tree: tree.into(),
            blackboard,
            last_outcome: None,
        }
    }

    /// Runs one tick without tracing.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the tick. The last outcome is left as it
    /// was before the call.
    pub fn tick(&mut self, registry: &Registry<B>) -> Result<()> {
        self.step(registry, None)
    }

    /// Runs one tick, recording its trace into `introspector`.
    ///
    /// A tick that fails adds nothing to the introspector's history.
    pub fn tick_traced(
        &mut self,
        registry: &Registry<B>,
        introspector: &mut Introspector,
    ) -> Result<()> {
        self.step(registry, Some(introspector))
    }

    fn step(
        &mut self,
        registry: &Registry<B>,
        mut introspector: Option<&mut Introspector>,
    ) -> Result<()> {
        let (path, resuming) = match self.last_outcome.as_ref().and_then(Outcome::continuation) {
            Some(path) => (path, true),
            None => (&[][..], false),
        };
        tracing::debug!("BehaviorTree: tick (resuming: {}, path: {:?})", resuming, path);

        if let Some(tracer) = introspector.as_deref_mut() {
            tracer.start();
        }

        let result = registry.resolve(&self.tree).and_then(|root| {
            root.run(
                &mut self.blackboard,
                Continuation::new(path, resuming, registry, introspector.as_deref_mut()),
            )
        });

        match result {
            Ok(outcome) => {
                if let Some(tracer) = introspector {
                    tracer.end();
                }
                tracing::debug!("BehaviorTree: tick finished with {:?}", outcome);
                self.last_outcome = Some(outcome);
                Ok(())
            }
            Err(e) => {
                if let Some(tracer) = introspector {
                    tracer.abort();
                }
                tracing::warn!("BehaviorTree: tick aborted: {}", e);
                Err(e)
            }
        }
    }

    /// Outcome of the last successful tick, `None` before the first one.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Forgets the outstanding continuation so the next tick starts fresh.
    ///
    /// `end` callbacks of a running task are not invoked.
    pub fn reset(&mut self) {
        self.last_outcome = None;
    }

    /// The root reference this driver ticks.
    pub fn tree(&self) -> &NodeRef<B> {
        &self.tree
    }

    /// The blackboard every node of this tree reads and writes.
    pub fn blackboard(&self) -> &B {
        &self.blackboard
    }

    /// Mutable access to the blackboard between ticks.
    pub fn blackboard_mut(&mut self) -> &mut B {
        &mut self.blackboard
    }

    /// Consumes the driver and returns its blackboard.
    pub fn into_blackboard(self) -> B {
        self.blackboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Behavior, Selector, Sequence, Status, Task, TreeError};

    #[derive(Default)]
    struct Calls {
        starts: Vec<&'static str>,
        runs: Vec<&'static str>,
        pending: u32,
    }

    fn tracked(label: &'static str, status: Status) -> NodeRef<Calls> {
        NodeRef::node(
            Task::new(move |bb: &mut Calls| {
                bb.runs.push(label);
                status
            })
            .on_start(move |bb| bb.starts.push(label)),
        )
    }

    fn slow(label: &'static str) -> NodeRef<Calls> {
        NodeRef::node(
            Task::new(move |bb: &mut Calls| {
                bb.runs.push(label);
                if bb.pending > 0 {
                    bb.pending -= 1;
                    Status::Running
                } else {
                    Status::Success
                }
            })
            .on_start(move |bb| bb.starts.push(label)),
        )
    }

    #[test]
    fn resumes_exactly_at_running_leaf() {
        let registry = Registry::new();
        let tree = Sequence::new(vec![
            tracked("a", Status::Success),
            NodeRef::node(Selector::new(vec![tracked("b", Status::Failure), slow("c")])),
            tracked("d", Status::Success),
        ]);
        let mut bt = BehaviorTree::new(
            NodeRef::node(tree),
            Calls {
                pending: 1,
                ..Default::default()
            },
        );

        bt.tick(&registry).unwrap();
        assert_eq!(bt.last_outcome(), Some(&Outcome::Suspended(vec![1, 1])));

        bt.blackboard_mut().runs.clear();
        bt.blackboard_mut().starts.clear();
        bt.tick(&registry).unwrap();

        assert_eq!(bt.last_outcome(), Some(&Outcome::Terminal(Status::Success)));
        assert_eq!(bt.blackboard().runs, vec!["c", "d"]);
        assert_eq!(bt.blackboard().starts, vec!["d"]);
    }

    #[test]
    fn terminal_outcome_restarts_from_scratch() {
        let registry = Registry::new();
        let mut bt = BehaviorTree::new(
            NodeRef::node(Sequence::new(vec![
                tracked("a", Status::Success),
                tracked("b", Status::Failure),
            ])),
            Calls::default(),
        );

        bt.tick(&registry).unwrap();
        bt.tick(&registry).unwrap();

        assert_eq!(bt.last_outcome(), Some(&Outcome::Terminal(Status::Failure)));
        assert_eq!(bt.blackboard().starts, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn reset_forgets_outstanding_path() {
        let registry = Registry::new();
        let mut bt = BehaviorTree::new(
            NodeRef::node(Sequence::new(vec![slow("w")])),
            Calls {
                pending: 5,
                ..Default::default()
            },
        );

        bt.tick(&registry).unwrap();
        bt.reset();
        bt.tick(&registry).unwrap();

        assert_eq!(bt.blackboard().starts, vec!["w", "w"]);
    }

    #[test]
    fn failed_tick_keeps_previous_outcome() {
        let mut registry = Registry::new();
        registry.register("root", Sequence::new(vec![slow("w")]));
        let mut bt = BehaviorTree::new(
            "root",
            Calls {
                pending: 5,
                ..Default::default()
            },
        );

        bt.tick(&registry).unwrap();
        registry.clear();
        assert!(matches!(bt.tree(), NodeRef::Named(name) if name == "root"));

        let err = bt.tick(&registry).unwrap_err();
        assert_eq!(err, TreeError::Lookup { name: "root".into() });
        assert_eq!(bt.last_outcome(), Some(&Outcome::Suspended(vec![0])));
    }

    #[test]
    fn shrunken_tree_is_an_invariant_violation() {
        let mut registry = Registry::new();
        registry.register(
            "root",
            Sequence::new(vec![tracked("a", Status::Success), slow("w")]),
        );
        let mut bt = BehaviorTree::new(
            "root",
            Calls {
                pending: 5,
                ..Default::default()
            },
        );

        bt.tick(&registry).unwrap();
        registry.register("root", Sequence::new(vec![tracked("a", Status::Success)]));

        let err = bt.tick(&registry).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(bt.last_outcome(), Some(&Outcome::Suspended(vec![1])));
    }

    // Reports a bare `Running` status instead of a path.
    struct Stubborn;

    impl Behavior<Calls> for Stubborn {
        fn run(&self, bb: &mut Calls, _cont: Continuation<'_, Calls>) -> Result<Outcome> {
            bb.runs.push("stubborn");
            if bb.pending > 0 {
                bb.pending -= 1;
                Ok(Outcome::Terminal(Status::Running))
            } else {
                Ok(Outcome::Terminal(Status::Success))
            }
        }
    }

    #[test]
    fn bare_running_child_resumes_at_its_index() {
        let registry = Registry::new();
        let tree = Sequence::new(vec![tracked("a", Status::Success), NodeRef::node(Stubborn)]);
        let mut bt = BehaviorTree::new(
            NodeRef::node(tree),
            Calls {
                pending: 1,
                ..Default::default()
            },
        );

        bt.tick(&registry).unwrap();
        assert_eq!(bt.last_outcome(), Some(&Outcome::Suspended(vec![1])));

        bt.tick(&registry).unwrap();
        assert_eq!(bt.last_outcome(), Some(&Outcome::Terminal(Status::Success)));
        assert_eq!(bt.blackboard().runs, vec!["a", "stubborn", "stubborn"]);
        assert_eq!(bt.blackboard().starts, vec!["a"]);
    }
}
