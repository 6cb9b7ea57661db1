//! Leaf tasks.
//!
//! A [`Task`] is the only node that touches the blackboard with user logic. It
//! has a required `run` callback and optional `start` and `end` callbacks:
//!
//! - `start` fires when the task is entered fresh (not when resuming)
//! - `run` fires on every tick that reaches the task
//! - `end` fires once `run` returns `Success` or `Failure`
//!
//! `end` never fires for a task whose tree is abandoned while it is running, so
//! it must not be relied on for mandatory cleanup.

use std::sync::Arc;

use crate::{Behavior, Continuation, Outcome, Result, Status, TreeError};

type Hook<B> = Box<dyn Fn(&mut B) + Send + Sync>;
type RunFn<B> = Box<dyn Fn(&mut B) -> Status + Send + Sync>;

/// Leaf logic expressed as a type instead of closures.
///
/// Only [`Action::run`] is required; `start` and `end` default to no-ops.
pub trait Action<B>: Send + Sync {
    /// Called before the first `run` of an activation.
    fn start(&self, _blackboard: &mut B) {}

    /// Performs one step of work.
    fn run(&self, blackboard: &mut B) -> Status;

    /// Called after `run` returns a terminal status.
    fn end(&self, _blackboard: &mut B) {}
}

/// A leaf node built from callbacks.
pub struct Task<B> {
    name: Option<String>,
    start: Option<Hook<B>>,
    run: RunFn<B>,
    end: Option<Hook<B>>,
}

impl<B> Task<B> {
    /// Creates an anonymous task with only a `run` callback.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut B) -> Status + Send + Sync + 'static,
    {
        Self {
            name: None,
            start: None,
            run: Box::new(run),
            end: None,
        }
    }

    /// Sets the label shown in traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the callback fired when the task is entered fresh.
    pub fn on_start<F>(mut self, start: F) -> Self
    where
        F: Fn(&mut B) + Send + Sync + 'static,
    {
        self.start = Some(Box::new(start));
        self
    }

    /// Sets the callback fired when `run` returns a terminal status.
    pub fn on_end<F>(mut self, end: F) -> Self
    where
        F: Fn(&mut B) + Send + Sync + 'static,
    {
        self.end = Some(Box::new(end));
        self
    }
}

impl<B: 'static> Task<B> {
    /// Creates an anonymous task that delegates to an [`Action`].
    pub fn from_action<A>(action: A) -> Self
    where
        A: Action<B> + 'static,
    {
        let action = Arc::new(action);
        let start = Arc::clone(&action);
        let end = Arc::clone(&action);
        Self {
            name: None,
            start: Some(Box::new(move |bb: &mut B| start.start(bb))),
            run: Box::new(move |bb: &mut B| action.run(bb)),
            end: Some(Box::new(move |bb: &mut B| end.end(bb))),
        }
    }
}

impl<B> Behavior<B> for Task<B> {
    fn run(&self, blackboard: &mut B, mut cont: Continuation<'_, B>) -> Result<Outcome> {
        if !cont.path().is_empty() {
            return Err(TreeError::PathTooDeep {
                remaining: cont.path().len(),
            });
        }

        if !cont.resuming()
            && let Some(start) = &self.start
        {
            start(blackboard);
        }

        let status = (self.run)(blackboard);
        let outcome = match status {
            Status::Running => Outcome::suspended_here(),
            terminal => {
                if let Some(end) = &self.end {
                    end(blackboard);
                }
                Outcome::Terminal(terminal)
            }
        };

        if let Some(tracer) = cont.tracer() {
            tracer.record(self.name.as_deref(), status);
        }
        Ok(outcome)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    #[derive(Default)]
    struct Counters {
        start: u32,
        run: u32,
        end: u32,
        result: Option<Status>,
    }

    fn counting_task() -> Task<Counters> {
        Task::new(|bb: &mut Counters| {
            bb.run += 1;
            bb.result.unwrap_or(Status::Success)
        })
        .on_start(|bb| bb.start += 1)
        .on_end(|bb| bb.end += 1)
    }

    #[test]
    fn fresh_success_calls_all_hooks() {
        let registry = Registry::new();
        let task = counting_task();
        let mut bb = Counters::default();

        let outcome = task.run(&mut bb, Continuation::new(&[], false, &registry, None));

        assert_eq!(outcome, Ok(Outcome::Terminal(Status::Success)));
        assert_eq!((bb.start, bb.run, bb.end), (1, 1, 1));
    }

    #[test]
    fn running_suspends_without_end() {
        let registry = Registry::new();
        let task = counting_task();
        let mut bb = Counters {
            result: Some(Status::Running),
            ..Default::default()
        };

        let outcome = task.run(&mut bb, Continuation::new(&[], false, &registry, None));

        assert_eq!(outcome, Ok(Outcome::Suspended(vec![])));
        assert_eq!((bb.start, bb.run, bb.end), (1, 1, 0));
    }

    #[test]
    fn resuming_skips_start() {
        let registry = Registry::new();
        let task = counting_task();
        let mut bb = Counters {
            result: Some(Status::Failure),
            ..Default::default()
        };

        let outcome = task.run(&mut bb, Continuation::new(&[], true, &registry, None));

        assert_eq!(outcome, Ok(Outcome::Terminal(Status::Failure)));
        assert_eq!((bb.start, bb.run, bb.end), (0, 1, 1));
    }

    #[test]
    fn leftover_path_is_rejected() {
        let registry = Registry::new();
        let task = counting_task();
        let mut bb = Counters::default();

        let outcome = task.run(&mut bb, Continuation::new(&[0, 1], true, &registry, None));

        assert_eq!(outcome, Err(TreeError::PathTooDeep { remaining: 2 }));
        assert_eq!(bb.run, 0);
    }

    struct Countdown;
    impl Action<Counters> for Countdown {
        fn start(&self, bb: &mut Counters) {
            bb.start += 1;
        }

        fn run(&self, bb: &mut Counters) -> Status {
            bb.run += 1;
            if bb.run < 2 {
                Status::Running
            } else {
                Status::Success
            }
        }
    }

    #[test]
    fn action_defaults_end_to_noop() {
        let registry = Registry::new();
        let task = Task::from_action(Countdown);
        let mut bb = Counters::default();

        let first = task.run(&mut bb, Continuation::new(&[], false, &registry, None));
        let second = task.run(&mut bb, Continuation::new(&[], true, &registry, None));

        assert_eq!(first, Ok(Outcome::Suspended(vec![])));
        assert_eq!(second, Ok(Outcome::Terminal(Status::Success)));
        assert_eq!((bb.start, bb.run, bb.end), (1, 2, 0));
    }
}
