//! Status and outcome values returned by behavior nodes.

/// Child indices from the root down to the running leaf.
///
/// An empty path means the node that returned it is itself the running leaf.
pub type ContinuationPath = Vec<usize>;

/// The result of evaluating a behavior node.
///
/// `Success` and `Failure` are terminal: the node is done for this activation.
/// `Running` means the node needs more ticks before it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action finished.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action could not be carried out.
    Failure,

    /// The behavior has not finished yet and must be ticked again.
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running` is returned unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

/// What a node hands back to its parent after one `run`.
///
/// A suspended outcome carries the location of the running leaf relative to the
/// node that returned it. Composites prepend the index of the child they stopped
/// at, so by the time the outcome reaches the driver the path is rooted at the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The node finished (or reported a bare status).
    Terminal(Status),

    /// A leaf below this node is still running at the given path.
    Suspended(ContinuationPath),
}

impl Outcome {
    /// Outcome of a leaf that is itself the suspension point.
    #[inline]
    pub fn suspended_here() -> Self {
        Outcome::Suspended(ContinuationPath::new())
    }

    /// The status this outcome reports. Suspended outcomes report `Running`.
    #[inline]
    pub fn status(&self) -> Status {
        match self {
            Outcome::Terminal(status) => *status,
            Outcome::Suspended(_) => Status::Running,
        }
    }

    /// Returns `true` if the next tick should resume rather than restart.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    /// The path the next tick resumes at, or `None` when the tree is idle.
    ///
    /// A bare `Terminal(Running)` resumes at the root.
    pub fn continuation(&self) -> Option<&[usize]> {
        match self {
            Outcome::Suspended(path) => Some(path.as_slice()),
            Outcome::Terminal(Status::Running) => Some(&[][..]),
            Outcome::Terminal(_) => None,
        }
    }

    /// Re-roots a suspended outcome under the child at `index`.
    ///
    /// A bare `Terminal(Running)` becomes a path to that child. Finished
    /// outcomes are returned unchanged.
    pub(crate) fn prefixed(self, index: usize) -> Self {
        match self {
            Outcome::Suspended(mut path) => {
                path.insert(0, index);
                Outcome::Suspended(path)
            }
            Outcome::Terminal(Status::Running) => Outcome::Suspended(vec![index]),
            terminal => terminal,
        }
    }
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        Outcome::Terminal(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_running() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn suspended_reports_running() {
        assert_eq!(Outcome::Suspended(vec![1, 0]).status(), Status::Running);
        assert_eq!(Outcome::Terminal(Status::Failure).status(), Status::Failure);
    }

    #[test]
    fn continuation_of_idle_outcome_is_none() {
        assert_eq!(Outcome::Terminal(Status::Success).continuation(), None);
        assert_eq!(Outcome::Terminal(Status::Failure).continuation(), None);
    }

    #[test]
    fn bare_running_resumes_at_root() {
        let outcome = Outcome::Terminal(Status::Running);
        assert_eq!(outcome.continuation(), Some(&[][..]));
    }

    #[test]
    fn prefixed_prepends_index() {
        let outcome = Outcome::Suspended(vec![2]).prefixed(0).prefixed(3);
        assert_eq!(outcome, Outcome::Suspended(vec![3, 0, 2]));
        assert_eq!(
            Outcome::Terminal(Status::Success).prefixed(4),
            Outcome::Terminal(Status::Success)
        );
    }

    #[test]
    fn bare_running_gains_a_path_when_prefixed() {
        let outcome = Outcome::Terminal(Status::Running).prefixed(2);
        assert_eq!(outcome, Outcome::Suspended(vec![2]));
        assert!(outcome.is_running());
        assert!(!Outcome::Terminal(Status::Failure).is_running());
    }

    #[test]
    fn only_running_is_non_terminal() {
        assert!(Status::Success.is_terminal());
        assert!(Status::Failure.is_terminal());
        assert!(!Status::Running.is_terminal());
    }
}
