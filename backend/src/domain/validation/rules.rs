//! Deferred asynchronous rules.
//!
//! Registration only stores the rule. Nothing runs until a terminal call
//! hands the queue a [`ValidationState`], and then rules run one at a time in
//! registration order. Rules are never fanned out concurrently: uniqueness
//! and existence probes against the same store must not race, and the error
//! order has to stay deterministic.

use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::debug;

use super::error::ValidationError;
use super::state::ValidationState;

type DeferredPredicate<'a> = Box<dyn FnOnce() -> BoxFuture<'a, bool> + Send + 'a>;
type DeferredFold<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Vec<ValidationError>> + Send + 'a>;

/// When a deferred rule is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    /// Run unconditionally.
    Always,
    /// Run only if no rule has failed by the time this rule's turn comes.
    WhenValid,
}

enum DeferredCheck<'a> {
    /// Boolean predicate paired with the error it reports.
    Predicate {
        predicate: DeferredPredicate<'a>,
        error: ValidationError,
    },
    /// Check that reports its own errors, such as a nested service call.
    Fold(DeferredFold<'a>),
}

struct AsyncRule<'a> {
    check: DeferredCheck<'a>,
    gate: Gate,
}

/// Counters reported after the queue has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QueueRun {
    pub(crate) executed: usize,
    pub(crate) skipped: usize,
}

/// Ordered list of rules awaiting a terminal call.
#[derive(Default)]
pub(crate) struct AsyncRuleQueue<'a> {
    rules: Vec<AsyncRule<'a>>,
}

impl<'a> AsyncRuleQueue<'a> {
    pub(crate) fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    pub(crate) fn push_predicate<F, Fut>(
        &mut self,
        predicate: F,
        error: ValidationError,
        gate: Gate,
    )
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        let predicate: DeferredPredicate<'a> = Box::new(move || predicate().boxed());
        self.rules.push(AsyncRule {
            check: DeferredCheck::Predicate { predicate, error },
            gate,
        });
    }

    pub(crate) fn push_fold<F, Fut>(&mut self, fold: F, gate: Gate)
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Vec<ValidationError>> + Send + 'a,
    {
        let fold: DeferredFold<'a> = Box::new(move || fold().boxed());
        self.rules.push(AsyncRule {
            check: DeferredCheck::Fold(fold),
            gate,
        });
    }

    /// Run every rule once, in order, recording failures into `state`.
    pub(crate) async fn run(self, state: &mut ValidationState) -> QueueRun {
        let mut run = QueueRun::default();
        for (position, rule) in self.rules.into_iter().enumerate() {
            if rule.gate == Gate::WhenValid && state.has_errors() {
                debug!(position, "deferred rule skipped after earlier failure");
                run.skipped += 1;
                continue;
            }
            run.executed += 1;
            match rule.check {
                DeferredCheck::Predicate { predicate, error } => {
                    if !predicate().await {
                        state.record(error);
                    }
                }
                DeferredCheck::Fold(fold) => {
                    for error in fold().await {
                        state.record(error);
                    }
                }
            }
        }
        run
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the deferred rule queue.

    use super::*;
    use crate::domain::{ServiceError, ServiceErrorCode};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn registration_does_not_execute_rules() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let mut queue = AsyncRuleQueue::new();
        queue.push_predicate(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            },
            "unused".into(),
            Gate::Always,
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        drop(queue);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rules_run_sequentially_in_registration_order() {
        let order = Mutex::new(Vec::new());
        let mut queue = AsyncRuleQueue::new();
        for label in ["first", "second", "third"] {
            let order = &order;
            queue.push_predicate(
                move || async move {
                    order.lock().expect("order lock").push(label);
                    tokio::task::yield_now().await;
                    false
                },
                label.into(),
                Gate::Always,
            );
        }

        let mut state = ValidationState::new();
        let run = queue.run(&mut state).await;

        assert_eq!(run.executed, 3);
        assert_eq!(
            *order.lock().expect("order lock"),
            vec!["first", "second", "third"]
        );
        assert_eq!(state.errors(), ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn when_valid_rule_checks_state_at_run_time() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let mut queue = AsyncRuleQueue::new();
        queue.push_predicate(|| async { false }, "failed".into(), Gate::Always);
        queue.push_predicate(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            },
            "never".into(),
            Gate::WhenValid,
        );

        let mut state = ValidationState::new();
        let run = queue.run(&mut state).await;

        assert_eq!(run, QueueRun { executed: 1, skipped: 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fold_records_every_reported_error() {
        let mut queue = AsyncRuleQueue::new();
        queue.push_fold(
            || async {
                vec![
                    ServiceError::not_found("Plan").into(),
                    ValidationError::from("Name is required"),
                ]
            },
            Gate::Always,
        );

        let mut state = ValidationState::new();
        queue.run(&mut state).await;

        assert_eq!(
            state.structured_error().map(ServiceError::code),
            Some(ServiceErrorCode::NotFound)
        );
        assert_eq!(state.errors(), ["Name is required"]);
    }
}
