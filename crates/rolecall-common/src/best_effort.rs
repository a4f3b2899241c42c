//! Fire-and-forget platform operations whose failures are logged, not raised.

use std::fmt::Display;
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, error, Instrument, Span};

/// A set of background operations spawned by one handler invocation.
///
/// Dropping a `BestEffort` aborts whatever is still running; call
/// [`detach`](Self::detach) to let the operations finish on their own or
/// [`settle`](Self::settle) to wait for them.
#[derive(Default)]
pub struct BestEffort {
    tasks: JoinSet<bool>,
}

/// Tally of settled background operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settled {
    /// Operations that completed successfully.
    pub succeeded: usize,
    /// Operations that returned an error or panicked.
    pub failed: usize,
}

impl BestEffort {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `operation` on the current runtime. A failure is logged with
    /// the `action` name and otherwise ignored.
    pub fn spawn<F, T, E>(&mut self, action: &'static str, operation: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        self.spawn_in(Span::current(), action, operation);
    }

    /// Like [`spawn`](Self::spawn), recording the outcome inside `span` so
    /// the log lines carry its fields.
    pub fn spawn_in<F, T, E>(&mut self, span: Span, action: &'static str, operation: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        self.tasks.spawn(
            async move {
                match operation.await {
                    Ok(_) => {
                        debug!(action, "best-effort operation completed");
                        true
                    }
                    Err(e) => {
                        error!(action, error = %e, "best-effort operation failed");
                        false
                    }
                }
            }
            .instrument(span),
        );
    }

    /// Number of operations not yet settled.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing was spawned or everything has settled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Lets every operation run to completion without waiting for it.
    pub fn detach(mut self) {
        self.tasks.detach_all();
    }

    /// Waits for every operation and reports how they ended.
    pub async fn settle(mut self) -> Settled {
        let mut settled = Settled::default();
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(true) => settled.succeeded += 1,
                Ok(false) => settled.failed += 1,
                Err(e) => {
                    error!(error = %e, "best-effort operation panicked");
                    settled.failed += 1;
                }
            }
        }
        settled
    }
}

impl std::fmt::Debug for BestEffort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestEffort")
            .field("pending", &self.tasks.len())
            .finish()
    }
}

/// A handler's result together with the background work it started.
#[derive(Debug)]
pub struct Dispatched<T> {
    /// What the handler decided.
    pub outcome: T,
    /// Operations still in flight.
    pub background: BestEffort,
}

impl<T> Dispatched<T> {
    /// A result with no background work.
    pub fn done(outcome: T) -> Self {
        Self {
            outcome,
            background: BestEffort::new(),
        }
    }

    /// A result with pending background work.
    pub const fn with_background(outcome: T, background: BestEffort) -> Self {
        Self {
            outcome,
            background,
        }
    }

    /// Detaches the background work and returns the outcome.
    pub fn detach(self) -> T {
        self.background.detach();
        self.outcome
    }
}
