//! Caller-controlled cancellation and deadlines.

use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Why an in-flight operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    #[error("operation canceled")]
    Canceled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal handed to every service operation.
///
/// Cloning shares the underlying token, so canceling any clone interrupts
/// every operation running under it.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that never fires unless [`Cancellation::cancel`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drive `future` to completion unless the token fires or the deadline
    /// passes first. The future is dropped on interruption.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;

            () = self.token.cancelled() => Err(Interrupted::Canceled),
            () = deadline => Err(Interrupted::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn completes_when_nothing_fires() -> TestResult {
        let output = Cancellation::new().run(async { 7 }).await?;

        assert_eq!(output, 7);

        Ok(())
    }

    #[tokio::test]
    async fn canceled_token_interrupts_pending_work() {
        let cx = Cancellation::new();
        cx.cancel();

        let result = cx.run(std::future::pending::<()>()).await;

        assert_eq!(result, Err(Interrupted::Canceled));
    }

    #[tokio::test]
    async fn cancel_from_another_task_interrupts_in_flight_work() {
        let cx = Cancellation::new();
        let remote = cx.clone();

        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            remote.cancel();
        });

        let result = cx.run(std::future::pending::<()>()).await;

        assert_eq!(result, Err(Interrupted::Canceled));
    }

    #[tokio::test]
    async fn expired_deadline_interrupts_pending_work() {
        let cx = Cancellation::new().with_timeout(Duration::from_millis(5));

        let result = cx.run(std::future::pending::<()>()).await;

        assert_eq!(result, Err(Interrupted::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancellation_wins_over_an_expired_deadline() {
        let cx = Cancellation::new().with_deadline(Instant::now());
        cx.cancel();

        let result = cx.run(async { 1 }).await;

        assert_eq!(result, Err(Interrupted::Canceled));
    }
}
