//! Async result wrapper for JWT operations run off the caller's task

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::task::JoinHandle;

/// Future resolving to the result of an issuance or verification.
///
/// The work runs on the tokio blocking pool; a panicked or cancelled task
/// resolves to `JwtError::Internal`.
#[must_use = "futures do nothing unless awaited"]
pub struct AsyncJwtResult<T> {
    handle: JoinHandle<JwtResult<T>>,
}

impl<T: Send + 'static> AsyncJwtResult<T> {
    pub(crate) fn spawn<F>(operation: F) -> Self
    where
        F: FnOnce() -> JwtResult<T> + Send + 'static,
    {
        Self {
            handle: tokio::task::spawn_blocking(operation),
        }
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(JwtError::internal(format!(
                "JWT task failed: {e}"
            )))),
            Poll::Pending => Poll::Pending,
        }
    }
}
