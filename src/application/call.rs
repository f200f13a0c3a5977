//! Notifying call wrapper.
//!
//! [`ApiCaller::execute`] runs one asynchronous operation, turns its outcome
//! into an operator notification, and hands the original result back to the
//! caller. [`TrackedCall`] adds an "in progress" flag around the same logic.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error};

use crate::port::{Notification, Notifier};

/// Message shown when neither the options nor the failure provide one.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

type Continuation<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Per-call behaviour of [`ApiCaller::execute`].
pub struct CallOptions<'a> {
    success_message: Option<Cow<'static, str>>,
    error_message: Option<Cow<'static, str>>,
    on_success: Option<Continuation<'a>>,
    on_error: Option<Continuation<'a>>,
    notify: bool,
}

impl<'a> CallOptions<'a> {
    /// Options with no messages, no continuations, and notifications on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            success_message: None,
            error_message: None,
            on_success: None,
            on_error: None,
            notify: true,
        }
    }

    /// Options for background calls: failures are logged, never notified.
    #[must_use]
    pub fn silent() -> Self {
        Self::new().notify(false)
    }

    /// Notify this message when the operation succeeds.
    #[must_use]
    pub fn success_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Notify this message instead of the failure's own when the operation fails.
    #[must_use]
    pub fn error_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Run `continuation` after a successful operation.
    #[must_use]
    pub fn on_success(mut self, continuation: impl FnOnce() + Send + 'a) -> Self {
        self.on_success = Some(Box::new(continuation));
        self
    }

    /// Run `continuation` after a failed operation.
    #[must_use]
    pub fn on_error(mut self, continuation: impl FnOnce() + Send + 'a) -> Self {
        self.on_error = Some(Box::new(continuation));
        self
    }

    /// Turn operator notifications on or off.
    #[must_use]
    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}

impl Default for CallOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("success_message", &self.success_message)
            .field("error_message", &self.error_message)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("notify", &self.notify)
            .finish()
    }
}

/// Shared call wrapper that reports outcomes through a [`Notifier`].
#[derive(Clone)]
pub struct ApiCaller {
    notifier: Arc<dyn Notifier>,
}

impl ApiCaller {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Run `operation` once and report its outcome.
    ///
    /// On failure the error is notified (unless notifications are off),
    /// logged, and returned unchanged; callers decide how to recover.
    pub async fn execute<T, E, F, Fut>(
        &self,
        operation: F,
        options: CallOptions<'_>,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let CallOptions {
            success_message,
            error_message,
            on_success,
            on_error,
            notify,
        } = options;

        match operation().await {
            Ok(value) => {
                if let Some(message) = success_message.filter(|_| notify) {
                    self.notifier.notify(Notification::success(message));
                }
                if let Some(continuation) = on_success {
                    continuation();
                }
                debug!("API call succeeded");
                Ok(value)
            }
            Err(err) => {
                let message = display_message(error_message.as_deref(), &err);
                if notify {
                    self.notifier.notify(Notification::error(message.clone()));
                }
                if let Some(continuation) = on_error {
                    continuation();
                }
                error!(error = %err, message = %message, notify, "API call failed");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for ApiCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCaller").finish_non_exhaustive()
    }
}

/// Configured message, else the failure's own message, else the fallback.
fn display_message(configured: Option<&str>, err: &impl fmt::Display) -> String {
    if let Some(message) = configured.filter(|m| !m.is_empty()) {
        return message.to_string();
    }
    let own = err.to_string();
    if own.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        own
    }
}

/// Clears a flag when dropped, so the flag is reset on success, failure,
/// and cancellation alike.
struct InProgress<'a>(&'a AtomicBool);

impl<'a> InProgress<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// [`ApiCaller`] paired with an "in progress" flag for interactive triggers.
#[derive(Debug)]
pub struct TrackedCall {
    caller: ApiCaller,
    in_progress: AtomicBool,
}

impl TrackedCall {
    pub fn new(caller: ApiCaller) -> Self {
        Self {
            caller,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Whether a call is currently in flight.
    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Same as [`ApiCaller::execute`], with the flag raised for the duration.
    pub async fn call<T, E, F, Fut>(&self, operation: F, options: CallOptions<'_>) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let _in_progress = InProgress::raise(&self.in_progress);
        self.caller.execute(operation, options).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use crate::error::ApiError;
    use crate::port::{Endpoint, NotificationLevel};
    use crate::testkit::notifier::RecordingNotifier;

    fn caller() -> (ApiCaller, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (ApiCaller::new(notifier.clone()), notifier)
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            endpoint: Endpoint::StopBot,
            status: 503,
        }
    }

    #[tokio::test]
    async fn success_notifies_configured_message_and_returns_value() {
        let (caller, notifier) = caller();

        let value = caller
            .execute(
                || async { Ok::<_, ApiError>(7) },
                CallOptions::new().success_message("done"),
            )
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(notifier.messages(), vec![(NotificationLevel::Success, "done".to_string())]);
    }

    #[tokio::test]
    async fn success_without_message_is_quiet() {
        let (caller, notifier) = caller();

        caller
            .execute(|| async { Ok::<_, ApiError>(()) }, CallOptions::new())
            .await
            .unwrap();

        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn failure_notifies_configured_message_and_returns_error() {
        let (caller, notifier) = caller();

        let result = caller
            .execute(
                || async { Err::<(), _>(server_error()) },
                CallOptions::new()
                    .success_message("never")
                    .error_message("Failed to stop bot"),
            )
            .await;

        assert!(matches!(result, Err(ApiError::Status { status: 503, .. })));
        assert_eq!(
            notifier.messages(),
            vec![(NotificationLevel::Error, "Failed to stop bot".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_falls_back_to_own_message_then_generic() {
        let (caller, notifier) = caller();

        let _ = caller
            .execute(|| async { Err::<(), _>(server_error()) }, CallOptions::new())
            .await;
        let _ = caller
            .execute(|| async { Err::<(), _>(String::new()) }, CallOptions::new())
            .await;

        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].1, server_error().to_string());
        assert_eq!(messages[1].1, FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn continuations_run_on_matching_outcome() {
        let (caller, _) = caller();
        let successes = AtomicUsize::new(0);
        let failures = AtomicUsize::new(0);

        let _ = caller
            .execute(
                || async { Ok::<_, ApiError>(()) },
                CallOptions::new()
                    .on_success(|| {
                        successes.fetch_add(1, Ordering::SeqCst);
                    })
                    .on_error(|| {
                        failures.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .await;
        let _ = caller
            .execute(
                || async { Err::<(), _>(server_error()) },
                CallOptions::new()
                    .on_success(|| {
                        successes.fetch_add(1, Ordering::SeqCst);
                    })
                    .on_error(|| {
                        failures.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .await;

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn silent_calls_never_notify() {
        let (caller, notifier) = caller();

        let _ = caller
            .execute(
                || async { Ok::<_, ApiError>(()) },
                CallOptions::silent().success_message("ok"),
            )
            .await;
        let result = caller
            .execute(|| async { Err::<(), _>(server_error()) }, CallOptions::silent())
            .await;

        assert!(result.is_err());
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn tracked_call_raises_flag_for_duration() {
        let (caller, _) = caller();
        let tracked = TrackedCall::new(caller);
        assert!(!tracked.in_progress());
        let observer = &tracked;

        let seen = tracked
            .call(
                || async move { Ok::<_, ApiError>(observer.in_progress()) },
                CallOptions::new(),
            )
            .await
            .unwrap();
        assert!(seen);
        assert!(!tracked.in_progress());

        let _ = tracked
            .call(|| async { Err::<(), _>(server_error()) }, CallOptions::new())
            .await;
        assert!(!tracked.in_progress());
    }

    #[tokio::test]
    async fn tracked_call_clears_flag_when_cancelled() {
        let (caller, notifier) = caller();
        let tracked = TrackedCall::new(caller);

        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            tracked.call(
                std::future::pending::<Result<(), ApiError>>,
                CallOptions::new(),
            ),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!tracked.in_progress());
        assert!(notifier.is_empty());
    }
}
