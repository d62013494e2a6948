use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{AuthError, Authenticator, CredentialRecord, CredentialStore};

/// Re-login period.
/// WinCC Unified tokens outlive a minute comfortably, so refreshing this
/// often keeps the shared token valid without tracking `expires`.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

struct RefreshTask {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the process-wide credential record and keeps its token fresh.
///
/// A failed refresh leaves the previous token in place; callers keep
/// using it until the next successful login replaces it.
pub struct SessionManager {
    store: CredentialStore,
    authenticator: Arc<dyn Authenticator>,
    refresh_interval: Duration,
    /// Serializes logins so two refreshes never interleave their writes
    refresh_lock: AsyncMutex<()>,
    task: Mutex<Option<RefreshTask>>,
}

impl SessionManager {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        store: CredentialStore,
        refresh_interval: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            authenticator,
            refresh_interval,
            refresh_lock: AsyncMutex::new(()),
            task: Mutex::new(None),
        })
    }

    /// Snapshot of the current credentials
    pub fn credentials(&self) -> CredentialRecord {
        self.store.get()
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn state(&self) -> SessionState {
        if self.store.token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Log in again with the stored username and password.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.store.get();
        let record = self
            .authenticator
            .login(&current.username, &current.password)
            .await?;
        self.apply(record)
    }

    /// Log in with new credentials. The stored record (including the old
    /// username and password) is only replaced when the login succeeds.
    pub async fn login_with(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let _guard = self.refresh_lock.lock().await;
        let record = self.authenticator.login(username, password).await?;
        self.apply(record)
    }

    fn apply(&self, record: CredentialRecord) -> Result<(), AuthError> {
        if record.token.is_none() {
            return Err(AuthError::MissingToken);
        }
        info!(username = %record.username, "WinCC Unified login succeeded");
        self.store.replace(record);
        Ok(())
    }

    /// Start the background refresh task: one login immediately, then one
    /// per interval until `stop` is called.
    ///
    /// Returns false without spawning when no credentials are configured or
    /// the task is already running.
    pub fn start(self: &Arc<Self>) -> bool {
        self.spawn_refresh(Duration::ZERO)
    }

    /// Like `start`, but the first refresh waits a full interval. Used right
    /// after an explicit login, which already produced a fresh token.
    pub fn start_deferred(self: &Arc<Self>) -> bool {
        self.spawn_refresh(self.refresh_interval)
    }

    fn spawn_refresh(self: &Arc<Self>, first_delay: Duration) -> bool {
        if !self.store.get().has_credentials() {
            warn!("No WinCC Unified credentials configured, session refresh not started");
            return false;
        }

        let mut task = self.task.lock().unwrap_or_else(|p| p.into_inner());
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            debug!("Session refresh already running");
            return false;
        }

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(Self::run_refresh_loop(
            Arc::downgrade(self),
            first_delay,
            self.refresh_interval,
            shutdown.clone(),
        ));
        *task = Some(RefreshTask { shutdown, handle });

        info!(
            interval_secs = self.refresh_interval.as_secs(),
            "Session refresh started"
        );
        true
    }

    /// Stop the background refresh task, if any. The current token is kept.
    pub fn stop(&self) {
        let task = self.task.lock().unwrap_or_else(|p| p.into_inner()).take();
        if let Some(task) = task {
            task.shutdown.cancel();
            debug!("Session refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    async fn run_refresh_loop(
        manager: Weak<SessionManager>,
        first_delay: Duration,
        period: Duration,
        shutdown: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval_at(Instant::now() + first_delay, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let Some(manager) = manager.upgrade() else {
                break;
            };

            tokio::select! {
                _ = shutdown.cancelled() => break,
                result = manager.refresh() => {
                    if let Err(e) = result {
                        warn!(error = %e, "Session refresh failed, keeping previous token");
                    }
                }
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().ok().and_then(|t| t.take()) {
            task.shutdown.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::api::ApiError;

    /// Authenticator that replays scripted outcomes, then keeps succeeding.
    #[derive(Default)]
    struct ScriptedAuthenticator {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<String, ()>>>,
    }

    impl ScriptedAuthenticator {
        fn with_script(script: Vec<Result<&str, ()>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script.into_iter().map(|r| r.map(str::to_string)).collect()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Authenticator for ScriptedAuthenticator {
        async fn login(&self, username: &str, password: &str) -> Result<CredentialRecord, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Err(())) => Err(AuthError::Request(ApiError::ServerError("boom".into()))),
                Some(Ok(token)) => Ok(CredentialRecord {
                    username: username.to_string(),
                    password: password.to_string(),
                    token: Some(token),
                }),
                None => Ok(CredentialRecord {
                    username: username.to_string(),
                    password: password.to_string(),
                    token: Some(format!("token-{}", n)),
                }),
            }
        }
    }

    fn manager(auth: Arc<ScriptedAuthenticator>) -> Arc<SessionManager> {
        SessionManager::new(
            auth,
            CredentialStore::new(CredentialRecord::new("op", "pw")),
            DEFAULT_REFRESH_INTERVAL,
        )
    }

    #[tokio::test]
    async fn test_refresh_success_authenticates() {
        let auth = ScriptedAuthenticator::with_script(vec![Ok("abc123")]);
        let session = manager(auth.clone());
        assert_eq!(session.state(), SessionState::Unauthenticated);

        session.refresh().await.unwrap();

        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.credentials().username, "op");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_token() {
        let auth = ScriptedAuthenticator::with_script(vec![Ok("first"), Err(())]);
        let session = manager(auth.clone());

        session.refresh().await.unwrap();
        assert!(session.refresh().await.is_err());

        assert_eq!(session.token().as_deref(), Some("first"));
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_login_with_replaces_credentials_only_on_success() {
        let auth = ScriptedAuthenticator::with_script(vec![Err(()), Ok("admin-token")]);
        let session = manager(auth.clone());

        assert!(session.login_with("admin", "secret").await.is_err());
        assert_eq!(session.credentials().username, "op");
        assert_eq!(session.token(), None);

        session.login_with("admin", "secret").await.unwrap();
        let record = session.credentials();
        assert_eq!(record.username, "admin");
        assert_eq!(record.password, "secret");
        assert_eq!(record.token(), Some("admin-token"));
    }

    #[tokio::test]
    async fn test_start_without_credentials_is_noop() {
        let auth = ScriptedAuthenticator::with_script(vec![]);
        let session = SessionManager::new(
            auth.clone(),
            CredentialStore::new(CredentialRecord::new("", "")),
            DEFAULT_REFRESH_INTERVAL,
        );
        assert!(!session.start());
        assert!(!session.is_running());
        assert_eq!(auth.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_schedule() {
        let auth = ScriptedAuthenticator::with_script(vec![]);
        let session = manager(auth.clone());

        assert!(session.start());
        assert!(!session.start(), "second start must not spawn another task");

        // Immediate attempt
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(auth.calls(), 1);
        assert_eq!(session.token().as_deref(), Some("token-1"));

        // Nothing more until a full interval has elapsed
        tokio::time::sleep(Duration::from_secs(58)).await;
        assert_eq!(auth.calls(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(auth.calls(), 2);
        assert_eq!(session.token().as_deref(), Some("token-2"));

        session.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_does_not_stop_schedule() {
        let auth = ScriptedAuthenticator::with_script(vec![Ok("first"), Err(()), Ok("third")]);
        let session = manager(auth.clone());
        session.start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(session.token().as_deref(), Some("first"));

        // Second tick fails: stale token stays
        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL).await;
        assert_eq!(auth.calls(), 2);
        assert_eq!(session.token().as_deref(), Some("first"));

        // Third tick still runs
        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL).await;
        assert_eq!(auth.calls(), 3);
        assert_eq!(session.token().as_deref(), Some("third"));

        session.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_then_deferred_refresh() {
        let auth = ScriptedAuthenticator::with_script(vec![Ok("admin-token")]);
        let session = SessionManager::new(
            auth.clone(),
            CredentialStore::new(CredentialRecord::new("", "")),
            DEFAULT_REFRESH_INTERVAL,
        );
        assert!(!session.start());

        session.login_with("admin", "secret").await.unwrap();
        assert!(session.start_deferred());
        assert!(session.is_running());

        // No immediate re-login on top of the one just made
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(auth.calls(), 1);
        assert_eq!(session.token().as_deref(), Some("admin-token"));

        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL).await;
        assert_eq!(auth.calls(), 2);
        let record = session.credentials();
        assert_eq!(record.username, "admin");
        assert_eq!(record.token(), Some("token-2"));

        session.stop();
    }

    /// Authenticator that takes a while and records how many logins overlap.
    #[derive(Default)]
    struct SlowAuthenticator {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Authenticator for SlowAuthenticator {
        async fn login(&self, username: &str, password: &str) -> Result<CredentialRecord, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(CredentialRecord {
                username: username.to_string(),
                password: password.to_string(),
                token: Some(format!("{}-{}", username, n)),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_logins_are_serialized() {
        let auth = Arc::new(SlowAuthenticator::default());
        let session = SessionManager::new(
            auth.clone(),
            CredentialStore::new(CredentialRecord::new("op", "pw")),
            DEFAULT_REFRESH_INTERVAL,
        );

        let (refreshed, switched, again) = tokio::join!(
            session.refresh(),
            session.login_with("admin", "secret"),
            session.refresh(),
        );
        refreshed.unwrap();
        switched.unwrap();
        again.unwrap();

        assert_eq!(auth.calls.load(Ordering::SeqCst), 3);
        assert_eq!(auth.peak.load(Ordering::SeqCst), 1);

        // The record is whole: the token belongs to the stored user
        let record = session.credentials();
        let token = record.token().unwrap();
        assert!(
            token.starts_with(&format!("{}-", record.username)),
            "token {} does not match user {}",
            token,
            record.username
        );
        let expected_password = if record.username == "admin" { "secret" } else { "pw" };
        assert_eq!(record.password, expected_password);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_refresh() {
        let auth = ScriptedAuthenticator::with_script(vec![]);
        let session = manager(auth.clone());
        session.start();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(auth.calls(), 1);

        session.stop();
        assert!(!session.is_running());

        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL * 3).await;
        assert_eq!(auth.calls(), 1);
        assert_eq!(session.token().as_deref(), Some("token-1"));
    }
}
