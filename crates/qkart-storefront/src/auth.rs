//! Session lifecycle: login, registration and logout.

use std::sync::Arc;

use qkart_client::{ClientError, StorefrontClient};
use qkart_core::{Session, SessionStore};

use crate::notify::{self, Notifier};

pub struct Authenticator {
    client: Arc<StorefrontClient>,
    store: SessionStore,
}

impl Authenticator {
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// The session currently persisted in the store.
    #[must_use]
    pub fn current(&self) -> Session {
        self.store.load()
    }

    /// Logs in and persists the resulting session.
    ///
    /// Returns `None` after notifying the user if the backend rejects the
    /// credentials or the session cannot be saved.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        notifier: &mut dyn Notifier,
    ) -> Option<Session> {
        let login = match self.client.login(username, password).await {
            Ok(login) => login,
            Err(e) => {
                Self::report_failure(&e, notifier);
                return None;
            }
        };

        let session = Session::authenticated(login.username, login.token);
        if let Err(e) = self.store.save(&session) {
            tracing::error!(error = %e, "could not persist session");
            notifier.error(&e.to_string());
            return None;
        }

        tracing::info!(username = session.username(), "logged in");
        notifier.success("Logged in successfully");
        Some(session)
    }

    /// Registers a new account. Returns `true` on success.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match self.client.register(username, password).await {
            Ok(()) => {
                tracing::info!(username, "registered");
                notifier.success("Registered successfully");
                true
            }
            Err(e) => {
                Self::report_failure(&e, notifier);
                false
            }
        }
    }

    /// Clears the persisted session and returns the anonymous session.
    pub fn logout(&self, notifier: &mut dyn Notifier) -> Session {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "could not clear session");
            notifier.error(&e.to_string());
        } else {
            tracing::info!("logged out");
        }
        Session::Anonymous
    }

    fn report_failure(err: &ClientError, notifier: &mut dyn Notifier) {
        tracing::warn!(error = %err, "auth request failed");
        match (err.status(), err.server_message()) {
            (Some(400), Some(message)) => notifier.error(message),
            _ => notifier.error(notify::BACKEND_UNREACHABLE),
        }
    }
}
