/**
 * Admin Session Store
 *
 * This module manages opaque bearer tokens proving admin authorization.
 *
 * # Token Lifecycle
 *
 * A token is minted on successful login, lives for a fixed TTL, and is gone
 * on expiry, on explicit revocation, or on process restart. Tokens are held
 * only in memory, so restarting the server logs every admin out.
 *
 * # Token Contents
 *
 * Tokens are 32 random bytes rendered as 64 hex characters. They carry no
 * claims; nothing outside this store interprets them, callers only ask
 * whether a token is currently valid.
 */

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tokio::time::{Duration, Instant};

use crate::error::ApiError;

/// Fixed session lifetime: 8 hours from issuance.
pub const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// Number of random bytes per token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// In-memory store of live admin session tokens.
///
/// Cloning is cheap; all clones share the same token set.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose tokens live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Mint a new admin token.
    ///
    /// The token is registered with an expiry deadline and a deferred
    /// cleanup task removes it once the TTL elapses. `validate` also checks
    /// the deadline itself, so a token is never accepted late even if the
    /// cleanup task has not run yet.
    ///
    /// # Errors
    ///
    /// Fails only if the operating system entropy source fails.
    pub fn issue(&self) -> Result<String, ApiError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::fill(&mut bytes).map_err(|e| {
            tracing::error!("entropy source failed while minting token: {e}");
            ApiError::TokenGeneration
        })?;

        let token = bytes.iter().fold(
            String::with_capacity(TOKEN_BYTES * 2),
            |mut out, byte| {
                let _ = write!(out, "{byte:02x}");
                out
            },
        );

        let expires_at = Instant::now() + self.ttl;
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .insert(token.clone(), expires_at);

        // Deferred expiry, the counterpart of validate's deadline check.
        let sessions = Arc::clone(&self.sessions);
        let ttl = self.ttl;
        let expired = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if sessions
                .lock()
                .expect("session store lock poisoned")
                .remove(&expired)
                .is_some()
            {
                tracing::debug!("admin session expired");
            }
        });

        Ok(token)
    }

    /// Check whether `token` is a live, unexpired admin session.
    pub fn validate(&self, token: &str) -> bool {
        match self
            .sessions
            .lock()
            .expect("session store lock poisoned")
            .get(token)
        {
            Some(expires_at) => Instant::now() < *expires_at,
            None => false,
        }
    }

    /// Invalidate `token` immediately.
    ///
    /// Used by the request gateway when it rejects a presented token, so a
    /// client holding a stale credential cannot keep retrying with it.
    pub fn revoke(&self, token: &str) {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .remove(token);
    }

    /// Number of live sessions.
    pub fn count(&self) -> usize {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .len()
    }
}
