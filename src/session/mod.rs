//! Server-side login sessions.
//!
//! The browser holds an opaque random token in a cookie. The store only ever
//! sees the SHA-256 of that token, so a dump of the store cannot be replayed
//! as cookies. Sessions have a fixed lifetime counted from login; an expired
//! session is dropped when it is next read, and a background sweep removes
//! the ones nobody reads again.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::{Id, User, UserType};

/// State attached to an authenticated browser
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: Id,
    pub user_type: UserType,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            user_id: user.id,
            user_type: user.user_type,
            username: user.username.clone(),
            created_at,
            expires_at: created_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Backing store for sessions, keyed by the cookie token
pub trait SessionStore: Send + Sync {
    /// Look up a live session; expired entries are treated as absent
    fn get(&self, token: &str) -> Option<Session>;
    fn set(&self, token: &str, session: Session);
    /// Returns whether a session was removed
    fn destroy(&self, token: &str) -> bool;
    /// Remove every expired session, returning how many were dropped
    fn sweep(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open a session for `user` and return the token for the cookie
    fn start(&self, user: &User, ttl: Duration) -> String {
        let token = generate_token();
        self.set(&token, Session::for_user(user, ttl));
        token
    }
}

/// Generate a random 256-bit token, hex encoded
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token: &str) -> Option<Session> {
        let key = hash_token(token);
        let session = self.sessions.get(&key).map(|entry| entry.value().clone())?;
        if session.is_expired_at(Utc::now()) {
            self.sessions.remove(&key);
            return None;
        }
        Some(session)
    }

    fn set(&self, token: &str, session: Session) {
        self.sessions.insert(hash_token(token), session);
    }

    fn destroy(&self, token: &str) -> bool {
        self.sessions.remove(&hash_token(token)).is_some()
    }

    fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Spawn a background task that periodically sweeps expired sessions
pub fn spawn_sweep_task(store: Arc<dyn SessionStore>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
        // The first tick fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = store.sweep();
            tracing::debug!(
                removed,
                remaining = store.len(),
                "Session sweep complete"
            );
        }
    });
}
