use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::pages::Page;
use crate::vitals::VitalLog;

/// Everything one interactive session accumulates. Dropped when the session
/// ends or idles past the store TTL.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    page: Page,
    vitals: VitalLog,
    last_seen_at: Instant,
}

impl SessionContext {
    pub fn new(id: Uuid, now: Instant) -> Self {
        Self {
            id,
            page: Page::default(),
            vitals: VitalLog::default(),
            last_seen_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn vitals(&self) -> &VitalLog {
        &self.vitals
    }

    pub fn vitals_mut(&mut self) -> &mut VitalLog {
        &mut self.vitals
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen_at) >= ttl
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found or expired")]
    NotFound,
}

#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<Uuid, SessionContext>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn create(&self) -> SessionContext {
        self.create_at(Instant::now())
    }

    pub fn create_at(&self, now: Instant) -> SessionContext {
        let mut entries = self.lock_entries();
        purge_expired(&mut entries, now, self.ttl);

        let mut id = Uuid::new_v4();
        while entries.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let context = SessionContext::new(id, now);
        entries.insert(id, context.clone());
        context
    }

    /// Runs `f` against the live session and refreshes its idle timer.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> T,
    ) -> Result<T, SessionError> {
        self.with_session_at(id, Instant::now(), f)
    }

    pub fn with_session_at<T>(
        &self,
        id: Uuid,
        now: Instant,
        f: impl FnOnce(&mut SessionContext) -> T,
    ) -> Result<T, SessionError> {
        let mut entries = self.lock_entries();
        purge_expired(&mut entries, now, self.ttl);

        let context = entries.get_mut(&id).ok_or(SessionError::NotFound)?;
        context.last_seen_at = now;
        Ok(f(context))
    }

    pub fn end(&self, id: Uuid) -> Result<(), SessionError> {
        let mut entries = self.lock_entries();
        purge_expired(&mut entries, Instant::now(), self.ttl);
        entries
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::NotFound)
    }

    pub fn active_count(&self) -> usize {
        self.lock_entries().len()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<Uuid, SessionContext>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn purge_expired(entries: &mut HashMap<Uuid, SessionContext>, now: Instant, ttl: Duration) {
    let before = entries.len();
    entries.retain(|_, context| !context.is_expired(now, ttl));
    let purged = before - entries.len();
    if purged > 0 {
        debug!(purged, remaining = entries.len(), "expired sessions purged");
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::NaiveDate;

    use super::{SessionError, SessionStore};
    use crate::pages::Page;
    use crate::vitals::VitalReading;

    fn reading(blood_pressure: u32) -> VitalReading {
        VitalReading {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid test date"),
            blood_pressure,
            cholesterol: 180,
            heart_rate: 70,
        }
    }

    #[test]
    fn new_sessions_start_on_home_with_no_readings() {
        let store = SessionStore::new(Duration::from_secs(60));
        let context = store.create();

        assert_eq!(context.page(), Page::Home);
        assert!(context.vitals().is_empty());
        assert_eq!(store.active_count(), 1);
    }

    #[test]
    fn sessions_do_not_share_readings() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.create().id();
        let second = store.create().id();

        store
            .with_session(first, |context| context.vitals_mut().append(reading(150)))
            .expect("first session exists");

        let second_count = store
            .with_session(second, |context| context.vitals().len())
            .expect("second session exists");
        assert_eq!(second_count, 0);
    }

    #[test]
    fn idle_sessions_expire_and_activity_extends_them() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let id = store.create_at(start).id();

        store
            .with_session_at(id, start + Duration::from_secs(50), |context| {
                context.navigate(Page::Faq)
            })
            .expect("session is still live");

        let page = store
            .with_session_at(id, start + Duration::from_secs(100), |context| context.page())
            .expect("activity refreshed the idle timer");
        assert_eq!(page, Page::Faq);

        let expired = store.with_session_at(id, start + Duration::from_secs(161), |_| ());
        assert_eq!(expired, Err(SessionError::NotFound));
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn ended_sessions_are_gone() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().id();

        store.end(id).expect("session should end");
        assert_eq!(store.end(id), Err(SessionError::NotFound));
        assert_eq!(
            store.with_session(id, |context| context.page()),
            Err(SessionError::NotFound)
        );
    }
}
