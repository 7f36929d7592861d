use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::api::ApiError;
use crate::config::{AnalysisConfig, AppConfig, ServerConfig};
use crate::models::{SessionId, SubmissionTable};

/// One uploaded table snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    pub table: Arc<SubmissionTable>,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Insertion sequence, used for eviction order
    seq: u64,
}

/// In-memory sessions, each holding its own immutable table.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
    max_sessions: usize,
    next_seq: u64,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions: max_sessions.max(1),
            next_seq: 0,
        }
    }

    /// Store a new session. Returns the id of the session evicted to make
    /// room, if any.
    pub fn insert(
        &mut self,
        id: SessionId,
        table: Arc<SubmissionTable>,
        file_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Option<SessionId> {
        let mut evicted = None;
        if !self.sessions.contains_key(&id) && self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|(_, s)| s.seq)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                self.sessions.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.sessions.insert(
            id,
            Session {
                table,
                file_name,
                created_at,
                seq,
            },
        );
        evicted
    }

    /// Swap in a new table for an existing session, returning the session's
    /// creation time. The session keeps its place in eviction order.
    pub fn replace(
        &mut self,
        id: &SessionId,
        table: Arc<SubmissionTable>,
        file_name: Option<String>,
    ) -> Option<DateTime<Utc>> {
        let session = self.sessions.get_mut(id)?;
        session.table = table;
        session.file_name = file_name;
        Some(session.created_at)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn remove(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

pub type SharedSessions = Arc<RwLock<SessionStore>>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SharedSessions,
    pub analysis: Arc<AnalysisConfig>,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionStore::new(config.server.max_sessions))),
            analysis: Arc::new(config.analysis.clone()),
            server: Arc::new(config.server.clone()),
        }
    }

    /// Snapshot of a session's table. The lock is released before any
    /// aggregation runs.
    pub async fn table(&self, id: &SessionId) -> Result<Arc<SubmissionTable>, ApiError> {
        let store = self.sessions.read().await;
        store
            .get(id)
            .map(|s| s.table.clone())
            .ok_or_else(|| ApiError::NotFound(format!("Session {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::scenario;

    fn snapshot() -> Arc<SubmissionTable> {
        Arc::new(scenario())
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = SessionStore::new(4);
        let id = SessionId::generate();

        let created_at = Utc::now();
        let evicted = store.insert(id, snapshot(), Some("a.csv".to_string()), created_at);

        assert!(evicted.is_none());
        assert_eq!(store.len(), 1);
        let session = store.get(&id).unwrap();
        assert_eq!(session.table.len(), 3);
        assert_eq!(session.file_name.as_deref(), Some("a.csv"));
        assert_eq!(session.created_at, created_at);
    }

    #[test]
    fn test_store_evicts_oldest() {
        let mut store = SessionStore::new(2);
        let first = SessionId::generate();
        let second = SessionId::generate();
        let third = SessionId::generate();

        store.insert(first, snapshot(), None, Utc::now());
        store.insert(second, snapshot(), None, Utc::now());
        let evicted = store.insert(third, snapshot(), None, Utc::now());

        assert_eq!(evicted, Some(first));
        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_none());
        assert!(store.get(&third).is_some());
    }

    #[test]
    fn test_store_replace_and_remove() {
        let mut store = SessionStore::new(2);
        let id = SessionId::generate();
        store.insert(id, snapshot(), None, Utc::now());

        let created_at = store.get(&id).unwrap().created_at;

        let smaller = Arc::new(scenario().with_rows(Vec::new()));
        assert_eq!(
            store.replace(&id, smaller, Some("b.csv".to_string())),
            Some(created_at)
        );
        assert!(store.get(&id).unwrap().table.is_empty());

        assert!(store.replace(&SessionId::generate(), snapshot(), None).is_none());
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut store = SessionStore::new(4);
        let a = SessionId::generate();
        let b = SessionId::generate();
        store.insert(a, snapshot(), None, Utc::now());
        store.insert(b, snapshot(), None, Utc::now());

        store.replace(&a, Arc::new(scenario().with_rows(Vec::new())), None);
        assert!(store.get(&a).unwrap().table.is_empty());
        assert_eq!(store.get(&b).unwrap().table.len(), 3);
    }

    #[test]
    fn test_app_state_table_lookup() {
        let state = AppState::new(&AppConfig::default());
        let id = SessionId::generate();

        tokio_test::block_on(async {
            assert!(matches!(
                state.table(&id).await,
                Err(ApiError::NotFound(_))
            ));

            state
                .sessions
                .write()
                .await
                .insert(id, snapshot(), None, Utc::now());
            let table = state.table(&id).await.unwrap();
            assert_eq!(table.len(), 3);
        });
    }
}
