use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::CredentialStore;
use crate::navigator::TabNavigator;
use crate::services::load_credentials;
use crate::sheets::GoogleSheetsClient;

pub type SheetsNavigator = TabNavigator<GoogleSheetsClient>;

struct ViewEntry {
    navigator: Arc<SheetsNavigator>,
    last_access: Instant,
}

/// Task views by view id. A view that has not been read for `idle` is dropped,
/// the same inactivity window after which the session cookie expires.
#[derive(Clone)]
pub struct TaskViews {
    entries: Arc<RwLock<HashMap<String, ViewEntry>>>,
    idle: Duration,
}

impl TaskViews {
    pub fn new(idle: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle,
        }
    }

    /// Store a view, sweeping idle ones first.
    pub async fn insert(&self, view_id: String, navigator: SheetsNavigator, replaces: Option<String>) {
        let mut entries = self.entries.write().await;
        Self::sweep(&mut entries, self.idle);
        if let Some(previous) = replaces {
            entries.remove(&previous);
        }
        entries.insert(view_id, ViewEntry {
            navigator: Arc::new(navigator),
            last_access: Instant::now(),
        });
    }

    /// Look up a live view and mark it as used.
    pub async fn get(&self, view_id: &str) -> Option<Arc<SheetsNavigator>> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(view_id)?;
        if entry.last_access.elapsed() >= self.idle {
            entries.remove(view_id);
            return None;
        }
        entry.last_access = Instant::now();
        Some(entry.navigator.clone())
    }

    pub async fn remove(&self, view_id: &str) {
        self.entries.write().await.remove(view_id);
    }

    pub async fn evict_idle(&self) -> usize {
        Self::sweep(&mut *self.entries.write().await, self.idle)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn sweep(entries: &mut HashMap<String, ViewEntry>, idle: Duration) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| entry.last_access.elapsed() < idle);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle task views", evicted);
        }
        evicted
    }
}

/// Shared by every handler. The credential snapshot is swapped as a whole and
/// handed to the login check explicitly; it is never edited in place.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<GoogleSheetsClient>,
    pub config: Config,
    credentials: Arc<RwLock<Arc<CredentialStore>>>,
    pub views: TaskViews,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sheets: Arc::new(GoogleSheetsClient::new(&config.sheets)),
            views: TaskViews::new(config.session_idle()),
            config,
            credentials: Arc::new(RwLock::new(Arc::new(CredentialStore::default()))),
        }
    }

    pub async fn credentials(&self) -> Arc<CredentialStore> {
        self.credentials.read().await.clone()
    }

    /// Re-read the master sheet. On failure the snapshot is left empty.
    pub async fn reload_credentials(&self) -> AppResult<usize> {
        let result = load_credentials(
            &*self.sheets,
            &self.config.sheets.master_sheet_id,
            &self.config.sheets.credentials_range,
        )
        .await;

        let (store, outcome) = match result {
            Ok(store) => {
                if store.is_empty() {
                    tracing::warn!("Master sheet has no user rows");
                }
                let count = store.len();
                (store, Ok(count))
            }
            Err(e) => (CredentialStore::default(), Err(e)),
        };
        *self.credentials.write().await = Arc::new(store);

        if let Ok(count) = &outcome {
            tracing::debug!("Credential snapshot replaced ({} records)", count);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stub, stub_config, StubSheets, MASTER_ID};

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let stub = StubSheets::default().with_values(
            MASTER_ID,
            "Sheet1!B:D",
            &[&["Username", "Password", "Tasks"], &["alice", "secret", "url"]],
        );
        let state = AppState::new(stub_config(&spawn_stub(stub).await));

        let before = state.credentials().await;
        assert_eq!(before.len(), 0);

        assert_eq!(state.reload_credentials().await.unwrap(), 1);
        assert!(state.credentials().await.find("alice").is_some());
        // Earlier snapshots are untouched
        assert_eq!(before.len(), 0);
    }

    #[tokio::test]
    async fn test_failed_reload_leaves_empty_snapshot() {
        let state = AppState::new(stub_config(&spawn_stub(StubSheets::default()).await));
        assert!(state.reload_credentials().await.is_err());
        assert_eq!(state.credentials().await.len(), 0);
    }

    async fn unparsed_view() -> SheetsNavigator {
        // No spreadsheet id, so opening makes no request
        let client = GoogleSheetsClient::new(&stub_config("http://127.0.0.1:1").sheets);
        TabNavigator::open(Arc::new(client), "not a sheet url").await
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_views_evicted_on_insert() {
        let views = TaskViews::new(Duration::from_secs(60));
        for i in 0..50 {
            views.insert(format!("view-{}", i), unparsed_view().await, None).await;
        }
        assert_eq!(views.len().await, 50);

        tokio::time::advance(Duration::from_secs(61)).await;
        views.insert("fresh".into(), unparsed_view().await, None).await;

        assert_eq!(views.len().await, 1);
        assert!(views.get("view-0").await.is_none());
        assert!(views.get("fresh").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_used_views_survive_sweep() {
        let views = TaskViews::new(Duration::from_secs(60));
        views.insert("active".into(), unparsed_view().await, None).await;
        views.insert("abandoned".into(), unparsed_view().await, None).await;

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(views.get("active").await.is_some());
        tokio::time::advance(Duration::from_secs(40)).await;

        assert_eq!(views.evict_idle().await, 1);
        assert!(views.get("active").await.is_some());
        assert!(views.get("abandoned").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_view_not_returned() {
        let views = TaskViews::new(Duration::from_secs(60));
        views.insert("old".into(), unparsed_view().await, None).await;

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(views.get("old").await.is_none());
        assert_eq!(views.len().await, 0);
    }

    #[tokio::test]
    async fn test_insert_replaces_previous_view() {
        let views = TaskViews::new(Duration::from_secs(60));
        views.insert("first".into(), unparsed_view().await, None).await;
        views.insert("second".into(), unparsed_view().await, Some("first".into())).await;

        assert_eq!(views.len().await, 1);
        assert!(views.get("first").await.is_none());
    }
}
