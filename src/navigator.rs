//! Tabbed view over a user's tasks workbook.
//!
//! Every tab click issues a new request token. A fetch only updates the view
//! if its token is still the latest one when it completes, so the list on
//! screen always belongs to the most recently clicked tab even when responses
//! arrive out of order. In-flight fetches are never cancelled.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing;

use crate::models::SheetTab;
use crate::services::{load_sheet_names, load_task_column, load_tasks_for_url};
use crate::sheets::{extract_spreadsheet_id, SheetsApi, DEFAULT_TAB};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskView {
    pub tabs: Vec<SheetTab>,
    /// Newline separated tasks of the active tab.
    pub tasks: String,
}

#[derive(Debug, PartialEq)]
pub enum TabSelection {
    Applied(TaskView),
    /// A later selection was issued while this one was loading.
    Superseded,
    UnknownTab,
}

pub struct TabNavigator<A> {
    api: Arc<A>,
    spreadsheet_id: Option<String>,
    latest: AtomicU64,
    view: Mutex<TaskView>,
}

impl<A: SheetsApi> TabNavigator<A> {
    /// Build the tab bar for `tasks_sheet_url` and load the first tab.
    pub async fn open(api: Arc<A>, tasks_sheet_url: &str) -> Self {
        let Some(spreadsheet_id) = extract_spreadsheet_id(tasks_sheet_url).map(str::to_string) else {
            // Single unnamed sheet, no tabs shown
            let tasks = load_tasks_for_url(&*api, tasks_sheet_url, DEFAULT_TAB).await;
            return Self::with_view(api, None, TaskView { tabs: Vec::new(), tasks });
        };

        let mut names = match load_sheet_names(&*api, &spreadsheet_id).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("{}, falling back to {}", e, DEFAULT_TAB);
                Vec::new()
            }
        };
        if names.is_empty() {
            names.push(DEFAULT_TAB.to_string());
        }

        let tasks = load_task_column(&*api, &spreadsheet_id, &names[0]).await;
        let tabs = SheetTab::from_names(names);
        tracing::debug!("Opened {} with {} tabs", spreadsheet_id, tabs.len());

        Self::with_view(api, Some(spreadsheet_id), TaskView { tabs, tasks })
    }

    fn with_view(api: Arc<A>, spreadsheet_id: Option<String>, view: TaskView) -> Self {
        Self {
            api,
            spreadsheet_id,
            latest: AtomicU64::new(0),
            view: Mutex::new(view),
        }
    }

    pub async fn snapshot(&self) -> TaskView {
        self.view.lock().await.clone()
    }

    /// Make `name` the active tab and load its tasks.
    pub async fn select_tab(&self, name: &str) -> TabSelection {
        let Some(spreadsheet_id) = self.spreadsheet_id.as_deref() else {
            return TabSelection::UnknownTab;
        };

        let token = {
            let mut view = self.view.lock().await;
            if !view.tabs.iter().any(|tab| tab.name == name) {
                return TabSelection::UnknownTab;
            }
            for tab in view.tabs.iter_mut() {
                tab.is_active = tab.name == name;
            }
            self.latest.fetch_add(1, Ordering::SeqCst) + 1
        };

        let tasks = load_task_column(&*self.api, spreadsheet_id, name).await;

        let mut view = self.view.lock().await;
        if self.latest.load(Ordering::SeqCst) != token {
            tracing::debug!("Discarding tasks of tab {} from request {}", name, token);
            return TabSelection::Superseded;
        }
        view.tasks = tasks;
        TabSelection::Applied(view.clone())
    }
}
