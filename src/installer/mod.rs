// App-install requests against a fixed catalog

use chrono::Utc;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

use crate::config::IdStrategy;
use crate::model::{Agent, AppRequest, AppRequestStatus, CatalogApp};
use crate::state::{IdGenerator, REQUEST_PREFIX};

pub struct AppInstaller {
    catalog: Vec<CatalogApp>,
    /// Newest-first
    requests: RwLock<Vec<AppRequest>>,
    ids: IdGenerator,
}

impl AppInstaller {
    pub fn new(catalog: Vec<CatalogApp>, requests: Vec<AppRequest>, strategy: IdStrategy) -> Self {
        Self {
            catalog,
            requests: RwLock::new(requests),
            ids: IdGenerator::new(strategy),
        }
    }

    pub fn catalog(&self) -> &[CatalogApp] {
        &self.catalog
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for app in &self.catalog {
            if !categories.contains(&app.category) {
                categories.push(app.category.clone());
            }
        }
        categories
    }

    /// Case-insensitive name match, optionally restricted to one category
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<CatalogApp> {
        let query = query.to_lowercase();
        self.catalog
            .iter()
            .filter(|app| app.name.to_lowercase().contains(&query))
            .filter(|app| category.map_or(true, |c| app.category == c))
            .cloned()
            .collect()
    }

    /// File a pending request on behalf of `requester`.
    ///
    /// Without a requester, username and hostname are recorded as "Unknown".
    pub fn request(&self, app_name: &str, requester: Option<&Agent>) -> AppRequest {
        let (username, hostname) = match requester {
            Some(agent) => (agent.username.clone(), agent.hostname.clone()),
            None => ("Unknown".to_string(), "Unknown".to_string()),
        };

        let request = AppRequest {
            id: self.ids.next(REQUEST_PREFIX),
            app_name: app_name.to_string(),
            username,
            hostname,
            status: AppRequestStatus::Pending,
            requested_at: Utc::now(),
        };

        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, request.clone());

        info!(
            request_id = %request.id,
            app = %request.app_name,
            username = %request.username,
            "Install request submitted"
        );
        request
    }

    pub fn requests(&self) -> Vec<AppRequest> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests filed from `agent`'s user or device
    pub fn requests_for(&self, agent: &Agent) -> Vec<AppRequest> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.username == agent.username || r.hostname == agent.hostname)
            .cloned()
            .collect()
    }

    /// Approve or reject a request. Returns false for unknown ids.
    pub fn set_status(&self, request_id: &str, status: AppRequestStatus) -> bool {
        let mut requests = self
            .requests
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match requests.iter_mut().find(|r| r.id == request_id) {
            Some(request) => {
                request.status = status;
                info!(request_id = %request_id, status = ?status, "Install request updated");
                true
            }
            None => {
                debug!(request_id = %request_id, "Status update for unknown request ignored");
                false
            }
        }
    }
}
