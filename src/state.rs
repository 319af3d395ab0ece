use std::sync::Arc;

use crate::dashboard::TrendFeed;
use crate::services::PlannerService;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub trends: Arc<dyn TrendFeed>,
}

impl AppState {
    pub fn planner(&self) -> PlannerService {
        PlannerService::new(self.store.clone(), self.trends.clone())
    }
}
