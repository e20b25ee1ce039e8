use crate::services::Navigator;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{Arc, Mutex};

pub const RULES_ROUTE: &str = "/rules";
pub const DISH_METRICS_ROUTE: &str = "/dishes/metrics";

static RULE_DETAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/rules/([^/?#]+)/?$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    RuleList,
    RuleDetail(String),
    DishMetrics,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        if trimmed == RULES_ROUTE || trimmed == "/rules/" {
            return Self::RuleList;
        }
        if trimmed == DISH_METRICS_ROUTE {
            return Self::DishMetrics;
        }
        if let Some(caps) = RULE_DETAIL_PATTERN.captures(trimmed) {
            if let Some(id) = caps.get(1) {
                return Self::RuleDetail(id.as_str().to_string());
            }
        }
        Self::NotFound(trimmed.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Self::RuleList => RULES_ROUTE.to_string(),
            Self::RuleDetail(id) => format!("{}/{}", RULES_ROUTE, id),
            Self::DishMetrics => DISH_METRICS_ROUTE.to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// In-process router. Clones share history.
#[derive(Debug, Clone)]
pub struct Router {
    history: Arc<Mutex<Vec<Route>>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            history: Arc::new(Mutex::new(vec![initial])),
        }
    }

    pub fn current(&self) -> Route {
        self.lock()
            .last()
            .cloned()
            .unwrap_or(Route::RuleList)
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        let route = Route::parse(path);
        tracing::info!(route = %route.path(), "navigating");
        self.lock().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, Router};
    use crate::services::Navigator;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/rules"), Route::RuleList);
        assert_eq!(Route::parse("/rules/42"), Route::RuleDetail("42".to_string()));
        assert_eq!(Route::parse("/rules/abc-1/"), Route::RuleDetail("abc-1".to_string()));
        assert_eq!(Route::parse("/dishes/metrics"), Route::DishMetrics);
        assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".to_string()));
    }

    #[test]
    fn navigation_appends_history() {
        let router = Router::new(Route::RuleDetail("7".to_string()));
        router.navigate("/rules");
        assert_eq!(router.current(), Route::RuleList);
        assert_eq!(router.history().len(), 2);
        assert_eq!(Route::RuleDetail("7".to_string()).path(), "/rules/7");
    }
}
