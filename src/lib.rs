pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod router;
pub mod screens;
pub mod services;
pub mod telemetry;
pub mod tui;

use crate::api::{HttpClient, RequestSender};
use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use crate::models::{ChartTab, Rule};
use crate::router::{Route, Router};
use crate::screens::{DishMetricsScreen, RuleDetailsScreen};
use crate::services::{Navigator, ToastQueue};
use std::sync::Arc;

/// Shared collaborators handed to every screen.
#[derive(Clone)]
pub struct ConsoleContext {
    pub api: Arc<dyn RequestSender>,
    pub router: Router,
    pub toasts: ToastQueue,
}

impl ConsoleContext {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let api = HttpClient::new(settings)?;
        Ok(Self::with_sender(Arc::new(api), settings))
    }

    pub fn with_sender(api: Arc<dyn RequestSender>, settings: &Settings) -> Self {
        Self {
            api,
            router: Router::new(Route::RuleList),
            toasts: ToastQueue::new(settings.toast_ttl()),
        }
    }

    /// Opens the detail screen for `id`, moving the router there first.
    pub fn rule_details(&self, id: &str) -> AppResult<RuleDetailsScreen> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::NotFound("rule id is empty".to_string()));
        }
        let route = Route::RuleDetail(id.to_string());
        self.router.navigate(&route.path());
        Ok(RuleDetailsScreen::new(
            id,
            self.api.clone(),
            Arc::new(self.router.clone()),
            Arc::new(self.toasts.clone()),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleEdits {
    pub rule_name: Option<String>,
    pub rule: Option<String>,
}

pub async fn show_rule(context: &ConsoleContext, id: &str) -> AppResult<Rule> {
    let mut screen = context.rule_details(id)?;
    screen.load().await?;
    Ok(screen.rule().clone())
}

pub async fn update_rule(context: &ConsoleContext, id: &str, edits: RuleEdits) -> AppResult<Rule> {
    let mut screen = context.rule_details(id)?;
    screen.load().await?;
    if let Some(name) = edits.rule_name {
        screen.handle_rule_name_change(name);
    }
    if let Some(body) = edits.rule {
        screen.handle_editor_change(body);
    }
    screen.handle_update().await?;
    Ok(screen.rule().clone())
}

/// Returns `true` when the backend accepted the delete.
pub async fn delete_rule(context: &ConsoleContext, id: &str) -> AppResult<bool> {
    let mut screen = context.rule_details(id)?;
    screen.handle_delete().await
}

pub async fn edit_rule(context: &ConsoleContext, id: &str) -> AppResult<()> {
    let mut screen = context.rule_details(id)?;
    tui::run_rule_editor(&mut screen, &context.toasts).await
}

pub fn show_metrics(context: &ConsoleContext, tab: ChartTab) -> AppResult<()> {
    context.router.navigate(&Route::DishMetrics.path());
    tui::run_metrics(DishMetricsScreen::with_tab(tab))
}
