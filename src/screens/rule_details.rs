use crate::api::{delete_rules_request, get_rule_request, update_rules_request, RequestSender};
use crate::errors::{AppError, AppResult};
use crate::models::Rule;
use crate::router::RULES_ROUTE;
use crate::services::{Navigator, Notifier};
use std::sync::Arc;

pub const UPDATE_SUCCESS_MESSAGE: &str = "Rule updated successfully";
pub const DELETE_SUCCESS_MESSAGE: &str = "Rule deleted successfully";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete rule";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenStatus {
    Idle,
    Loading,
    Ready,
    Submitting,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Loading,
    Loaded,
    Editing,
    Deleted,
}

/// Detail view of one rule. The route id keys both the fetch and the delete.
pub struct RuleDetailsScreen {
    route_id: String,
    rule: Rule,
    status: ScreenStatus,
    edited: bool,
    deleted: bool,
    api: Arc<dyn RequestSender>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl RuleDetailsScreen {
    pub fn new(
        route_id: impl Into<String>,
        api: Arc<dyn RequestSender>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            rule: Rule::default(),
            status: ScreenStatus::Idle,
            edited: false,
            deleted: false,
            api,
            navigator,
            notifier,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn title(&self) -> String {
        format!("Rule #{}", self.route_id)
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn status(&self) -> ScreenStatus {
        self.status
    }

    pub fn phase(&self) -> ScreenPhase {
        if self.deleted {
            ScreenPhase::Deleted
        } else if matches!(self.status, ScreenStatus::Idle | ScreenStatus::Loading) {
            ScreenPhase::Loading
        } else if self.edited {
            ScreenPhase::Editing
        } else {
            ScreenPhase::Loaded
        }
    }

    /// Screen entry: loads the rule named by the route.
    pub async fn load(&mut self) -> AppResult<()> {
        let id = self.route_id.clone();
        self.fetch_rule_by_id(&id).await
    }

    pub async fn fetch_rule_by_id(&mut self, id: &str) -> AppResult<()> {
        let request = get_rule_request(id)?;
        self.status = ScreenStatus::Loading;
        let response = match self.api.send_request(request).await {
            Ok(response) => response,
            Err(error) => {
                self.status = ScreenStatus::Error;
                tracing::warn!(rule_id = id, error = %error, "rule fetch failed");
                return Err(error);
            }
        };
        if !response.is_ok() {
            tracing::debug!(rule_id = id, status = response.status, "rule fetch returned non-200 status");
        }

        self.rule = Rule::from_first_record(&response.data);
        self.edited = false;
        self.status = ScreenStatus::Ready;
        tracing::info!(rule_id = id, "rule loaded");
        Ok(())
    }

    pub fn handle_editor_change(&mut self, value: impl Into<String>) {
        self.rule.rule = value.into();
        self.edited = true;
    }

    pub fn handle_rule_name_change(&mut self, value: impl Into<String>) {
        self.rule.rule_name = value.into();
        self.edited = true;
    }

    /// Submits the current name and body. The response status is not inspected.
    pub async fn handle_update(&mut self) -> AppResult<()> {
        self.ensure_not_deleted()?;
        let request = update_rules_request(&[self.rule.to_update()])?;
        self.status = ScreenStatus::Submitting;
        let response = match self.api.send_request(request).await {
            Ok(response) => response,
            Err(error) => {
                self.status = ScreenStatus::Error;
                tracing::warn!(rule_id = %self.rule.id, error = %error, "rule update failed");
                return Err(error);
            }
        };
        if !response.is_ok() {
            tracing::warn!(rule_id = %self.rule.id, status = response.status, "rule update returned non-200 status");
        }

        self.notifier.success(UPDATE_SUCCESS_MESSAGE);
        self.edited = false;
        self.status = ScreenStatus::Ready;
        Ok(())
    }

    /// Returns `true` when the rule was deleted and the screen navigated away.
    pub async fn handle_delete(&mut self) -> AppResult<bool> {
        self.ensure_not_deleted()?;
        let request = delete_rules_request(&self.route_id)?;
        self.status = ScreenStatus::Submitting;
        let response = match self.api.send_request(request).await {
            Ok(response) => response,
            Err(error) => {
                self.status = ScreenStatus::Error;
                tracing::warn!(rule_id = %self.route_id, error = %error, "rule delete failed");
                return Err(error);
            }
        };

        if response.is_ok() {
            tracing::info!(rule_id = %self.route_id, "rule deleted");
            self.notifier.success(DELETE_SUCCESS_MESSAGE);
            self.deleted = true;
            self.status = ScreenStatus::Idle;
            self.navigator.navigate(RULES_ROUTE);
            Ok(true)
        } else {
            tracing::warn!(rule_id = %self.route_id, status = response.status, "rule delete rejected");
            self.notifier.error(DELETE_FAILURE_MESSAGE);
            self.status = ScreenStatus::Ready;
            Ok(false)
        }
    }

    fn ensure_not_deleted(&self) -> AppResult<()> {
        if self.deleted {
            return Err(AppError::NotFound(format!("rule {} was deleted", self.route_id)));
        }
        Ok(())
    }
}
