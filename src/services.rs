use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Toasts shown to the operator. Clones share the same queue.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::seconds(5))
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    pub fn push(&self, level: ToastLevel, message: &str) -> Toast {
        self.push_at(level, message, Utc::now())
    }

    pub fn push_at(&self, level: ToastLevel, message: &str, now: DateTime<Utc>) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.to_string(),
            created_at: now,
        };
        match level {
            ToastLevel::Success => tracing::info!(toast_id = %toast.id, text = message, "toast"),
            ToastLevel::Error => tracing::warn!(toast_id = %toast.id, text = message, "toast"),
        }
        self.lock().push(toast.clone());
        toast
    }

    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        self.lock()
            .iter()
            .filter(|toast| now - toast.created_at < self.ttl)
            .cloned()
            .collect()
    }

    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|toast| now - toast.created_at < self.ttl);
        before - toasts.len()
    }

    /// Every toast pushed and not yet pruned, oldest first.
    pub fn all(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastLevel::Error, message);
    }
}
