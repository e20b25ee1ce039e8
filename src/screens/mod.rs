pub mod dish_metrics;
pub mod rule_details;

pub use dish_metrics::DishMetricsScreen;
pub use rule_details::{RuleDetailsScreen, ScreenPhase, ScreenStatus};
