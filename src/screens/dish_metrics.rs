//! Dish metrics dashboard: three metric cards, a sales/peak-hours chart
//! toggle, and the ASBA results panel. Every number here is a placeholder
//! constant; nothing is fetched.

use crate::models::{AsbaResults, ChartKind, ChartSeries, ChartTab, MetricSnapshot};
use once_cell::sync::Lazy;

static SALES_DATA: Lazy<ChartSeries> = Lazy::new(|| ChartSeries {
    label: "Sales (Units)",
    kind: ChartKind::Bar,
    labels: vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    values: vec![12, 19, 3, 5, 2, 3],
});

static PEAK_HOURS_DATA: Lazy<ChartSeries> = Lazy::new(|| ChartSeries {
    label: "Orders",
    kind: ChartKind::Line,
    labels: vec!["12 AM", "6 AM", "12 PM", "6 PM", "9 PM"],
    values: vec![10, 25, 50, 75, 40],
});

pub const ASBA_RESULTS: AsbaResults = AsbaResults {
    positive: 12,
    negative: 7,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub value: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct DishMetricsScreen {
    selected_tab: ChartTab,
    card_details: MetricSnapshot,
}

impl DishMetricsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(tab: ChartTab) -> Self {
        Self {
            selected_tab: tab,
            ..Self::default()
        }
    }

    /// `None` is what a toggle group reports when the active button is clicked
    /// again; the current tab stays selected.
    pub fn handle_tab_change(&mut self, new_tab: Option<ChartTab>) {
        if let Some(tab) = new_tab {
            if tab != self.selected_tab {
                tracing::debug!(tab = tab.toggle_label(), "chart tab changed");
            }
            self.selected_tab = tab;
        }
    }

    pub fn selected_tab(&self) -> ChartTab {
        self.selected_tab
    }

    pub fn heading(&self) -> &'static str {
        self.selected_tab.heading()
    }

    pub fn cards(&self) -> [MetricCard; 3] {
        [
            MetricCard {
                value: self.card_details.units_sold_today.to_string(),
                caption: "Units sold today",
            },
            MetricCard {
                value: self.card_details.units_sold_this_quarter.to_string(),
                caption: "Units sold this quarter",
            },
            MetricCard {
                value: format!("{}%", self.card_details.revenue_accounted_for),
                caption: "Revenue accounted for",
            },
        ]
    }

    pub fn active_chart(&self) -> &'static ChartSeries {
        match self.selected_tab {
            ChartTab::Sales => &SALES_DATA,
            ChartTab::Peak => &PEAK_HOURS_DATA,
        }
    }

    pub fn asba_results(&self) -> AsbaResults {
        ASBA_RESULTS
    }
}

#[cfg(test)]
mod tests {
    use super::DishMetricsScreen;
    use crate::models::{ChartKind, ChartTab};

    #[test]
    fn deselect_keeps_current_tab() {
        let mut screen = DishMetricsScreen::new();
        screen.handle_tab_change(Some(ChartTab::Peak));
        screen.handle_tab_change(None);
        assert_eq!(screen.selected_tab(), ChartTab::Peak);
        assert_eq!(screen.active_chart().kind, ChartKind::Line);
    }

    #[test]
    fn defaults_to_sales_bar_chart() {
        let screen = DishMetricsScreen::new();
        assert_eq!(screen.heading(), "Sales Report");
        let chart = screen.active_chart();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.values, vec![12, 19, 3, 5, 2, 3]);
        assert_eq!(chart.max_value(), 19);
    }

    #[test]
    fn revenue_card_is_a_percentage() {
        let cards = DishMetricsScreen::new().cards();
        assert_eq!(cards[0].value, "55");
        assert_eq!(cards[1].value, "237");
        assert_eq!(cards[2].value, "23%");
        assert_eq!(cards[2].caption, "Revenue accounted for");
    }
}
