use crate::models::{ChartKind, ChartSeries, ChartTab};
use crate::screens::DishMetricsScreen;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs};
use ratatui::Frame;

const CARD_BACKGROUND: Color = Color::Rgb(0xF4, 0xF4, 0xF4);
const ACCENT: Color = Color::Rgb(0xFF, 0x72, 0x5E);
const SALES_BAR: Color = Color::Rgb(75, 192, 192);
const PLACEHOLDER: Color = Color::Rgb(0xD9, 0xD9, 0xD9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsAction {
    None,
    Quit,
}

pub fn apply_key(screen: &mut DishMetricsScreen, key: KeyEvent) -> MetricsAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return MetricsAction::Quit,
        KeyCode::Char('1') => screen.handle_tab_change(Some(ChartTab::Sales)),
        KeyCode::Char('2') => screen.handle_tab_change(Some(ChartTab::Peak)),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            let next = screen.selected_tab().other();
            screen.handle_tab_change(Some(next));
        }
        _ => {}
    }
    MetricsAction::None
}

pub fn draw_metrics(frame: &mut Frame<'_>, screen: &DishMetricsScreen) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(frame.area());

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    draw_cards(frame, left[0], screen);
    frame.render_widget(
        Paragraph::new(screen.heading()).style(Style::default().add_modifier(Modifier::BOLD)),
        left[1],
    );

    let selected = match screen.selected_tab() {
        ChartTab::Sales => 0,
        ChartTab::Peak => 1,
    };
    let tabs = Tabs::new(vec![ChartTab::Sales.toggle_label(), ChartTab::Peak.toggle_label()])
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, left[2]);

    draw_chart(frame, left[3], screen.active_chart());
    frame.render_widget(
        Paragraph::new("1/2 select chart  Tab switch  q quit").style(Style::default().fg(Color::DarkGray)),
        left[4],
    );

    draw_asba_panel(frame, columns[1], screen);
}

fn draw_cards(frame: &mut Frame<'_>, area: Rect, screen: &DishMetricsScreen) {
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    for (card, slot) in screen.cards().iter().zip(slots.iter()) {
        let body = vec![
            Line::from(card.value.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(card.caption).style(Style::default().fg(Color::DarkGray)),
        ];
        let widget = Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).style(Style::default().bg(CARD_BACKGROUND).fg(Color::Black)));
        frame.render_widget(widget, *slot);
    }
}

fn draw_chart(frame: &mut Frame<'_>, area: Rect, series: &ChartSeries) {
    let block = Block::default().borders(Borders::ALL).title(series.label);
    match series.kind {
        ChartKind::Bar => {
            let pairs = series
                .labels
                .iter()
                .copied()
                .zip(series.values.iter().copied())
                .collect::<Vec<(&str, u64)>>();
            let chart = BarChart::default()
                .block(block)
                .data(pairs.as_slice())
                .bar_width(5)
                .bar_gap(2)
                .bar_style(Style::default().fg(SALES_BAR))
                .value_style(Style::default().fg(Color::Black).bg(SALES_BAR));
            frame.render_widget(chart, area);
        }
        ChartKind::Line => {
            let points = series
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, *value as f64))
                .collect::<Vec<_>>();
            let x_max = series.values.len().saturating_sub(1).max(1) as f64;
            let y_max = series.max_value().max(1) as f64;
            let dataset = Dataset::default()
                .name(series.label)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(ACCENT))
                .data(&points);
            let y_labels = vec![
                "0".to_string(),
                format!("{}", (y_max / 2.0).round()),
                format!("{}", y_max),
            ];
            let chart = Chart::new(vec![dataset])
                .block(block)
                .x_axis(Axis::default().bounds([0.0, x_max]).labels(series.labels.clone()))
                .y_axis(Axis::default().bounds([0.0, y_max]).labels(y_labels));
            frame.render_widget(chart, area);
        }
    }
}

fn draw_asba_panel(frame: &mut Frame<'_>, area: Rect, screen: &DishMetricsScreen) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .title("ASBA results")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[0]);

    let results = screen.asba_results();
    let positive = Paragraph::new(format!("Positive ({})", results.positive))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().bg(Color::Rgb(0xE0, 0xE0, 0xE0)).fg(Color::Rgb(0x6B, 0x6B, 0x6B)));
    let negative = Paragraph::new(format!("Negative ({})", results.negative))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().bg(ACCENT).fg(Color::White));
    frame.render_widget(positive, buttons[0]);
    frame.render_widget(negative, buttons[1]);

    frame.render_widget(Block::default().style(Style::default().bg(PLACEHOLDER)), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::{apply_key, draw_metrics, MetricsAction};
    use crate::models::ChartTab;
    use crate::screens::DishMetricsScreen;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(screen: &DishMetricsScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).expect("terminal");
        terminal.draw(|frame| draw_metrics(frame, screen)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn renders_cards_and_asba_panel() {
        let text = rendered(&DishMetricsScreen::new());
        assert!(text.contains("Units sold today"));
        assert!(text.contains("237"));
        assert!(text.contains("23%"));
        assert!(text.contains("Sales Report"));
        assert!(text.contains("ASBA results"));
        assert!(text.contains("Positive (12)"));
        assert!(text.contains("Negative (7)"));
    }

    #[test]
    fn peak_tab_renders_line_chart_heading() {
        let text = rendered(&DishMetricsScreen::with_tab(ChartTab::Peak));
        assert!(text.contains("Peak Order Hours"));
        assert!(text.contains("Orders"));
    }

    #[test]
    fn keys_switch_tabs_and_quit() {
        let mut screen = DishMetricsScreen::new();
        apply_key(&mut screen, KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE));
        assert_eq!(screen.selected_tab(), ChartTab::Peak);
        apply_key(&mut screen, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(screen.selected_tab(), ChartTab::Sales);
        assert_eq!(
            apply_key(&mut screen, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            MetricsAction::Quit
        );
    }
}
