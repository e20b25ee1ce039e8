pub mod metrics_view;
pub mod rule_view;

use crate::errors::AppResult;
use crate::screens::{DishMetricsScreen, RuleDetailsScreen};
use crate::services::ToastQueue;
use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use metrics_view::MetricsAction;
use ratatui::DefaultTerminal;
use rule_view::{EditorAction, EditorFocus};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_metrics(mut screen: DishMetricsScreen) -> AppResult<()> {
    let mut terminal = ratatui::try_init()?;
    let result = metrics_loop(&mut terminal, &mut screen);
    ratatui::try_restore()?;
    result
}

fn metrics_loop(terminal: &mut DefaultTerminal, screen: &mut DishMetricsScreen) -> AppResult<()> {
    loop {
        terminal.draw(|frame| metrics_view::draw_metrics(frame, &*screen))?;
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if metrics_view::apply_key(screen, key) == MetricsAction::Quit {
            return Ok(());
        }
    }
}

/// Runs the editor until the operator quits or the rule is deleted.
pub async fn run_rule_editor(screen: &mut RuleDetailsScreen, toasts: &ToastQueue) -> AppResult<()> {
    let mut terminal = ratatui::try_init()?;
    let result = rule_editor_loop(&mut terminal, screen, toasts).await;
    ratatui::try_restore()?;
    result
}

async fn rule_editor_loop(
    terminal: &mut DefaultTerminal,
    screen: &mut RuleDetailsScreen,
    toasts: &ToastQueue,
) -> AppResult<()> {
    let mut focus = EditorFocus::default();
    let mut last_error = None::<String>;

    terminal.draw(|frame| rule_view::draw_rule_editor(frame, &*screen, focus, &[], None))?;
    if let Err(error) = screen.load().await {
        last_error = Some(format!("Failed to load rule: {}", error));
    }

    loop {
        let now = Utc::now();
        toasts.prune(now);
        let active = toasts.active(now);
        terminal.draw(|frame| {
            rule_view::draw_rule_editor(frame, &*screen, focus, &active, last_error.as_deref())
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match rule_view::apply_key(screen, &mut focus, key) {
            EditorAction::None => {}
            EditorAction::Quit => return Ok(()),
            EditorAction::Update => {
                last_error = screen.handle_update().await.err().map(|error| error.to_string());
            }
            EditorAction::Delete => match screen.handle_delete().await {
                Ok(true) => return Ok(()),
                Ok(false) => last_error = None,
                Err(error) => last_error = Some(error.to_string()),
            },
        }
    }
}
