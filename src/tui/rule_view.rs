use crate::screens::{RuleDetailsScreen, ScreenStatus};
use crate::services::{Toast, ToastLevel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const FIELD_BORDER: Color = Color::Rgb(0xC4, 0xC4, 0xC4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    #[default]
    RuleName,
    Definition,
}

impl EditorFocus {
    fn next(self) -> Self {
        match self {
            Self::RuleName => Self::Definition,
            Self::Definition => Self::RuleName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Update,
    Delete,
    Quit,
}

/// Applies one key press to the editor. Requests are returned, not sent.
pub fn apply_key(screen: &mut RuleDetailsScreen, focus: &mut EditorFocus, key: KeyEvent) -> EditorAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => EditorAction::Update,
            KeyCode::Char('d') => EditorAction::Delete,
            KeyCode::Char('c') => EditorAction::Quit,
            _ => EditorAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => return EditorAction::Quit,
        KeyCode::Tab | KeyCode::BackTab => *focus = focus.next(),
        KeyCode::Char(ch) => edit_focused(screen, *focus, |text| text.push(ch)),
        KeyCode::Enter if *focus == EditorFocus::Definition => {
            edit_focused(screen, *focus, |text| text.push('\n'))
        }
        KeyCode::Backspace => edit_focused(screen, *focus, |text| {
            text.pop();
        }),
        _ => {}
    }
    EditorAction::None
}

fn edit_focused(screen: &mut RuleDetailsScreen, focus: EditorFocus, edit: impl FnOnce(&mut String)) {
    match focus {
        EditorFocus::RuleName => {
            let mut value = screen.rule().rule_name.clone();
            edit(&mut value);
            screen.handle_rule_name_change(value);
        }
        EditorFocus::Definition => {
            let mut value = screen.rule().rule.clone();
            edit(&mut value);
            screen.handle_editor_change(value);
        }
    }
}

pub fn draw_rule_editor(
    frame: &mut Frame<'_>,
    screen: &RuleDetailsScreen,
    focus: EditorFocus,
    toasts: &[Toast],
    last_error: Option<&str>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(toasts.len().min(3) as u16),
        ])
        .split(frame.area());

    let title = match screen.status() {
        ScreenStatus::Loading => format!("{} (loading)", screen.title()),
        ScreenStatus::Submitting => format!("{} (saving)", screen.title()),
        _ => screen.title(),
    };
    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let rule = screen.rule();
    frame.render_widget(
        Paragraph::new(rule.rule_name.as_str()).block(field_block("Rule Name", focus == EditorFocus::RuleName)),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(rule.fact_name.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .block(field_block("Fact", false)),
        rows[2],
    );

    let numbered = rule
        .rule
        .split('\n')
        .enumerate()
        .map(|(index, text)| {
            Line::from(vec![
                Span::styled(format!("{:>3} ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(text.to_string()),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(numbered)
            .wrap(Wrap { trim: false })
            .block(field_block("Rule Definition", focus == EditorFocus::Definition)),
        rows[3],
    );

    let footer = match last_error {
        Some(error) => Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            "Ctrl-S Update  Ctrl-D Delete  Tab switch field  Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(footer), rows[4]);
    draw_toasts(frame, rows[5], toasts);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Yellow } else { FIELD_BORDER };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

fn draw_toasts(frame: &mut Frame<'_>, area: Rect, toasts: &[Toast]) {
    let lines = toasts
        .iter()
        .rev()
        .take(area.height as usize)
        .map(|toast| {
            let color = match toast.level {
                ToastLevel::Success => Color::Green,
                ToastLevel::Error => Color::Red,
            };
            Line::from(Span::styled(toast.message.clone(), Style::default().fg(color)))
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), area);
}
