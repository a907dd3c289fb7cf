//! TUI rendering with ratatui
//!
//! Layout and widgets for the guessing game.

use super::app::{App, EffectKind, InputMode, MessageStyle};
use crate::core::{Category, Difficulty, Feedback};
use crate::output::formatters::{attempts_label, best_label, history_line};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    // Main content area - split horizontally
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Left panel
            Constraint::Percentage(40), // Right panel
        ])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);

    if app.show_stats {
        render_stats_popup(f, app);
    }
}

const fn level_color(level: Difficulty) -> Color {
    match level {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
        Difficulty::Expert => Color::Magenta,
    }
}

const fn category_color(category: Category) -> Color {
    match category {
        Category::Hot => Color::LightRed,
        Category::Warm => Color::Yellow,
        Category::Cold => Color::LightBlue,
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let level = app.session.difficulty();
    let color = level_color(level);
    let title = format!(
        "{}  GUESS THE NUMBER  •  {} {}-{}",
        level.icon(),
        level.name(),
        level.min_value(),
        level.max_value()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Feedback / win banner
            Constraint::Percentage(40), // History
        ])
        .split(area);

    if app.input_mode == InputMode::WinCelebration {
        render_win_banner(f, app, chunks[0]);
    } else {
        render_feedback(f, app, chunks[0]);
    }
    render_history(f, app, chunks[1]);
}

fn effect_line(kind: Option<EffectKind>) -> Line<'static> {
    match kind {
        Some(EffectKind::Fireworks) => Line::from(Span::styled(
            "✨ 🎆 ✨ 🎇 ✨ 🎆 ✨",
            Style::default().fg(Color::LightMagenta),
        )),
        Some(EffectKind::Heat) => Line::from(Span::styled(
            "🔥 ~ ~ 🔥 ~ ~ 🔥",
            Style::default().fg(Color::LightRed),
        )),
        Some(EffectKind::Frost) => Line::from(Span::styled(
            "❄  ·  ❄  ·  ❄",
            Style::default().fg(Color::LightCyan),
        )),
        None => Line::from(""),
    }
}

fn render_feedback(f: &mut Frame, app: &App, area: Rect) {
    let effect = app.effect.map(|e| e.kind);

    let (content, border_color) = match app.session.feedback() {
        Some(feedback) => {
            let color = category_color(feedback.category());
            let mut lines = vec![
                effect_line(effect),
                Line::from(""),
                Line::from(vec![
                    Span::raw(format!("{}  ", feedback.icon())),
                    Span::styled(
                        feedback.message(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ];
            if let Feedback::Hint {
                temperature,
                direction,
            } = feedback
            {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::raw("Temperature: "),
                    Span::styled(temperature.label(), Style::default().fg(color)),
                    Span::raw(format!("   Go {}", direction.arrow())),
                ]));
            }
            (lines, color)
        }
        None => (
            vec![
                effect_line(effect),
                Line::from(""),
                Line::from("Type a number and press Enter."),
            ],
            Color::White,
        ),
    };

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Feedback ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_win_banner(f: &mut Frame, app: &App, area: Rect) {
    let attempts = app.session.attempts();
    let content = vec![
        effect_line(app.effect.map(|e| e.kind)),
        Line::from(""),
        Line::from(Span::styled(
            "🎉 BRAVO! 🎉",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("You found "),
            Span::styled(
                app.session.target().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" in "),
            Span::styled(
                attempts_label(attempts),
                Style::default()
                    .fg(level_color(app.session.difficulty()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("!"),
        ]),
    ];

    let paragraph = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Winner ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let target = app.session.target();
    let won = app.session.is_won();
    let history = app.session.history();

    let history_items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .rev()
        .take(8)
        .map(|(i, &guess)| {
            // The target is only revealed once the game is over
            let marker = if won && guess == target {
                "🎯"
            } else if guess < target {
                "↑"
            } else {
                "↓"
            };
            ListItem::new(format!("{:>2}: {guess:>4} {marker}", i + 1))
        })
        .collect();

    let history =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Levels
            Constraint::Length(3), // Narrowing gauge
            Constraint::Min(4),    // Messages
        ])
        .split(area);

    render_levels(f, app, chunks[0]);
    render_range_gauge(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_levels(f: &mut Frame, app: &App, area: Rect) {
    let current = app.session.difficulty();
    let items: Vec<ListItem> = Difficulty::ALL
        .iter()
        .map(|&level| {
            let marker = if level == current { "▶" } else { " " };
            let text = format!(
                "{marker} {} {:<7} {:>3}-{:<4} best {}",
                level.icon(),
                level.name(),
                level.min_value(),
                level.max_value(),
                best_label(app.store.best(level))
            );
            let style = if level == current {
                Style::default()
                    .fg(level_color(level))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Levels (Tab) ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

/// Interval still consistent with the directional hints so far
fn remaining_interval(app: &App) -> (i32, i32) {
    let level = app.session.difficulty();
    let target = app.session.target();
    app.session
        .history()
        .iter()
        .fold((level.min_value(), level.max_value()), |(low, high), &guess| {
            if guess < target {
                (low.max(guess + 1), high)
            } else if guess > target {
                (low, high.min(guess - 1))
            } else {
                (guess, guess)
            }
        })
}

fn render_range_gauge(f: &mut Frame, app: &App, area: Rect) {
    let level = app.session.difficulty();
    let (low, high) = remaining_interval(app);
    let total = f64::from(level.max_value() - level.min_value() + 1);
    let remaining = f64::from(high - low + 1);
    let narrowed = ((1.0 - remaining / total) * 100.0).clamp(0.0, 100.0) as u16;

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Narrowed ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(level_color(level)))
        .percent(narrowed)
        .label(format!("{low}-{high}"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let level = app.session.difficulty();
    let (title, content, color) = match app.input_mode {
        InputMode::WinCelebration => (
            " 🎉 Press 'n' for a new game, Tab to change level or 'q' to quit ".to_string(),
            "",
            Color::Green,
        ),
        InputMode::Guessing => (
            format!(
                " Your guess ({}-{}) | Enter to submit ",
                level.min_value(),
                level.max_value()
            ),
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let level = app.session.difficulty();
    let stats_text = format!(
        "Attempts: {} | Best: {}",
        app.session.attempts(),
        best_label(app.store.best(level))
    );
    f.render_widget(
        Paragraph::new(stats_text).alignment(Alignment::Center),
        chunks[0],
    );

    let help = Paragraph::new("q: Quit | n: New | Tab/Shift-Tab: Level | s: Stats")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

fn render_stats_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, f.area());
    let level = app.session.difficulty();
    let history = app.session.history();

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Level:     "),
            Span::styled(
                format!("{} {}", level.icon(), level.name()),
                Style::default().fg(level_color(level)),
            ),
        ]),
        Line::from(format!("Attempts:  {}", app.session.attempts())),
        Line::from(vec![
            Span::raw("Best:      "),
            Span::styled(
                best_label(app.store.best(level)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if !history.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("📝 History"));
        lines.push(Line::from(history_line(history)));
    }

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" 📊 Statistics (s/Esc to close) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Rectangle of `percent_x` × `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;
    use crate::storage::BestScoreStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with_target(target: i32) -> App {
        let session = GameSession::with_target(Difficulty::Easy, target).unwrap();
        App::with_session(session, BestScoreStore::in_memory())
    }

    fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn remaining_interval_follows_hints() {
        let mut app = app_with_target(25);
        assert_eq!(remaining_interval(&app), (1, 50));

        app.session.submit_guess("10").unwrap();
        app.session.submit_guess("40").unwrap();
        assert_eq!(remaining_interval(&app), (11, 39));
    }

    #[test]
    fn renders_header_and_feedback() {
        let mut app = app_with_target(25);
        app.session.submit_guess("10").unwrap();

        let screen = render_to_string(&app);
        assert!(screen.contains("GUESS THE NUMBER"));
        assert!(screen.contains("Cold! Much higher"));
    }

    #[test]
    fn renders_stats_popup() {
        let mut app = app_with_target(25);
        app.session.submit_guess("10").unwrap();
        app.show_stats = true;

        let screen = render_to_string(&app);
        assert!(screen.contains("Statistics"));
        assert!(screen.contains("Attempts:"));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
    }
}
