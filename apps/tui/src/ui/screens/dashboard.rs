use crate::app::App;
use crate::ui::widgets::charts::{render_chart_message, render_chart_panel, render_chart_tabs};
use crate::ui::widgets::popup::render_popup;
use crate::ui::widgets::sidebar::render_sidebar;
use hotel_demand::config::API_TOKEN_VAR;
use hotel_demand::predicthq::DemandSignals;
use hotel_demand::signals::SignalsOutcome;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SIDEBAR_WIDTH: u16 = 44;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title area
            Constraint::Min(10),   // Sidebar + demand panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(app, f, main_layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(main_layout[1]);

    render_sidebar(app, f, content[0]);
    render_demand_panel(app, f, content[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);

    let full_area = f.area();
    if app.show_help {
        render_popup(
            f,
            full_area,
            "Help & Keyboard Shortcuts",
            Text::from(build_help_lines()),
            "Press ? or Esc to close",
        );
    } else if let Some((name, body)) = app.expanded_example_body() {
        render_popup(
            f,
            full_area,
            name,
            Text::from(body),
            "Press Enter or Esc to collapse",
        );
    }
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Hotel Demand ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = app.sidebar.as_ref().map_or_else(
        || TextLine::from("Loading selection..."),
        |model| {
            TextLine::from(vec![
                Span::styled(
                    model.location.name,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", model.location.address),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {}", model.date_range().format_span()),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        },
    );

    let paragraph = Paragraph::new(line)
        .block(title_block)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_demand_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Headline figures
            Constraint::Length(2), // Tabs
            Constraint::Min(6),    // Chart
        ])
        .split(area);

    match app.signals.as_ref() {
        Some(SignalsOutcome::Loaded(signals)) => {
            render_headline(app, signals, f, split[0]);
            render_chart_tabs(app, f, split[1].inner(Margin::new(1, 0)));
            render_chart_panel(app, signals, f, split[2]);
        }
        Some(SignalsOutcome::Unavailable(message)) => {
            render_chart_message("Demand Signals", message, f, area);
        }
        Some(SignalsOutcome::NoArea) => {
            render_chart_message(
                "Demand Signals",
                "No area selected. Increase the radius to load demand signals.",
                f,
                area,
            );
        }
        Some(SignalsOutcome::Disabled) => {
            render_chart_message(
                "Demand Signals",
                &format!("Set {API_TOKEN_VAR} to load event counts, attendance and demand surges."),
                f,
                area,
            );
        }
        None => render_chart_message("Demand Signals", "Fetching...", f, area),
    }
}

/// Label/value pairs shown above the charts.
pub fn headline_figures(app: &App, signals: &DemandSignals) -> Vec<(&'static str, String)> {
    let radius = app.sidebar.as_ref().map_or_else(
        || "-".to_string(),
        |model| match model.slider.suggested {
            Some(suggested) => format!("{suggested:.2} {}", model.radius_unit.as_str()),
            None => "unavailable".to_string(),
        },
    );

    let peak = signals.peak_day().map_or_else(
        || "-".to_string(),
        |day| format!("{} ({:.0})", day.date.format("%b %d"), day.total),
    );

    vec![
        ("Events", signals.event_count.count.to_string()),
        (
            "Predicted attendance",
            format!("{:.0}", signals.total_attendance()),
        ),
        ("Peak day", peak),
        ("Surge days", signals.surges.len().to_string()),
        ("Suggested radius", radius),
    ]
}

fn render_headline(app: &App, signals: &DemandSignals, f: &mut Frame<'_>, area: Rect) {
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines: Vec<TextLine<'_>> = headline_figures(app, signals)
        .into_iter()
        .map(|(label, value)| {
            TextLine::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Demand Signals ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Span::styled(app.status_message.as_str(), style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn shortcuts_line() -> TextLine<'static> {
    let gray = Style::default().fg(Color::Gray);
    TextLine::from(vec![
        key_span("?"),
        Span::styled(": Help | ", gray),
        key_span("Tab"),
        Span::styled(": Focus | ", gray),
        key_span("↑/↓"),
        Span::styled(": Select | ", gray),
        key_span("←/→"),
        Span::styled(": Radius | ", gray),
        key_span("r"),
        Span::styled(": Reset | ", gray),
        key_span("t"),
        Span::styled(": Chart | ", gray),
        key_span("q"),
        Span::styled(": Quit", gray),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let shortcuts = [
        ("  Tab / Shift-Tab", "Move focus: Hotel, Date Range, Radius, Code examples"),
        ("  Up / Down", "Change the focused selection or move the cursor"),
        ("  Left / Right", "Adjust the radius by 0.1"),
        ("  r", "Reset the radius to the suggested value"),
        ("  Enter", "Expand or collapse the highlighted code example"),
        ("  t", "Switch between attendance and category charts"),
        ("  ? / F1", "Toggle this help popup"),
        ("  Esc", "Close popups"),
        ("  q", "Quit"),
    ];

    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Hotel Demand",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Pick a hotel and a date range to see the events predicted to drive demand around it.",
        ),
        TextLine::from(
            "The radius defaults to PredictHQ's suggestion for the hotel and can be adjusted by hand.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    lines.extend(shortcuts.into_iter().map(|(key, description)| {
        TextLine::from(vec![
            key_span(key),
            Span::raw(format!(" - {description}")),
        ])
    }));

    lines
}
