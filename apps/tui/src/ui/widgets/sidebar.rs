use crate::app::{App, SidebarControl};
use hotel_demand::catalog::LOCATIONS;
use hotel_demand::docs::{CODE_EXAMPLES, SOURCE_CAPTION};
use hotel_demand::sidebar::SidebarModel;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(model) = app.sidebar.as_ref() else {
        let placeholder = Paragraph::new("Loading...")
            .block(control_block("Hotel", false, true));
        f.render_widget(placeholder, area);
        return;
    };

    let hotel_list_height = u16::try_from(LOCATIONS.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hotel_list_height),
            Constraint::Length(5), // Date range
            Constraint::Length(4), // Radius
            Constraint::Length(3), // Notice
            Constraint::Min(6),    // Code examples
        ])
        .split(area);

    render_location_select(app, model, f, chunks[0]);
    render_date_range_select(app, model, f, chunks[1]);
    render_radius_slider(app, model, f, chunks[2]);
    render_notice(app, model, f, chunks[3]);
    render_code_examples(app, f, chunks[4]);
}

fn control_block(title: &str, focused: bool, enabled: bool) -> Block<'static> {
    let color = if !enabled {
        Color::DarkGray
    } else if focused {
        Color::Yellow
    } else {
        Color::Cyan
    };

    Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Option lines with the selected one highlighted.
pub fn selection_lines<'a>(
    labels: impl IntoIterator<Item = (String, Option<String>)>,
    selected_index: usize,
    enabled: bool,
) -> Vec<TextLine<'a>> {
    labels
        .into_iter()
        .enumerate()
        .map(|(index, (label, detail))| {
            let is_selected = index == selected_index;
            let style = match (is_selected, enabled) {
                (true, true) => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            let prefix = if is_selected { ">" } else { " " };

            let mut spans = vec![Span::styled(format!("{prefix} {label}"), style)];
            if let Some(detail) = detail {
                spans.push(Span::styled(
                    format!("  {detail}"),
                    Style::default().fg(Color::Gray),
                ));
            }
            TextLine::from(spans)
        })
        .collect()
}

fn render_location_select(app: &App, model: &SidebarModel, f: &mut Frame<'_>, area: Rect) {
    let lines = selection_lines(
        LOCATIONS
            .iter()
            .map(|location| (location.name.to_string(), None)),
        model.location_index,
        model.enabled,
    );

    let paragraph = Paragraph::new(Text::from(lines)).block(control_block(
        SidebarControl::Location.label(),
        app.focus == SidebarControl::Location,
        model.enabled,
    ));
    f.render_widget(paragraph, area);
}

fn render_date_range_select(app: &App, model: &SidebarModel, f: &mut Frame<'_>, area: Rect) {
    let lines = selection_lines(
        model
            .date_options
            .iter()
            .map(|option| (option.name.to_string(), Some(option.format_span()))),
        model.date_range_index,
        model.enabled,
    );

    let paragraph = Paragraph::new(Text::from(lines)).block(control_block(
        SidebarControl::DateRange.label(),
        app.focus == SidebarControl::DateRange,
        model.enabled,
    ));
    f.render_widget(paragraph, area);
}

fn render_radius_slider(app: &App, model: &SidebarModel, f: &mut Frame<'_>, area: Rect) {
    let slider = &model.slider;

    // Stays adjustable without a credential.
    let gauge = Gauge::default()
        .block(control_block(
            &slider.label(),
            app.focus == SidebarControl::Radius,
            true,
        ))
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
        .ratio(slider.ratio())
        .label(format!(
            "{:.1} {} ({:.0}–{:.0})",
            slider.value,
            slider.unit.as_str(),
            slider.min,
            slider.max
        ));

    f.render_widget(gauge, area);
}

fn render_notice(app: &App, model: &SidebarModel, f: &mut Frame<'_>, area: Rect) {
    let text = match (&model.notice, model.slider.is_suggestion_clamped()) {
        (Some(notice), _) => Span::styled(notice.clone(), Style::default().fg(Color::Red)),
        (None, true) => Span::styled(
            format!(
                "Suggested {:.2} {} is outside the slider range.",
                model.slider.suggested.unwrap_or_default(),
                model.radius_unit.as_str()
            ),
            Style::default().fg(Color::Yellow),
        ),
        (None, false) => Span::styled(
            format!(
                "{} | {}",
                model.location.address,
                model.location.format_coordinates()
            ),
            Style::default().fg(Color::Gray),
        ),
    };

    let hint = if app.controls_enabled() {
        ""
    } else {
        " (hotel and date range locked)"
    };

    let paragraph = Paragraph::new(TextLine::from(vec![
        text,
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]))
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_code_examples(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == SidebarControl::CodeExamples;

    let mut lines = CODE_EXAMPLES
        .iter()
        .enumerate()
        .map(|(index, example)| {
            let is_cursor = focused && index == app.code_example_index;
            let marker = if app.expanded_example == Some(index) {
                "▾"
            } else {
                "▸"
            };
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            TextLine::from(Span::styled(format!("{marker} {}", example.name), style))
        })
        .collect::<Vec<_>>();

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        SOURCE_CAPTION,
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(control_block(
            SidebarControl::CodeExamples.label(),
            focused,
            true,
        ))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_line_gets_marker_and_highlight() {
        let lines = selection_lines(
            ["Paris", "Hamburg"].map(|name| (name.to_string(), None)),
            1,
            true,
        );

        assert_eq!(lines[0].spans[0].content, "  Paris");
        assert_eq!(lines[1].spans[0].content, "> Hamburg");
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn disabled_selection_is_not_highlighted() {
        let lines = selection_lines(
            [("Next 7 days".to_string(), Some("2024-01-01 → 2024-01-08".to_string()))],
            0,
            false,
        );

        assert_eq!(lines[0].spans[0].style.bg, None);
        assert_eq!(lines[0].spans.len(), 2);
    }
}
