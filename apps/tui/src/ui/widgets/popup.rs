use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use ratatui::Frame;

/// Rect of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
    }
}

/// Bordered popup over `area` with a one-line hint on its bottom edge.
pub fn render_popup(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    body: Text<'_>,
    hint: &'static str,
) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(format!("== {title} =="))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);

    let hint_line = Paragraph::new(TextLine::from(Span::styled(
        hint,
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint_line, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 80, area);

        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 40);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 5);
    }
}
