use crate::app::App;
use hotel_demand::predicthq::{DailyAttendance, DemandSignals};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
};
use ratatui::Frame;

pub const CHART_TABS: [&str; 2] = ["Attendance", "Categories"];

pub fn render_chart_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = CHART_TABS
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.chart_tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_chart_panel(app: &App, signals: &DemandSignals, f: &mut Frame<'_>, area: Rect) {
    if app.chart_tab_index == 0 {
        render_attendance_chart(signals, f, area);
    } else {
        render_category_barchart(signals, f, area);
    }
}

fn chart_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Centered message inside a chart frame.
pub fn render_chart_message(title: &'static str, message: &str, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(message.to_string())
        .block(chart_block(title))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// (day offset, attendance) points and the y-axis ceiling.
#[allow(clippy::cast_precision_loss)]
pub fn attendance_points(attendance: &[DailyAttendance]) -> (Vec<(f64, f64)>, f64) {
    let points: Vec<(f64, f64)> = attendance
        .iter()
        .enumerate()
        .map(|(index, day)| (index as f64, day.total))
        .collect();

    let peak = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    (points, if peak > 0.0 { peak * 1.1 } else { 1.0 })
}

fn render_attendance_chart(signals: &DemandSignals, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Predicted Attendance per Day";

    let (points, y_max) = attendance_points(&signals.attendance);
    let (Some(first), Some(last)) = (signals.attendance.first(), signals.attendance.last()) else {
        render_chart_message(TITLE, "No attendance data for this range", f, area);
        return;
    };

    let datasets = vec![Dataset::default()
        .name("Attendance")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    #[allow(clippy::cast_precision_loss)]
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

    let chart = Chart::new(datasets)
        .block(chart_block(TITLE))
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(first.date.format("%b %d").to_string()),
                    Span::raw(last.date.format("%b %d").to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("People")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_category_barchart(signals: &DemandSignals, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Events by Category";

    let categories = &signals.event_count.categories;
    if categories.is_empty() {
        render_chart_message(TITLE, "No events in this range", f, area);
        return;
    }

    let colors = [
        Color::Cyan,
        Color::Yellow,
        Color::Green,
        Color::Magenta,
        Color::Blue,
        Color::Red,
    ];

    let bars: Vec<Bar<'_>> = categories
        .iter()
        .enumerate()
        .map(|(index, (category, count))| {
            Bar::default()
                .value(*count)
                .label(TextLine::from(category.as_str()))
                .style(Style::default().fg(colors[index % colors.len()]))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = categories.values().copied().max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(chart_block(TITLE))
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(9);

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn day(d: u32, total: f64) -> DailyAttendance {
        DailyAttendance {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            total,
            by_category: BTreeMap::new(),
        }
    }

    #[test]
    fn points_follow_day_order() {
        let (points, y_max) = attendance_points(&[day(1, 100.0), day(2, 400.0)]);
        assert_eq!(points, vec![(0.0, 100.0), (1.0, 400.0)]);
        assert!((y_max - 440.0).abs() < 1e-9);
    }

    #[test]
    fn empty_attendance_keeps_a_positive_axis() {
        let (points, y_max) = attendance_points(&[]);
        assert!(points.is_empty());
        assert!((y_max - 1.0).abs() < f64::EPSILON);
    }
}
