//! Menu screen widget with the logo and the feature list.

use super::app::TuiApp;
use super::theme::THEME;
use proto::Feature;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the menu with the five features, the highlighted row marked.
pub fn render(app: &TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let vertical_layout = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(Feature::ALL.len() as u16 + 2),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .split(area);

    let logo_area = vertical_layout[0];
    let menu_area = vertical_layout[1];
    let hints_area = vertical_layout[2];

    // 1. Logo
    let logo_style = Style::default().fg(THEME.logo).add_modifier(Modifier::BOLD);
    let logo_str = concat!(
        "          _                     \n",
        "__      _(_)_______  _ __ __ _ \n",
        "\\ \\ /\\ / / |_  / _ \\| '__/ _` |\n",
        " \\ V  V /| |/ / (_) | | | (_| |\n",
        "  \\_/\\_/ |_/___\\___/|_|  \\__,_|\n",
    );
    let logo_h_layout = Layout::horizontal([Constraint::Length(34)])
        .flex(Flex::Center)
        .split(logo_area);
    frame.render_widget(
        Paragraph::new(Text::styled(logo_str, logo_style)).alignment(Alignment::Left),
        logo_h_layout[0],
    );

    // 2. Feature list
    let menu_h_layout = Layout::horizontal([Constraint::Length(40)])
        .flex(Flex::Center)
        .split(menu_area);
    let lines: Vec<Line<'_>> = Feature::ALL
        .iter()
        .enumerate()
        .map(|(i, feature)| menu_line(i, *feature, i == app.menu_cursor))
        .collect();
    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(THEME.border))
            .title(" Choose a feature "),
    );
    frame.render_widget(menu, menu_h_layout[0]);

    // 3. Hints
    let hints_h_layout = Layout::horizontal([Constraint::Length(40)])
        .flex(Flex::Center)
        .split(hints_area);
    let key = Style::default().fg(THEME.fg).add_modifier(Modifier::BOLD);
    let desc = Style::default().fg(THEME.fg_muted);
    let hints = Line::from(vec![
        Span::styled("↑↓ ", key),
        Span::styled("move  ", desc),
        Span::styled("enter ", key),
        Span::styled("open  ", desc),
        Span::styled("ctrl+c ", key),
        Span::styled("quit", desc),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(hints), hints_h_layout[0]);
}

fn menu_line(index: usize, feature: Feature, selected: bool) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let row = Style::default().fg(THEME.fg);
    let row = if selected {
        row.bg(THEME.menu_selected_bg).add_modifier(Modifier::BOLD)
    } else {
        row
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(THEME.accent_bright)),
        Span::styled(format!("{} ", index + 1), Style::default().fg(THEME.menu_key)),
        Span::styled(feature.title(), row),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_row_carries_marker() {
        let line = menu_line(2, Feature::DataAnalysis, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "▸ 3 Data Analysis");

        let line = menu_line(0, Feature::WebpageChat, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  1 Chat with Webpage");
    }
}
