//! Chat screen widget: header, message log, status line, input box.

use super::app::TuiApp;
use super::theme::THEME;
use conversation::SessionView;
use proto::{Content, Feature, Message, Origin};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Renders the active session: header, log, status, and input.
pub fn render(app: &TuiApp, session: &SessionView, frame: &mut Frame<'_>, area: Rect) {
    // Layout: header(1) | history(fill) | status(1) | input(3)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(header_line(session)), chunks[0]);
    render_history(app, session, frame, chunks[1]);
    frame.render_widget(Paragraph::new(status_line(app, session)), chunks[2]);
    render_input(app, session, frame, chunks[3]);
}

fn header_line(session: &SessionView) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            " wizora ",
            Style::default()
                .fg(THEME.logo)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", session.feature.title()),
            Style::default().fg(THEME.fg),
        ),
    ];
    if let Some(name) = &session.resource {
        let badge = if session.feature == Feature::DocumentChat && !session.uploaded {
            format!(" {name} (not uploaded) ")
        } else {
            format!(" {name} ")
        };
        spans.push(Span::styled(badge, Style::default().fg(THEME.success)));
    }
    Line::from(spans)
}

/// Lines for one message, label on the first line and continuation indented.
pub fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let (label, label_color) = match message.origin {
        Origin::User => ("You: ", THEME.user_label),
        Origin::Bot => ("Wizora: ", THEME.bot_label),
    };
    let label_span = Span::styled(
        label,
        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
    );
    let indent = " ".repeat(label.len());

    match &message.content {
        Some(Content::Text(text)) => {
            let mut lines = Vec::new();
            for (i, line) in text.lines().enumerate() {
                let lead = if i == 0 {
                    label_span.clone()
                } else {
                    Span::raw(indent.clone())
                };
                lines.push(Line::from(vec![lead, Span::raw(line.to_string())]));
            }
            if lines.is_empty() {
                lines.push(Line::from(label_span));
            }
            lines
        }
        Some(Content::Image(url)) => vec![Line::from(vec![
            label_span,
            Span::styled("[image] ", Style::default().fg(THEME.fg_muted)),
            Span::styled(
                url.clone(),
                Style::default()
                    .fg(THEME.image_link)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ])],
        None => vec![Line::from(label_span)],
    }
}

fn render_history(app: &TuiApp, session: &SessionView, frame: &mut Frame<'_>, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in &session.messages {
        lines.push(Line::from(""));
        lines.extend(message_lines(message));
    }

    // Inner width (area minus 1-cell border on each side).
    let inner_width = area.width.saturating_sub(2);
    let content_height = wrapped_height(&lines, inner_width);
    let visible_height = area.height.saturating_sub(2);
    let max_scroll = content_height.saturating_sub(visible_height);
    let scroll = max_scroll.saturating_sub(app.scroll_back);

    let history = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(THEME.border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(history, area);
}

/// Rows `lines` occupy once wrapped at `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

fn status_line(app: &TuiApp, session: &SessionView) -> Line<'static> {
    if session.busy {
        return Line::from(vec![
            Span::styled(
                format!(" {} ", app.spinner()),
                Style::default().fg(THEME.spinner),
            ),
            Span::styled("Waiting for response…", Style::default().fg(THEME.fg_muted)),
        ]);
    }
    if let Some(notice) = &app.notice {
        return Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(THEME.warning),
        ));
    }
    let hint = if session.accepts_resource {
        " enter send  /file <path> choose file  esc menu"
    } else {
        " enter send  esc menu"
    };
    Line::from(Span::styled(hint, Style::default().fg(THEME.fg_muted)))
}

/// Greyed-out text shown in an empty input box.
pub fn placeholder(session: &SessionView) -> &'static str {
    match session.feature {
        Feature::DocumentChat if !session.uploaded => "Upload a document: /file <path>",
        Feature::DocumentChat => "Ask a question about the document...",
        Feature::DataAnalysis => "Choose a CSV with /file <path>, then press Enter",
        Feature::WebpageChat => "Ask about the current page...",
        Feature::GenericChatbot => "Message the chatbot...",
        Feature::ImageGen => "Describe an image...",
    }
}

fn render_input(app: &TuiApp, session: &SessionView, frame: &mut Frame<'_>, area: Rect) {
    let border_color = if session.busy {
        THEME.fg_muted
    } else {
        THEME.border_active
    };
    let (text, style) = if session.draft.is_empty() {
        (placeholder(session), Style::default().fg(THEME.fg_muted))
    } else {
        (session.draft.as_str(), Style::default().fg(THEME.fg))
    };
    let cursor = app.cursor_in(&session.draft);
    let (offset, cursor_col) = input_window(&session.draft, cursor, area.width.saturating_sub(2));
    let input = Paragraph::new(Span::styled(text, style))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().bg(THEME.input_bg))
        .scroll((0, offset));
    frame.render_widget(input, area);

    frame.set_cursor_position((
        area.x.saturating_add(1).saturating_add(cursor_col),
        area.y.saturating_add(1),
    ));
}

/// Horizontal scroll offset and cursor column keeping the cursor inside an
/// input `width` cells wide.
fn input_window(draft: &str, cursor: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before = UnicodeWidthStr::width(&draft[..cursor]);
    let offset = before.saturating_sub(width as usize - 1);
    let column = before - offset;
    (offset.min(u16::MAX as usize) as u16, column as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::SessionId;

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn multi_line_bot_text_is_indented() {
        let msg = Message::bot(SessionId::new(), "first\nsecond");
        assert_eq!(
            flatten(&message_lines(&msg)),
            ["Wizora: first", "        second"]
        );
    }

    #[test]
    fn image_and_empty_content_render() {
        let id = SessionId::new();
        let image = Message::new(
            id.clone(),
            Origin::Bot,
            Some(Content::Image("https://img/1.png".to_string())),
        );
        assert_eq!(
            flatten(&message_lines(&image)),
            ["Wizora: [image] https://img/1.png"]
        );

        let empty = Message::new(id, Origin::Bot, None);
        assert_eq!(flatten(&message_lines(&empty)), ["Wizora: "]);
    }

    #[test]
    fn input_cursor_stays_inside_the_box() {
        assert_eq!(input_window("hello", 5, 20), (0, 5));
        assert_eq!(input_window("hello", 2, 20), (0, 2));

        let long = "x".repeat(60_000);
        let (offset, column) = input_window(&long, long.len(), 38);
        assert_eq!(column, 37);
        assert_eq!(offset as usize, 60_000 - 37);

        assert_eq!(input_window("你好", "你好".len(), 3), (2, 2));
        assert_eq!(input_window("abc", 3, 0), (0, 0));
    }

    #[test]
    fn wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from(""), Line::from("abcdefghij"), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 4), 1 + 3 + 1);
        assert_eq!(wrapped_height(&lines, 0), 0);
    }
}
