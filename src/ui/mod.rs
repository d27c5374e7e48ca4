mod notes;

pub use notes::NotesDisplay;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::display::DisplayNotesRequest;
use crate::theme::Theme;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Screen body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_title(f, app, chunks[0]);
    draw_body(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    if app.popup == Popup::Help {
        draw_help_popup(f, theme);
    }
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        app.title.as_str(),
        Style::default().fg(app.theme.header).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_body(f: &mut Frame, app: &App, area: Rect) {
    let panel = NotesDisplay::new(&app.request, &app.theme, app.config.layout.wide_breakpoint);
    if panel.is_empty() {
        return;
    }

    // Panel hugs the bottom of the screen, taking only the rows it needs
    let inner = area.inner(Margin::new(1, 0));
    let height = panel.required_height(inner.width).min(inner.height);
    let panel_area = Rect {
        y: inner.bottom().saturating_sub(height),
        height,
        ..inner
    };
    f.render_widget(&panel, panel_area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(theme.warning)))
    } else {
        let mut spans = vec![
            Span::styled("q", Style::default().fg(theme.accent)),
            Span::styled(" quit  ", Style::default().fg(theme.text_dim)),
            Span::styled("h", Style::default().fg(theme.accent)),
            Span::styled(" help", Style::default().fg(theme.text_dim)),
        ];
        if let Some(ref source) = app.source {
            spans.push(Span::styled("  r", Style::default().fg(theme.accent)));
            spans.push(Span::styled(" reload  │ ", Style::default().fg(theme.text_dim)));
            spans.push(Span::styled(
                source.display().to_string(),
                Style::default().fg(theme.inactive),
            ));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(50, 50, f.area());
    f.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(theme.accent)),
            Span::styled(what, Style::default().fg(theme.text)),
        ])
    };

    let help_text = vec![
        key("q, Ctrl-C", "Quit"),
        key("r", "Reload request file"),
        key("h, ?", "Toggle this help"),
        key("Esc, q", "Close help"),
        Line::from(""),
        Line::from(Span::styled(
            "  Empty fields are hidden; the panel disappears when both are empty.",
            Style::default().fg(theme.text_dim),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

/// Buffer rows as plain text, trailing blanks trimmed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

/// Render the panel once at `width` columns, for non-interactive output
pub fn render_snapshot(
    request: &DisplayNotesRequest,
    theme: &Theme,
    wide_breakpoint: u16,
    width: u16,
) -> Vec<String> {
    let panel = NotesDisplay::new(request, theme, wide_breakpoint);
    let height = panel.required_height(width);
    if height == 0 || width == 0 {
        return Vec::new();
    }

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    (&panel).render(area, &mut buf);
    buffer_lines(&buf)
}
