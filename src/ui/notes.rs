//! Notes / special conditions panel
//!
//! Renders nothing when both fields are blank. Otherwise draws one bordered
//! section per present field, side by side when the area is at least
//! `wide_breakpoint` columns wide and stacked below that.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::display::DisplayNotesRequest;
use crate::theme::Theme;

/// Columns between side-by-side sections
const GUTTER: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Notes,
    SpecialConditions,
}

impl SectionKind {
    fn heading(self) -> &'static str {
        match self {
            SectionKind::Notes => "Notes",
            SectionKind::SpecialConditions => "Special Conditions",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            SectionKind::Notes => "󰠮",
            SectionKind::SpecialConditions => "󰀪",
        }
    }

    fn color(self, theme: &Theme) -> Color {
        match self {
            SectionKind::Notes => theme.accent,
            SectionKind::SpecialConditions => theme.warning,
        }
    }
}

pub struct NotesDisplay<'a> {
    request: &'a DisplayNotesRequest,
    theme: &'a Theme,
    wide_breakpoint: u16,
}

impl<'a> NotesDisplay<'a> {
    pub fn new(request: &'a DisplayNotesRequest, theme: &'a Theme, wide_breakpoint: u16) -> Self {
        Self {
            request,
            theme,
            wide_breakpoint,
        }
    }

    /// Present sections in display order
    fn sections(&self) -> Vec<(SectionKind, &'a str)> {
        let request = self.request;
        [
            (SectionKind::Notes, request.notes()),
            (SectionKind::SpecialConditions, request.special_conditions()),
        ]
        .into_iter()
        .filter_map(|(kind, text)| text.map(|t| (kind, t)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.request.is_blank()
    }

    fn is_wide(&self, width: u16) -> bool {
        width >= self.wide_breakpoint
    }

    /// Rows needed to show every line of text at `width` without clipping
    pub fn required_height(&self, width: u16) -> u16 {
        let sections = self.sections();
        match sections.as_slice() {
            [] => 0,
            [(_, text)] => section_height(text, width),
            [(_, left), (_, right)] if self.is_wide(width) => {
                let [l, r] = side_by_side(Rect::new(0, 0, width, 1));
                section_height(left, l.width).max(section_height(right, r.width))
            }
            stacked => stacked
                .iter()
                .map(|(_, text)| section_height(text, width))
                .fold(0u16, u16::saturating_add),
        }
    }

    fn section_areas(&self, area: Rect, sections: &[(SectionKind, &str)]) -> Vec<Rect> {
        if sections.len() < 2 {
            return vec![area];
        }

        if self.is_wide(area.width) {
            side_by_side(area).to_vec()
        } else {
            let constraints: Vec<Constraint> = sections
                .iter()
                .map(|(_, text)| Constraint::Length(section_height(text, area.width)))
                .collect();
            Layout::vertical(constraints).split(area).to_vec()
        }
    }

    fn render_section(&self, kind: SectionKind, text: &str, area: Rect, buf: &mut Buffer) {
        let color = kind.color(self.theme);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} {} ", kind.icon(), kind.heading()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        body(text, self.theme).block(block).render(area, buf);
    }
}

impl Widget for &NotesDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sections = self.sections();
        if sections.is_empty() || area.is_empty() {
            return;
        }

        let areas = self.section_areas(area, &sections);
        for ((kind, text), section_area) in sections.iter().zip(areas) {
            self.render_section(*kind, text, section_area, buf);
        }
    }
}

fn side_by_side(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .spacing(GUTTER)
        .areas(area)
}

fn body<'t>(text: &'t str, theme: &Theme) -> Paragraph<'t> {
    Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false })
}

/// Wrapped text rows plus top and bottom border
fn section_height(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(2);
    if inner == 0 {
        return 2;
    }
    let rows = body(text, &Theme::default()).line_count(inner);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;

    fn request(notes: Option<&str>, special: Option<&str>) -> DisplayNotesRequest {
        DisplayNotesRequest::new(notes.map(String::from), special.map(String::from))
    }

    fn render(request: &DisplayNotesRequest, width: u16, height: u16) -> Buffer {
        let theme = Theme::default();
        let widget = NotesDisplay::new(request, &theme, 80);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        (&widget).render(area, &mut buf);
        buf
    }

    fn row_of(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|l| l.contains(needle))
    }

    fn joined(buf: &Buffer) -> String {
        buffer_lines(buf).join("\n")
    }

    #[test]
    fn test_empty_request_renders_nothing() {
        let area = Rect::new(0, 0, 60, 8);
        let buf = render(&request(None, None), 60, 8);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_empty_strings_render_nothing_and_leave_buffer_untouched() {
        let theme = Theme::default();
        let req = request(Some(""), Some(""));
        let widget = NotesDisplay::new(&req, &theme, 80);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        for y in 0..area.height {
            buf.set_string(0, y, "x".repeat(30), Style::default());
        }
        let before = buf.clone();
        (&widget).render(area, &mut buf);

        assert_eq!(buf, before);
        assert!(widget.is_empty());
        assert_eq!(widget.required_height(30), 0);
    }

    #[test]
    fn test_notes_only() {
        let text = joined(&render(&request(Some("Bring ID"), None), 60, 5));
        assert!(text.contains("Notes"));
        assert!(text.contains("Bring ID"));
        assert!(!text.contains("Special Conditions"));
    }

    #[test]
    fn test_special_conditions_only() {
        let text = joined(&render(&request(None, Some("21+ only")), 60, 5));
        assert!(text.contains("Special Conditions"));
        assert!(text.contains("21+ only"));
        assert!(!text.contains("Notes"));
    }

    #[test]
    fn test_both_sections_side_by_side_when_wide() {
        let buf = render(&request(Some("Arrive early"), Some("No refunds")), 100, 5);
        let lines = buffer_lines(&buf);

        let notes_row = row_of(&lines, "Notes").expect("notes heading");
        let special_row = row_of(&lines, "Special Conditions").expect("special heading");
        assert_eq!(notes_row, special_row);

        let body_row = row_of(&lines, "Arrive early").expect("notes text");
        assert!(lines[body_row].contains("No refunds"));
    }

    #[test]
    fn test_both_sections_stacked_when_narrow() {
        let buf = render(&request(Some("Arrive early"), Some("No refunds")), 40, 10);
        let lines = buffer_lines(&buf);

        let notes_row = row_of(&lines, "Notes").expect("notes heading");
        let special_row = row_of(&lines, "Special Conditions").expect("special heading");
        assert!(notes_row < special_row);
        assert!(row_of(&lines, "Arrive early").unwrap() < special_row);
        assert!(row_of(&lines, "No refunds").unwrap() > special_row);
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        let theme = Theme::default();
        let req = request(Some("a"), Some("b"));
        let widget = NotesDisplay::new(&req, &theme, 80);
        assert_eq!(widget.required_height(80), 3);
        assert_eq!(widget.required_height(79), 6);
    }

    #[test]
    fn test_multiline_text_is_kept_verbatim() {
        let buf = render(&request(Some("Line one\nLine two"), None), 40, 6);
        let lines = buffer_lines(&buf);
        let first = row_of(&lines, "Line one").expect("first line");
        let second = row_of(&lines, "Line two").expect("second line");
        assert_eq!(first + 1, second);
    }

    #[test]
    fn test_required_height_fits_long_text() {
        let notes = "Doors open at six. Seating is first come first served. \
                     Please keep aisles clear and phones silent during the show.";
        let theme = Theme::default();
        let req = request(Some(notes), None);
        let widget = NotesDisplay::new(&req, &theme, 80);

        let width = 24;
        let height = widget.required_height(width);
        assert!(height > 3);

        let text = joined(&render(&req, width, height));
        for word in notes.split_whitespace() {
            assert!(text.contains(word), "missing {word:?}");
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let req = request(Some("Arrive early"), Some("No refunds"));
        assert_eq!(render(&req, 70, 8), render(&req, 70, 8));
    }

    #[test]
    fn test_zero_area_is_a_no_op() {
        let buf = render(&request(Some("Bring ID"), None), 0, 0);
        assert!(buf.content().is_empty());
    }
}
