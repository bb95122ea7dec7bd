use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;

/// Render the key hint row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, theme: &Theme, hint: &str, area: Rect) {
    let bg = theme.background;
    let text = truncate_to_width(hint, area.width as usize);
    let line = Line::from(Span::styled(text, Style::default().fg(theme.dim).bg(bg)));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::render_to_string;

    #[test]
    fn long_hints_are_truncated() {
        let theme = Theme::default();
        let out = render_to_string(20, 1, |frame, area| {
            render_status_row(frame, &theme, "module: b to back, q to quit", area)
        });
        assert_eq!(out, "module: b to back, \u{2026}");
    }
}
