use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::input::prompt::PromptInput;
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, tail_to_width};

/// Room for typed text beyond the label
const INPUT_CELLS: u16 = 20;

/// Render the one-line text prompt: label then the typed text, cursor at the end
pub fn render_prompt_popup(frame: &mut Frame, theme: &Theme, input: &PromptInput, area: Rect) {
    let bg = theme.background;
    let label_w = display_width(input.label()) as u16;
    let popup_w = (label_w + INPUT_CELLS + 2).min(area.width);
    let popup = super::centered_rect_fixed(popup_w, 3, area);
    frame.render_widget(Clear, popup);

    let inner_w = popup_w.saturating_sub(2) as usize;
    let room = inner_w.saturating_sub(label_w as usize + 1);
    let shown = tail_to_width(input.buffer(), room);

    let line = Line::from(vec![
        Span::styled(input.label(), Style::default().fg(theme.text).bg(bg)),
        Span::styled(shown, Style::default().fg(theme.text_bright).bg(bg)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(line).block(block), popup);

    let cursor_x = popup.x + 1 + label_w + display_width(shown) as u16;
    frame.set_cursor_position((cursor_x.min(popup.right().saturating_sub(2)), popup.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::render_to_string;
    use crossterm::event::{KeyCode, KeyEvent};

    fn typed(label: &str, text: &str) -> PromptInput {
        let mut input = PromptInput::new(label, 127);
        for c in text.chars() {
            input.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        input
    }

    #[test]
    fn popup_is_label_plus_twenty_wide() {
        let input = typed("Name: ", "Gym");
        let theme = Theme::default();
        let out = render_to_string(40, 5, |frame, area| {
            render_prompt_popup(frame, &theme, &input, area)
        });
        let rows: Vec<&str> = out.lines().collect();
        // 6 + 20 + 2 borders = 28 wide, centered in 40
        assert_eq!(rows[1].trim(), format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(26)));
        assert_eq!(
            rows[2].trim_start(),
            format!("\u{2502}{:<26}\u{2502}", "Name: Gym")
        );
    }

    #[test]
    fn long_text_shows_its_tail() {
        let input = typed("Name: ", "a very long description that will not fit");
        let theme = Theme::default();
        let out = render_to_string(60, 5, |frame, area| {
            render_prompt_popup(frame, &theme, &input, area)
        });
        assert!(out.contains("will not fit"));
        assert!(!out.contains("a very"));
    }
}
