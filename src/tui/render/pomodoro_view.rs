use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::pomodoro::DurationEdit;
use crate::ops::{CycleMode, Pomodoro, Session};
use crate::tui::theme::Theme;

use super::centered_rect_fixed;

const SMOKE_FRAMES: [[&str; 2]; 4] = [
    ["  ( (", "   ) )"],
    ["   ) )", "  ( ("],
    ["  ( (", "   ) )"],
    ["   ) )", "  ( ("],
];
const CUP: [&str; 4] = [" ........", " |      |]", " \\      /", "  `----'"];

/// The cup needs more rows than this
const CUP_MIN_HEIGHT: u16 = 12;

/// Render the focus timer
pub fn render_pomodoro(frame: &mut Frame, pomodoro: &Pomodoro, theme: &Theme, area: Rect) {
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let session_color = match pomodoro.session() {
        Session::Work => theme.highlight,
        Session::Rest => theme.green,
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("  Pomodoro: {}", pomodoro.session().label()),
            Style::default()
                .fg(session_color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if area.height > CUP_MIN_HEIGHT {
        let smoke = if pomodoro.is_running() {
            SMOKE_FRAMES[pomodoro.frame() % SMOKE_FRAMES.len()]
        } else {
            SMOKE_FRAMES[0]
        };
        for puff in smoke {
            lines.push(Line::from(Span::styled(format!("    {}", puff), dim_style)));
        }
        for row in CUP {
            lines.push(Line::from(Span::styled(format!("    {}", row), text_style)));
        }
    }
    lines.push(Line::default());

    let state = if pomodoro.is_running() {
        Span::styled("  running", Style::default().fg(theme.green).bg(bg))
    } else {
        Span::styled("  paused", dim_style)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("       {}", pomodoro.clock()),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        state,
    ]));
    lines.push(Line::default());

    let mode = pomodoro.cycle().label();
    let first_help = match pomodoro.cycle() {
        CycleMode::Standard => format!("  [i/o] Edit W/R [r] Reset [m] Mode: {}", mode),
        CycleMode::Progressive => format!("  [r] Reset [m] Mode: {}", mode),
    };
    lines.push(Line::from(Span::styled(first_help, dim_style)));
    lines.push(Line::from(Span::styled(
        "  [space] Start/Pause [b] Back",
        dim_style,
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);

    if let Some(edit) = pomodoro.edit() {
        render_duration_popup(frame, edit, theme, area);
    }
}

/// MMSS entry box over the timer
fn render_duration_popup(frame: &mut Frame, edit: &DurationEdit, theme: &Theme, area: Rect) {
    let bg = theme.background;
    let popup = centered_rect_fixed(24, 4, area);
    frame.render_widget(Clear, popup);

    let title = match edit.target {
        Session::Work => "Set Work Time (MMSS)",
        Session::Rest => "Set Rest Time (MMSS)",
    };
    let [m1, m2, s1, s2] = edit.slots();
    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.highlight).bg(bg),
        )),
        Line::from(Span::styled(
            format!("{}{}:{}{}", m1, m2, s1, s2),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        popup,
    );

    // Cursor over the next slot, skipping the colon
    let cursor = edit.cursor().min(3) as u16;
    let slot_x = popup.x + 1 + (22 - 5) / 2 + cursor + u16::from(cursor >= 2);
    frame.set_cursor_position((slot_x, popup.y + 2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PomodoroConfig;
    use crate::ops::PomodoroKey;
    use crate::tui::render::test_helpers::*;

    fn timer() -> Pomodoro {
        Pomodoro::new(&PomodoroConfig::default())
    }

    #[test]
    fn tall_view_shows_cup_clock_and_help() {
        let p = timer();
        let theme = Theme::default();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_pomodoro(frame, &p, &theme, area)
        });
        assert!(out.contains("  Pomodoro: Work"));
        assert!(out.contains("`----'"));
        assert!(out.contains("       25:00  paused"));
        assert!(out.contains("[i/o] Edit W/R [r] Reset [m] Mode: standard"));
        assert!(out.contains("[space] Start/Pause [b] Back"));
    }

    #[test]
    fn short_view_drops_the_cup() {
        let p = timer();
        let theme = Theme::default();
        let out = render_to_string(TERM_W, 12, |frame, area| {
            render_pomodoro(frame, &p, &theme, area)
        });
        assert!(!out.contains("`----'"));
        assert!(out.contains("25:00"));
    }

    #[test]
    fn progressive_mode_hides_duration_editing() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char('m'));
        let theme = Theme::default();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_pomodoro(frame, &p, &theme, area)
        });
        assert!(out.contains("  [r] Reset [m] Mode: progressive"));
        assert!(!out.contains("[i/o]"));
    }

    #[test]
    fn duration_popup_shows_typed_slots() {
        let mut p = timer();
        for key in ['o', '0', '7'] {
            p.handle_key(PomodoroKey::Char(key));
        }
        let theme = Theme::default();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_pomodoro(frame, &p, &theme, area)
        });
        assert!(out.contains("Set Rest Time (MMSS)"));
        assert!(out.contains("07:__"));
    }
}
