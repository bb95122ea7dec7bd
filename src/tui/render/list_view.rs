use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{ListItem, Selection};
use crate::ops::{EditMode, EditorView};
use crate::tui::theme::Theme;

/// Render a two-level list: title, heads with their numbered items, key help
pub fn render_list<T: ListItem>(
    frame: &mut Frame,
    view: &EditorView<'_, T>,
    theme: &Theme,
    area: Rect,
) {
    let bg = theme.background;
    let help = help_lines::<T>(view.mode);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                     // title + gap
            Constraint::Min(1),                        // heads and items
            Constraint::Length(help.len() as u16 + 1), // gap + help
        ])
        .split(area);

    let mut title = vec![Span::styled(
        format!("  {}", T::TITLE),
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if view.mode.is_editing() {
        title.push(Span::styled(
            " [EDIT MODE]",
            Style::default().fg(theme.yellow).bg(bg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

    let (lines, cursor_line) = body_lines(view, theme);
    let height = chunks[1].height as usize;
    let scroll = match cursor_line {
        Some(line) if height > 0 && line >= height => line + 1 - height,
        _ => 0,
    };
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(bg))
            .scroll((scroll as u16, 0)),
        chunks[1],
    );

    let help_style = Style::default().fg(theme.dim).bg(bg);
    let mut help_text = vec![Line::default()];
    help_text.extend(
        help.into_iter()
            .map(|text| Line::from(Span::styled(format!("  {}", text), help_style))),
    );
    frame.render_widget(Paragraph::new(help_text), chunks[2]);
}

/// Body lines plus the index of the line holding the cursor
fn body_lines<'a, T: ListItem>(
    view: &EditorView<'_, T>,
    theme: &Theme,
) -> (Vec<Line<'a>>, Option<usize>) {
    let bg = theme.background;
    let collection = view.collection;
    let selected_style = Style::default()
        .fg(theme.text_bright)
        .bg(theme.selection_bg)
        .add_modifier(Modifier::BOLD);
    let head_style = Style::default()
        .fg(theme.cyan)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let item_style = Style::default().fg(theme.text).bg(bg);
    let done_style = Style::default()
        .fg(theme.dim)
        .bg(bg)
        .add_modifier(Modifier::CROSSED_OUT);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = None;

    for (h, head) in collection.heads().iter().enumerate() {
        let reserved = collection.is_reserved(h);
        if reserved && head.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(Line::default());
        }

        // Standalone items sit flush with the head names
        let indent = if reserved { "  " } else { "    " };
        if !reserved {
            let on_head = view.selection == Selection::on_head(h);
            if on_head {
                cursor_line = Some(lines.len());
            }
            lines.push(Line::from(Span::styled(
                format!("  {}:", head.name),
                if on_head { selected_style } else { head_style },
            )));
        }

        for (i, item) in head.items().iter().enumerate() {
            let on_item = view.selection == Selection::on_item(h, i);
            if on_item {
                cursor_line = Some(lines.len());
            }
            let style = if on_item {
                selected_style
            } else if item.is_done() {
                done_style
            } else {
                item_style
            };
            lines.push(Line::from(vec![
                Span::styled(indent, item_style),
                Span::styled(format!("{}. {}", i + 1, item.line()), style),
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing here yet. Press e then i to start editing.",
            Style::default().fg(theme.dim).bg(bg),
        )));
    }

    (lines, cursor_line)
}

fn help_lines<T: ListItem>(mode: EditMode) -> Vec<String> {
    match mode {
        EditMode::Normal => vec![
            "Navigation:".into(),
            "\u{2191}/\u{2193}: Move".into(),
            "Space: Toggle".into(),
            "E+I: Edit Mode".into(),
        ],
        EditMode::Edit | EditMode::Move => vec![
            if mode == EditMode::Move {
                "Edit Mode [MOVING]:".into()
            } else {
                "Edit Mode:".into()
            },
            "R+U: New Head".into(),
            "R+I: New Task".into(),
            format!("{}: Delete Item", T::DELETE_KEY.to_ascii_uppercase()),
            "S: Toggle Move".into(),
            "E+I: Toggle Edit".into(),
            "ESC: Exit Edit/Move".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crate::tui::session::Session;
    use crate::ops::EditorKey;
    use crate::tui::session::scripted::ScriptedKeys;
    use pretty_assertions::assert_eq;

    #[test]
    fn habits_show_heads_numbers_and_streaks() {
        let app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let view = app.habits.view();
        let out = render_to_string(TERM_W, 20, |frame, area| {
            render_list(frame, &view, &app.theme, area)
        });
        let mut expected = vec![
            "  Habits",
            "",
            "  Morning:",
            "    1. [X] Drink water (3)",
            "    2. [ ] Stretch (0)",
            "",
            "  Evening:",
            "    1. [ ] Read (12)",
        ];
        expected.extend([""; 8]);
        expected.extend([
            "  Navigation:",
            "  \u{2191}/\u{2193}: Move",
            "  Space: Toggle",
            "  E+I: Edit Mode",
        ]);
        assert_eq!(out, expected.join("\n"));
    }

    #[test]
    fn standalone_tasks_have_no_header() {
        let app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let view = app.tasks.view();
        let out = render_to_string(TERM_W, 20, |frame, area| {
            render_list(frame, &view, &app.theme, area)
        });
        let body: Vec<&str> = out.lines().take(7).collect();
        assert_eq!(
            body,
            vec![
                "  Tasks",
                "",
                "  1. [ ] Call mom",
                "",
                "  Work:",
                "    1. [X] Send report",
                "    2. [ ] Book flights",
            ]
        );
    }

    #[test]
    fn edit_mode_shows_banner_and_edit_help() {
        let mut app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let mut term = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        let mut session = Session::new(
            &mut term,
            ScriptedKeys::typed("i"),
            crate::tui::theme::Theme::default(),
        );
        app.tasks.handle_key(EditorKey::Char('e'), &mut session);
        app.tasks.handle_key(EditorKey::Char('s'), &mut session);

        let view = app.tasks.view();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list(frame, &view, &app.theme, area)
        });
        assert!(out.starts_with("  Tasks [EDIT MODE]"));
        assert!(out.contains("Edit Mode [MOVING]:"));
        assert!(out.contains("X: Delete Item"));
        assert!(out.contains("ESC: Exit Edit/Move"));
    }

    #[test]
    fn completed_items_are_struck_through() {
        let app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let view = app.tasks.view();
        let backend = ratatui::backend::TestBackend::new(TERM_W, TERM_H);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_list(frame, &view, &app.theme, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        // "    1. [X] Send report" on row 5
        assert_eq!(buf[(4, 5)].symbol(), "1");
        assert!(buf[(4, 5)].modifier.contains(Modifier::CROSSED_OUT));
        assert!(!buf[(4, 6)].modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn long_lists_scroll_to_the_cursor() {
        let mut csv = String::from("head_name,task_name,streak,done_today\n");
        for i in 0..12 {
            csv.push_str(&format!("\"Daily\",\"Habit {}\",0,0\n", i));
        }
        let mut app = app_with_lists(&csv, TASKS_CSV);
        let mut term = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        let mut session = Session::new(
            &mut term,
            ScriptedKeys::new(vec![]),
            crate::tui::theme::Theme::default(),
        );
        for _ in 0..11 {
            app.habits.handle_key(EditorKey::Down, &mut session);
        }
        let view = app.habits.view();
        let out = render_to_string(TERM_W, 16, |frame, area| {
            render_list(frame, &view, &app.theme, area)
        });
        assert!(out.contains("12. [ ] Habit 11"));
        assert!(!out.contains("Daily:"));
    }

    #[test]
    fn empty_list_has_a_hint() {
        let app = app_with_lists("head_name,task_name,streak,done_today\n", TASKS_CSV);
        let view = app.habits.view();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list(frame, &view, &app.theme, area)
        });
        assert!(out.contains("Nothing here yet."));
    }
}
