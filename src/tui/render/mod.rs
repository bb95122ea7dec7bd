pub mod list_view;
pub mod panel;
pub mod pomodoro_view;
pub mod prompt_popup;
pub mod settings_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::model::ListItem;
use crate::ops::EditorView;

use super::app::{App, Module, Screen};
use super::input::prompt::PromptInput;
use super::theme::Theme;

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

const PANEL_HINT: &str = "panel: arrows to move, enter to select, q to quit";
const MODULE_HINT: &str = "module: b to back, q to quit";
const PROMPT_HINT: &str = "prompt: enter to confirm, esc to cancel";

/// Main render function: dispatches to the active screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    if too_small(area) {
        render_too_small(frame, theme, area);
        return;
    }

    let (content, status) = split(area);
    match app.screen {
        Screen::Panel => panel::render_panel(frame, app, content),
        Screen::Module(Module::Habits) => {
            list_view::render_list(frame, &app.habits.view(), theme, content)
        }
        Screen::Module(Module::Tasks) => {
            list_view::render_list(frame, &app.tasks.view(), theme, content)
        }
        Screen::Module(Module::Pomodoro) => {
            pomodoro_view::render_pomodoro(frame, &app.pomodoro, theme, content)
        }
        Screen::Module(Module::Settings) => settings_view::render_settings(frame, app, content),
    }

    let hint = match app.screen {
        Screen::Panel => PANEL_HINT,
        Screen::Module(_) => MODULE_HINT,
    };
    status_row::render_status_row(frame, theme, hint, status);
}

/// Draw a list with a text prompt over it
pub fn render_prompt<T: ListItem>(
    frame: &mut Frame,
    theme: &Theme,
    view: &EditorView<'_, T>,
    input: &PromptInput,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    if too_small(area) {
        render_too_small(frame, theme, area);
        return;
    }

    let (content, status) = split(area);
    list_view::render_list(frame, view, theme, content);
    prompt_popup::render_prompt_popup(frame, theme, input, content);
    status_row::render_status_row(frame, theme, PROMPT_HINT, status);
}

fn too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// Layout: content | status row (1 row)
fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_too_small(frame: &mut Frame, theme: &Theme, area: Rect) {
    let style = Style::default().fg(theme.red).bg(theme.background);
    let lines = vec![
        Line::styled("terminal too small!", style),
        Line::styled(
            format!("please resize to at least {}x{} :)", MIN_WIDTH, MIN_HEIGHT),
            style,
        ),
    ];
    let top = area.height.saturating_sub(2) / 2;
    let target = Rect::new(area.x, area.y + top, area.width, area.height.min(2));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        target,
    );
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn too_small_terminal_shows_notice() {
        let app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let out = render_to_string(50, 12, |frame, _| render(frame, &app));
        assert!(out.contains("terminal too small!"));
        assert!(out.contains("please resize to at least 60x20 :)"));
        assert!(!out.contains("Select a module:"));
    }

    #[test]
    fn status_row_follows_screen() {
        let mut app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(out.ends_with(PANEL_HINT));

        app.open_selected();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(out.ends_with(MODULE_HINT));
    }

    #[test]
    fn prompt_draws_over_the_list() {
        let app = app_with_lists(HABITS_CSV, TASKS_CSV);
        let mut input = PromptInput::new("Enter task name: ", 47);
        for c in "Stretch".chars() {
            input.handle_key(crossterm::event::KeyEvent::from(
                crossterm::event::KeyCode::Char(c),
            ));
        }
        let view = app.habits.view();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render_prompt(frame, &app.theme, &view, &input)
        });
        assert!(out.contains("Enter task name: Stretch"));
        assert!(out.contains("Habits"));
        assert!(out.ends_with(PROMPT_HINT));
    }
}
