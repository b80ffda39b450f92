use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Screen};
use super::ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyResult {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) == KeyResult::Quit {
                return Ok(());
            }
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyResult::Quit;
    }

    // Add-row prompt takes over input
    if let Some(buffer) = app.add_row_buffer.as_mut() {
        match key.code {
            KeyCode::Esc => app.cancel_add_row(),
            KeyCode::Enter => app.submit_add_row(),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        return KeyResult::Continue;
    }

    match app.screen {
        Screen::OpenFile => match key.code {
            KeyCode::Esc => return quit_if(app.back()),
            KeyCode::Enter => app.open_typed_path(),
            KeyCode::Backspace => {
                app.path_buffer.pop();
            }
            KeyCode::Char(c) => app.path_buffer.push(c),
            _ => {}
        },
        Screen::Preview => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return quit_if(app.back()),
            KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
            KeyCode::Left | KeyCode::Char('h') => app.move_picker(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_picker(1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_rows(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_rows(-1),
            KeyCode::PageDown => app.scroll_rows(12),
            KeyCode::PageUp => app.scroll_rows(-12),
            KeyCode::Enter => app.confirm_selection(),
            _ => {}
        },
        Screen::Chart => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return quit_if(app.back()),
            KeyCode::Char('t') => app.cycle_chart_type(),
            KeyCode::Char('a') => app.begin_add_row(),
            _ => {}
        },
    }
    KeyResult::Continue
}

fn quit_if(quit: bool) -> KeyResult {
    if quit {
        KeyResult::Quit
    } else {
        KeyResult::Continue
    }
}
