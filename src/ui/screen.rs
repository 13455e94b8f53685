use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect};
use sketchy::game::Phase;

use crate::{
    ui::{render_finished, render_playing, render_setup},
    App,
};

/// A UI Screen boundary: responsible for rendering and optional key handling
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
    /// Optional per-screen key handling. Returns true if the key was handled.
    fn on_key(&mut self, _key: KeyEvent, _app: &mut App) -> bool {
        false
    }
}

/// Word list and round length entry
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_setup(app, area, buf);
    }

    fn on_key(&mut self, key: KeyEvent, app: &mut App) -> bool {
        match key.code {
            KeyCode::Esc => app.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => app.form.toggle_focus(),
            KeyCode::Enter => app.start_game(),
            KeyCode::Backspace => app.form.backspace(),
            KeyCode::Char(c) => app.form.push_char(c),
            _ => return false,
        }
        true
    }
}

pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_playing(app, area, buf);
    }

    fn on_key(&mut self, key: KeyEvent, app: &mut App) -> bool {
        let game = &mut app.game;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => game.quit_to_setup(),
            KeyCode::Enter | KeyCode::Char('n') if game.round_has_expired() => {
                game.advance_after_expiry()
            }
            KeyCode::Enter | KeyCode::Char('g') => game.record_correct_guess(),
            KeyCode::Char(' ') | KeyCode::Char('p') => game.toggle_countdown(),
            _ => false,
        }
    }
}

pub struct FinishedScreen;

impl Screen for FinishedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_finished(app, area, buf);
    }

    fn on_key(&mut self, key: KeyEvent, app: &mut App) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => app.game.reset_from_finished(),
            KeyCode::Esc | KeyCode::Char('q') => {
                app.should_quit = true;
                true
            }
            _ => false,
        }
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Setup => Box::new(SetupScreen),
        Phase::Playing => Box::new(PlayingScreen),
        Phase::Finished => Box::new(FinishedScreen),
    }
}
