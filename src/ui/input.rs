//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{can_add_password_char, can_add_username_char, App, AppState, Focus, LoginFocus, LoginPhase, Tab};
use crate::ui::nav;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.start_login();
        }
        KeyCode::Char('2') => {
            switch_to_tab(app, Tab::Projects);
        }
        KeyCode::Char('3') => {
            switch_to_tab(app, Tab::Help);
        }
        KeyCode::Char('o') => {
            app.logout();
        }
        KeyCode::Char('r') => {
            if app.current_tab == Tab::Projects {
                app.refresh_projects();
            }
        }
        KeyCode::Left => {
            switch_to_tab(app, app.current_tab.prev());
        }
        KeyCode::Right => {
            switch_to_tab(app, app.current_tab.next());
        }
        KeyCode::Esc => {
            app.focus = Focus::List;
            app.status_message = None;
        }
        _ => {
            // Tab-specific input
            match app.current_tab {
                Tab::Projects => handle_projects_input(app, key),
                Tab::Home | Tab::Help => {}
            }
        }
    }

    Ok(false)
}

/// Switch tabs, gating session-only pages behind the login overlay.
fn switch_to_tab(app: &mut App, tab: Tab) {
    if nav::requires_session(tab) && !app.is_authenticated() {
        app.start_login();
        return;
    }
    app.current_tab = tab;
    app.focus = Focus::List;
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Field edits are ignored while a login attempt is in flight
    let submitting = app.login_phase == LoginPhase::Submitting;

    match key.code {
        KeyCode::Esc => {
            app.cancel_login();
        }
        KeyCode::Down | KeyCode::Tab => {
            // Move to next field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            // Move to previous field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                app.login_focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                app.submit_login();
            }
        },
        KeyCode::Backspace if !submitting => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) if !submitting => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_projects_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_project();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev_project();
        }
        KeyCode::PageDown => {
            app.page_down_projects();
        }
        KeyCode::PageUp => {
            app.page_up_projects();
        }
        KeyCode::Home => {
            app.project_selection = 0;
        }
        KeyCode::End => {
            app.project_selection = app.projects.len().saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(name) = app.selected_project().map(|p| p.name().to_string()) {
                app.open_project(name);
                app.focus = Focus::Detail;
            }
        }
        _ => {}
    }
}
