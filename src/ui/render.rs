use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, LoginPhase, Tab};
use crate::utils::truncate_string;

use super::nav::{self, SessionIndicator};
use super::styles;
use super::tabs::{help, home, projects};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Navigation
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_nav_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let brand = "  Active Tigger";

    // Right side: identity indicator, then the active project if any
    let mut right = match nav::session_indicator(&app.session) {
        SessionIndicator::LoggedIn { username } => format!("Logged as {} - [o] logout", username),
        SessionIndicator::LoggedOut => "[1] Login".to_string(),
    };
    if let Some(ref name) = app.active_project {
        right = format!("Project {} | {}", truncate_string(name, 24), right);
    }

    let padding = area
        .width
        .saturating_sub(brand.len() as u16 + right.len() as u16 + 2) as usize;

    let title_line = Line::from(vec![
        Span::styled(brand, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let logging_in = matches!(app.state, AppState::LoggingIn);

    let mut spans = vec![Span::raw(" ")];
    for (i, page) in nav::PAGES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", page.key, page.label);
        if nav::page_is_active(page, app.current_tab, logging_in) {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Home => home::render_home(frame, app, area),
        Tab::Projects => projects::render_projects(frame, app, area),
        Tab::Help => help::render_help(frame, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut parts: Vec<String> = Vec::new();

    if let Some(ref msg) = app.status_message {
        parts.push(msg.clone());
    }

    if app.refreshing {
        parts.push("refreshing...".to_string());
    }

    if let Some(ref data) = app.session.data {
        if data.expires_soon() && !data.is_expired() {
            parts.push(format!("session expires in {} min", data.minutes_until_expiry()));
        }
    }

    if parts.is_empty() {
        parts.push("[?] see Help".to_string());
    }

    let line = Line::from(Span::raw(format!(" {}", parts.join("  |  "))));
    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()),
        area,
    );
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    // Fixed size dialog - compact
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(46, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![];

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "        Connect to the service",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    // Username field
    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let username_display = format!("{:<24}", truncate_string(&app.login_username, 24));
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field (masked)
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.len().min(24));
    let password_display = format!("{:<24}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    lines.push(Line::from(""));

    // Button row: shows progress while the flow is in flight
    if app.login_phase == LoginPhase::Submitting {
        lines.push(Line::from(Span::styled(
            "            Authenticating...",
            styles::muted_style(),
        )));
    } else {
        let button_focused = app.login_focus == LoginFocus::Button;
        let button_style = if button_focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled("   Login   ", button_style),
            Span::raw("]"),
        ]));
    }

    // Inline alert
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    // Fixed size dialog matching login screen
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "              Quit tigger-tui?",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "          [y] yes      [n] no",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Centered rectangle with a fixed size, clamped to the frame
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
