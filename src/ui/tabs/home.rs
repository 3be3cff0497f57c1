use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::nav::{self, SessionIndicator};
use crate::ui::styles;

/// Render the Home tab: connection info and a hint on where to go next
pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Active Tigger",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "  Collaborative text annotation",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Server: ", styles::muted_style()),
            Span::styled(app.api.base_url().to_string(), styles::list_item_style()),
        ]),
    ];

    match nav::session_indicator(&app.session) {
        SessionIndicator::LoggedIn { username } => {
            lines.push(Line::from(vec![
                Span::styled("  Logged as ", styles::muted_style()),
                Span::styled(username, styles::success_style()),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Press ", styles::muted_style()),
                Span::styled("[2]", styles::help_key_style()),
                Span::styled(" to browse your projects.", styles::muted_style()),
            ]));
        }
        SessionIndicator::LoggedOut => {
            lines.push(Line::from(Span::styled(
                "  Not logged in",
                styles::muted_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Press ", styles::muted_style()),
                Span::styled("[1]", styles::help_key_style()),
                Span::styled(" to connect to the service.", styles::muted_style()),
            ]));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
