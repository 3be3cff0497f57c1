use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::styles;

const KEYS: &[(&str, &str)] = &[
    ("1 / 2 / 3", "Login / Projects / Help"),
    ("Left/Right", "Previous / next tab"),
    ("Up/Down", "Move selection"),
    ("PgUp/PgDn", "Scroll by page"),
    ("Enter", "Open selected project"),
    ("r", "Refresh project list"),
    ("o", "Log out"),
    ("Esc", "Close overlay / back to list"),
    ("q", "Quit"),
];

/// Render the Help tab: key bindings
pub fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Key bindings", styles::title_style())),
        Line::from(""),
    ];

    for (key, desc) in KEYS {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<12}", key), styles::help_key_style()),
            Span::styled(*desc, styles::help_desc_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  tigger-tui v{}", env!("CARGO_PKG_VERSION")),
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
