use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, Focus};
use crate::models::ProjectState;
use crate::ui::styles;
use crate::utils::{format_optional, truncate_string};

/// Render the Projects tab: project table with a detail panel
pub fn render_projects(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_project_table(frame, app, chunks[0]);
    render_project_detail(frame, app, chunks[1]);
}

fn render_project_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Created by"),
        Cell::from("Size"),
        Cell::from("Right"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let style = if i == app.project_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(truncate_string(project.name(), 28)),
                Cell::from(format_optional(&project.created_by, "-")),
                Cell::from(project.parameters.display_sizes()),
                Cell::from(format_optional(&project.user_right, "-")),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(8),
    ];

    let title = format!(" Projects ({}) - [r]efresh [Enter] open ", app.projects.len());

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(focused)),
    );

    let mut state = TableState::default();
    state.select(Some(app.project_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_project_detail(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Detail);

    let lines = match app.selected_project() {
        Some(project) => {
            let params = &project.parameters;
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Name:     ", styles::muted_style()),
                    Span::styled(params.project_name.clone(), styles::highlight_style()),
                ]),
                Line::from(vec![
                    Span::styled("Created:  ", styles::muted_style()),
                    Span::raw(project.created_display()),
                ]),
                Line::from(vec![
                    Span::styled("Language: ", styles::muted_style()),
                    Span::raw(format_optional(&params.language, "-")),
                ]),
                Line::from(vec![
                    Span::styled("Source:   ", styles::muted_style()),
                    Span::raw(format_optional(&params.filename, "-")),
                ]),
                Line::from(vec![
                    Span::styled("Columns:  ", styles::muted_style()),
                    Span::raw(format!(
                        "text={} id={}",
                        format_optional(&params.col_text, "-"),
                        format_optional(&params.col_id, "-")
                    )),
                ]),
                Line::from(""),
            ];

            match app.selected_project_state() {
                Some(state) => lines.extend(state_lines(state)),
                None => lines.push(Line::from(Span::styled(
                    "Fetching state...",
                    styles::muted_style(),
                ))),
            }

            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No project selected",
                styles::muted_style(),
            )),
        ],
    };

    let title = match &app.active_project {
        Some(name) => format!(" Project {} ", truncate_string(name, 30)),
        None => " Detail ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn state_lines(state: &ProjectState) -> Vec<Line<'static>> {
    let schemes = state.scheme_names();
    let features = state.feature_names();

    vec![
        Line::from(Span::styled("Live state", styles::title_style())),
        Line::from(vec![
            Span::styled("Schemes:  ", styles::muted_style()),
            Span::raw(if schemes.is_empty() {
                "none".to_string()
            } else {
                schemes.join(", ")
            }),
        ]),
        Line::from(vec![
            Span::styled("Features: ", styles::muted_style()),
            Span::raw(if features.is_empty() {
                "none".to_string()
            } else {
                features.join(", ")
            }),
        ]),
    ]
}
