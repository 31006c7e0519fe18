use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::state::{AppScreen, AppState};
use crate::models::{DisplayProject, SwipeAction};

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        AppScreen::LoadingDataset => render_loading(f, state, "Loading projects"),
        AppScreen::Swiping => render_swiping(f, state),
        AppScreen::LikedGallery => render_gallery(f, state),
        AppScreen::Exhausted => render_exhausted(f, state),
    }
}

/// Render the loading screen.
fn render_loading(f: &mut Frame, state: &AppState, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = Paragraph::new("HackSwipe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let loading = Paragraph::new(format!("{}...", message))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, chunks[1]);

    render_status_bar(f, chunks[3], state);
}

/// Render the swiping screen: stats bar, the current card, key help.
fn render_swiping(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let remaining = state
        .session
        .queue()
        .len()
        .saturating_sub(state.session.position());
    let stats = format!(
        "HackSwipe | Liked {} | Passed {} | {} left",
        state.session.liked().len(),
        state.session.passed().len(),
        remaining
    );
    let top_bar = Paragraph::new(stats)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(top_bar, chunks[0]);

    if let Some(project) = state.session.current() {
        render_card(f, chunks[1], project, state.session.pending_direction());
    }

    let help = Paragraph::new(
        "↑/→ or drag up: Like | ↓/← or drag down: Skip | g: Liked | s: Save | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
}

/// Render a single project card.
fn render_card(f: &mut Frame, area: Rect, project: &DisplayProject, pending: Option<SwipeAction>) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(direction) = pending {
        let overlay = match direction {
            SwipeAction::Like => Span::styled(
                "♥ LIKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            SwipeAction::Pass => Span::styled(
                "✕ SKIP",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(overlay).alignment(Alignment::Center));
        lines.push(Line::default());
    }

    if let Some(prize) = &project.prize {
        lines.push(Line::from(Span::styled(
            prize.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    lines.push(Line::from(project.summary.clone()));
    lines.push(Line::default());

    if let Some(tech) = &project.tech_stack {
        lines.push(Line::from(vec![
            Span::styled("Built with: ", Style::default().fg(Color::DarkGray)),
            Span::styled(tech.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let mut meta: Vec<&str> = Vec::new();
    if let Some(team) = &project.team {
        meta.push(team);
    }
    if let Some(date) = &project.date {
        meta.push(date);
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join(" · "),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::default());

    match project.video_id() {
        Some(_) => {
            if let Some(url) = &project.youtube {
                lines.push(Line::from(vec![
                    Span::styled("▶ Demo video: ", Style::default().fg(Color::Red)),
                    Span::raw(url.clone()),
                ]));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No demo video",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    for (label, link) in [
        ("GitHub", &project.github),
        ("Live demo", &project.demo),
        ("Devpost", &project.project_url),
    ] {
        if let Some(url) = link {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(url.clone()),
            ]));
        }
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", project.title))
                .border_style(Style::default().fg(Color::Magenta)),
        );
    f.render_widget(card, area);
}

/// Render the liked gallery table.
fn render_gallery(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let liked = state.session.liked();

    let title = Paragraph::new(format!("Liked ({})", liked.len()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    if liked.is_empty() {
        let empty = Paragraph::new("No projects liked yet. Start swiping!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    } else {
        let visible_row_limit = chunks[1].height.saturating_sub(3) as usize;
        let visible_start = state
            .gallery_selected
            .saturating_sub(visible_row_limit.saturating_sub(1));

        let rows: Vec<Row> = liked
            .iter()
            .enumerate()
            .skip(visible_start)
            .take(visible_row_limit.max(1))
            .map(|(i, p)| {
                let style = if i == state.gallery_selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(truncate(&p.title, 28)),
                    Cell::from(truncate(p.prize.as_deref().unwrap_or(""), 28)),
                    Cell::from(truncate(p.tech_stack.as_deref().unwrap_or(""), 30)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(30),
                Constraint::Length(30),
                Constraint::Min(20),
            ],
        )
        .header(
            Row::new(vec!["Title", "Prize", "Built with"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(" Liked "));
        f.render_widget(table, chunks[1]);
    }

    let help = Paragraph::new("↑/↓: Move | Esc: Back | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
}

/// Render the end screen with totals and restart options.
fn render_exhausted(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = Paragraph::new("You've seen all projects!")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let totals = Paragraph::new(format!(
        "You liked {} out of {} projects",
        state.session.liked().len(),
        state.session.queue().len()
    ))
    .style(Style::default().fg(Color::Green))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(totals, chunks[1]);

    let help = Paragraph::new("g: View liked | r: Start over | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[4], state);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut status_text = if let Some(ref error) = state.error_message {
        format!(" Error: {}", error)
    } else if let Some(ref status) = state.status_message {
        format!(" {}", status)
    } else if let Some(ref user) = state.identity {
        format!(" Signed in as {}", user.email.as_deref().unwrap_or(&user.id))
    } else {
        " Local session".to_string()
    };
    if state.sync.in_flight() > 0 {
        status_text.push_str(" (syncing...)");
    }

    let style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

/// Truncate a cell value to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
