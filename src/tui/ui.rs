use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use super::state::{AppScreen, AppState, Tab};
use crate::{KeyValueStore, MovieRecord};

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render<S: KeyValueStore>(f: &mut Frame, state: &AppState<S>) {
    match state.screen {
        AppScreen::List => render_list(f, state),
        AppScreen::Details => render_details(f, state),
    }
}

/// Render the tab bar.
fn render_tabs<S: KeyValueStore>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| match tab {
            Tab::Popular if state.loading => format!("{} (loading)", tab.title()),
            Tab::Favorites => format!("{} ({})", tab.title(), state.favorites.len()),
            _ => tab.title().to_string(),
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Movie Shelf "));
    f.render_widget(tabs, area);
}

/// Render the movie table of the current tab.
fn render_list<S: KeyValueStore>(f: &mut Frame, state: &AppState<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_tabs(f, chunks[0], state);

    let movies = state.rows();
    if movies.is_empty() {
        let message = match state.tab {
            Tab::Popular if state.loading => "Loading popular movies...",
            Tab::Popular => "No movies loaded. Press r to refresh.",
            Tab::Favorites => "No favorites yet. Press f on a movie to add it.",
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    } else {
        let visible_rows = calculate_visible_rows(chunks[1].height);
        let selected = state.selected_row();
        let scroll = (selected + 1).saturating_sub(visible_rows);

        let rows: Vec<Row> = movies
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible_rows)
            .map(|(i, movie)| {
                let style = if i == selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let marker = if state.is_favorite(movie.id) { "*" } else { "" };

                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(truncate(&movie.title, 40)),
                    Cell::from(movie.release_year().unwrap_or("-").to_string()),
                    Cell::from(format!("{:.1}", movie.vote_average)),
                    Cell::from(movie.original_language.clone()),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Min(20),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["", "Title", "Year", "Rating", "Lang"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.tab.title())),
        );
        f.render_widget(table, chunks[1]);
    }

    let help = Paragraph::new(
        "Up/Down: Select | Enter: Details | f: Favorite | Tab: Switch | r: Refresh | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
}

/// Render the selected movie.
fn render_details<S: KeyValueStore>(f: &mut Frame, state: &AppState<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_tabs(f, chunks[0], state);

    let movie = state.selected_movie();

    let info = match movie {
        Some(movie) => basic_info(movie, state),
        None => "No movie selected".to_string(),
    };
    let title = movie.map_or(" Movie ".to_string(), |m| format!(" {} ", m.title));
    let basic_info_widget = Paragraph::new(info)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(basic_info_widget, chunks[1]);

    let overview = movie
        .map(|m| m.overview.clone())
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| "No overview available".to_string());
    let overview_widget = Paragraph::new(overview)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    f.render_widget(overview_widget, chunks[2]);

    let help = Paragraph::new("f: Favorite | Esc: Back | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);

    render_status_bar(f, chunks[4], state);
}

fn basic_info<S: KeyValueStore>(movie: &MovieRecord, state: &AppState<S>) -> String {
    let favorite = if state.is_favorite(movie.id) {
        "yes"
    } else {
        "no"
    };
    format!(
        "Released: {}\nRating: {:.1}/10 | Language: {}\nFavorite: {}\nPoster: {}",
        if movie.release_date.is_empty() {
            "unknown"
        } else {
            movie.release_date.as_str()
        },
        movie.vote_average,
        movie.original_language,
        favorite,
        movie.poster_url(&state.feed.settings().image_base_url),
    )
}

/// Render the status bar at the bottom.
fn render_status_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, state: &AppState<S>) {
    let status_text = match state.status_message {
        Some(ref message) => format!(" {message}"),
        None => format!(" Catalog: {}", state.feed.settings().api_url),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn calculate_visible_rows(table_height: u16) -> usize {
    table_height.saturating_sub(4) as usize
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
