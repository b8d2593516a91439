use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState, Tab};
use crate::KeyValueStore;

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event<S: KeyValueStore>(event: Event, state: &mut AppState<S>) {
    if let Event::Key(key_event) = event {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if key_event.code == KeyCode::Char('q') && key_event.modifiers == KeyModifiers::NONE {
            state.should_quit = true;
            return;
        }

        match state.screen {
            AppScreen::List => handle_list(key_event, state),
            AppScreen::Details => handle_details(key_event, state),
        }
    }
}

fn handle_list<S: KeyValueStore>(event: KeyEvent, state: &mut AppState<S>) {
    match event.code {
        KeyCode::Up | KeyCode::Char('k') => state.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Tab | KeyCode::BackTab => state.switch_tab(state.tab.next()),
        KeyCode::Char('1') => state.switch_tab(Tab::Popular),
        KeyCode::Char('2') => state.switch_tab(Tab::Favorites),
        KeyCode::Enter => {
            if state.selected_movie().is_some() {
                state.screen = AppScreen::Details;
                state.clear_status();
            }
        }
        KeyCode::Char('f') => state.toggle_selected_favorite(),
        KeyCode::Char('r') => state.refresh_popular(),
        KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_details<S: KeyValueStore>(event: KeyEvent, state: &mut AppState<S>) {
    match event.code {
        KeyCode::Esc | KeyCode::Backspace => {
            state.screen = AppScreen::List;
        }
        KeyCode::Char('f') => {
            state.toggle_selected_favorite();
            // The movie just left the favorites list; its details are gone with it.
            if state.tab == Tab::Favorites {
                state.screen = AppScreen::List;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogSettings, FavoritesRepository, MemoryStore, MovieRecord, PopularFeed};

    fn movie(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.into(),
            poster_path: format!("/{id}.jpg"),
            overview: String::new(),
            release_date: "2023-07-19".into(),
            vote_average: 7.1,
            original_language: "en".into(),
        }
    }

    fn app() -> AppState<MemoryStore> {
        let mut state = AppState::new(
            PopularFeed::new(CatalogSettings::default()),
            FavoritesRepository::new(MemoryStore::new()),
        );
        state.publish_popular(vec![movie(1, "Barbie"), movie(2, "Oppenheimer")]);
        state
    }

    fn press(state: &mut AppState<MemoryStore>, code: KeyCode) {
        handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), state);
    }

    #[test]
    fn favorite_key_toggles_selected_movie() {
        let mut state = app();
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('f'));

        assert!(state.repository.contains(2));
        assert_eq!(state.favorites, vec![movie(2, "Oppenheimer")]);
        assert!(state.is_favorite(2));

        press(&mut state, KeyCode::Char('f'));
        assert!(!state.repository.contains(2));
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn favorites_tab_lists_stored_movies() {
        let mut state = app();
        press(&mut state, KeyCode::Char('f'));
        press(&mut state, KeyCode::Tab);

        assert_eq!(state.tab, Tab::Favorites);
        assert_eq!(state.rows(), &[movie(1, "Barbie")]);

        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.tab, Tab::Popular);
    }

    #[test]
    fn unfavorite_from_details_returns_to_list() {
        let mut state = app();
        press(&mut state, KeyCode::Char('f'));
        press(&mut state, KeyCode::Char('2'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.screen, AppScreen::Details);

        press(&mut state, KeyCode::Char('f'));
        assert_eq!(state.screen, AppScreen::List);
        assert!(state.rows().is_empty());
    }

    #[test]
    fn enter_on_empty_list_stays_on_list() {
        let mut state = app();
        press(&mut state, KeyCode::Char('2'));
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.screen, AppScreen::List);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = app();
        press(&mut state, KeyCode::Up);
        assert_eq!(state.selected_row(), 0);

        for _ in 0..5 {
            press(&mut state, KeyCode::Down);
        }
        assert_eq!(state.selected_row(), 1);
    }

    #[test]
    fn quit_keys() {
        let mut state = app();
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);

        let mut state = app();
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Esc);
        assert!(!state.should_quit);
        press(&mut state, KeyCode::Esc);
        assert!(state.should_quit);
    }
}
