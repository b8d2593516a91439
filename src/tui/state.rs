use crate::{FavoritesRepository, JsonFileStore, KeyValueStore, MovieId, MovieRecord, PopularFeed};

/// Represents which list is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    /// Popular movies from the catalog.
    Popular,
    /// Locally stored favorites.
    Favorites,
}

impl Tab {
    pub(crate) const ALL: [Tab; 2] = [Tab::Popular, Tab::Favorites];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Popular => "Popular",
            Tab::Favorites => "Favorites",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Popular => 0,
            Tab::Favorites => 1,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Tab::Popular => Tab::Favorites,
            Tab::Favorites => Tab::Popular,
        }
    }
}

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Table of movies for the current tab.
    List,
    /// Details of the selected movie.
    Details,
}

/// Main application state.
pub struct AppState<S: KeyValueStore = JsonFileStore> {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Current tab.
    pub(crate) tab: Tab,
    /// Loader for the popular list.
    pub(crate) feed: PopularFeed,
    /// Last popular list delivered by the feed.
    pub(crate) popular: Vec<MovieRecord>,
    /// Favorites as last read from the repository.
    pub(crate) favorites: Vec<MovieRecord>,
    /// Persistent favorites.
    pub(crate) repository: FavoritesRepository<S>,
    /// Selected row in the popular table.
    pub(crate) popular_row: usize,
    /// Selected row in the favorites table.
    pub(crate) favorites_row: usize,
    /// Is a popular fetch in flight?
    pub(crate) loading: bool,
    /// Outcome of the last user action.
    pub(crate) status_message: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl<S: KeyValueStore> AppState<S> {
    /// Create the application state. Favorites are read right away; the
    /// popular list arrives once [`refresh_popular`](Self::refresh_popular)
    /// has been called and the feed delivers.
    pub fn new(feed: PopularFeed, repository: FavoritesRepository<S>) -> Self {
        let favorites = repository.list();
        Self {
            screen: AppScreen::List,
            tab: Tab::Popular,
            feed,
            popular: Vec::new(),
            favorites,
            repository,
            popular_row: 0,
            favorites_row: 0,
            loading: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Movies shown in the current tab.
    pub(crate) fn rows(&self) -> &[MovieRecord] {
        match self.tab {
            Tab::Popular => &self.popular,
            Tab::Favorites => &self.favorites,
        }
    }

    pub(crate) fn selected_row(&self) -> usize {
        match self.tab {
            Tab::Popular => self.popular_row,
            Tab::Favorites => self.favorites_row,
        }
    }

    fn selected_row_mut(&mut self) -> &mut usize {
        match self.tab {
            Tab::Popular => &mut self.popular_row,
            Tab::Favorites => &mut self.favorites_row,
        }
    }

    pub(crate) fn selected_movie(&self) -> Option<&MovieRecord> {
        self.rows().get(self.selected_row())
    }

    pub(crate) fn select_previous(&mut self) {
        let row = self.selected_row_mut();
        *row = row.saturating_sub(1);
    }

    pub(crate) fn select_next(&mut self) {
        let last = self.rows().len().saturating_sub(1);
        let row = self.selected_row_mut();
        if *row < last {
            *row += 1;
        }
    }

    pub(crate) fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.screen = AppScreen::List;
    }

    /// Whether `id` is among the favorites currently displayed.
    pub(crate) fn is_favorite(&self, id: MovieId) -> bool {
        self.favorites.iter().any(|m| m.id == id)
    }

    /// Ask the feed for a fresh popular list.
    pub fn refresh_popular(&mut self) {
        if self.feed.refresh() {
            self.set_status("Refreshing popular movies".to_string());
        }
        self.loading = self.feed.is_loading();
    }

    /// Replace the popular list with a freshly delivered one.
    pub(crate) fn publish_popular(&mut self, movies: Vec<MovieRecord>) {
        self.popular = movies;
        self.popular_row = self.popular_row.min(self.popular.len().saturating_sub(1));
        self.loading = false;
    }

    /// Re-read favorites from the repository.
    pub(crate) fn reload_favorites(&mut self) {
        self.favorites = self.repository.list();
        self.favorites_row = self
            .favorites_row
            .min(self.favorites.len().saturating_sub(1));
    }

    /// Favorite the selected movie, or unfavorite it if it already is one.
    pub(crate) fn toggle_selected_favorite(&mut self) {
        let Some(movie) = self.selected_movie().cloned() else {
            return;
        };

        let message = if self.repository.contains(movie.id) {
            if self.repository.unfavorite(movie.id) {
                format!("Removed \"{}\" from favorites", movie.title)
            } else {
                format!("Could not remove \"{}\"", movie.title)
            }
        } else if self.repository.favorite(&movie) {
            format!("Added \"{}\" to favorites", movie.title)
        } else {
            format!("Could not add \"{}\"", movie.title)
        };

        self.reload_favorites();
        self.set_status(message);
    }

    /// Clear any status message.
    pub(crate) fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Set a status message.
    pub(crate) fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
