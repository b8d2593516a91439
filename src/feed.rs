//! Background loading of the popular list.
//!
//! The fetch runs on a worker thread; its result is handed back over a
//! channel and only ever published by whoever calls [`PopularFeed::poll`],
//! which is the UI loop.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use crate::client;
use crate::config::CatalogSettings;
use crate::models::MovieRecord;

/// What [`PopularFeed::poll`] observed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    /// No fetch has been started since the last result.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch finished; the movies should replace the displayed list.
    Ready(Vec<MovieRecord>),
    /// The fetch finished without a result. The cause has been logged.
    Failed,
}

/// Single-request loader for the popular list.
#[derive(Debug)]
pub struct PopularFeed {
    settings: CatalogSettings,
    inflight: Option<Receiver<Vec<MovieRecord>>>,
}

impl PopularFeed {
    pub fn new(settings: CatalogSettings) -> Self {
        Self {
            settings,
            inflight: None,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.inflight.is_some()
    }

    /// Start fetching unless a fetch is already in flight.
    ///
    /// Returns `true` if a new fetch was started.
    pub fn refresh(&mut self) -> bool {
        if self.inflight.is_some() {
            debug!("popular fetch already in flight");
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let settings = self.settings.clone();
        let spawned = thread::Builder::new()
            .name("popular-fetch".into())
            .spawn(move || match client::fetch_popular(&settings) {
                Ok(movies) => {
                    info!(count = movies.len(), "fetched popular movies");
                    // The receiver is gone only if the feed was dropped.
                    let _ = tx.send(movies);
                }
                Err(e) => warn!(error = %e, "failed to fetch popular movies"),
            });

        match spawned {
            Ok(_) => {
                self.inflight = Some(rx);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to start popular fetch");
                false
            }
        }
    }

    /// Check for a finished fetch without blocking.
    pub fn poll(&mut self) -> FeedUpdate {
        let Some(rx) = &self.inflight else {
            return FeedUpdate::Idle;
        };
        match rx.try_recv() {
            Ok(movies) => {
                self.inflight = None;
                FeedUpdate::Ready(movies)
            }
            Err(TryRecvError::Empty) => FeedUpdate::Loading,
            Err(TryRecvError::Disconnected) => {
                self.inflight = None;
                FeedUpdate::Failed
            }
        }
    }
}
