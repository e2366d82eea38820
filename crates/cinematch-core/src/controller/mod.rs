//! View-state controller.
//!
//! Owns the session state and turns user triggers (initial load / home,
//! search submit, movie select, back) into calls on a [`MovieApi`]. State is
//! published through a [`tokio::sync::watch`] channel, and every transition
//! publishes a whole new [`SessionState`] value: observers never see a
//! half-applied update.


use tokio::sync::watch;

use crate::fanout::backfill_posters;
use crate::{Movie, MovieApi};

/// Which screen is shown. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Popular,
    Search(String),
    Details(Movie),
}

/// What the movie list currently holds: the popular list or the results of
/// a search. Back from the details view returns here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    #[default]
    Popular,
    Search(String),
}

impl From<ListView> for ViewState {
    fn from(list: ListView) -> Self {
        match list {
            ListView::Popular => Self::Popular,
            ListView::Search(query) => Self::Search(query),
        }
    }
}

/// Everything the UI renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub view: ViewState,
    pub movies: Vec<Movie>,
    pub list_view: ListView,
    pub selected: Option<Movie>,
    pub recommendations: Vec<Movie>,
    /// While set, `movies` and `recommendations` still hold the previous
    /// completed fetch.
    pub loading: bool,
    pub search_query: String,
}

impl SessionState {
    /// The list the current view shows: recommendations on the details
    /// screen, the movie list otherwise.
    pub fn visible_movies(&self) -> &[Movie] {
        match self.view {
            ViewState::Details(_) => &self.recommendations,
            _ => &self.movies,
        }
    }
}

pub struct Controller<A> {
    api: A,
    state: watch::Sender<SessionState>,
}

impl<A: MovieApi> Controller<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn publish(&self, next: SessionState) {
        self.state.send_replace(next);
    }

    /// Mark loading without touching any displayed content.
    fn begin_loading(&self, mutate: impl FnOnce(&mut SessionState)) -> SessionState {
        let mut next = self.state();
        next.loading = true;
        mutate(&mut next);
        self.publish(next.clone());
        next
    }

    /// Startup and "home": fetch the popular list and show it.
    pub async fn load_popular(&mut self) {
        tracing::debug!("loading popular movies");
        let pending = self.begin_loading(|_| {});

        let movies = self.api.fetch_popular().await;

        self.publish(SessionState {
            view: ViewState::Popular,
            movies,
            list_view: ListView::Popular,
            loading: false,
            ..pending
        });
    }

    /// Search for `query`. Blank queries are ignored outright: no request,
    /// no state change.
    pub async fn submit_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            tracing::debug!("ignoring blank search");
            return;
        }
        tracing::debug!(query, "searching");
        let pending = self.begin_loading(|s| s.search_query = query.to_string());

        let movies = self.api.search(query).await;

        self.publish(SessionState {
            view: ViewState::Search(query.to_string()),
            movies,
            list_view: ListView::Search(query.to_string()),
            selected: None,
            loading: false,
            ..pending
        });
    }

    /// Open `movie`: fetch its recommendations, backfill their posters, then
    /// show the details view. The selection is published before any fetch.
    pub async fn select_movie(&mut self, movie: Movie) {
        tracing::debug!(id = movie.id, title = %movie.title, "selecting movie");
        let pending = self.begin_loading(|s| s.selected = Some(movie.clone()));

        let recs = self.api.recommend(&movie.title).await;
        let recommendations = backfill_posters(&self.api, recs).await;

        self.publish(SessionState {
            view: ViewState::Details(movie),
            recommendations,
            loading: false,
            ..pending
        });
    }

    /// Leave the details view for the list the movie list came from.
    /// No-op on any other view.
    pub fn back(&mut self) {
        let current = self.state();
        if !matches!(current.view, ViewState::Details(_)) {
            return;
        }
        self.publish(SessionState {
            view: current.list_view.clone().into(),
            ..current
        });
    }
}
