//! Text the UI shows for movies and views. Front ends render these strings;
//! the poster policy lives here so grid and detail views agree.

use crate::Movie;
use crate::controller::{SessionState, ViewState};

/// Image reference used for any movie without a resolved poster.
pub const PLACEHOLDER_POSTER: &str = "/placeholder.svg";
pub const EMPTY_LIST_MESSAGE: &str = "No movies found.";
pub const POPULAR_HEADING: &str = "Popular Movies";
pub const RECOMMENDATIONS_HEADING: &str = "Recommended Movies";

/// The movie's poster, or the placeholder when it has none.
pub fn poster_ref(movie: &Movie) -> &str {
    match movie.poster.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => PLACEHOLDER_POSTER,
    }
}

/// Rating as the backend sent it (`7.2`, `7`), or empty when absent.
pub fn rating_text(vote_average: Option<f64>) -> String {
    vote_average.map(|v| v.to_string()).unwrap_or_default()
}

/// Heading above the current view.
pub fn heading(view: &ViewState) -> String {
    match view {
        ViewState::Popular => POPULAR_HEADING.to_string(),
        ViewState::Search(query) => format!("Search Results for \"{query}\""),
        ViewState::Details(movie) => movie.title.clone(),
    }
}

/// Message shown in place of the grid, if any: list views with no movies
/// show [`EMPTY_LIST_MESSAGE`]. An empty recommendation grid shows nothing.
pub fn list_body(state: &SessionState) -> Option<&'static str> {
    match state.view {
        ViewState::Details(_) => None,
        _ if state.movies.is_empty() => Some(EMPTY_LIST_MESSAGE),
        _ => None,
    }
}

pub fn release_date_line(movie: &Movie) -> String {
    format!(
        "Release Date: {}",
        movie.release_date.as_deref().unwrap_or_default()
    )
}

pub fn rating_line(movie: &Movie) -> String {
    format!("Rating: {}/10", rating_text(movie.vote_average))
}

/// One grid card.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster: String,
    pub rating: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster: poster_ref(movie).to_string(),
            rating: rating_text(movie.vote_average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_posters_use_placeholder() {
        assert_eq!(poster_ref(&Movie::new(1, "A")), PLACEHOLDER_POSTER);
        let empty = Movie::new(1, "A").with_poster(Some(String::new()));
        assert_eq!(poster_ref(&empty), PLACEHOLDER_POSTER);
        let real = Movie::new(1, "A").with_poster(Some("x.jpg".into()));
        assert_eq!(poster_ref(&real), "x.jpg");
    }

    #[test]
    fn rating_formats_like_the_wire_value() {
        assert_eq!(rating_text(Some(7.2)), "7.2");
        assert_eq!(rating_text(Some(7.0)), "7");
        assert_eq!(rating_text(Some(6.25)), "6.25");
        assert_eq!(rating_text(None), "");
    }

    #[test]
    fn headings() {
        assert_eq!(heading(&ViewState::Popular), "Popular Movies");
        assert_eq!(
            heading(&ViewState::Search("batman".into())),
            "Search Results for \"batman\""
        );
        assert_eq!(heading(&ViewState::Details(Movie::new(1, "Heat"))), "Heat");
    }

    #[test]
    fn detail_lines() {
        let mut movie = Movie::new(1, "Heat");
        movie.release_date = Some("1995-12-15".into());
        movie.vote_average = Some(7.9);
        assert_eq!(release_date_line(&movie), "Release Date: 1995-12-15");
        assert_eq!(rating_line(&movie), "Rating: 7.9/10");
    }

    #[test]
    fn empty_recommendations_have_no_message() {
        let state = SessionState {
            view: ViewState::Details(Movie::new(1, "A")),
            ..SessionState::default()
        };
        assert_eq!(list_body(&state), None);
    }
}
