//! Fan-out / fan-in over per-item async work.

use std::future::Future;

use futures_util::future::join_all;

use crate::{Movie, MovieApi};

/// Run `f` on every item concurrently and wait for all of them.
///
/// The output has the same length and order as the input regardless of the
/// order in which the futures finish. Nothing is cancelled early: a slow
/// item holds up the whole join.
pub async fn join_all_ordered<T, U, F, Fut>(items: Vec<T>, f: F) -> Vec<U>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = U>,
{
    join_all(items.into_iter().map(f)).await
}

/// Fill in missing posters on `movies` via [`MovieApi::fetch_poster`].
///
/// Movies that already carry a poster are passed through untouched. A failed
/// lookup leaves that one movie with `poster: None`.
pub async fn backfill_posters<A>(api: &A, movies: Vec<Movie>) -> Vec<Movie>
where
    A: MovieApi + ?Sized,
{
    let missing = movies.iter().filter(|m| !m.has_poster()).count();
    if missing == 0 {
        return movies;
    }
    tracing::debug!(total = movies.len(), missing, "backfilling posters");

    join_all_ordered(movies, move |movie| async move {
        if movie.has_poster() {
            return movie;
        }
        let poster = api.fetch_poster(movie.id).await;
        movie.with_poster(poster)
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{Instant, sleep};

    use super::*;
    use crate::api::mock::{Call, MockApi};

    #[tokio::test(start_paused = true)]
    async fn output_follows_input_order_not_completion_order() {
        let start = Instant::now();
        let out = join_all_ordered(vec![30u64, 10, 20], |ms| async move {
            sleep(Duration::from_millis(ms)).await;
            ms * 2
        })
        .await;

        assert_eq!(out, vec![60, 20, 40]);
        // Concurrent: bounded by the slowest item, not the sum.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(30));
        assert!(elapsed < Duration::from_millis(60));
    }

    #[tokio::test]
    async fn empty_input_gives_empty_output() {
        let out: Vec<u8> = join_all_ordered(Vec::<u8>::new(), |x| async move { x }).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failures_do_not_abort_siblings() {
        let out = join_all_ordered(vec![1, 2, 3, 4], |n| async move {
            if n % 2 == 0 { None } else { Some(n) }
        })
        .await;
        assert_eq!(out, vec![Some(1), None, Some(3), None]);
    }

    #[tokio::test]
    async fn only_movies_without_posters_are_looked_up() {
        let api = MockApi::new().with_poster(2, "b.jpg").with_poster(3, "c.jpg");
        let movies = vec![
            Movie::new(1, "A").with_poster(Some("a.jpg".into())),
            Movie::new(2, "B"),
            Movie::new(3, "C").with_poster(Some(String::new())),
        ];

        let out = backfill_posters(&api, movies).await;

        let posters: Vec<_> = out.iter().map(|m| m.poster.as_deref()).collect();
        assert_eq!(posters, vec![Some("a.jpg"), Some("b.jpg"), Some("c.jpg")]);
        assert_eq!(api.calls(), vec![Call::Poster(2), Call::Poster(3)]);
    }

    #[tokio::test]
    async fn failed_lookup_leaves_none_for_that_movie_only() {
        let api = MockApi::new().with_poster(1, "a.jpg").with_poster(3, "c.jpg");
        let movies = vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")];

        let out = backfill_posters(&api, movies).await;

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].poster.as_deref(), Some("a.jpg"));
        assert_eq!(out[1].poster, None);
        assert_eq!(out[2].poster.as_deref(), Some("c.jpg"));
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_run_concurrently_and_keep_identity() {
        let api = MockApi::new()
            .with_poster(1, "a.jpg")
            .with_poster(2, "b.jpg")
            .with_poster(3, "c.jpg")
            .with_poster_delay(1, Duration::from_millis(300))
            .with_poster_delay(2, Duration::from_millis(100))
            .with_poster_delay(3, Duration::from_millis(200));
        let mut first = Movie::new(1, "A");
        first.vote_average = Some(8.1);
        first.overview = Some("first".into());
        let movies = vec![first.clone(), Movie::new(2, "B"), Movie::new(3, "C")];

        let start = Instant::now();
        let out = backfill_posters(&api, movies).await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(600));
        let ids: Vec<u64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(out[0], first.with_poster(Some("a.jpg".into())));
    }

    #[tokio::test]
    async fn nothing_missing_means_no_calls() {
        let api = MockApi::new();
        let movies = vec![Movie::new(1, "A").with_poster(Some("a.jpg".into()))];
        let out = backfill_posters(&api, movies.clone()).await;
        assert_eq!(out, movies);
        assert!(api.calls().is_empty());
    }
}
