//! Engagement counters of a single film.
//!
//! Every operation loads the film, applies one pure mutation from
//! [`catalog_core::film::Engagement`] and writes back only the affected
//! field. A missing film, an out-of-range score and a decrement at zero
//! all report `false` without writing.
//!
//! The load and the write are separate store calls, so two concurrent
//! bumps of the same counter can lose one of them.

use catalog_core::film::Counter;
use catalog_db::repositories::FilmRepo;
use catalog_db::{Db, StoreError};

/// Stateless façade over film engagement counters.
pub struct FilmInteractor;

impl FilmInteractor {
    /// Record a rating in `[1, 5]` and persist the new running mean.
    pub async fn add_score(db: &Db, film_id: &str, score: u32) -> Result<bool, StoreError> {
        let Some(mut film) = FilmRepo::find_by_id(db, film_id).await? else {
            return Ok(false);
        };
        if !film.engagement.add_score(score) {
            return Ok(false);
        }
        FilmRepo::update_score(
            db,
            film_id,
            film.engagement.score,
            film.engagement.score_count,
        )
        .await
    }

    pub async fn incr(db: &Db, film_id: &str, counter: Counter) -> Result<bool, StoreError> {
        let Some(mut film) = FilmRepo::find_by_id(db, film_id).await? else {
            return Ok(false);
        };
        film.engagement.incr(counter);
        FilmRepo::update_counter(db, film_id, counter, film.engagement.get(counter)).await
    }

    pub async fn decr(db: &Db, film_id: &str, counter: Counter) -> Result<bool, StoreError> {
        let Some(mut film) = FilmRepo::find_by_id(db, film_id).await? else {
            return Ok(false);
        };
        if !film.engagement.decr(counter) {
            return Ok(false);
        }
        FilmRepo::update_counter(db, film_id, counter, film.engagement.get(counter)).await
    }

    // ----- Named operations -----

    pub async fn incr_views_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::incr(db, film_id, Counter::Views).await
    }

    pub async fn incr_share_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::incr(db, film_id, Counter::Shares).await
    }

    pub async fn incr_watched_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::incr(db, film_id, Counter::Watched).await
    }

    pub async fn decr_watched_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::decr(db, film_id, Counter::Watched).await
    }

    pub async fn incr_will_watch_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::incr(db, film_id, Counter::WillWatch).await
    }

    pub async fn decr_will_watch_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::decr(db, film_id, Counter::WillWatch).await
    }

    pub async fn incr_not_interesting_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::incr(db, film_id, Counter::NotInteresting).await
    }

    pub async fn decr_not_interesting_count(db: &Db, film_id: &str) -> Result<bool, StoreError> {
        Self::decr(db, film_id, Counter::NotInteresting).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use catalog_db::models::film::CreateFilm;

    use super::*;

    async fn seeded() -> (Db, String) {
        let db = Db::memory();
        let film = FilmRepo::create(
            &db,
            CreateFilm {
                name: "Solaris".into(),
                banner: "solaris.png".into(),
                description: "Ocean".into(),
                country: "USSR".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (db, film.id)
    }

    async fn engagement(db: &Db, id: &str) -> catalog_core::film::Engagement {
        FilmRepo::find_by_id(db, id).await.unwrap().unwrap().engagement
    }

    #[tokio::test]
    async fn missing_film_reports_false() {
        let db = Db::memory();
        assert!(!FilmInteractor::incr_views_count(&db, "nope").await.unwrap());
        assert!(!FilmInteractor::add_score(&db, "nope", 3).await.unwrap());
    }

    #[tokio::test]
    async fn increments_persist_only_their_counter() {
        let (db, id) = seeded().await;
        assert!(FilmInteractor::incr_views_count(&db, &id).await.unwrap());
        assert!(FilmInteractor::incr_views_count(&db, &id).await.unwrap());
        assert!(FilmInteractor::incr_share_count(&db, &id).await.unwrap());

        let e = engagement(&db, &id).await;
        assert_eq!(e.view_count, 2);
        assert_eq!(e.share_count, 1);
        assert_eq!(e.watched_count, 0);
    }

    #[tokio::test]
    async fn decrement_floors_at_zero() {
        let (db, id) = seeded().await;
        assert!(!FilmInteractor::decr_watched_count(&db, &id).await.unwrap());
        assert!(FilmInteractor::incr_watched_count(&db, &id).await.unwrap());
        assert!(FilmInteractor::decr_watched_count(&db, &id).await.unwrap());
        assert!(!FilmInteractor::decr_watched_count(&db, &id).await.unwrap());
        assert_eq!(engagement(&db, &id).await.watched_count, 0);
    }

    #[tokio::test]
    async fn scores_keep_a_running_mean() {
        let (db, id) = seeded().await;
        for score in [1, 2, 4, 4, 3, 5] {
            assert!(FilmInteractor::add_score(&db, &id, score).await.unwrap());
        }
        assert!(!FilmInteractor::add_score(&db, &id, 0).await.unwrap());
        assert!(!FilmInteractor::add_score(&db, &id, 6).await.unwrap());

        let e = engagement(&db, &id).await;
        assert_eq!(e.score_count, 6);
        assert!((e.score - 19.0 / 6.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn cancelled_handle_surfaces_error() {
        let (db, id) = seeded().await;
        let scoped = db.child();
        scoped.cancel_token().cancel();
        let err = FilmInteractor::incr_views_count(&scoped, &id).await.unwrap_err();
        assert_matches!(err, StoreError::Cancelled);
    }
}
