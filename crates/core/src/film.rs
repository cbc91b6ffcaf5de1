//! Film domain rules: kinds, release types, age limits and engagement
//! counters.
//!
//! Counter mutations are pure; persisting the affected field is the
//! caller's job.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

define_code_enum! {
    /// Whether a film is a feature or a serial.
    FilmKind {
        #[default]
        Film = 0,
        Serial = 1,
    }
}

define_code_enum! {
    /// Distribution stage of a film.
    ReleaseType {
        #[default]
        Release = 0,
        Premiere = 1,
        Screening = 2,
    }
}

// ---------------------------------------------------------------------------
// Age limit
// ---------------------------------------------------------------------------

/// Highest age limit a film can carry.
pub const MAX_AGE_LIMIT: u32 = 18;

/// Clamp an age limit into `[0, MAX_AGE_LIMIT]`.
pub fn clamp_age_limit(value: u32) -> u32 {
    value.min(MAX_AGE_LIMIT)
}

// ---------------------------------------------------------------------------
// Reference lists
// ---------------------------------------------------------------------------

/// Film list fields that hold plain opaque values with set semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmList {
    Images,
    Articles,
    Trailers,
    Tizers,
    Genres,
    Nominations,
}

impl FilmList {
    pub const ALL: [FilmList; 6] = [
        FilmList::Images,
        FilmList::Articles,
        FilmList::Trailers,
        FilmList::Tizers,
        FilmList::Genres,
        FilmList::Nominations,
    ];

    /// Document field name of the list.
    pub fn field(self) -> &'static str {
        match self {
            FilmList::Images => "images",
            FilmList::Articles => "articles",
            FilmList::Trailers => "trailers",
            FilmList::Tizers => "tizers",
            FilmList::Genres => "genres",
            FilmList::Nominations => "nominations",
        }
    }

    /// Parse a list name as it appears in a URL path.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|list| list.field() == name)
    }
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

pub const MIN_SCORE: u32 = 1;
pub const MAX_SCORE: u32 = 5;

/// A counter that can be bumped by the film service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Shares,
    Watched,
    WillWatch,
    NotInteresting,
}

impl Counter {
    /// Document field that stores the counter.
    pub fn field(self) -> &'static str {
        match self {
            Counter::Views => "view_count",
            Counter::Shares => "share_count",
            Counter::Watched => "watched_count",
            Counter::WillWatch => "will_watch_count",
            Counter::NotInteresting => "not_interesting_count",
        }
    }

    /// Views and shares only ever go up.
    pub fn is_decrementable(self) -> bool {
        !matches!(self, Counter::Views | Counter::Shares)
    }
}

/// Engagement counters stored on every film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    pub score: f64,
    pub score_count: u32,
    pub will_watch_count: u32,
    pub share_count: u32,
    pub watched_count: u32,
    pub view_count: u32,
    pub not_interesting_count: u32,
}

impl Engagement {
    pub fn get(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Views => self.view_count,
            Counter::Shares => self.share_count,
            Counter::Watched => self.watched_count,
            Counter::WillWatch => self.will_watch_count,
            Counter::NotInteresting => self.not_interesting_count,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut u32 {
        match counter {
            Counter::Views => &mut self.view_count,
            Counter::Shares => &mut self.share_count,
            Counter::Watched => &mut self.watched_count,
            Counter::WillWatch => &mut self.will_watch_count,
            Counter::NotInteresting => &mut self.not_interesting_count,
        }
    }

    /// Increment a counter, saturating at `u32::MAX`.
    pub fn incr(&mut self, counter: Counter) {
        let slot = self.slot(counter);
        *slot = slot.saturating_add(1);
    }

    /// Decrement a counter. Returns `false` when it was already zero or
    /// the counter only ever grows.
    pub fn decr(&mut self, counter: Counter) -> bool {
        if !counter.is_decrementable() {
            return false;
        }
        let slot = self.slot(counter);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Fold a rating into the running mean.
    ///
    /// Ratings outside `[MIN_SCORE, MAX_SCORE]` are ignored and `false` is
    /// returned.
    pub fn add_score(&mut self, score: u32) -> bool {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return false;
        }
        let before = f64::from(self.score_count);
        self.score_count += 1;
        self.score = (self.score * before + f64::from(score)) / f64::from(self.score_count);
        true
    }
}
