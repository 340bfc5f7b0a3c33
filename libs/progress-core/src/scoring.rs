//! Mapping of Anki scheduling state onto Pleco score records.
//!
//! Pleco keeps a single score per card that decays as the card comes due,
//! plus a compact history string. Cards in Anki's review queue get a score
//! proportional to the days left until they are due; everything else starts
//! at the neutral score.

use chrono::{DateTime, Utc};

use crate::types::{Grade, HistoryEntry, SourceCard, TargetScoreRecord};

/// Creation time of the Anki collection, in epoch seconds.
pub const ANKI_COLLECTION_CREATED: i64 = 1_508_184_000;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Anki queue code for cards in long-term review.
pub const REVIEW_QUEUE: i64 = 2;

/// Score of cards outside the review queue.
pub const NEUTRAL_SCORE: i64 = 100;

/// Pleco history symbol for each Anki ease, indexed by ease.
const HISTORY_SYMBOLS: [char; 5] = ['1', '1', '4', '5', '6'];

/// The only grade Pleco counts as incorrect.
const INCORRECT_GRADE: u8 = 1;

/// Ease factor permille per Pleco difficulty step.
const FACTOR_PER_DIFFICULTY: i64 = 25;

/// Converts source cards into Pleco score records.
#[derive(Debug, Clone)]
pub struct ScoreMapper {
    pub collection_created: i64,
}

impl Default for ScoreMapper {
    fn default() -> Self {
        Self {
            collection_created: ANKI_COLLECTION_CREATED,
        }
    }
}

impl ScoreMapper {
    pub fn new(collection_created: i64) -> Self {
        Self { collection_created }
    }

    /// Build the Pleco score fields for a card as of `now`.
    pub fn map(&self, card: &SourceCard, now: DateTime<Utc>) -> TargetScoreRecord {
        let correct = correct_count(&card.history);
        let incorrect = incorrect_count(&card.history);
        let (score_inc_time, score_dec_time) = change_times(&card.history, card.last_reviewed);

        TargetScoreRecord {
            score: self.score(card.queue, card.due, now.timestamp()),
            difficulty: difficulty(card.factor),
            history: history_string(&card.history),
            correct,
            incorrect,
            reviewed: correct + incorrect,
            first_reviewed_time: card.first_reviewed,
            last_reviewed_time: card.last_reviewed,
            score_inc_time,
            score_dec_time,
        }
    }

    /// Hundredths of a day until the card is due, for cards in review.
    pub fn score(&self, queue: i64, due: i64, now_secs: i64) -> i64 {
        if queue != REVIEW_QUEUE {
            return NEUTRAL_SCORE;
        }
        let due_secs = self.collection_created + due * SECONDS_PER_DAY;
        (100 * (due_secs - now_secs)).div_euclid(SECONDS_PER_DAY)
    }
}

pub fn difficulty(factor: i64) -> i64 {
    factor / FACTOR_PER_DIFFICULTY
}

pub fn history_symbol(grade: Grade) -> char {
    HISTORY_SYMBOLS[usize::from(grade.value())]
}

/// One symbol per review, oldest first.
pub fn history_string(history: &[HistoryEntry]) -> String {
    history.iter().map(|entry| history_symbol(entry.grade)).collect()
}

fn correct_count(history: &[HistoryEntry]) -> i64 {
    history
        .iter()
        .filter(|entry| entry.grade.value() != INCORRECT_GRADE)
        .count() as i64
}

fn incorrect_count(history: &[HistoryEntry]) -> i64 {
    history
        .iter()
        .filter(|entry| entry.grade.value() == INCORRECT_GRADE)
        .count() as i64
}

/// (scoreinctime, scoredectime). Exactly one is set when there is history,
/// depending on whether the most recent review was incorrect.
fn change_times(history: &[HistoryEntry], last_reviewed: i64) -> (i64, i64) {
    match history.last() {
        Some(entry) if entry.grade.value() == INCORRECT_GRADE => (0, last_reviewed),
        Some(_) => (last_reviewed, 0),
        None => (0, 0),
    }
}
