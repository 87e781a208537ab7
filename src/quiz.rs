use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::QuizQuestion;

pub const MAX_ATTEMPTS: u8 = 3;

/// Strategy for choosing a question index from the pool.
pub trait QuestionPicker {
    /// Caller contract: `pool_len` is at least 1.
    fn pick(&mut self, pool_len: usize) -> usize;
}

/// Uniform random choice, seeded from the wall clock so it works
/// identically on wasm and native targets.
pub struct RandomPicker {
    rng: SmallRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        let seed = web_time::SystemTime::now()
            .duration_since(web_time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionPicker for RandomPicker {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.rng.random_range(0..pool_len)
    }
}

/// Result of one answer submission against the assigned question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank or whitespace-only submission; no attempt consumed.
    Blank,
    Correct,
    Incorrect { attempts_remaining: u8 },
    /// Third miss; carries the expected answer for display.
    Revealed { answer: String },
}

/// Gates move commitment behind a trivia challenge.
///
/// Owns the injected question pool, the position→question assignments and
/// the attempt counter for the single pending move.
pub struct QuizGate {
    pool: Vec<QuizQuestion>,
    assignments: HashMap<u8, usize>,
    attempts: u8,
    picker: Box<dyn QuestionPicker>,
}

impl QuizGate {
    pub fn new(picker: Box<dyn QuestionPicker>) -> Self {
        Self {
            pool: Vec::new(),
            assignments: HashMap::new(),
            attempts: 0,
            picker,
        }
    }

    pub fn with_default_picker() -> Self {
        Self::new(Box::new(RandomPicker::new()))
    }

    /// Installs the question pool. Stale assignments into a previous pool
    /// are dropped.
    pub fn load_pool(&mut self, pool: Vec<QuizQuestion>) {
        self.pool = pool;
        self.assignments.clear();
        self.attempts = 0;
    }

    pub fn has_questions(&self) -> bool {
        !self.pool.is_empty()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Returns the question assigned to `pos`, assigning one at random on
    /// first use. `None` when the pool is empty (degraded mode).
    ///
    /// Repeated calls for the same position return the same index until
    /// the assignments are cleared.
    pub fn assign(&mut self, pos: u8) -> Option<usize> {
        if let Some(&index) = self.assignments.get(&pos) {
            return Some(index);
        }
        if self.pool.is_empty() {
            return None;
        }

        let index = self.picker.pick(self.pool.len());
        self.assignments.insert(pos, index);
        Some(index)
    }

    pub fn question(&self, index: usize) -> Option<&QuizQuestion> {
        self.pool.get(index)
    }

    /// Checks `answer` against the question at `index`. Both sides are
    /// trimmed; comparison is case-sensitive.
    pub fn submit(&mut self, index: usize, answer: &str) -> SubmitOutcome {
        let submitted = answer.trim();
        if submitted.is_empty() {
            return SubmitOutcome::Blank;
        }

        let Some(expected) = self.pool.get(index).map(|q| q.answer.trim()) else {
            // Pool was swapped out under a live assignment.
            return SubmitOutcome::Blank;
        };

        if submitted == expected {
            return SubmitOutcome::Correct;
        }

        self.attempts += 1;
        if self.attempts >= MAX_ATTEMPTS {
            SubmitOutcome::Revealed {
                answer: expected.to_string(),
            }
        } else {
            SubmitOutcome::Incorrect {
                attempts_remaining: MAX_ATTEMPTS - self.attempts,
            }
        }
    }

    pub fn attempts_remaining(&self) -> u8 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Scoped to one pending move; called whenever a new one is created.
    pub fn reset_attempts(&mut self) {
        self.attempts = 0;
    }

    /// Drops every position→question assignment. Called on commit, on
    /// reveal acknowledgement and on restart.
    pub fn clear_assignments(&mut self) {
        self.assignments.clear();
    }
}

/// Parses quiz CSV text: a header line followed by `id,question,answer,image`
/// rows. Rows with fewer than three fields are skipped; an empty image field
/// becomes `None`.
pub fn parse_csv(text: &str) -> Vec<QuizQuestion> {
    text.trim()
        .lines()
        .skip(1)
        .filter_map(parse_csv_line)
        .collect()
}

fn parse_csv_line(line: &str) -> Option<QuizQuestion> {
    let mut fields = line.split(',');
    let id = fields.next()?.trim().to_string();
    let question = fields.next()?.trim().to_string();
    let answer = fields.next()?.trim().to_string();
    let image = fields
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if id.is_empty() && question.is_empty() && answer.is_empty() {
        return None;
    }

    Some(QuizQuestion {
        id,
        question,
        answer,
        image,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::QuestionPicker;
    use crate::types::QuizQuestion;

    /// Always picks the same pool index.
    pub struct FixedPicker {
        pub index: usize,
    }

    impl QuestionPicker for FixedPicker {
        fn pick(&mut self, pool_len: usize) -> usize {
            self.index.min(pool_len - 1)
        }
    }

    pub fn sample_pool() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                id: "1".to_string(),
                question: "Which number is 45?".to_string(),
                answer: "45".to_string(),
                image: None,
            },
            QuizQuestion {
                id: "2".to_string(),
                question: "What is this building?".to_string(),
                answer: "Byodoin".to_string(),
                image: Some("/images/byoudouinn.jpg".to_string()),
            },
        ]
    }
}
