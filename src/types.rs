use serde::{Deserialize, Serialize};

/// Disc colors. Encoded as 1 (black) / 2 (white) on the wasm boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// A single square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// One trivia record from the question pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub image: Option<String>,
}

/// Informational banner surfaced to the view after a turn transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The opponent had no legal move; the same player moves again.
    OpponentHasNoMoves,
    /// Three wrong answers forfeited the turn without placing a disc.
    TurnForfeited,
}

/// Overlay payload for the move currently awaiting quiz resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingOverlay {
    pub row: u8,
    pub col: u8,
    pub question: String,
    pub image: Option<String>,
    pub attempts_remaining: u8,
    /// Present only after three failed attempts, while the reveal is blocking.
    pub revealed_answer: Option<String>,
}

/// Render-tick snapshot returned from the wasm API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub correct_answers: u32,
    /// Contract:
    /// - `Some` while a quiz overlay should be shown.
    /// - `None` in every other phase.
    pub pending: Option<PendingOverlay>,
    pub notice: Option<Notice>,
    /// Positions (0..=63) flipped by the last committed move.
    pub flipped: Vec<u8>,
    pub is_game_over: bool,
    pub result: Option<GameResult>,
}

/// Final result after game over. `winner` is 0 on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

/// Outcome of a cell click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Occupied or flipless cell, finished game, or a quiz already open.
    Ignored,
    /// A quiz overlay should open for the clicked cell.
    QuizOpened { overlay: PendingOverlay },
    /// The question pool is empty; the move cannot proceed.
    NoQuestionAvailable,
}

/// Outcome of an answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Submission arrived with no quiz awaiting an answer.
    NoPendingQuiz,
    /// Blank submission; no attempt consumed.
    BlankIgnored,
    /// Move committed; lists the flipped positions.
    Correct { flipped: Vec<u8> },
    Incorrect { attempts_remaining: u8 },
    /// Third miss; the correct answer is disclosed and the turn is
    /// forfeited once the player acknowledges.
    Revealed { answer: String },
}
