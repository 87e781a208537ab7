use crate::board::{BOARD_SIZE, Board, bitmask_to_indices};
use crate::quiz::{QuestionPicker, QuizGate, SubmitOutcome, parse_csv};
use crate::types::{
    AnswerOutcome, ClickOutcome, GameResult, GameState, Notice, PendingOverlay, Player, Position,
    QuizQuestion,
};

/// Protocol phase of the single allowed pending move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    /// Three misses; carries the answer shown until acknowledged.
    RevealedBlocking { answer: String },
}

/// Classification of the position after a committed move or an
/// acknowledged pass. Never mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The opponent moves next.
    Switch(Player),
    /// The opponent has no legal move; the mover keeps the turn.
    Pass(Player),
    /// Neither side can move, or the board is full.
    Finished,
}

pub fn next_turn(board: &Board, mover: Player) -> TurnOutcome {
    if board.is_full() {
        return TurnOutcome::Finished;
    }

    let opponent = mover.opponent();
    if board.legal_moves(opponent) != 0 {
        TurnOutcome::Switch(opponent)
    } else if board.legal_moves(mover) != 0 {
        TurnOutcome::Pass(mover)
    } else {
        TurnOutcome::Finished
    }
}

fn compute_result(board: &Board) -> GameResult {
    let (black_count, white_count) = board.count();
    GameResult {
        winner: if black_count > white_count {
            Player::Black.code()
        } else if white_count > black_count {
            Player::White.code()
        } else {
            0
        },
        black_count,
        white_count,
    }
}

/// The move awaiting quiz resolution. Its flip mask was computed against
/// the board at assignment time; no other mutation can occur while it is
/// pending, so it is applied as-is on a correct answer.
#[derive(Debug, Clone, Copy)]
struct PendingMove {
    pos: u8,
    flips: u64,
    question_index: usize,
}

/// One quiz-gated Othello game. All mutation is funneled through the
/// event methods below; out-of-order events are no-ops, never panics.
pub struct GameSession {
    board: Board,
    current_player: Player,
    phase: Phase,
    pending: Option<PendingMove>,
    quiz: QuizGate,
    notice: Option<Notice>,
    correct_answers: u32,
    flipped: Vec<u8>,
    result: Option<GameResult>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_gate(QuizGate::with_default_picker())
    }

    pub fn with_picker(picker: Box<dyn QuestionPicker>) -> Self {
        Self::with_gate(QuizGate::new(picker))
    }

    fn with_gate(quiz: QuizGate) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            phase: Phase::Idle,
            pending: None,
            quiz,
            notice: None,
            correct_answers: 0,
            flipped: Vec::new(),
            result: None,
        }
    }

    /// Installs the question pool. Until this is called the session runs
    /// in degraded display-only mode: clicks report `NoQuestionAvailable`.
    pub fn load_questions(&mut self, pool: Vec<QuizQuestion>) -> usize {
        self.quiz.load_pool(pool);
        self.quiz.pool_len()
    }

    /// Loads the pool from quiz CSV text. Returns the number of usable rows.
    pub fn load_questions_csv(&mut self, text: &str) -> usize {
        self.load_questions(parse_csv(text))
    }

    /// Cell click. Opens (or re-opens) a quiz overlay for a legal empty
    /// cell; anything else is silently ignored.
    pub fn click(&mut self, row: u8, col: u8) -> ClickOutcome {
        if self.is_game_over() || self.phase != Phase::Idle {
            return ClickOutcome::Ignored;
        }
        let Some(pos) = row_col_to_pos(row, col) else {
            return ClickOutcome::Ignored;
        };

        let flips = self.board.flips_for(pos as usize, self.current_player);
        if flips == 0 {
            return ClickOutcome::Ignored;
        }

        // A dismissed overlay re-opens on the same cell with its question
        // and attempt count intact.
        if let Some(pending) = self.pending
            && pending.pos == pos
        {
            self.phase = Phase::AwaitingAnswer;
            return self.quiz_opened();
        }

        self.quiz.reset_attempts();
        let Some(question_index) = self.quiz.assign(pos) else {
            return ClickOutcome::NoQuestionAvailable;
        };

        self.pending = Some(PendingMove {
            pos,
            flips,
            question_index,
        });
        self.notice = None;
        self.phase = Phase::AwaitingAnswer;
        self.quiz_opened()
    }

    /// Answer submission for the open quiz. A correct answer commits the
    /// pending move and advances the turn.
    pub fn submit_answer(&mut self, answer: &str) -> AnswerOutcome {
        if self.phase != Phase::AwaitingAnswer {
            return AnswerOutcome::NoPendingQuiz;
        }
        let Some(pending) = self.pending else {
            return AnswerOutcome::NoPendingQuiz;
        };

        match self.quiz.submit(pending.question_index, answer) {
            SubmitOutcome::Blank => AnswerOutcome::BlankIgnored,
            SubmitOutcome::Correct => {
                self.board
                    .apply(pending.pos as usize, self.current_player, pending.flips);
                self.flipped = bitmask_to_indices(pending.flips);
                self.correct_answers += 1;
                self.clear_pending();
                self.notice = None;
                self.advance_turn();
                AnswerOutcome::Correct {
                    flipped: self.flipped.clone(),
                }
            }
            SubmitOutcome::Incorrect { attempts_remaining } => {
                AnswerOutcome::Incorrect { attempts_remaining }
            }
            SubmitOutcome::Revealed { answer } => {
                self.phase = Phase::RevealedBlocking {
                    answer: answer.clone(),
                };
                AnswerOutcome::Revealed { answer }
            }
        }
    }

    /// Dismisses the overlay without resolving the quiz. The pending move
    /// and its question survive and re-open on the next same-cell click.
    pub fn cancel(&mut self) {
        if self.phase == Phase::AwaitingAnswer {
            self.phase = Phase::Idle;
        }
    }

    /// Acknowledges a revealed answer: the turn is forfeited without
    /// placing a disc.
    pub fn acknowledge_reveal(&mut self) {
        if !matches!(self.phase, Phase::RevealedBlocking { .. }) {
            return;
        }

        self.clear_pending();
        self.notice = Some(Notice::TurnForfeited);
        self.advance_turn();
    }

    /// Resets to the canonical starting position. The question pool and
    /// picker are kept.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.current_player = Player::Black;
        self.phase = Phase::Idle;
        self.pending = None;
        self.notice = None;
        self.correct_answers = 0;
        self.flipped.clear();
        self.result = None;
        self.quiz.clear_assignments();
        self.quiz.reset_attempts();
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        bitmask_to_indices(self.board.legal_moves(self.current_player))
            .into_iter()
            .map(|idx| Position {
                row: idx / BOARD_SIZE as u8,
                col: idx % BOARD_SIZE as u8,
            })
            .collect()
    }

    /// Render-tick snapshot.
    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count,
            white_count,
            correct_answers: self.correct_answers,
            pending: self.overlay(),
            notice: self.notice,
            flipped: self.flipped.clone(),
            is_game_over: self.is_game_over(),
            result: self.result,
        }
    }

    fn overlay(&self) -> Option<PendingOverlay> {
        if self.phase == Phase::Idle {
            return None;
        }
        let pending = self.pending.as_ref()?;
        let question = self.quiz.question(pending.question_index)?;
        let revealed_answer = match &self.phase {
            Phase::RevealedBlocking { answer } => Some(answer.clone()),
            _ => None,
        };

        Some(PendingOverlay {
            row: pending.pos / BOARD_SIZE as u8,
            col: pending.pos % BOARD_SIZE as u8,
            question: question.question.clone(),
            image: question.image.clone(),
            attempts_remaining: self.quiz.attempts_remaining(),
            revealed_answer,
        })
    }

    fn quiz_opened(&self) -> ClickOutcome {
        match self.overlay() {
            Some(overlay) => ClickOutcome::QuizOpened { overlay },
            // Pool swapped out under a live assignment.
            None => ClickOutcome::NoQuestionAvailable,
        }
    }

    fn clear_pending(&mut self) {
        self.pending = None;
        self.quiz.clear_assignments();
        self.quiz.reset_attempts();
        self.phase = Phase::Idle;
    }

    fn advance_turn(&mut self) {
        match next_turn(&self.board, self.current_player) {
            TurnOutcome::Switch(next) => self.current_player = next,
            TurnOutcome::Pass(_) => self.notice = Some(Notice::OpponentHasNoMoves),
            TurnOutcome::Finished => self.result = Some(compute_result(&self.board)),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.phase = Phase::Idle;
        self.pending = None;
        self.notice = None;
        self.flipped.clear();
        self.result = None;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn row_col_to_pos(row: u8, col: u8) -> Option<u8> {
    if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
        return None;
    }
    Some(row * BOARD_SIZE as u8 + col)
}
