use wasm_bindgen::prelude::*;

use crate::game::GameSession;
use crate::quiz::parse_csv;
use crate::types::QuizQuestion;

/// JS-facing handle around one [`GameSession`].
///
/// Snapshot and outcome payloads cross the boundary as plain JS objects
/// via `serde-wasm-bindgen`.
#[wasm_bindgen]
pub struct QuizOthello {
    session: GameSession,
}

#[wasm_bindgen]
impl QuizOthello {
    /// Creates a session with an empty question pool. Until questions are
    /// loaded, the board renders but no move can be quiz-gated.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: GameSession::new(),
        }
    }

    /// Loads the pool from a JS array of `{id, question, answer, image}`
    /// objects. Returns the pool size.
    pub fn load_questions(&mut self, questions: JsValue) -> Result<usize, JsValue> {
        let pool: Vec<QuizQuestion> = serde_wasm_bindgen::from_value(questions)?;
        Ok(self.session.load_questions(pool))
    }

    /// Loads the pool from fetched quiz CSV text. Returns the number of
    /// usable rows; malformed rows are skipped.
    pub fn load_questions_csv(&mut self, text: &str) -> usize {
        self.session.load_questions(parse_csv(text))
    }

    /// Cell click; returns a `ClickOutcome` object.
    pub fn click(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let outcome = self.session.click(row, col);
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    /// Answer submission; returns an `AnswerOutcome` object.
    pub fn submit_answer(&mut self, answer: &str) -> Result<JsValue, JsValue> {
        let outcome = self.session.submit_answer(answer);
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    /// Dismisses the quiz overlay, keeping the pending move re-clickable.
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Acknowledges a revealed answer; the turn passes without a disc.
    pub fn acknowledge_reveal(&mut self) {
        self.session.acknowledge_reveal();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Render-tick snapshot as a `GameState` object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_state())?)
    }
}

impl Default for QuizOthello {
    fn default() -> Self {
        Self::new()
    }
}
