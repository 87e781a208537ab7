//! Boundary smoke tests; run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use quiz_othello::wasm::QuizOthello;
use quiz_othello::wasm_ready;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

const QUIZ_CSV: &str = "id,question,answer,image\n1,Which number is 45?,45,\n";

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn module_reports_ready() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn snapshot_has_the_initial_position() {
    let game = QuizOthello::new();
    let state = game.state().unwrap();

    assert_eq!(get(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(get(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(get(&state, "white_count").as_f64(), Some(2.0));
    assert_eq!(get(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn click_without_pool_reports_no_question() {
    let mut game = QuizOthello::new();
    let outcome = game.click(2, 3).unwrap();

    assert_eq!(
        get(&outcome, "kind").as_string().as_deref(),
        Some("no_question_available")
    );
}

#[wasm_bindgen_test]
fn csv_pool_gates_a_full_move() {
    let mut game = QuizOthello::new();
    assert_eq!(game.load_questions_csv(QUIZ_CSV), 1);

    let outcome = game.click(2, 3).unwrap();
    assert_eq!(
        get(&outcome, "kind").as_string().as_deref(),
        Some("quiz_opened")
    );

    let outcome = game.submit_answer("45").unwrap();
    assert_eq!(get(&outcome, "kind").as_string().as_deref(), Some("correct"));

    let state = game.state().unwrap();
    assert_eq!(get(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(get(&state, "black_count").as_f64(), Some(4.0));
}
