use std::sync::Arc;

use exam_core::model::{ExamPhase, ExamQuestion, ExamState};
use exam_core::time::fixed_now;
use storage::{ExamSession, InMemoryStore};

use super::test_harness::{setup_view_harness, setup_view_harness_with_store, ViewKind};

fn question(number: u32) -> ExamQuestion {
    ExamQuestion {
        question_number: number,
        technology: "Python".into(),
        level: 2,
        question: format!("Pytanie testowe {number}?"),
        answer: None,
        scoring: None,
        comment: None,
        lesson: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn selector_smoke_renders_catalog_and_start_button() {
    let mut harness = setup_view_harness(ViewKind::Selector);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("egzAIminator"), "missing title in {html}");
    assert!(html.contains("Python"), "missing technology in {html}");
    assert!(html.contains("Liczba pytań"), "missing count section in {html}");
    assert!(
        html.contains("Przeprowadź egzamin"),
        "missing start button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_resumes_persisted_exam() {
    let store = Arc::new(InMemoryStore::new());
    let session = ExamSession::new(Arc::clone(&store) as Arc<dyn storage::SessionStore>);
    let mut state =
        ExamState::new(vec![question(1), question(2), question(3)], fixed_now()).unwrap();
    state.record_result("wcześniejsza odpowiedź".into(), 6, "ok".into());
    state.advance().unwrap();
    session.save_state(&state).unwrap();
    session.save_phase(ExamPhase::Question);
    session.save_answer("wersja robocza");

    let mut harness = setup_view_harness_with_store(ViewKind::Egzaminator, store);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Pytanie 2 z 3"), "missing progress in {html}");
    assert!(
        html.contains("wersja robocza"),
        "missing restored draft in {html}"
    );
    assert!(
        html.contains("Sprawdź odpowiedź"),
        "missing submit button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_shows_score_in_checked_phase() {
    let store = Arc::new(InMemoryStore::new());
    let session = ExamSession::new(Arc::clone(&store) as Arc<dyn storage::SessionStore>);
    let mut state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
    state.record_result("moja odpowiedź".into(), 8, "**Dobra robota**".into());
    session.save_state(&state).unwrap();
    session.save_phase(ExamPhase::Checked);
    session.save_answer("moja odpowiedź");

    let mut harness = setup_view_harness_with_store(ViewKind::Egzaminator, store);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Twoja ocena"), "missing score caption in {html}");
    assert!(html.contains("8/10"), "missing score value in {html}");
    assert!(
        html.contains("Pokaż lekcję"),
        "missing lesson button in {html}"
    );
    assert!(
        html.contains("Zakończ egzamin"),
        "missing finish button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_without_config_announces_redirect() {
    let mut harness = setup_view_harness(ViewKind::Egzaminator);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Brak konfiguracji egzaminu"),
        "missing redirect notice in {html}"
    );
    assert!(
        html.contains("Powrót do strony głównej"),
        "missing return button in {html}"
    );
}
