use std::sync::Arc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{use_navigator, Navigator};

use exam_core::model::ExamPhase;
use services::ExamFlow;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{view_state_from_resource, ViewState};
use crate::vm::{
    flow_error_message, lesson_markdown, markdown_to_html, summary_markdown, CLIPBOARD_ERROR,
    CORRUPT_CONFIG_REDIRECT, MISSING_CONFIG_REDIRECT,
};

const REDIRECT_DELAY: Duration = Duration::from_secs(2);
const COPIED_RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExamIntent {
    Submit,
    Lesson,
    Advance,
}

#[component]
pub fn EgzaminatorView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut flow = use_signal(|| None::<ExamFlow>);
    let error = use_signal(|| None::<String>);
    let busy = use_signal(|| false);
    let generating = use_signal(|| false);
    let copied_lesson = use_signal(|| false);
    let copied_summary = use_signal(|| false);

    let api = ctx.exam_api();
    let session = ctx.exam_session();
    let clock = ctx.clock();
    let resource = use_resource(move || {
        let api = Arc::clone(&api);
        let session = session.clone();
        let mut flow = flow;

        async move {
            if let Some(restored) = ExamFlow::resume(Arc::clone(&api), session.clone()) {
                flow.set(Some(restored));
                return Ok(());
            }
            match session.take_config() {
                Ok(Some(config)) => match ExamFlow::start(api, session, config, clock).await {
                    Ok(started) => {
                        flow.set(Some(started));
                        Ok(())
                    }
                    Err(err) => Err(flow_error_message(&err)),
                },
                Ok(None) => {
                    redirect_home_after_delay(navigator);
                    Err(MISSING_CONFIG_REDIRECT.to_string())
                }
                Err(_) => {
                    redirect_home_after_delay(navigator);
                    Err(CORRUPT_CONFIG_REDIRECT.to_string())
                }
            }
        }
    });

    let dispatch = use_callback(move |intent: ExamIntent| {
        let mut flow = flow;
        let mut error = error;
        let mut busy = busy;
        let mut generating = generating;

        spawn(async move {
            if busy() {
                return;
            }
            let taken = { flow.write().take() };
            let Some(mut value) = taken else {
                return;
            };
            busy.set(true);
            error.set(None);
            let finishing = intent == ExamIntent::Advance && value.is_last_question();
            if finishing {
                generating.set(true);
            }

            let result = match intent {
                ExamIntent::Submit => value.submit_answer().await,
                ExamIntent::Lesson => value.load_lesson().await,
                ExamIntent::Advance => value.advance().await.map(|_| ()),
            };

            // Always put the exam back so the view stays usable after errors.
            {
                let mut guard = flow.write();
                *guard = Some(value);
            }
            if finishing {
                generating.set(false);
            }
            busy.set(false);
            if let Err(err) = result {
                error.set(Some(flow_error_message(&err)));
            }
        });
    });

    let session_for_home = ctx.exam_session();
    let on_return_home = use_callback(move |()| {
        session_for_home.clear_exam();
        let _ = navigator.push(Route::Selector {});
    });

    let on_copy_lesson = use_callback(move |()| {
        let text = {
            let guard = flow.read();
            guard.as_ref().and_then(|flow| {
                let question = flow.current_question();
                question
                    .lesson
                    .as_ref()
                    .map(|lesson| lesson_markdown(&question.question, lesson))
            })
        };
        if let Some(text) = text {
            copy_markdown(text, copied_lesson, error);
        }
    });

    let on_copy_summary = use_callback(move |()| {
        let text = {
            let guard = flow.read();
            guard
                .as_ref()
                .and_then(|flow| flow.summary().map(summary_markdown))
        };
        if let Some(text) = text {
            copy_markdown(text, copied_summary, error);
        }
    });

    let init_state = view_state_from_resource(resource);
    let busy_now = busy();
    let generating_now = generating();
    let error_message = error.read().clone();

    let flow_guard = flow.read();
    let Some(flow_ref) = flow_guard.as_ref() else {
        // No exam in hand: still initializing, an operation holds the exam
        // across an await, or initialization failed.
        let init_error = match &init_state {
            ViewState::Error(message) if !busy_now => Some(message.clone()),
            _ => None,
        };
        let spinner_text = if generating_now {
            "Trwa generowanie podsumowania egzaminu..."
        } else if busy_now {
            "Przetwarzanie odpowiedzi..."
        } else {
            "Przygotowuję egzamin..."
        };
        return rsx! {
            div { class: "page exam-page",
                div { class: "card exam-card",
                    if let Some(message) = init_error {
                        div { class: "error-panel",
                            p { class: "error-panel__title", "Błąd podczas inicjalizacji" }
                            p { "{message}" }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_return_home.call(()),
                            "Powrót do strony głównej"
                        }
                    } else {
                        div { class: "spinner" }
                        p { class: "spinner-text", "{spinner_text}" }
                    }
                }
            }
        };
    };

    let phase = flow_ref.phase();
    let question = flow_ref.current_question().clone();
    let question_number = flow_ref.current_index() + 1;
    let total = flow_ref.total_questions();
    let answer = flow_ref.answer().to_string();
    let summary = flow_ref.summary().cloned();
    let is_last = flow_ref.is_last_question();
    drop(flow_guard);

    let progress_pct = question_number * 100 / total.max(1);
    let advance_label = if is_last {
        "Zakończ egzamin"
    } else {
        "Następne pytanie"
    };
    let lesson_copy_label = if copied_lesson() {
        "✓ Skopiowano!"
    } else {
        "Kopiuj .md"
    };
    let summary_copy_label = if copied_summary() {
        "✓ Skopiowano!"
    } else {
        "Kopiuj .md"
    };
    let submit_disabled = busy_now || answer.trim().is_empty();

    let scoring = question.scoring.unwrap_or(0);
    let comment_html = markdown_to_html(question.comment.as_deref().unwrap_or(""));

    let has_lesson = question.lesson.is_some();
    let explanation_html = question
        .lesson
        .as_ref()
        .map(|lesson| markdown_to_html(&lesson.explanation))
        .unwrap_or_default();
    let concepts_html: Vec<String> = question
        .lesson
        .as_ref()
        .map(|lesson| {
            lesson
                .key_concepts
                .iter()
                .map(|concept| markdown_to_html(concept))
                .collect()
        })
        .unwrap_or_default();
    let example_html = question
        .lesson
        .as_ref()
        .map(|lesson| markdown_to_html(&lesson.example))
        .unwrap_or_default();
    let lesson_summary_html = question
        .lesson
        .as_ref()
        .map(|lesson| markdown_to_html(&lesson.summary))
        .unwrap_or_default();

    let has_summary = summary.is_some();
    let average_score = summary.as_ref().map_or(0.0, |s| s.average_score);
    let summary_text = summary.as_ref().map(|s| s.summary.clone()).unwrap_or_default();
    let strengths = summary.as_ref().map(|s| s.strengths.clone()).unwrap_or_default();
    let improvements = summary
        .as_ref()
        .map(|s| s.improvements.clone())
        .unwrap_or_default();
    let recommendations = summary
        .as_ref()
        .map(|s| s.recommendations.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "page exam-page",
            div { class: "exam-progress",
                div { class: "exam-progress__labels",
                    span { "Pytanie {question_number} z {total}" }
                    span { "{question.technology} - Poziom {question.level}" }
                }
                div { class: "exam-progress__track",
                    div { class: "exam-progress__fill", style: "width: {progress_pct}%" }
                }
            }

            div { class: "card exam-card",
                match phase {
                    ExamPhase::Welcome | ExamPhase::Question => rsx! {
                        h2 { class: "exam-question", "{question.question}" }
                        textarea {
                            class: "answer-input",
                            value: "{answer}",
                            placeholder: "Wpisz swoją odpowiedź...",
                            disabled: busy_now,
                            oninput: move |evt| {
                                if let Some(flow) = flow.write().as_mut() {
                                    flow.set_answer(evt.value());
                                }
                            },
                        }
                        if let Some(message) = error_message {
                            div { class: "error-panel",
                                p { "{message}" }
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: submit_disabled,
                            onclick: move |_| dispatch.call(ExamIntent::Submit),
                            if busy_now {
                                span { class: "spinner spinner--small" }
                            }
                            "Sprawdź odpowiedź"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_return_home.call(()),
                            "Powrót do strony głównej"
                        }
                    },
                    ExamPhase::Checked => rsx! {
                        div { class: "score-panel",
                            div { class: "score-panel__badge", "{scoring}" }
                            div { class: "score-panel__caption",
                                p { "Twoja ocena" }
                                p { class: "score-panel__value", "{scoring}/10" }
                            }
                        }
                        div { class: "markdown score-comment", dangerous_inner_html: "{comment_html}" }
                        if let Some(message) = error_message {
                            div { class: "error-panel",
                                p { "{message}" }
                            }
                        }
                        if generating_now {
                            div { class: "spinner" }
                            p { class: "spinner-text", "Trwa generowanie podsumowania egzaminu..." }
                        } else {
                            div { class: "button-row",
                                button {
                                    class: "btn btn-accent",
                                    r#type: "button",
                                    disabled: busy_now,
                                    onclick: move |_| dispatch.call(ExamIntent::Lesson),
                                    if busy_now {
                                        span { class: "spinner spinner--small" }
                                    }
                                    "Pokaż lekcję"
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: busy_now,
                                    onclick: move |_| dispatch.call(ExamIntent::Advance),
                                    "{advance_label}"
                                }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| on_return_home.call(()),
                                "Powrót do strony głównej"
                            }
                        }
                    },
                    ExamPhase::Lesson => rsx! {
                        if has_lesson {
                            header { class: "lesson-header",
                                h2 { "📚 Lekcja" }
                                p { "{question.question}" }
                            }
                            section { class: "lesson-section lesson-section--explanation",
                                div { class: "lesson-section__heading",
                                    h3 { "Wyjaśnienie" }
                                    button {
                                        class: "btn btn-copy",
                                        r#type: "button",
                                        onclick: move |_| on_copy_lesson.call(()),
                                        "{lesson_copy_label}"
                                    }
                                }
                                div { class: "markdown", dangerous_inner_html: "{explanation_html}" }
                            }
                            if !concepts_html.is_empty() {
                                section { class: "lesson-section",
                                    h3 { "Kluczowe koncepcje" }
                                    ul { class: "lesson-concepts",
                                        for concept in concepts_html {
                                            li {
                                                div { class: "markdown", dangerous_inner_html: "{concept}" }
                                            }
                                        }
                                    }
                                }
                            }
                            section { class: "lesson-section",
                                h3 { "Przykład" }
                                div { class: "markdown", dangerous_inner_html: "{example_html}" }
                            }
                            section { class: "lesson-section",
                                h3 { "Podsumowanie" }
                                div { class: "markdown", dangerous_inner_html: "{lesson_summary_html}" }
                            }
                            if let Some(message) = error_message {
                                div { class: "error-panel",
                                    p { "{message}" }
                                }
                            }
                            if generating_now {
                                div { class: "spinner" }
                                p { class: "spinner-text", "Trwa generowanie podsumowania egzaminu..." }
                            } else {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: busy_now,
                                    onclick: move |_| dispatch.call(ExamIntent::Advance),
                                    "{advance_label}"
                                }
                            }
                        } else {
                            p { "Brak lekcji dla tego pytania." }
                        }
                    },
                    ExamPhase::Summary => rsx! {
                        if has_summary {
                            header { class: "summary-header",
                                h2 { "Podsumowanie egzaminu" }
                                p { class: "summary-score", "Średnia ocena: {average_score:.1}/10" }
                            }
                            section { class: "summary-section",
                                div { class: "summary-section__heading",
                                    h3 { "Ogólna ocena" }
                                    button {
                                        class: "btn btn-copy",
                                        r#type: "button",
                                        onclick: move |_| on_copy_summary.call(()),
                                        "{summary_copy_label}"
                                    }
                                }
                                p { "{summary_text}" }
                            }
                            if !strengths.is_empty() {
                                section { class: "summary-section summary-section--strengths",
                                    h3 { "Mocne strony" }
                                    ul {
                                        for item in strengths {
                                            li { "{item}" }
                                        }
                                    }
                                }
                            }
                            if !improvements.is_empty() {
                                section { class: "summary-section summary-section--improvements",
                                    h3 { "Obszary do poprawy" }
                                    ul {
                                        for item in improvements {
                                            li { "{item}" }
                                        }
                                    }
                                }
                            }
                            if !recommendations.is_empty() {
                                section { class: "summary-section summary-section--recommendations",
                                    h3 { "Rekomendacje" }
                                    ul {
                                        for item in recommendations {
                                            li { "{item}" }
                                        }
                                    }
                                }
                            }
                            if let Some(message) = error_message {
                                div { class: "error-panel",
                                    p { "{message}" }
                                }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| on_return_home.call(()),
                                "Powrót do strony głównej"
                            }
                        } else {
                            p { "Brak podsumowania." }
                        }
                    },
                }
            }
        }
    }
}

fn redirect_home_after_delay(navigator: Navigator) {
    spawn(async move {
        tokio::time::sleep(REDIRECT_DELAY).await;
        let _ = navigator.push(Route::Selector {});
    });
}

/// Writes to the system clipboard via the webview, flipping the "copied"
/// marker for a moment on success.
fn copy_markdown(text: String, copied: Signal<bool>, error: Signal<Option<String>>) {
    let mut copied = copied;
    let mut error = error;
    spawn(async move {
        let Ok(payload) = serde_json::to_string(&text) else {
            return;
        };
        let js = format!(
            "try {{ await navigator.clipboard.writeText({payload}); return true; }} catch (e) {{ return false; }}"
        );
        match eval(&js).await {
            Ok(value) if value.as_bool() == Some(true) => {
                copied.set(true);
                tokio::time::sleep(COPIED_RESET_DELAY).await;
                copied.set(false);
            }
            _ => error.set(Some(CLIPBOARD_ERROR.to_string())),
        }
    });
}
