use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::{DEFAULT_QUESTION_COUNT, LEVELS, QUESTION_COUNT_OPTIONS, TECHNOLOGIES};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::TechSelection;

#[component]
pub fn SelectorView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let selection = use_signal(TechSelection::new);
    let mut question_count = use_signal(|| DEFAULT_QUESTION_COUNT);
    let mut error = use_signal(|| None::<String>);

    let session = ctx.exam_session();
    let on_start = use_callback(move |()| {
        let mut error = error;
        let config = match selection.read().to_config(question_count()) {
            Ok(config) => config,
            Err(_) => {
                error.set(Some("Wybierz co najmniej jedną technologię.".to_string()));
                return;
            }
        };
        if session.stage_config(&config).is_err() {
            error.set(Some(
                "Nie udało się zapisać konfiguracji egzaminu.".to_string(),
            ));
            return;
        }
        let _ = navigator.push(Route::Egzaminator {});
    });

    let chips: Vec<(String, u8)> = selection.read().entries().to_vec();
    let start_disabled = selection.read().is_empty();
    let error_message = error.read().clone();

    rsx! {
        div { class: "page selector-page",
            div { class: "card selector-card",
                header { class: "selector-header",
                    h1 { "egzAIminator" }
                    p { "Wybierz technologie i poziom trudności, aby rozpocząć egzamin" }
                }

                section { class: "selector-section",
                    h2 { "Wybierz technologie i poziom trudności" }
                    div { class: "tech-grid",
                        for tech in TECHNOLOGIES {
                            div { class: "tech-row", key: "{tech}",
                                p { class: "tech-name", "{tech}" }
                                div { class: "level-buttons",
                                    for level in LEVELS {
                                        LevelButton { technology: tech, level, selection }
                                    }
                                }
                            }
                        }
                    }
                }

                section { class: "selector-section",
                    h2 { "Liczba pytań" }
                    div { class: "count-buttons",
                        for count in QUESTION_COUNT_OPTIONS {
                            button {
                                key: "{count}",
                                class: if question_count() == count { "count-btn count-btn--active" } else { "count-btn" },
                                r#type: "button",
                                onclick: move |_| question_count.set(count),
                                "{count}"
                            }
                        }
                    }
                }

                if !chips.is_empty() {
                    div { class: "selection-summary",
                        p { class: "selection-summary__label", "Wybrane technologie:" }
                        div { class: "selection-chips",
                            for (tech, level) in chips {
                                span { class: "chip", key: "{tech}", "{tech} - Poziom {level}" }
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
                    class: "btn btn-primary btn-start",
                    r#type: "button",
                    disabled: start_disabled,
                    onclick: move |_| on_start.call(()),
                    "Przeprowadź egzamin"
                }
            }
        }
    }
}

#[component]
fn LevelButton(technology: &'static str, level: u8, selection: Signal<TechSelection>) -> Element {
    let mut selection = selection;
    let active = selection.read().selected_level(technology) == Some(level);
    let class = if active {
        "level-btn level-btn--active"
    } else {
        "level-btn"
    };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| selection.write().toggle(technology, level),
            "Poziom {level}"
        }
    }
}
