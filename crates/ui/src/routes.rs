use dioxus::prelude::*;
use dioxus_router::Routable;

use crate::views::{EgzaminatorView, SelectorView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", SelectorView)] Selector {},
    #[route("/egzaminator", EgzaminatorView)] Egzaminator {},
    #[route("/:..segments", NotFound)] NotFound { segments: Vec<String> },
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "page not-found",
            h1 { "404" }
            p { "Nie znaleziono strony: /{path}" }
        }
    }
}
