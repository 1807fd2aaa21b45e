use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::views::{NoticeTray, use_notice_provider};

#[component]
pub fn App() -> Element {
    use_notice_provider();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Interview Prep" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                NoticeTray {}
                Router::<Route> {}
            }
        }
    }
}
