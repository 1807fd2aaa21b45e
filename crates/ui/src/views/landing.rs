use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "📚",
        "Curated Questions",
        "Behavioral, technical and leadership questions grouped by category.",
    ),
    (
        "✅",
        "Track Progress",
        "Save practice answers and mark questions complete as you go.",
    ),
    (
        "🎯",
        "Real-World Prep",
        "Tips and example answers modeled on real interview loops.",
    ),
];

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let signed_in = ctx.session().current().is_some();

    rsx! {
        div { class: "page page--landing",
            section { class: "hero",
                h1 { "Ace Your Next Interview" }
                p { class: "hero__lead",
                    "Practice the questions interviewers actually ask, write your answers and track what you've mastered."
                }
                div { class: "hero__actions",
                    if signed_in {
                        Link { class: "btn btn--primary", to: Route::Dashboard {}, "Go to Dashboard" }
                    } else {
                        Link { class: "btn btn--primary", to: Route::Auth {}, "Get Started" }
                        Link { class: "btn btn--ghost", to: Route::Auth {}, "Sign In" }
                    }
                }
            }

            section { class: "features",
                for (glyph, title, body) in FEATURES {
                    article { key: "{title}", class: "feature",
                        span { class: "feature__glyph", "{glyph}" }
                        h3 { "{title}" }
                        p { "{body}" }
                    }
                }
            }

            if !signed_in {
                section { class: "cta",
                    h2 { "Ready to start preparing?" }
                    p { "Create an account and work through your first category today." }
                    Link { class: "btn btn--primary", to: Route::Auth {}, "Get Started" }
                }
            }
        }
    }
}
