use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth_url = ctx.auth_url().map(str::to_owned);

    rsx! {
        div { class: "page page--auth",
            h1 { "Sign In" }
            match auth_url {
                Some(url) => rsx! {
                    p { "Sign-in is handled by your account provider." }
                    a { class: "btn btn--primary", href: "{url}", target: "_blank", "Continue to sign in" }
                    p { class: "hint", "Restart the app with your access token once you're signed in." }
                },
                None => rsx! {
                    p { class: "hint",
                        "No sign-in page is configured. Launch with --user <email> for local practice, or set PREP_AUTH_URL."
                    }
                },
            }
            Link { class: "btn btn--ghost", to: Route::Landing {}, "Back to home" }
        }
    }
}
