use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{AuthView, DashboardView, LandingView, QuestionView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/question/:id", QuestionView)] Question { id: String },
        #[route("/auth", AuthView)] Auth {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "app",
            Outlet::<Route> {}
        }
    }
}
