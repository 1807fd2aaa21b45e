use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::notice::use_notices;
use crate::views::state::ViewError;
use crate::vm::{DashboardVm, QuestionRequest, QuestionRowVm, map_category_tiles};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let vm = use_signal(DashboardVm::default);

    let catalog = ctx.catalog();
    let _categories = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let mut vm = vm;
            match catalog.list_categories().await {
                Ok(categories) => vm.write().finish_categories(categories),
                Err(_) => {
                    vm.write().finish_categories(Vec::new());
                    notices.error(ViewError::LoadCategories.message());
                }
            }
        }
    });

    let catalog = ctx.catalog();
    let load_questions = use_callback(move |request: QuestionRequest| {
        let catalog = catalog.clone();
        spawn(async move {
            let mut vm = vm;
            match catalog.list_questions(request.category).await {
                Ok(questions) => {
                    vm.write().apply_questions(request.generation, questions);
                }
                Err(_) => {
                    if vm.peek().is_current(request.generation) {
                        notices.error(ViewError::LoadQuestions.message());
                    }
                }
            }
        });
    });

    use_effect(move || {
        let mut vm = vm;
        let request = vm.write().begin_load();
        load_questions.call(request);
    });

    let select_category = use_callback(move |id| {
        let mut vm = vm;
        let request = vm.write().select_category(id);
        load_questions.call(request);
    });

    let sign_out = use_sign_out();

    let state = vm.read();
    if state.is_loading() {
        return rsx! {
            div { class: "page page--dashboard",
                p { class: "loading", "Loading..." }
            }
        };
    }

    let email = ctx
        .session()
        .current()
        .map(|session| session.email().to_owned())
        .unwrap_or_default();
    let tiles = map_category_tiles(state.categories(), state.selected());
    let rows = state.question_rows();
    let heading = state.heading();
    let count = state.count_label();

    rsx! {
        div { class: "page page--dashboard",
            header { class: "topbar",
                h1 { class: "topbar__brand", "Interview Prep" }
                div { class: "topbar__user",
                    span { class: "topbar__email", "{email}" }
                    button {
                        class: "btn btn--ghost",
                        onclick: move |_| sign_out.call(()),
                        "Sign Out"
                    }
                }
            }

            section { class: "categories",
                h2 { "Categories" }
                div { class: "categories__grid",
                    for tile in tiles {
                        button {
                            key: "{tile.id}",
                            class: if tile.active { "category category--active" } else { "category" },
                            onclick: move |_| select_category.call(tile.id),
                            span { class: "category__glyph", "{tile.glyph}" }
                            span { class: "category__name", "{tile.name}" }
                        }
                    }
                }
            }

            section { class: "questions",
                div { class: "questions__header",
                    h2 { "{heading}" }
                    span { class: "questions__count", "{count}" }
                }
                if rows.is_empty() {
                    p { class: "empty", "No questions found in this category" }
                } else {
                    ul { class: "questions__list",
                        for row in rows {
                            QuestionRow { key: "{row.id}", row: row.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionRow(row: QuestionRowVm) -> Element {
    rsx! {
        li { class: "question-row",
            Link { class: "question-row__link", to: Route::Question { id: row.id.clone() },
                span { class: "question-row__title", "{row.title}" }
                span { class: row.badge.class, "{row.badge.label}" }
            }
        }
    }
}

/// End the session and return to the landing page. A provider failure is
/// reported, but the user still leaves signed out.
pub(crate) fn use_sign_out() -> Callback<()> {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let navigator = use_navigator();
    let session = ctx.session();
    use_callback(move |()| {
        let session = session.clone();
        spawn(async move {
            if session.sign_out().await.is_err() {
                notices.error(ViewError::SignOut.message());
            }
            navigator.push(Route::Landing {});
        });
    })
}
