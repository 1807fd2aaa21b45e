use dioxus::prelude::*;
use dioxus_router::use_navigator;
use prep_core::model::{ProgressStatus, Question, QuestionId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::notice::use_notices;
use crate::views::state::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DetailVm, map_difficulty_badge};

/// Route entry. Keying the detail by id remounts it, and so drops any
/// in-flight state, when the route moves to another question.
#[component]
pub fn QuestionView(id: String) -> Element {
    rsx! {
        QuestionDetail { key: "{id}", id: id.clone() }
    }
}

#[component]
fn QuestionDetail(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let navigator = use_navigator();
    let vm = use_signal(DetailVm::default);
    let question_id = id.parse::<QuestionId>().ok();

    let catalog = ctx.catalog();
    let question = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let found = match question_id {
                Some(id) => catalog.get_question(id).await.ok(),
                None => None,
            };
            found.ok_or_else(|| {
                notices.error(ViewError::LoadQuestion.message());
                navigator.push(Route::Dashboard {});
                ViewError::LoadQuestion
            })
        }
    });

    let _progress = use_progress_loader(question_id, vm);
    let save = use_save_progress(question_id, vm);

    match view_state_from_resource(&question) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "page page--detail",
                p { class: "loading", "Loading..." }
            }
        },
        ViewState::Error(_) => rsx! {},
        ViewState::Ready(question) => rsx! {
            QuestionBody {
                question,
                vm,
                on_back: move |()| {
                    navigator.push(Route::Dashboard {});
                },
                on_save: save,
            }
        },
    }
}

/// Load the signed-in user's progress for the question into `vm`.
pub(crate) fn use_progress_loader(
    question_id: Option<QuestionId>,
    vm: Signal<DetailVm>,
) -> Resource<()> {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let progress = ctx.progress();
    let session = ctx.session();
    use_resource(move || {
        let progress = progress.clone();
        let session = session.clone();
        async move {
            let (Some(question_id), Some(user)) = (question_id, session.current()) else {
                return;
            };
            let mut vm = vm;
            match progress.find_progress(user.user_id(), question_id).await {
                Ok(found) => vm.write().apply_progress(found),
                Err(_) => notices.error(ViewError::LoadProgress.message()),
            }
        }
    })
}

/// Save the current notes with the given status, then re-read the stored
/// record. Ignored while a save is in flight; refused without a session.
pub(crate) fn use_save_progress(
    question_id: Option<QuestionId>,
    vm: Signal<DetailVm>,
) -> Callback<ProgressStatus> {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let progress = ctx.progress();
    let session = ctx.session();
    use_callback(move |status: ProgressStatus| {
        let Some(question_id) = question_id else {
            return;
        };
        let Some(user) = session.current() else {
            notices.error(ViewError::SignInRequired.message());
            return;
        };
        let mut vm = vm;
        let Some(request) = vm.write().begin_save() else {
            return;
        };
        let progress = progress.clone();
        spawn(async move {
            let mut vm = vm;
            let saved = progress
                .save_progress(
                    request.existing,
                    user.user_id(),
                    question_id,
                    status,
                    &request.notes,
                )
                .await;
            match saved {
                Ok(record) => {
                    vm.write().save_succeeded(&record);
                    notices.success("Progress saved successfully");
                    match progress.find_progress(user.user_id(), question_id).await {
                        Ok(found) => vm.write().apply_progress(found),
                        Err(_) => notices.error(ViewError::LoadProgress.message()),
                    }
                }
                Err(_) => {
                    vm.write().save_failed();
                    notices.error(ViewError::SaveProgress.message());
                }
            }
        });
    })
}

#[component]
fn QuestionBody(
    question: Question,
    vm: Signal<DetailVm>,
    on_back: EventHandler<()>,
    on_save: Callback<ProgressStatus>,
) -> Element {
    let mut vm = vm;
    let badge = map_difficulty_badge(question.difficulty());
    let state = vm.read();
    let saving = state.is_saving();
    let notes = state.notes().to_owned();
    let status_line = state.status_line();

    rsx! {
        div { class: "page page--detail",
            button { class: "btn btn--ghost back", onclick: move |_| on_back.call(()), "← Back to Dashboard" }

            header { class: "detail__header",
                h1 { "{question.title()}" }
                span { class: badge.class, "{badge.label}" }
            }
            if !question.description().is_empty() {
                p { class: "detail__description", "{question.description()}" }
            }

            if !question.tips().is_empty() {
                section { class: "detail__tips",
                    h3 { "Tips" }
                    p { "{question.tips()}" }
                }
            }

            section { class: "detail__answer",
                h3 { "Your Practice Answer" }
                textarea {
                    class: "answer-input",
                    rows: "10",
                    placeholder: "Write your answer here...",
                    value: "{notes}",
                    oninput: move |evt| vm.write().edit_notes(evt.value()),
                }
                p { class: "detail__status", "{status_line}" }
                div { class: "detail__actions",
                    button {
                        class: "btn btn--ghost",
                        disabled: saving,
                        onclick: move |_| on_save.call(ProgressStatus::InProgress),
                        "Save Progress"
                    }
                    button {
                        class: "btn btn--primary",
                        disabled: saving,
                        onclick: move |_| on_save.call(ProgressStatus::Completed),
                        "Mark Complete"
                    }
                }
            }

            if !question.example_answer().is_empty() {
                section { class: "detail__example",
                    h3 { "Example Answer" }
                    p { "{question.example_answer()}" }
                }
            }
        }
    }
}
