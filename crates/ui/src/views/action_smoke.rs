use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Navigator, Outlet, Routable, Router, use_navigator};
use prep_core::model::{
    Category, CategoryIcon, CategoryId, ProgressDraft, ProgressId, ProgressStatus, QuestionDraft,
    QuestionId, UserId, UserProgress, UserSession,
};
use prep_core::time::fixed_now;
use storage::repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};

use super::dashboard::use_sign_out;
use super::question::{use_progress_loader, use_save_progress};
use super::test_harness::{HarnessOptions, ViewHarness, build_test_context};
use crate::context::AppContext;
use crate::views::{NoticeTray, use_notice_provider};
use crate::vm::DetailVm;

#[derive(Clone, Default)]
struct ActionHandles {
    save: Rc<RefCell<Option<Callback<ProgressStatus>>>>,
    sign_out: Rc<RefCell<Option<Callback<()>>>>,
    navigator: Rc<RefCell<Option<Navigator>>>,
    vm: Rc<RefCell<Option<Signal<DetailVm>>>>,
}

impl ActionHandles {
    fn save(&self) -> Callback<ProgressStatus> {
        self.save.borrow().clone().expect("save registered")
    }

    fn sign_out(&self) -> Callback<()> {
        self.sign_out.borrow().clone().expect("sign out registered")
    }

    fn navigator(&self) -> Navigator {
        self.navigator.borrow().clone().expect("navigator registered")
    }

    fn vm(&self) -> Signal<DetailVm> {
        self.vm.borrow().clone().expect("vm registered")
    }
}

#[derive(Props, Clone)]
struct ActionHarnessProps {
    context: AppContext,
    question_id: QuestionId,
    handles: ActionHandles,
}

impl PartialEq for ActionHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ActionRoot(props: ActionHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.clone());
    use_notice_provider();
    rsx! {
        NoticeTray {}
        Router::<ActionRoute> {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum ActionRoute {
    #[layout(ActionLayout)]
        #[route("/")]
        Home {},
        #[route("/dashboard")]
        Board {},
}

/// Mounts the detail and sign-out actions once and hands them to the test.
#[component]
fn ActionLayout() -> Element {
    let props = use_context::<ActionHarnessProps>();
    let vm = use_signal(DetailVm::default);
    let _progress = use_progress_loader(Some(props.question_id), vm);
    let save = use_save_progress(Some(props.question_id), vm);
    let sign_out = use_sign_out();
    let navigator = use_navigator();
    use_hook(|| {
        *props.handles.save.borrow_mut() = Some(save);
        *props.handles.sign_out.borrow_mut() = Some(sign_out);
        *props.handles.navigator.borrow_mut() = Some(navigator);
        *props.handles.vm.borrow_mut() = Some(vm);
    });

    let status = vm.read().status_line();
    rsx! {
        p { class: "detail__status", "{status}" }
        Outlet::<ActionRoute> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! { p { "home-page" } }
}

#[component]
fn Board() -> Element {
    rsx! { p { "board-page" } }
}

fn catalog_with_question() -> (InMemoryRepository, QuestionId) {
    let repo = InMemoryRepository::new();
    let category =
        Category::new(CategoryId::random(), "Behavioral", "", CategoryIcon::Users).unwrap();
    let question = QuestionDraft {
        id: QuestionId::random(),
        category_id: category.id(),
        title: "Describe a conflict".into(),
        description: None,
        difficulty: "medium".into(),
        tips: None,
        example_answer: None,
        created_at: fixed_now(),
    }
    .validate()
    .unwrap();
    let question_id = question.id();
    repo.insert_category(category).unwrap();
    repo.insert_question(question).unwrap();
    (repo, question_id)
}

async fn mount(
    storage: Storage,
    question_id: QuestionId,
    options: HarnessOptions,
) -> (ViewHarness, ActionHandles, AppContext) {
    let context = build_test_context(&storage, options).await;
    let handles = ActionHandles::default();
    let dom = VirtualDom::new_with_props(
        ActionRoot,
        ActionHarnessProps {
            context: context.clone(),
            question_id,
            handles: handles.clone(),
        },
    );
    let mut harness = ViewHarness { dom, storage };
    harness.settle().await;
    (harness, handles, context)
}

async fn drive(harness: &mut ViewHarness) {
    for _ in 0..4 {
        harness.drive_async().await;
    }
}

fn edit_notes(harness: &ViewHarness, handles: &ActionHandles, text: &str) {
    harness.dom.in_runtime(|| {
        let mut vm = handles.vm();
        vm.write().edit_notes(text);
    });
}

fn local_user() -> UserId {
    UserSession::local("taylor@example.com").user_id()
}

#[tokio::test(flavor = "current_thread")]
async fn save_action_smoke_persists_then_updates_same_record() {
    let (repo, question_id) = catalog_with_question();
    let (mut harness, handles, _context) = mount(
        Storage::from_repository(repo.clone()),
        question_id,
        HarnessOptions::default(),
    )
    .await;

    edit_notes(&harness, &handles, "First draft");
    harness
        .dom
        .in_runtime(|| handles.save().call(ProgressStatus::InProgress));
    drive(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Progress saved successfully"), "missing notice in {html}");
    assert!(html.contains("Status: In progress"), "missing status in {html}");

    let stored = repo
        .find_progress(local_user(), question_id)
        .await
        .unwrap()
        .expect("first save stored");
    assert_eq!(stored.notes(), "First draft");
    let vm = harness.dom.in_runtime(|| handles.vm().peek().clone());
    assert_eq!(vm.progress_id(), Some(stored.id()));
    assert!(!vm.is_saving());

    edit_notes(&harness, &handles, "Second draft");
    harness
        .dom
        .in_runtime(|| handles.save().call(ProgressStatus::Completed));
    drive(&mut harness).await;

    let updated = repo
        .find_progress(local_user(), question_id)
        .await
        .unwrap()
        .expect("second save stored");
    assert_eq!(updated.id(), stored.id());
    assert_eq!(updated.status(), ProgressStatus::Completed);
    assert_eq!(updated.notes(), "Second draft");

    let html = harness.render();
    assert!(
        html.contains("Status: Completed on Nov 14, 2023 22:13 UTC"),
        "missing completion line in {html}"
    );
}

/// Reads succeed with no record; every write is refused.
struct RejectingWrites;

#[async_trait::async_trait]
impl ProgressRepository for RejectingWrites {
    async fn find_progress(
        &self,
        _user_id: UserId,
        _question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError> {
        Ok(None)
    }

    async fn insert_progress(&self, _draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        Err(StorageError::Unauthorized)
    }

    async fn update_progress(
        &self,
        _id: ProgressId,
        _draft: &ProgressDraft,
    ) -> Result<UserProgress, StorageError> {
        Err(StorageError::Unauthorized)
    }

    async fn upsert_progress(&self, _draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        Err(StorageError::Unauthorized)
    }
}

#[tokio::test(flavor = "current_thread")]
async fn save_action_smoke_reports_failure_and_keeps_status() {
    let (repo, question_id) = catalog_with_question();
    let base = Storage::from_repository(repo);
    let storage = Storage {
        categories: base.categories,
        questions: base.questions,
        progress: Arc::new(RejectingWrites),
    };
    let (mut harness, handles, _context) =
        mount(storage, question_id, HarnessOptions::default()).await;

    edit_notes(&harness, &handles, "Unsaved answer");
    harness
        .dom
        .in_runtime(|| handles.save().call(ProgressStatus::Completed));
    drive(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Failed to save progress"), "missing notice in {html}");
    assert!(html.contains("Status: Not started"), "status changed in {html}");
    assert!(!html.contains("Progress saved successfully"), "unexpected success in {html}");

    let vm = harness.dom.in_runtime(|| handles.vm().peek().clone());
    assert_eq!(vm.status(), ProgressStatus::NotStarted);
    assert_eq!(vm.progress_id(), None);
    assert_eq!(vm.notes(), "Unsaved answer");
    assert!(!vm.is_saving());
}

#[tokio::test(flavor = "current_thread")]
async fn save_action_smoke_requires_a_session() {
    let (repo, question_id) = catalog_with_question();
    let (mut harness, handles, _context) = mount(
        Storage::from_repository(repo.clone()),
        question_id,
        HarnessOptions {
            user: None,
            auth_url: None,
        },
    )
    .await;

    harness
        .dom
        .in_runtime(|| handles.save().call(ProgressStatus::InProgress));
    drive(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Sign in to save progress"), "missing notice in {html}");
    let vm = harness.dom.in_runtime(|| handles.vm().peek().clone());
    assert!(!vm.is_saving());
    assert!(
        repo.find_progress(local_user(), question_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn sign_out_action_smoke_clears_session_and_returns_home() {
    let (repo, question_id) = catalog_with_question();
    let (mut harness, handles, context) = mount(
        Storage::from_repository(repo),
        question_id,
        HarnessOptions::default(),
    )
    .await;

    harness
        .dom
        .in_runtime(|| {
            handles.navigator().push(ActionRoute::Board {});
        });
    drive(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("board-page"), "navigation failed in {html}");

    harness.dom.in_runtime(|| handles.sign_out().call(()));
    drive(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("home-page"), "not on landing in {html}");
    assert!(!html.contains("board-page"), "still on dashboard in {html}");
    assert!(!html.contains("Failed to sign out"), "unexpected notice in {html}");
    assert!(context.session().current().is_none());
}
