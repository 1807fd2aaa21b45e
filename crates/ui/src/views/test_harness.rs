use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use prep_core::model::UserSession;
use prep_core::time::fixed_now;
use services::{AppServices, CatalogService, Clock, LocalAuth, ProgressService, SessionContext};
use storage::repository::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{
    AuthView, DashboardView, LandingView, NoticeTray, QuestionView, use_notice_provider,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    auth_url: Option<String>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn session(&self) -> SessionContext {
        self.services.session()
    }

    fn auth_url(&self) -> Option<String> {
        self.auth_url.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Dashboard,
    Question(String),
    Auth,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view.clone());
    use_notice_provider();
    rsx! {
        NoticeTray {}
        Router::<TestRoute> {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/dashboard")]
    DashboardStub {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Question(id) => rsx! { QuestionView { id } },
        ViewKind::Auth => rsx! { AuthView {} },
    }
}

/// Stands in for the dashboard route so redirects are observable.
#[component]
fn DashboardStub() -> Element {
    rsx! { p { class: "redirected", "dashboard-stub" } }
}

pub struct HarnessOptions {
    pub user: Option<UserSession>,
    pub auth_url: Option<String>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            user: Some(UserSession::local("taylor@example.com")),
            auth_url: None,
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Build, then let resources, effects and spawned tasks run to completion.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with(view, storage, HarnessOptions::default()).await
}

pub async fn setup_view_harness_with(
    view: ViewKind,
    storage: Storage,
    options: HarnessOptions,
) -> ViewHarness {
    let context = build_test_context(&storage, options).await;
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { context, view });

    ViewHarness { dom, storage }
}

/// App context over `storage` with the session already initialised.
pub async fn build_test_context(storage: &Storage, options: HarnessOptions) -> AppContext {
    let services = AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        Arc::new(LocalAuth::new(options.user)),
    );
    services.session().init().await.expect("init session");

    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        services,
        auth_url: options.auth_url,
    });
    build_app_context(&app)
}
