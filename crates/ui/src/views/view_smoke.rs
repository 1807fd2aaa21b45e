use std::sync::Arc;

use chrono::Duration;
use prep_core::model::{
    Category, CategoryIcon, CategoryId, ProgressDraft, ProgressId, ProgressStatus, Question,
    QuestionDraft, QuestionId, UserId, UserProgress, UserSession,
};
use prep_core::time::fixed_now;
use storage::repository::{
    CategoryRepository, InMemoryRepository, ProgressRepository, Storage, StorageError,
};

use super::test_harness::{HarnessOptions, ViewKind, setup_view_harness, setup_view_harness_with};

fn category(name: &str, icon: CategoryIcon) -> Category {
    Category::new(CategoryId::random(), name, "", icon).unwrap()
}

fn question(
    category_id: CategoryId,
    title: &str,
    difficulty: &str,
    age_minutes: i64,
    tips: Option<&str>,
    example: Option<&str>,
) -> Question {
    QuestionDraft {
        id: QuestionId::random(),
        category_id,
        title: title.to_owned(),
        description: Some("Walk the interviewer through it.".into()),
        difficulty: difficulty.into(),
        tips: tips.map(str::to_owned),
        example_answer: example.map(str::to_owned),
        created_at: fixed_now() - Duration::minutes(age_minutes),
    }
    .validate()
    .unwrap()
}

struct Seeded {
    repo: InMemoryRepository,
    newest: Question,
}

fn seeded_catalog() -> Seeded {
    let repo = InMemoryRepository::new();
    let behavioral = category("Behavioral", CategoryIcon::Users);
    let design = category("System Design", CategoryIcon::Network);
    repo.insert_category(design.clone()).unwrap();
    repo.insert_category(behavioral.clone()).unwrap();

    let older = question(
        design.id(),
        "Design a URL shortener",
        "hard",
        30,
        None,
        None,
    );
    let newest = question(
        behavioral.id(),
        "Tell me about yourself",
        "easy",
        1,
        Some("Keep it under two minutes"),
        None,
    );
    repo.insert_question(older).unwrap();
    repo.insert_question(newest.clone()).unwrap();

    Seeded { repo, newest }
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("missing {needle} in {html}"))
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_offers_sign_in_when_signed_out() {
    let mut harness = setup_view_harness_with(
        ViewKind::Landing,
        Storage::in_memory(),
        HarnessOptions {
            user: None,
            auth_url: None,
        },
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Get Started"), "missing cta in {html}");
    assert!(html.contains("Sign In"), "missing sign in in {html}");
    assert!(html.contains("Ready to start preparing?"), "missing closing cta in {html}");
    assert!(html.contains("Curated Questions"), "missing feature in {html}");
    assert!(!html.contains("Go to Dashboard"), "unexpected dashboard link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_links_dashboard_when_signed_in() {
    let mut harness = setup_view_harness(ViewKind::Landing, Storage::in_memory()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Go to Dashboard"), "missing dashboard link in {html}");
    assert!(!html.contains("Ready to start preparing?"), "unexpected cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_lists_questions_newest_first() {
    let seeded = seeded_catalog();
    let mut harness =
        setup_view_harness(ViewKind::Dashboard, Storage::from_repository(seeded.repo)).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("taylor@example.com"), "missing email in {html}");
    assert!(html.contains("Sign Out"), "missing sign out in {html}");
    assert!(html.contains("All Questions"), "missing heading in {html}");
    assert!(html.contains("2 questions"), "missing count in {html}");
    assert!(
        position(&html, "Behavioral") < position(&html, "System Design"),
        "categories not sorted in {html}"
    );
    assert!(
        position(&html, "Tell me about yourself") < position(&html, "Design a URL shortener"),
        "questions not newest first in {html}"
    );
    assert!(html.contains("badge badge--success"), "missing easy badge in {html}");
    assert!(html.contains("badge badge--destructive"), "missing hard badge in {html}");
    assert!(!html.contains("No questions found"), "unexpected placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_shows_placeholder_for_empty_list() {
    let repo = InMemoryRepository::new();
    repo.insert_category(category("c1", CategoryIcon::Code))
        .unwrap();
    repo.insert_category(category("c2", CategoryIcon::Crown))
        .unwrap();
    let mut harness =
        setup_view_harness(ViewKind::Dashboard, Storage::from_repository(repo)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No questions found in this category"),
        "missing placeholder in {html}"
    );
    assert!(html.contains("0 questions"), "missing count in {html}");
}

struct FailingCategories;

#[async_trait::async_trait]
impl CategoryRepository for FailingCategories {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_reports_category_failure() {
    let base = Storage::in_memory();
    let storage = Storage {
        categories: Arc::new(FailingCategories),
        questions: base.questions,
        progress: base.progress,
    };
    let mut harness = setup_view_harness(ViewKind::Dashboard, storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Failed to load categories"), "missing notice in {html}");
    assert!(html.contains("Error"), "missing notice title in {html}");
    assert!(html.contains("All Questions"), "dashboard did not finish loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_detail_sections() {
    let seeded = seeded_catalog();
    let id = seeded.newest.id().to_string();
    let mut harness =
        setup_view_harness(ViewKind::Question(id), Storage::from_repository(seeded.repo)).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Tell me about yourself"), "missing title in {html}");
    assert!(html.contains("Walk the interviewer through it."), "missing description in {html}");
    assert!(html.contains("Tips"), "missing tips in {html}");
    assert!(html.contains("Keep it under two minutes"), "missing tips body in {html}");
    assert!(!html.contains("Example Answer"), "unexpected example in {html}");
    assert!(html.contains("Status: Not started"), "missing default status in {html}");
    assert!(html.contains("Save Progress"), "missing save in {html}");
    assert!(html.contains("Mark Complete"), "missing complete in {html}");
    assert!(html.contains("badge badge--success"), "missing badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_restores_saved_progress() {
    let seeded = seeded_catalog();
    let user = UserSession::local("taylor@example.com");
    seeded
        .repo
        .upsert_progress(&ProgressDraft::new(
            user.user_id(),
            seeded.newest.id(),
            ProgressStatus::Completed,
            "Engineer turned team lead",
            fixed_now(),
        ))
        .await
        .unwrap();

    let id = seeded.newest.id().to_string();
    let mut harness =
        setup_view_harness(ViewKind::Question(id), Storage::from_repository(seeded.repo)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Status: Completed on Nov 14, 2023 22:13 UTC"),
        "missing completion line in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_redirects_unknown_question() {
    let seeded = seeded_catalog();
    let id = QuestionId::random().to_string();
    let mut harness =
        setup_view_harness(ViewKind::Question(id), Storage::from_repository(seeded.repo)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("dashboard-stub"), "no redirect in {html}");
    assert!(html.contains("Failed to load question"), "missing notice in {html}");
    assert!(!html.contains("Save Progress"), "detail rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_treats_malformed_id_as_missing() {
    let mut harness = setup_view_harness(
        ViewKind::Question("not-a-question".into()),
        Storage::in_memory(),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("dashboard-stub"), "no redirect in {html}");
    assert!(html.contains("Failed to load question"), "missing notice in {html}");
}

struct FailingProgress;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgress {
    async fn find_progress(
        &self,
        _user_id: UserId,
        _question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError> {
        Err(StorageError::Unauthorized)
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
async fn question_view_smoke_keeps_defaults_when_progress_fails() {
    let seeded = seeded_catalog();
    let id = seeded.newest.id().to_string();
    let base = Storage::from_repository(seeded.repo);
    let storage = Storage {
        categories: base.categories,
        questions: base.questions,
        progress: Arc::new(FailingProgress),
    };
    let mut harness = setup_view_harness(ViewKind::Question(id), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Failed to load progress"), "missing notice in {html}");
    assert!(html.contains("Status: Not started"), "missing default status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_links_configured_provider() {
    let mut harness = setup_view_harness_with(
        ViewKind::Auth,
        Storage::in_memory(),
        HarnessOptions {
            user: None,
            auth_url: Some("https://auth.example.com/login".into()),
        },
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("https://auth.example.com/login"),
        "missing provider link in {html}"
    );
    assert!(html.contains("Back to home"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_hints_when_unconfigured() {
    let mut harness = setup_view_harness(ViewKind::Auth, Storage::in_memory()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("PREP_AUTH_URL"), "missing hint in {html}");
}
