//! Sample catalog written by `app seed`.

use chrono::{DateTime, Duration, Utc};
use prep_core::model::{
    Category, CategoryIcon, CategoryId, Question, QuestionDraft, QuestionId,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteRepository;
use uuid::Uuid;

struct SeedQuestion {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    difficulty: &'static str,
    tips: &'static str,
    example_answer: &'static str,
}

struct SeedCategory {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    icon: CategoryIcon,
    questions: &'static [SeedQuestion],
}

const CATALOG: &[SeedCategory] = &[
    SeedCategory {
        slug: "behavioral",
        name: "Behavioral",
        description: "How you work with people and handle pressure.",
        icon: CategoryIcon::Users,
        questions: &[
            SeedQuestion {
                slug: "tell-me-about-yourself",
                title: "Tell me about yourself",
                description: "A two-minute summary of your background and what you want next.",
                difficulty: "easy",
                tips: "Present, past, future. Tie it to the role.",
                example_answer: "I'm a backend engineer with five years on payments systems...",
            },
            SeedQuestion {
                slug: "conflict-with-teammate",
                title: "Describe a conflict with a teammate",
                description: "Walk through a disagreement and how it was resolved.",
                difficulty: "medium",
                tips: "Use STAR. Focus on what you changed, not who was wrong.",
                example_answer: "",
            },
        ],
    },
    SeedCategory {
        slug: "technical",
        name: "Technical",
        description: "Language, tooling and debugging fundamentals.",
        icon: CategoryIcon::Code,
        questions: &[SeedQuestion {
            slug: "hard-bug",
            title: "Walk me through the hardest bug you fixed",
            description: "Explain how you narrowed down the cause.",
            difficulty: "medium",
            tips: "Name the hypothesis you discarded and why.",
            example_answer: "",
        }],
    },
    SeedCategory {
        slug: "system-design",
        name: "System Design",
        description: "Architecture, scaling and trade-offs.",
        icon: CategoryIcon::Network,
        questions: &[SeedQuestion {
            slug: "url-shortener",
            title: "Design a URL shortener",
            description: "Cover the API, storage, id generation and read scaling.",
            difficulty: "hard",
            tips: "Clarify read/write ratio before drawing boxes.",
            example_answer: "",
        }],
    },
    SeedCategory {
        slug: "leadership",
        name: "Leadership",
        description: "Ownership, influence and mentoring.",
        icon: CategoryIcon::Crown,
        questions: &[SeedQuestion {
            slug: "led-without-authority",
            title: "Tell me about a time you led without authority",
            description: "Show how you built alignment across a team you didn't manage.",
            difficulty: "medium",
            tips: "",
            example_answer: "",
        }],
    },
    SeedCategory {
        slug: "problem-solving",
        name: "Problem Solving",
        description: "Estimation and open-ended reasoning.",
        icon: CategoryIcon::Lightbulb,
        questions: &[SeedQuestion {
            slug: "piano-tuners",
            title: "How many piano tuners are there in Chicago?",
            description: "Talk through an estimate out loud.",
            difficulty: "easy",
            tips: "State assumptions and sanity-check the order of magnitude.",
            example_answer: "",
        }],
    },
];

fn stable_uuid(kind: &str, slug: &str) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_URL,
        format!("interview-prep/{kind}/{slug}").as_bytes(),
    )
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}

/// Build the sample catalog. Ids are derived from slugs so reseeding updates
/// rows in place; questions are staggered a minute apart in list order.
pub fn sample_catalog(now: DateTime<Utc>) -> Result<(Vec<Category>, Vec<Question>), prep_core::Error> {
    let mut categories = Vec::new();
    let mut questions = Vec::new();
    let mut offset = 0;

    for seed in CATALOG {
        let category = Category::new(
            CategoryId::new(stable_uuid("category", seed.slug)),
            seed.name,
            seed.description,
            seed.icon,
        )?;
        for question in seed.questions {
            offset += 1;
            let question = QuestionDraft {
                id: QuestionId::new(stable_uuid("question", question.slug)),
                category_id: category.id(),
                title: question.title.to_owned(),
                description: non_empty(question.description),
                difficulty: question.difficulty.to_owned(),
                tips: non_empty(question.tips),
                example_answer: non_empty(question.example_answer),
                created_at: now - Duration::minutes(offset),
            }
            .validate()?;
            questions.push(question);
        }
        categories.push(category);
    }

    Ok((categories, questions))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub questions: usize,
}

/// Upsert the sample catalog into the local store.
///
/// # Errors
///
/// Returns `StorageError` if any write fails.
pub async fn seed_catalog(
    repo: &SqliteRepository,
    now: DateTime<Utc>,
) -> Result<SeedSummary, StorageError> {
    let (categories, questions) = sample_catalog(now)?;
    for category in &categories {
        repo.upsert_category(category).await?;
    }
    for question in &questions {
        repo.upsert_question(question).await?;
    }
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "catalog seeded"
    );
    Ok(SeedSummary {
        categories: categories.len(),
        questions: questions.len(),
    })
}
