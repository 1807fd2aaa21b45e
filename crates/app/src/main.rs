use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use prep_core::model::UserSession;
use services::{AppServices, CatalogService, Clock, ProgressService, SessionContext};
use storage::remote::RemoteConfig;
use storage::sqlite::SqliteRepository;
use ui::{App, UiApp, build_app_context};

mod logging;
mod seed;

const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";
const DEFAULT_USER_EMAIL: &str = "me@localhost";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    MissingApiKey,
    SeedRequiresLocal,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingApiKey => write!(f, "--remote requires PREP_API_KEY"),
            ArgsError::SeedRequiresLocal => write!(f, "seed only writes to a local database"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    auth_url: Option<String>,
}

impl UiApp for DesktopApp {
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

#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Sqlite { db_url: String },
    Remote(RemoteConfig),
}

#[derive(Debug)]
struct Args {
    backend: Backend,
    user_email: String,
    auth_url: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--user <email>]");
    eprintln!("  cargo run -p app -- ui   --remote <base_url> [--auth-url <url>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --user {DEFAULT_USER_EMAIL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL, PREP_USER_EMAIL, PREP_AUTH_URL");
    eprintln!("  PREP_REMOTE_URL, PREP_API_KEY, PREP_ACCESS_TOKEN");
    eprintln!("  PREP_LOG (tracing filter, default info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl Args {
    /// Flags override the environment; `env` is a lookup so tests can stub it.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = non_blank(env("PREP_DB_URL"))
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut remote_url = non_blank(env("PREP_REMOTE_URL"));
        let mut user_email =
            non_blank(env("PREP_USER_EMAIL")).unwrap_or_else(|| DEFAULT_USER_EMAIL.into());
        let mut auth_url = non_blank(env("PREP_AUTH_URL"));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                    remote_url = None;
                }
                "--remote" => {
                    remote_url = Some(require_value(args, "--remote")?);
                }
                "--user" => {
                    user_email = require_value(args, "--user")?;
                }
                "--auth-url" => {
                    auth_url = Some(require_value(args, "--auth-url")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = match remote_url {
            Some(base_url) => Backend::Remote(RemoteConfig {
                base_url,
                api_key: non_blank(env("PREP_API_KEY")).ok_or(ArgsError::MissingApiKey)?,
                access_token: non_blank(env("PREP_ACCESS_TOKEN")),
            }),
            None => Backend::Sqlite { db_url },
        };

        Ok(Self {
            backend,
            user_email,
            auth_url,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    logging::init()?;

    match cmd {
        Command::Ui => launch_ui(parsed).await,
        Command::Seed => {
            let Backend::Sqlite { db_url } = &parsed.backend else {
                return Err(ArgsError::SeedRequiresLocal.into());
            };
            prepare_sqlite_file(db_url)?;
            let repo = SqliteRepository::connect(db_url).await?;
            repo.migrate().await?;
            let summary = seed::seed_catalog(&repo, Clock::system().now()).await?;
            eprintln!(
                "seeded {} categories and {} questions into {db_url}",
                summary.categories, summary.questions
            );
            Ok(())
        }
    }
}

async fn launch_ui(parsed: Args) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::system();
    let services = match &parsed.backend {
        Backend::Sqlite { db_url } => {
            prepare_sqlite_file(db_url)?;
            tracing::info!(db_url = %db_url, "using local store");
            let user = UserSession::local(&parsed.user_email);
            AppServices::new_sqlite(db_url, clock, Some(user)).await?
        }
        Backend::Remote(config) => {
            tracing::info!(base_url = %config.base_url, "using hosted store");
            AppServices::new_remote(config, clock)?
        }
    };

    if let Err(e) = services.session().init().await {
        tracing::warn!(error = %e, "session lookup failed; starting signed out");
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        auth_url: parsed.auth_url,
    });
    let context = build_app_context(&app);

    // Some tao dev setups default to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Interview Prep")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
