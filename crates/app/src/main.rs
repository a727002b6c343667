use std::fmt;
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, AuthService, BackendConfig, Clock, DEFAULT_DB_URL, LessonService,
    ProgressService, SpeechRate,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum LaunchError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Learn Malayalam: daily lessons, tests and progress tracking.
#[derive(Parser, Debug)]
#[command(name = "learn-malayalam", version, about)]
struct Args {
    /// SQLite database for offline profiles and progress
    #[arg(long = "db", env = "LEARN_DB_URL", default_value = DEFAULT_DB_URL)]
    db_url: String,

    /// Hosted backend url; requires --supabase-anon-key
    #[arg(long, env = "LEARN_SUPABASE_URL")]
    supabase_url: Option<String>,

    /// Public anon key of the hosted backend
    #[arg(long, env = "LEARN_SUPABASE_ANON_KEY", hide_env_values = true)]
    supabase_anon_key: Option<String>,

    /// Pronunciation speed: 0.5x, 0.7x or 1.0x
    #[arg(long, env = "LEARN_SPEECH_RATE", default_value_t = SpeechRate::default())]
    speech_rate: SpeechRate,

    /// Present test questions in random order
    #[arg(long, env = "LEARN_SHUFFLE_QUESTIONS")]
    shuffle_questions: bool,

    /// Do not play pronunciation audio
    #[arg(long, env = "LEARN_MUTE")]
    mute: bool,
}

struct DesktopApp {
    services: AppServices,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn speech_rate(&self) -> SpeechRate {
        self.services.speech_rate()
    }

    fn muted(&self) -> bool {
        self.services.muted()
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = BackendConfig::new(
        &args.db_url,
        args.supabase_url,
        args.supabase_anon_key,
        args.speech_rate,
    )?
    .with_shuffle_questions(args.shuffle_questions)
    .with_muted(args.mute);

    // The local database is only touched when no hosted backend is configured.
    if !config.uses_remote_backend() {
        prepare_sqlite_file(&config.db_url)?;
    }

    let clock = Clock::default_clock();
    let services = AppServices::build(&config, clock).await?;
    info!(
        remote = services.is_remote(),
        lessons = services.catalog().total_lessons(),
        "services ready"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, clock });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Learn Malayalam")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| LaunchError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(LaunchError::InvalidDbUrl {
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
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
