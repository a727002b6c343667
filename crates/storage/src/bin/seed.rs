use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use learn_core::model::{DayNumber, LessonId, ProgressRecord};
use storage::repository::{NewProfile, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Writes a demo learner with completed days into a local database.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed a local database with demo progress")]
struct Args {
    /// SQLite URL.
    #[arg(long = "db", env = "LEARN_DB_URL", default_value = "sqlite:dev.sqlite3?mode=rwc")]
    db_url: String,

    /// Email of the demo learner; created when missing.
    #[arg(long, env = "LEARN_SEED_EMAIL", default_value = "learner@example.com")]
    user_email: String,

    /// Password stored (hashed) for a newly created learner.
    #[arg(long, env = "LEARN_SEED_PASSWORD", default_value = "learner123")]
    password: String,

    /// Full name stored for a newly created learner.
    #[arg(long, env = "LEARN_SEED_NAME")]
    full_name: Option<String>,

    /// Number of day lessons to mark as passed, starting at day 1.
    #[arg(long, env = "LEARN_SEED_DAYS", default_value_t = 2)]
    days_completed: u8,

    /// Questions per day quiz, used as the stored score of a passed day.
    #[arg(long, default_value_t = 5)]
    score: u32,

    /// Fixed current time (RFC 3339) for deterministic seeding.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.db_url.trim().is_empty() {
        return Err(format!("invalid --db value: {:?}", args.db_url).into());
    }

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let profile = match storage.profiles.find_by_email(&args.user_email).await? {
        Some(profile) => profile,
        None => {
            let new = NewProfile::new(&args.user_email, args.full_name.clone(), &args.password, now)?;
            storage.profiles.insert_profile(&new).await?
        }
    };

    for day in 1..=args.days_completed {
        let day = DayNumber::new(day)?;
        let finished_at = now - Duration::days(i64::from(args.days_completed - day.value()));
        let record = ProgressRecord::new(
            profile.id,
            LessonId::day(day),
            args.score,
            true,
            finished_at,
        );
        storage.progress.save_progress(&record).await?;
    }

    info!(
        user_id = %profile.id,
        email = %profile.email,
        days = args.days_completed,
        db = %args.db_url,
        "seeded demo progress"
    );
    println!(
        "Seeded {} completed day(s) for {} into {}",
        args.days_completed, profile.email, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
