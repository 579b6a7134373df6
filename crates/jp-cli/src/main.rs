mod server;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use jp_core::{
    Category, CivilDate, ContentRecord, DayRecord, DayStatus, JourneyStats, THEMES, classify,
    classify_parts, current_streak, is_milestone_day_with, layout_journey, next_milestone,
};
use jp_store::{Config, DataService, JourneyPlan, Store};

#[derive(Parser)]
#[command(name = "jp", about = "Journey path layout engine CLI and HTTP server")]
struct Cli {
    /// Config file (defaults to <data dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretend the current date is this day (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<CivilDate>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start (or restart) a user's journey
    Init {
        user: String,
        /// First day of the journey (defaults to today)
        #[arg(long, value_parser = parse_date)]
        start: Option<CivilDate>,
        /// Number of days (defaults to the configured length)
        #[arg(long)]
        length: Option<u32>,
    },

    /// Log a day as completed
    Log {
        user: String,
        /// Day to log (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<CivilDate>,
        /// Reference to the day's photo
        #[arg(long)]
        photo: Option<String>,
    },

    /// Print node positions and the connector path
    Layout {
        user: String,
        /// Layout width in points
        #[arg(long, default_value_t = 390.0)]
        width: f64,
        /// Print only the SVG path data
        #[arg(long)]
        svg: bool,
    },

    /// Print the current streak
    Streak { user: String },

    /// Show journey statistics
    Stats { user: String },

    /// List users with stored journeys
    Users,

    /// Classify tags, or the whole catalog when no tags or category are given
    Classify {
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Content category, e.g. prayer_wudu_category
        #[arg(long)]
        category: Option<String>,
    },

    /// List theme buckets
    Themes,

    /// Load content items from a JSON array file into the catalog
    Catalog { path: PathBuf },

    /// Export a user's journey and the catalog to a JSON snapshot
    Export { user: String, path: PathBuf },

    /// Import a JSON snapshot
    Import { path: PathBuf },

    /// Serve the read-only HTTP API
    Serve {
        /// Listen address (defaults to the configured one)
        #[arg(long)]
        addr: Option<String>,
    },
}

fn parse_date(s: &str) -> std::result::Result<CivilDate, String> {
    s.parse().map_err(|e: jp_core::DateParseError| e.to_string())
}

fn data_dir() -> PathBuf {
    std::env::var("JP_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(jp_store::default_base_dir)
}

fn open_store(base: &Path) -> Result<Store> {
    std::fs::create_dir_all(base)
        .with_context(|| format!("failed to create {}", base.display()))?;
    Store::open(&base.join("journey.db")).context("failed to open store")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

struct Ctx {
    store: Store,
    config: Config,
    today: CivilDate,
}

impl Ctx {
    /// Current days for `user`, failing when no journey exists.
    fn days(&self, user: &str) -> Result<Vec<DayRecord>> {
        let days = self.store.refresh(user, self.today)?;
        if days.is_empty() {
            bail!("no journey for {user}; start one with `jp init {user}`");
        }
        Ok(days)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Commands that touch no stored data run before the store is opened
    match &cli.command {
        Commands::Themes => return cmd_themes(),
        Commands::Classify { tags, category } if !tags.is_empty() || category.is_some() => {
            return cmd_classify_parts(tags, category.as_deref());
        }
        _ => {}
    }

    let base = data_dir();
    let config = Config::load(cli.config.as_deref(), &base).context("failed to load config")?;
    let ctx = Ctx {
        store: open_store(&base)?,
        config,
        today: cli.today.unwrap_or_else(CivilDate::today_utc),
    };

    match cli.command {
        Commands::Init {
            user,
            start,
            length,
        } => cmd_init(&ctx, &user, start, length),
        Commands::Log { user, date, photo } => cmd_log(&ctx, &user, date, photo.as_deref()),
        Commands::Layout { user, width, svg } => cmd_layout(&ctx, &user, width, svg),
        Commands::Streak { user } => cmd_streak(&ctx, &user),
        Commands::Stats { user } => cmd_stats(&ctx, &user),
        Commands::Users => cmd_users(&ctx),
        Commands::Classify { .. } => cmd_classify_catalog(&ctx),
        Commands::Themes => cmd_themes(),
        Commands::Catalog { path } => cmd_catalog(&ctx, &path),
        Commands::Export { user, path } => cmd_export(&ctx, &user, &path),
        Commands::Import { path } => cmd_import(&ctx, &path),
        Commands::Serve { addr } => cmd_serve(ctx, cli.today, addr).await,
    }
}

fn cmd_init(ctx: &Ctx, user: &str, start: Option<CivilDate>, length: Option<u32>) -> Result<()> {
    let plan = JourneyPlan {
        start: start.unwrap_or(ctx.today),
        length: length.unwrap_or(ctx.config.journey.length),
    };
    if plan.length == 0 {
        bail!("journey length must be at least one day");
    }
    ctx.store.start_journey(user, plan, ctx.today)?;
    println!(
        "started {}-day journey for {user} on {}",
        plan.length, plan.start
    );
    Ok(())
}

fn cmd_log(ctx: &Ctx, user: &str, date: Option<CivilDate>, photo: Option<&str>) -> Result<()> {
    ctx.days(user)?;
    let day = ctx.store.log_day(user, date.unwrap_or(ctx.today), photo)?;
    let streak = current_streak(&ctx.store.fetch_days(user)?);
    println!("logged day {} ({}), streak {streak}", day.day_number, day.date);
    if is_milestone_day_with(day.day_number, ctx.config.journey.milestone_frequency) {
        println!("milestone reached: day {}", day.day_number);
    }
    Ok(())
}

fn cmd_layout(ctx: &Ctx, user: &str, width: f64, svg: bool) -> Result<()> {
    if !width.is_finite() || width < 0.0 {
        bail!("width must be a non-negative number, got {width}");
    }
    let days = ctx.days(user)?;
    let layout = layout_journey(&days, width, &ctx.config.layout);
    if svg {
        println!("{}", layout.path);
    } else {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    }
    Ok(())
}

fn cmd_streak(ctx: &Ctx, user: &str) -> Result<()> {
    let days = ctx.days(user)?;
    println!("{}", current_streak(&days));
    Ok(())
}

fn cmd_stats(ctx: &Ctx, user: &str) -> Result<()> {
    let days = ctx.days(user)?;
    let freq = ctx.config.journey.milestone_frequency;
    let stats = JourneyStats::compute(&days, freq);

    println!("Days:            {}", stats.total);
    println!("Logged:          {}", stats.logged);
    println!("Missed:          {}", stats.missed);
    println!("Remaining:       {}", stats.remaining);
    println!("Current streak:  {}", stats.current_streak);
    println!("Longest streak:  {}", stats.longest_streak);
    println!("Milestones:      {}", stats.milestones_reached);
    println!("Completion:      {:.0}%", stats.completion * 100.0);

    let latest = days
        .iter()
        .filter(|d| !matches!(d.status, DayStatus::Locked))
        .map(|d| d.day_number)
        .max()
        .unwrap_or(0);
    if let Some(next) = next_milestone(latest, freq).filter(|n| *n <= stats.total) {
        println!("Next milestone:  day {next}");
    }
    Ok(())
}

fn cmd_users(ctx: &Ctx) -> Result<()> {
    for user in ctx.store.list_users()? {
        println!("{user}");
    }
    Ok(())
}

fn cmd_classify_parts(tags: &[String], category: Option<&str>) -> Result<()> {
    let category = category
        .map(|c| {
            serde_json::from_value::<Category>(serde_json::Value::String(c.to_string()))
                .with_context(|| format!("invalid category {c:?}"))
        })
        .transpose()?;
    println!("{}", classify_parts(category, tags).as_str());
    Ok(())
}

fn cmd_classify_catalog(ctx: &Ctx) -> Result<()> {
    let catalog = ctx.store.fetch_content()?;
    for record in &catalog {
        let title = if record.title.is_empty() {
            record.id.as_str()
        } else {
            record.title.as_str()
        };
        println!("{:<18} {title}", classify(record).as_str());
    }
    Ok(())
}

fn cmd_themes() -> Result<()> {
    for meta in &THEMES {
        println!("{:<18} {:<8} {}", meta.id.as_str(), meta.color, meta.label);
    }
    Ok(())
}

fn cmd_catalog(ctx: &Ctx, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<ContentRecord> =
        serde_json::from_str(&json).context("catalog must be a JSON array of content items")?;
    let ids = ctx.store.upsert_content(&records)?;
    println!("loaded {} content items", ids.len());
    Ok(())
}

fn cmd_export(ctx: &Ctx, user: &str, path: &Path) -> Result<()> {
    ctx.days(user)?;
    ctx.store.export_json_file(user, path)?;
    println!("exported {user} to {}", path.display());
    Ok(())
}

fn cmd_import(ctx: &Ctx, path: &Path) -> Result<()> {
    let user = ctx
        .store
        .import_json_file(path)
        .context("failed to import snapshot")?;
    println!("imported {user} from {}", path.display());
    Ok(())
}

async fn cmd_serve(ctx: Ctx, fixed_today: Option<CivilDate>, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| ctx.config.server.addr.clone());
    let state = Arc::new(server::AppState {
        store: tokio::sync::Mutex::new(ctx.store),
        config: ctx.config,
        today: fixed_today,
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, server::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
