//! Demo entry point: seeds the tracker, signs in, and drives the
//! dashboard, personal report list, and CSV export flows.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use fieldtrack::domain::{
    AccessDecision, LoginCredentials, Notifier, ReportFilter, Role, RouteScope, SessionStore,
    StatusTally, TrackerService, User, can_access, technician_tallies, top_unit_tallies,
};
use fieldtrack::export::{export_filename, render_csv};
use fieldtrack::outbound::{JsonFileSessionStore, TracingNotifier};
use fieldtrack::seed::tracker_seed;

#[derive(Parser)]
#[command(name = "fieldtrack", about = "Maintenance-report tracking demo")]
struct Cli {
    /// Simulated network latency in milliseconds.
    #[arg(long, default_value_t = 500)]
    latency_ms: u64,

    /// Path of the durable session record.
    #[arg(long, default_value = ".fieldtrack-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in as an admin and print the dashboard tallies.
    Dashboard {
        /// Sign-in email address.
        #[arg(long)]
        email: String,
        /// Sign-in password.
        #[arg(long)]
        password: String,
    },
    /// Sign in as a technician and list your own reports.
    MyReports {
        /// Sign-in email address.
        #[arg(long)]
        email: String,
        /// Sign-in password.
        #[arg(long)]
        password: String,
    },
    /// Sign in as an admin and export reports as CSV.
    Export {
        /// Sign-in email address.
        #[arg(long)]
        email: String,
        /// Sign-in password.
        #[arg(long)]
        password: String,
        /// Restrict the export to one unit id.
        #[arg(long)]
        unit: Option<String>,
        /// Output path; defaults to the dated export file name.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

type DemoService = TrackerService<JsonFileSessionStore, TracingNotifier>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let seed = tracker_seed(clock.utc())?;
    let service = TrackerService::new(
        seed,
        Arc::new(JsonFileSessionStore::new(&cli.session_file)),
        Arc::new(TracingNotifier),
        Arc::clone(&clock),
    )
    .with_latency(Duration::from_millis(cli.latency_ms));

    match cli.command {
        Command::Dashboard { email, password } => {
            run_dashboard(&service, &email, &password).await
        }
        Command::MyReports { email, password } => {
            run_my_reports(&service, &email, &password).await
        }
        Command::Export {
            email,
            password,
            unit,
            out,
        } => run_export(&service, &clock, &email, &password, unit, out).await,
    }
}

async fn sign_in<S, N>(
    service: &TrackerService<S, N>,
    email: &str,
    password: &str,
    scope: RouteScope,
) -> Result<User, Box<dyn std::error::Error>>
where
    S: SessionStore,
    N: Notifier,
{
    let credentials = LoginCredentials::try_from_parts(email, password)?;
    let user = service.login(&credentials).await?;
    match can_access(service.session_role(), scope) {
        AccessDecision::Allow => Ok(user),
        AccessDecision::Redirect(route) => Err(format!(
            "this page is not available to {}, continue at {}",
            user.full_name(),
            route.as_path()
        )
        .into()),
    }
}

async fn run_dashboard(
    service: &DemoService,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = sign_in(service, email, password, RouteScope::Admin).await?;
    println!("Signed in as {} ({})", user.full_name(), user.role());

    let reports = service.reports();
    let tally = StatusTally::of(&reports);
    let technicians = service
        .users()
        .iter()
        .filter(|account| account.role() == Role::Technician)
        .count();
    println!("Total reports: {}", tally.total());
    println!("Total technicians: {technicians}");
    println!(
        "Pending: {}  Completed: {}  Rejected: {}",
        tally.pending, tally.completed, tally.rejected
    );

    println!("Reports by technician:");
    for entry in technician_tallies(&reports) {
        println!("  {:<20} {}", entry.technician_name, entry.count);
    }
    println!("Top units by report count:");
    for entry in top_unit_tallies(&reports) {
        println!("  {:<20} {}", entry.unit_id, entry.count);
    }
    Ok(())
}

async fn run_my_reports(
    service: &DemoService,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = sign_in(service, email, password, RouteScope::Technician).await?;
    println!("Signed in as {} ({})", user.full_name(), user.role());

    let own = service.technician_reports()?;
    println!("{} reports submitted", own.len());
    for report in own {
        println!(
            "  {}  {:<9}  {:<10} at {}",
            report.date().format("%Y-%m-%d"),
            report.status().as_str(),
            report.unit_id(),
            report.location_name()
        );
    }
    Ok(())
}

async fn run_export(
    service: &DemoService,
    clock: &Arc<dyn Clock>,
    email: &str,
    password: &str,
    unit: Option<String>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    sign_in(service, email, password, RouteScope::Admin).await?;

    let mut filter = ReportFilter::new();
    if let Some(unit) = unit {
        filter = filter.for_unit(unit);
    }
    let now = clock.utc();
    let selection = filter.apply(&service.reports(), now);
    let csv = render_csv(&selection)?;
    let path = out.unwrap_or_else(|| PathBuf::from(export_filename(now.date_naive())));
    std::fs::write(&path, csv)?;
    println!("Exported {} reports to {}", selection.len(), path.display());
    Ok(())
}
