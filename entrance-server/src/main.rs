use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use entrance_server::db::repository::StaffFilter;
use entrance_server::import::{self, passes::import_passes};
use entrance_server::qr::export_booths;
use entrance_server::roster::{self, ImportSummary, upsert};
use entrance_server::{Config, Server, ServerState, StaffStore, passes, print_banner, setup_environment};

#[derive(Parser)]
#[command(name = "entrance-server", version, about = "Exhibition staff badges and daily passes")]
struct Cli {
    /// Working directory (database, media)
    #[arg(long, env = "WORK_DIR", global = true)]
    work_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "HTTP_PORT")]
        port: Option<u16>,
    },
    /// Allocate staff codes for a booth sheet and write cleaned.csv
    BuildCleaned {
        input: PathBuf,
        #[arg(long, default_value = "cleaned.csv")]
        output: PathBuf,
    },
    /// Upsert a cleaned.csv into the database
    UpdateStaff {
        #[arg(default_value = "cleaned.csv")]
        input: PathBuf,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// build-cleaned followed by update-staff
    ImportStaff {
        input: PathBuf,
        #[arg(long, default_value = "cleaned.csv")]
        cleaned: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
    /// Import daily passes from a sheet
    ImportPasses { input: PathBuf },
    /// Export QR codes grouped by location and booth
    ExportBoothQr {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete pass photos older than the retention window
    CleanupPassPhotos {
        #[arg(long, env = "PHOTO_RETENTION_HOURS")]
        hours: Option<u64>,
    },
}

fn print_summary(label: &str, summary: &ImportSummary) {
    println!(
        "{label}: {} created, {} updated, {} skipped, {} errored",
        summary.created, summary.updated, summary.skipped, summary.errored
    );
}

async fn update_staff(state: &ServerState, input: &std::path::Path, dry_run: bool) -> anyhow::Result<()> {
    let table = import::read_table(input).with_context(|| format!("reading {}", input.display()))?;
    let rows = import::read_cleaned(&table)?;

    let summary = if dry_run {
        let existing = state.staff.list(&StaffFilter::default()).await?;
        roster::dry_run(existing, &rows).await.context("creating dry-run scratch directory")?
    } else {
        upsert(&state.staff, &state.qr, &rows).await
    };
    print_summary(if dry_run { "update-staff (dry run)" } else { "update-staff" }, &summary);
    Ok(())
}

fn build_cleaned(input: &std::path::Path, output: &std::path::Path) -> anyhow::Result<()> {
    let table = import::read_table(input).with_context(|| format!("reading {}", input.display()))?;
    let built = import::build_cleaned(&table)?;
    for skip in &built.skipped {
        println!("line {}: skipped ({})", skip.line, skip.reason);
    }
    import::write_cleaned_csv(output, &built.rows, built.include_sold)?;
    println!("build-cleaned: {} staff rows written to {}", built.rows.len(), output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config: Config = setup_environment();
    let cli = Cli::parse();
    if let Some(work_dir) = cli.work_dir {
        config.work_dir = work_dir;
    }

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.http_port = port;
            }
            print_banner();
            let server = Server::new(config);
            if let Err(e) = server.run().await {
                tracing::error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        Command::BuildCleaned { input, output } => build_cleaned(&input, &output)?,
        Command::UpdateStaff { input, dry_run } => {
            let state = ServerState::initialize(&config).await?;
            update_staff(&state, &input, dry_run).await?;
        }
        Command::ImportStaff { input, cleaned, dry_run } => {
            build_cleaned(&input, &cleaned)?;
            let state = ServerState::initialize(&config).await?;
            update_staff(&state, &cleaned, dry_run).await?;
        }
        Command::ImportPasses { input } => {
            let state = ServerState::initialize(&config).await?;
            let table = import::read_table(&input).with_context(|| format!("reading {}", input.display()))?;
            let summary = import_passes(&state.staff, &state.qr, &table).await?;
            print_summary("import-passes", &summary);
        }
        Command::ExportBoothQr { output } => {
            let state = ServerState::initialize(&config).await?;
            let root = output.unwrap_or_else(|| config.export_dir());
            let summary = export_booths(&state.staff, &state.qr, &root).await?;
            println!(
                "export-booth-qr: {} QR codes in {} booths under {}",
                summary.qr_codes,
                summary.booths,
                root.display()
            );
        }
        Command::CleanupPassPhotos { hours } => {
            if let Some(hours) = hours {
                config.photo_retention_hours = hours;
            }
            let state = ServerState::initialize(&config).await?;
            let cleaned = passes::cleanup_stale_photos(&state.db, config.photo_retention()).await?;
            println!("cleanup-pass-photos: {} photos removed", cleaned);
        }
    }

    Ok(())
}
