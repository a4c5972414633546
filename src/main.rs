use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storebook::cli::{
    handle_audit_command, handle_entry_command, handle_export_command, handle_report_command,
    handle_trend_command, AuditArgs, EntryCommands, ExportArgs, ReportArgs, TrendArgs,
};
use storebook::config::paths::DATA_DIR_ENV;
use storebook::config::{Settings, StorebookPaths};
use storebook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "storebook",
    version,
    about = "Per-store monthly ledger with consolidated reports",
    long_about = "storebook records each store's monthly credits and debits and \
                  reports them per store or consolidated across every store, \
                  with revenue, expense and net totals."
)]
struct Cli {
    /// Directory holding settings, entries and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show or change configuration
    Config {
        /// Add a store to the list of accepted store names
        #[arg(long)]
        add_store: Option<String>,

        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
    },

    /// Record and maintain monthly entries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Per-store or consolidated report with totals
    Report(ReportArgs),

    /// Month-by-month net results, oldest first
    Trend(TrendArgs),

    /// Write a report to CSV, JSON or YAML
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => StorebookPaths::with_base_dir(dir),
        None => StorebookPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing storebook at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Record a month with:");
            println!("  storebook entry add <STORE> <YYYY-MM> --credit-caixa 1000.00");
        }
        Some(Commands::Config {
            add_store,
            currency,
        }) => {
            let mut changed = false;
            if let Some(store) = add_store {
                changed |= settings.add_store(&store);
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
                changed = true;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("storebook configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Entries file:   {}", paths.entries_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            if settings.stores.is_empty() {
                println!("  Stores:          (any)");
            } else {
                println!("  Stores:          {}", settings.stores.join(", "));
            }
        }
        Some(Commands::Entry(cmd)) => handle_entry_command(&storage, &settings, cmd)?,
        Some(Commands::Report(args)) => handle_report_command(&storage, &settings, args)?,
        Some(Commands::Trend(args)) => handle_trend_command(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        None => {
            println!("storebook - per-store monthly ledger");
            println!();
            println!("Run 'storebook --help' for usage information.");
        }
    }

    Ok(())
}
