use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use personnel::{
    Config, DeleteOutcome, ExportError, Field, LoadStatus, OverwriteRefused, PersonnelRecord, RecordDraft, RecordStore,
    SaveError, UpsertOutcome,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::warn;

#[derive(Parser)]
#[command(name = "personnel")]
#[command(about = "Personnel roster kept in a flat JSON file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Storage file (overrides the config file)
    #[arg(short, long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file (default: <config dir>/personnel/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Modify the storage file even if its existing content could not be loaded
    #[arg(long, global = true)]
    force: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records whose national ID or name contains QUERY (all when omitted)
    List { query: Option<String> },

    /// Show every field of one record
    Show { id: String },

    /// Add a record, or replace the one with the same national ID
    Put {
        #[command(flatten)]
        fields: DraftArgs,

        /// Replace an existing record without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete the record with this national ID
    Delete {
        id: String,

        /// Delete without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all records to a CSV spreadsheet
    Export { path: PathBuf },

    /// Copy the storage file to DEST (default: timestamped file in the backup directory)
    Backup { dest: Option<PathBuf> },
}

#[derive(clap::Args)]
struct DraftArgs {
    /// National ID (11 digits)
    #[arg(long)]
    id: String,
    /// Full name
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    role: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Hire date, free text
    #[arg(long, default_value = "")]
    hired: String,
    /// Termination date, free text
    #[arg(long, default_value = "")]
    left: String,
    #[arg(long, default_value = "")]
    iban: String,
    #[arg(long, default_value = "")]
    address: String,
}

impl From<DraftArgs> for RecordDraft {
    fn from(args: DraftArgs) -> Self {
        RecordDraft {
            id: args.id,
            full_name: args.name,
            role: args.role,
            phone: args.phone,
            hire_date: args.hired,
            termination_date: args.left,
            iban: args.iban,
            address: args.address,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?.with_data_file(cli.data_file);

    // Open store
    let mut store = RecordStore::open(&config.data_file);
    report_load_status(&store);

    match cli.command {
        Commands::List { query } => {
            let matches: Vec<&PersonnelRecord> = store.search(query.as_deref().unwrap_or("")).collect();
            print_table(&matches);
        }
        Commands::Show { id } => {
            let record = store
                .find_by_id(&id)
                .ok_or_else(|| eyre!("No record with national ID {}", id))?;
            print_record(record);
        }
        Commands::Put { fields, yes } => put(&mut store, fields.into(), yes, cli.force)?,
        Commands::Delete { id, yes } => delete(&mut store, &id, yes, cli.force)?,
        Commands::Export { path } => match personnel::export_csv(store.records(), &path) {
            Ok(count) => println!("Exported {} records to {}", count, path.display()),
            Err(ExportError::Empty) => println!("{}", "There are no records to export.".yellow()),
            Err(e) => return Err(e.into()),
        },
        Commands::Backup { dest } => {
            let written = match dest {
                Some(dest) => personnel::backup(store.path(), &dest)?,
                None => personnel::backup_into_dir(store.path(), &config.backup_dir, Local::now())?,
            };
            println!("Backup written to {}", written.display());
        }
    }

    Ok(())
}

/// Validate and store a draft, asking before an existing record is replaced
fn put(store: &mut RecordStore, draft: RecordDraft, yes: bool, force: bool) -> Result<()> {
    let outcome = store
        .upsert_with(&draft, force, |existing| {
            yes || ask(&format!(
                "A record with national ID {} ({}) already exists. Replace it?",
                existing.id, existing.full_name
            ))
        })
        .map_err(with_backup_hint)?;

    match outcome {
        UpsertOutcome::Created { saved } => finish("Record added.", saved),
        UpsertOutcome::Updated { saved } => finish("Record updated.", saved),
        UpsertOutcome::Cancelled => {
            println!("Nothing changed.");
            Ok(())
        }
        UpsertOutcome::Invalid(e) => Err(eyre!("{}: {}", e.field(), e)),
        UpsertOutcome::ConfirmationRequired { .. } => Err(eyre!("Replacement was not confirmed")),
    }
}

/// Delete a record, asking first unless `yes`
fn delete(store: &mut RecordStore, id: &str, yes: bool, force: bool) -> Result<()> {
    let outcome = store
        .delete_with(id, force, |existing| {
            yes || ask(&format!(
                "Delete the record with national ID {} ({})?",
                existing.id, existing.full_name
            ))
        })
        .map_err(with_backup_hint)?;

    match outcome {
        DeleteOutcome::Deleted { saved } => finish("Record deleted.", saved),
        DeleteOutcome::NoOp => {
            println!("No record with national ID {}.", id);
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Nothing changed.");
            Ok(())
        }
        DeleteOutcome::ConfirmationRequired { .. } => Err(eyre!("Deletion was not confirmed")),
    }
}

fn with_backup_hint(refused: OverwriteRefused) -> eyre::Report {
    eyre!("{}; run `personnel backup` first, then retry with --force", refused)
}

fn finish(message: &str, saved: Result<(), SaveError>) -> Result<()> {
    match saved {
        Ok(()) => {
            println!("{}", message.green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "warning:".yellow().bold(), e);
            Err(eyre!("The change was not saved"))
        }
    }
}

/// Ask a yes/no question on the terminal; anything but yes means no
fn ask(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let mut answer = String::new();
    let read = io::stdout()
        .flush()
        .and_then(|_| io::stdin().lock().read_line(&mut answer));
    if let Err(e) = read {
        warn!(error = %e, "Failed to read answer, treating it as no");
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn report_load_status(store: &RecordStore) {
    let reason = match store.load_status() {
        LoadStatus::Corrupt { reason } => format!("could not be parsed ({})", reason),
        LoadStatus::Unreadable { reason } => format!("could not be read ({})", reason),
        LoadStatus::Loaded | LoadStatus::Missing => return,
    };
    eprintln!(
        "{} {} {}; starting with no records",
        "warning:".yellow().bold(),
        store.path().display(),
        reason
    );
}

const LIST_COLUMNS: [Field; 7] = [
    Field::Id,
    Field::FullName,
    Field::Role,
    Field::Phone,
    Field::HireDate,
    Field::TerminationDate,
    Field::Iban,
];

fn print_table(records: &[&PersonnelRecord]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }

    let widths: Vec<usize> = LIST_COLUMNS
        .iter()
        .map(|field| {
            records
                .iter()
                .map(|r| r.get(*field).chars().count())
                .chain(std::iter::once(field.label().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = LIST_COLUMNS
        .iter()
        .zip(&widths)
        .map(|(field, width)| pad(field.label(), *width))
        .collect();
    println!("{}", header.join("  ").bold());

    for record in records {
        let row: Vec<String> = LIST_COLUMNS
            .iter()
            .zip(&widths)
            .map(|(field, width)| pad(record.get(*field), *width))
            .collect();
        println!("{}", row.join("  ").trim_end());
    }
}

fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.chars().count());
    format!("{}{}", value, " ".repeat(fill))
}

fn print_record(record: &PersonnelRecord) {
    let width = Field::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);
    for field in Field::ALL {
        println!("{}  {}", pad(field.label(), width).bold(), record.get(field));
    }
}
