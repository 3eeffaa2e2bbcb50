//! Command-line front end
//!
//! Each data command refreshes the store from the endpoint first, performs
//! its action, then prints the (filtered) table.

use crate::app::Directory;
use crate::error::Notice;
use crate::generator::DraftProvider;
use clap::{Args, Parser, Subcommand};
use sheet_client::RemoteStore;
use shared::{Record, RecordDraft, RecordStatus};
use std::io::{self, Write};

/// SheetBase - employee directory backed by a Google Sheet
#[derive(Debug, Parser)]
#[command(name = "sheetbase")]
#[command(about = "Employee directory backed by a Google Sheet")]
#[command(version)]
pub struct Cli {
    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees, optionally filtered by name, role or department
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Add an employee
    Add(DraftArgs),
    /// Edit an employee; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete an employee
    Delete { id: String },
    /// Generate mock employees with Gemini and insert them one by one
    Generate,
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct DraftArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub email: String,
    /// Active, Inactive or "On Leave"
    #[arg(long, default_value_t = RecordStatus::Active)]
    pub status: RecordStatus,
}

impl From<DraftArgs> for RecordDraft {
    fn from(args: DraftArgs) -> Self {
        RecordDraft::new(args.name, args.role, args.department, args.email, args.status)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub status: Option<RecordStatus>,
}

impl EditArgs {
    /// Overlay the given fields onto `draft`
    pub fn apply_to(self, draft: &mut RecordDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(role) = self.role {
            draft.role = role;
        }
        if let Some(department) = self.department {
            draft.department = department;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
    }
}

/// Run one data command. `Config` is handled by the binary.
///
/// The returned notice is what the user should see on failure.
pub async fn execute<R, P, W>(
    directory: &mut Directory<R, P>,
    command: Command,
    out: &mut W,
) -> Result<(), Notice>
where
    R: RemoteStore,
    P: DraftProvider,
    W: Write,
{
    if let Err(e) = directory.load().await {
        return Err(directory
            .banner()
            .cloned()
            .unwrap_or_else(|| Notice::for_load(&e)));
    }

    match command {
        Command::List { query } => directory.set_query(query),
        Command::Add(args) => {
            directory.open_create_form().draft = args.into();
            let record = directory
                .submit_form()
                .await
                .map_err(|e| Notice::for_submit(&e))?;
            print_line(out, &format!("Created {}", record.id));
        }
        Command::Edit { id, changes } => {
            let form = directory
                .open_edit_form(&id)
                .map_err(|e| Notice::for_submit(&e))?;
            changes.apply_to(&mut form.draft);
            let record = directory
                .submit_form()
                .await
                .map_err(|e| Notice::for_submit(&e))?;
            print_line(out, &format!("Updated {}", record.id));
        }
        Command::Delete { id } => {
            directory
                .delete(&id)
                .await
                .map_err(|e| Notice::for_delete(&e))?;
            print_line(out, &format!("Deleted {id}"));
        }
        Command::Generate => {
            let report = directory
                .generate()
                .await
                .map_err(|e| Notice::for_generate(&e))?;
            print_line(out, &format!("Generated {} record(s)", report.count()));
        }
        Command::Config => {}
    }

    let table = render_table(&directory.visible());
    print_line(out, &table);
    Ok(())
}

fn print_line<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{text}") {
        tracing::warn!(error = %e, "failed to write output");
    }
}

const HEADERS: [&str; 6] = ["ID", "Name", "Email", "Role", "Department", "Status"];

/// Plain-text table with a record count footer
pub fn render_table(records: &[&Record]) -> String {
    if records.is_empty() {
        return "No employees found".to_string();
    }

    let rows: Vec<[&str; 6]> = records
        .iter()
        .map(|r| {
            [
                r.id.as_str(),
                r.name.as_str(),
                r.email.as_str(),
                r.role.as_str(),
                r.department.as_str(),
                r.status.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str; 6]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format_row(&HEADERS));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(format_row));
    lines.push(format!("Showing {} record(s)", rows.len()));
    lines.join("\n")
}

/// Printed when no endpoint is configured
pub fn setup_instructions() -> String {
    [
        "Environment Not Configured",
        "",
        "The GOOGLE_SHEET_SCRIPT_URL environment variable is missing.",
        "Deploy the sheet's script as a web app (execute as you, access: anyone),",
        "then set GOOGLE_SHEET_SCRIPT_URL to its /exec URL, in the environment or a .env file.",
        "Set API_KEY as well to enable `sheetbase generate`.",
    ]
    .join("\n")
}

/// stdout, locked
pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}
