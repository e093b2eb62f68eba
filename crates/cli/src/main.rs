// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use bfrs::Submission;
use bfrs_api::{
    ApiError, CreateIncidentRequest, SaveIncidentRequest, Session, ValidationFailedResponse,
    archive_incident, cleanup_line_items, create_incident, get_audit_trail, get_incident,
    list_incidents, list_snapshots, validate_and_save,
};
use bfrs_domain::{ReportStatus, Stage};
use bfrs_persistence::Persistence;
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::{error, info};

/// Exit code for a submission that failed validation.
const EXIT_VALIDATION_FAILED: u8 = 2;

/// BFRS - bushfire incident reporting from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Id of the user performing the command
    #[arg(short, long, global = true, default_value_t = 1)]
    user: i64,

    /// The user may maintain authoritative data (region, district, reporting year)
    #[arg(long, global = true)]
    can_maintain_data: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum CliCommand {
    /// Create an incident from an import payload and an initial report form
    Import {
        /// JSON file holding the spatial support system payload
        #[arg(long)]
        payload: Option<PathBuf>,
        /// JSON file holding the initial report form
        #[arg(long)]
        form: Option<PathBuf>,
        /// Submit the report straight away
        #[arg(long)]
        submit: bool,
    },
    /// Validate a form under a stage and save it
    Save {
        incident_id: i64,
        /// The stage the form is saved under
        #[arg(long)]
        stage: Stage,
        /// Move the report to this status
        #[arg(long)]
        target_status: Option<ReportStatus>,
        /// JSON file holding the submitted form
        #[arg(long)]
        form: PathBuf,
    },
    /// Show an incident with its line items and side records
    Show { incident_id: i64 },
    /// List incidents
    List {
        /// Include archived incidents
        #[arg(long)]
        include_archived: bool,
    },
    /// List the snapshots of an incident
    Snapshots { incident_id: i64 },
    /// Show the audit trail of an incident
    History { incident_id: i64 },
    /// Archive an incident
    Archive { incident_id: i64 },
    /// Remove injuries and damages of an incident whose fire was not found
    CleanupLineItems { incident_id: i64 },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut persistence: Persistence = open_persistence(args.database.as_deref())?;
    let session: Session = Session::user(args.user, args.can_maintain_data);

    match execute(
        &args.command,
        &mut persistence,
        &session,
        OffsetDateTime::now_utc(),
    ) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(report) => match report.downcast_ref::<ApiError>() {
            Some(ApiError::ValidationFailed { cleaned, errors }) => {
                error!(errors = errors.len(), "Submission failed validation");
                let response: ValidationFailedResponse =
                    ValidationFailedResponse::new(cleaned, errors);
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(ExitCode::from(EXIT_VALIDATION_FAILED))
            }
            _ => Err(report),
        },
    }
}

fn open_persistence(database: Option<&Path>) -> Result<Persistence> {
    if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)
            .wrap_err_with(|| format!("opening database {}", db_path.display()))
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory().wrap_err("opening in-memory database")
    }
}

/// Runs one command and returns its JSON output.
fn execute(
    command: &CliCommand,
    persistence: &mut Persistence,
    session: &Session,
    now: OffsetDateTime,
) -> Result<Value> {
    let output: Value = match command {
        CliCommand::Import {
            payload,
            form,
            submit,
        } => {
            let request: CreateIncidentRequest = CreateIncidentRequest {
                payload: payload.as_deref().map(read_json::<Value>).transpose()?,
                submission: form
                    .as_deref()
                    .map(read_json::<Submission>)
                    .transpose()?
                    .unwrap_or_default(),
                submit: *submit,
            };
            serde_json::to_value(create_incident(persistence, session, request, now)?)?
        }
        CliCommand::Save {
            incident_id,
            stage,
            target_status,
            form,
        } => {
            let request: SaveIncidentRequest = SaveIncidentRequest {
                stage: *stage,
                target_status: *target_status,
                submission: read_json(form)?,
            };
            serde_json::to_value(validate_and_save(
                persistence,
                session,
                *incident_id,
                request,
                now,
            )?)?
        }
        CliCommand::Show { incident_id } => {
            serde_json::to_value(get_incident(persistence, session, *incident_id)?)?
        }
        CliCommand::List { include_archived } => {
            serde_json::to_value(list_incidents(persistence, *include_archived)?)?
        }
        CliCommand::Snapshots { incident_id } => {
            serde_json::to_value(list_snapshots(persistence, *incident_id)?)?
        }
        CliCommand::History { incident_id } => {
            serde_json::to_value(get_audit_trail(persistence, *incident_id)?)?
        }
        CliCommand::Archive { incident_id } => {
            serde_json::to_value(archive_incident(persistence, session, *incident_id, now)?)?
        }
        CliCommand::CleanupLineItems { incident_id } => serde_json::to_value(
            cleanup_line_items(persistence, session, *incident_id, now)?,
        )?,
    };
    Ok(output)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::datetime;

    static FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Writes `value` to a uniquely named file in the temp directory.
    fn write_json(value: &Value) -> PathBuf {
        let n: usize = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf =
            std::env::temp_dir().join(format!("bfrs_cli_test_{}_{n}.json", std::process::id()));
        std::fs::write(&path, value.to_string()).expect("write test input");
        path
    }

    fn create_test_now() -> OffsetDateTime {
        datetime!(2024-02-01 12:00 +8)
    }

    fn run(persistence: &mut Persistence, argv: &[&str]) -> Result<Value> {
        let args: Args = Args::try_parse_from(argv).expect("valid arguments");
        let session: Session = Session::user(args.user, args.can_maintain_data);
        execute(&args.command, persistence, &session, create_test_now())
    }

    fn import_test_incident(persistence: &mut Persistence) -> i64 {
        let payload: PathBuf = write_json(&json!({
            "sss_id": "sss-cli",
            "region_id": 1,
            "district_id": 10,
            "area": { "total_area": 3 },
        }));
        let form: PathBuf = write_json(&json!({
            "fields": {
                "name": "Kalamunda Rd",
                "fire_detected_date": "2024-01-20T14:00:00+08:00",
                "other_tenure": 2,
            }
        }));
        let output: Value = run(
            persistence,
            &[
                "bfrs-cli",
                "--user",
                "5",
                "import",
                "--payload",
                payload.to_str().unwrap(),
                "--form",
                form.to_str().unwrap(),
                "--submit",
            ],
        )
        .unwrap();
        output["incident_id"].as_i64().unwrap()
    }

    #[test]
    fn test_parses_global_options_after_subcommand() {
        let args: Args =
            Args::try_parse_from(["bfrs-cli", "show", "3", "--user", "9", "--can-maintain-data"])
                .unwrap();

        assert_eq!(args.user, 9);
        assert!(args.can_maintain_data);
        assert_eq!(args.database, None);
        assert_eq!(args.command, CliCommand::Show { incident_id: 3 });
    }

    #[test]
    fn test_parses_stage_and_status() {
        let args: Args = Args::try_parse_from([
            "bfrs-cli",
            "save",
            "4",
            "--stage",
            "Submitted",
            "--target-status",
            "Authorised",
            "--form",
            "form.json",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            CliCommand::Save {
                incident_id: 4,
                stage: Stage::Submitted,
                target_status: Some(ReportStatus::Authorised),
                form: PathBuf::from("form.json"),
            }
        );
    }

    #[test]
    fn test_rejects_unknown_stage() {
        let result: Result<Args, clap::Error> = Args::try_parse_from([
            "bfrs-cli", "save", "4", "--stage", "Draft", "--form", "form.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_import_then_show() {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        let incident_id: i64 = import_test_incident(&mut persistence);

        let shown: Value = run(&mut persistence, &["bfrs-cli", "show", &incident_id.to_string()])
            .unwrap();

        assert_eq!(shown["incident"]["name"], json!("Kalamunda Rd"));
        assert_eq!(shown["incident"]["report_status"], json!("Submitted"));
        assert_eq!(shown["incident"]["creator"], json!(5));
        assert_eq!(shown["stage"], json!("Submitted"));
    }

    #[test]
    fn test_save_transition_then_list_snapshots() {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        let incident_id: i64 = import_test_incident(&mut persistence);
        let form: PathBuf = write_json(&json!({ "fields": { "job_code": "UOV" } }));
        let id: String = incident_id.to_string();

        let saved: Value = run(
            &mut persistence,
            &[
                "bfrs-cli",
                "save",
                &id,
                "--stage",
                "Submitted",
                "--target-status",
                "Authorised",
                "--form",
                form.to_str().unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(saved["report_status"], json!("Authorised"));

        let snapshots: Value = run(&mut persistence, &["bfrs-cli", "snapshots", &id]).unwrap();
        assert_eq!(snapshots["snapshots"].as_array().unwrap().len(), 2);

        let history: Value = run(&mut persistence, &["bfrs-cli", "history", &id]).unwrap();
        assert_eq!(history["events"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_validation_failure_surfaces_api_error() {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        let incident_id: i64 = import_test_incident(&mut persistence);
        let form: PathBuf = write_json(&json!({ "fields": { "job_code": "uov" } }));

        let report: color_eyre::Report = run(
            &mut persistence,
            &[
                "bfrs-cli",
                "save",
                &incident_id.to_string(),
                "--stage",
                "Submitted",
                "--form",
                form.to_str().unwrap(),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            report.downcast_ref::<ApiError>(),
            Some(ApiError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_archive_hides_incident_from_list() {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        let incident_id: i64 = import_test_incident(&mut persistence);

        run(
            &mut persistence,
            &["bfrs-cli", "archive", &incident_id.to_string()],
        )
        .unwrap();

        let active: Value = run(&mut persistence, &["bfrs-cli", "list"]).unwrap();
        assert!(active["incidents"].as_array().unwrap().is_empty());
        let all: Value =
            run(&mut persistence, &["bfrs-cli", "list", "--include-archived"]).unwrap();
        assert_eq!(all["incidents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_form_file_is_an_error() {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

        let result: Result<Value> = run(
            &mut persistence,
            &[
                "bfrs-cli",
                "import",
                "--form",
                "/nonexistent/bfrs/form.json",
            ],
        );

        assert!(result.is_err());
        assert_eq!(persistence.count_incidents().unwrap(), 0);
    }
}
