//! office-days - count office days from Google location history
//!
//! Reads every export below an input directory, keeps the visits within a tolerance
//! of the office during a time range, and reports on how many distinct days (and
//! working days) that happened.

use anyhow::Result;
use chrono::Local;
use office_days_cli::output::{
    format_count, format_date_line, format_duration, format_summary, print_error, print_warning,
};
use office_days_cli::progress;
use office_days_core::config::Config;
use office_days_core::error::{Error, exit_codes};
use office_days_core::file_scanner::FileScanner;
use office_days_telemetry::{TelemetryConfig, Timer, timed_span};
use office_days_timeline::{Scanner, list_files};
use std::process::ExitCode;

mod args;
mod settings;

use args::Cli;
use settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = office_days_telemetry::init(&TelemetryConfig::from_verbosity(cli.verbose)) {
        print_warning(&format!("Logging disabled: {err}"));
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err.to_string());
            let code = err
                .downcast_ref::<Error>()
                .map_or(exit_codes::FAILURE, |e| e.code.exit_code());
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    timed_span!("run");

    let config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let settings = Settings::resolve(cli, &config.schema, &Local)?;
    tracing::debug!(
        dir = %settings.input_dir.display(),
        start = %settings.query.range.start(),
        end = %settings.query.range.end(),
        reference = %settings.query.reference,
        tolerance_m = settings.query.tolerance_m,
        "Resolved settings"
    );

    let files = list_files(
        &FileScanner::new(&settings.input_dir)
            .with_extensions(settings.extensions.as_slice())
            .exclude(settings.exclude.as_slice()),
    );

    let pb = if settings.progress {
        progress::file_progress(files.len() as u64)
    } else {
        progress::hidden()
    };

    let timer = Timer::start("scan");
    let tick = pb.clone();
    let outcome = Scanner::new(settings.query)
        .parallel(settings.parallel)
        .on_file(move |_| tick.inc(1))
        .run(&files);
    let elapsed = timer.stop();

    if settings.progress {
        progress::finish_success(
            &pb,
            &format!(
                "{} in {}",
                format_count(files.len(), "file", "files"),
                format_duration(elapsed)
            ),
        );
    }

    let summary = outcome.summary;
    tracing::debug!(
        files = summary.files_scanned,
        failed = summary.files_failed,
        records = summary.records,
        candidates = summary.candidates,
        matches = summary.matches,
        "Scan complete"
    );
    if summary.files_failed > 0 {
        print_warning(&format!(
            "Skipped {} that could not be read",
            format_count(summary.files_failed, "file", "files")
        ));
    }

    println!(
        "{}",
        format_summary(outcome.days.len(), outcome.days.working_day_count())
    );

    if settings.print_dates {
        for day in outcome.days.iter() {
            println!("{}", format_date_line(&day.iso_date(), day.is_working_day));
        }
    }

    Ok(())
}
