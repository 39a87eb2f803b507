//! CourseForge CLI entry point
//!
//! `cf chat` runs the interactive refinement conversation and, on approval,
//! the design pipeline. `cf run` drives the same flow non-interactively from
//! a request file.

use std::fs;
use std::io::{self, BufRead, Write as IoWrite};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use courseforge::cli::{Cli, Command};
use courseforge::config::Config;
use courseforge::coordinator::{CoordinatorError, RefinementController};
use courseforge::domain::CourseRequestDraft;
use courseforge::engine::create_engine;
use courseforge::pipeline::{PipelineController, PipelineReport, StageKind};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("courseforge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file, not stdout/stderr - the chat loop owns the terminal
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("courseforge.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "CourseForge loaded config: provider={}, model={}",
        config.engine.provider, config.engine.model
    );

    match cli.command {
        Some(Command::Chat { output }) => cmd_chat(&config, output.as_deref()).await,
        Some(Command::Run { request, output }) => cmd_run(&config, &request, output.as_deref()).await,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Read one line from stdin after printing a prompt; None on EOF
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let stdin = io::stdin();
    let handle = stdin.lock();
    match handle.lines().next() {
        Some(Ok(line)) => Ok(Some(line.trim().to_string())),
        Some(Err(e)) => Err(e.into()),
        None => Ok(None),
    }
}

/// Prompt for the course request form fields
fn read_form() -> Result<Option<CourseRequestDraft>> {
    println!("{}", "Course Request Form".bold());
    let Some(course_title) = read_line("Course title: ")? else { return Ok(None) };
    let Some(course_description) = read_line("Course description: ")? else { return Ok(None) };
    let Some(course_credits) = read_line("Credits: ")? else { return Ok(None) };
    let Some(course_duration_weeks) = read_line("Duration (weeks): ")? else { return Ok(None) };
    let Some(course_level) = read_line("Course level: ")? else { return Ok(None) };
    let Some(course_expectations) = read_line("Course expectations: ")? else { return Ok(None) };

    Ok(Some(CourseRequestDraft {
        course_title,
        course_description,
        course_credits,
        course_duration_weeks,
        course_level,
        course_expectations,
        course_modules: Vec::new(),
    }))
}

/// Interactive refinement chat followed by the design pipeline
async fn cmd_chat(config: &Config, output: Option<&Path>) -> Result<()> {
    config.validate()?;
    let engine = create_engine(&config.engine)?;
    let mut controller = RefinementController::new(engine.clone());

    // Form phase: re-prompt until the draft validates
    loop {
        let Some(draft) = read_form()? else {
            println!("Cancelled.");
            return Ok(());
        };

        match controller.submit_form(&draft).await {
            Ok(transcript) => {
                for message in &transcript {
                    println!("\n{}\n", message.content);
                }
                break;
            }
            Err(CoordinatorError::Validation(err)) => {
                for message in err.messages() {
                    println!("{}", message.red());
                }
                println!();
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!(
        "{}",
        "Chat with the coordinator to refine your request. Type \"approve\" when satisfied, or \"quit\" to exit."
            .dimmed()
    );

    // Chat phase
    loop {
        let Some(input) = read_line("> ")? else {
            println!("\nSession cancelled.");
            return Ok(());
        };

        match input.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => {
                println!("Session cancelled.");
                return Ok(());
            }
            _ => {}
        }

        match controller.send_message(&input).await {
            Ok(reply) if reply.approval_requested => {
                println!("\n{}\n", reply.display_text.green());
                let pipeline =
                    PipelineController::new(engine.clone()).with_lms_platform(config.pipeline.lms_platform.clone());
                let report = pipeline.run(controller.session_mut()).await?;
                print_report(&report);
                if let Some(path) = output {
                    write_report(&report, path)?;
                }
                return Ok(());
            }
            Ok(reply) => {
                println!("\n{}\n", reply.display_text);
                if let Some(warning) = reply.merge_warning {
                    println!("{}", warning.yellow());
                }
            }
            Err(CoordinatorError::Engine(err)) => {
                // recoverable: the transcript is intact, the user can retry
                println!("{}", format!("Turn failed: {err}. Try again.").yellow());
            }
            Err(err) => {
                println!("{}", err.to_string().yellow());
            }
        }
    }
}

/// Non-interactive run from a request file
async fn cmd_run(config: &Config, request_path: &Path, output: Option<&Path>) -> Result<()> {
    config.validate()?;

    let content = fs::read_to_string(request_path)
        .context(format!("Failed to read request file {}", request_path.display()))?;
    let draft: CourseRequestDraft = serde_yaml::from_str(&content).context("Failed to parse request file")?;

    let engine = create_engine(&config.engine)?;
    let mut controller = RefinementController::new(engine.clone());

    match controller.submit_form(&draft).await {
        Ok(_) => {}
        Err(CoordinatorError::Validation(err)) => {
            for message in err.messages() {
                eprintln!("{}", message.red());
            }
            eyre::bail!("course request is invalid");
        }
        Err(err) => return Err(err.into()),
    }

    let pipeline = PipelineController::new(engine).with_lms_platform(config.pipeline.lms_platform.clone());
    let report = pipeline.run(controller.session_mut()).await?;
    print_report(&report);

    match output {
        Some(path) => write_report(&report, path)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !report.is_complete() {
        eyre::bail!("design pipeline did not complete");
    }
    Ok(())
}

/// Print a stage-by-stage summary of a pipeline run
fn print_report(report: &PipelineReport) {
    println!("{}", "Design pipeline".bold());
    for result in &report.outputs {
        println!("  {} {}", "✓".green(), result.stage);
    }
    if let Some(failure) = &report.failure {
        println!("  {} {}: {}", "✗".red(), failure.stage, failure.error);
        let failed_pos = StageKind::ORDER.iter().position(|s| *s == failure.stage).unwrap_or(0);
        for stage in &StageKind::ORDER[failed_pos + 1..] {
            println!("  {} {} (skipped)", "-".dimmed(), stage.to_string().dimmed());
        }
    }
}

/// Write the report JSON to a file
fn write_report(report: &PipelineReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).context(format!("Failed to write report to {}", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
