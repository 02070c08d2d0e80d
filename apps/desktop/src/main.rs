use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ControlSurface, SurfaceOutcome, SurfaceState};
use shared::domain::{EntityId, Outcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    /// Print outcome maps as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default outcome of every tracked entity.
    Show,
    /// Ask the server for a random assignment.
    Randomize,
    /// Submit outcomes for evaluation and print the qualifying entities.
    Evaluate {
        /// `entity=outcome`, repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(EntityId, Outcome)>,
        /// Apply a random assignment before the overrides.
        #[arg(long)]
        randomize_first: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(EntityId, Outcome), String> {
    let (entity, outcome) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected entity=outcome, got '{raw}'"))?;
    let (entity, outcome) = (entity.trim(), outcome.trim());
    if entity.is_empty() || outcome.is_empty() {
        return Err(format!("expected entity=outcome, got '{raw}'"));
    }
    Ok((EntityId::from(entity), Outcome::from(outcome)))
}

fn print_outcomes(state: &SurfaceState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&state.store)?);
        return Ok(());
    }
    for group in state.binder.groups() {
        let outcome = state
            .store
            .get(&group.entity.id)
            .map(Outcome::as_str)
            .unwrap_or("-");
        println!("{:<6} {:<12} {outcome}", group.entity.id, group.entity.label);
    }
    Ok(())
}

async fn run_randomize(surface: &ControlSurface) -> Result<()> {
    if let SurfaceOutcome::Failed(message) = surface.randomize().await {
        bail!(message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
        settings.validate()?;
    }
    let surface = ControlSurface::connect(&settings)?;

    match args.command {
        Command::Show => {
            print_outcomes(&surface.snapshot().await, args.json)?;
        }
        Command::Randomize => {
            run_randomize(&surface).await?;
            print_outcomes(&surface.snapshot().await, args.json)?;
        }
        Command::Evaluate {
            assignments,
            randomize_first,
        } => {
            if randomize_first {
                run_randomize(&surface).await?;
            }
            for (entity, outcome) in &assignments {
                if !surface.toggle(entity, outcome).await {
                    bail!("no '{outcome}' control for entity '{entity}'");
                }
            }
            print_outcomes(&surface.snapshot().await, args.json)?;
            match surface.evaluate().await {
                SurfaceOutcome::Evaluated(view) => print!("\n{view}"),
                SurfaceOutcome::Failed(message) => bail!(message),
                SurfaceOutcome::Randomized => {}
            }
        }
    }

    Ok(())
}
