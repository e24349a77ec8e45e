mod analysis;
mod config;
mod landmarks;
mod laps;
mod session;
mod telemetry;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::analysis::{AnalysisError, CompareRequest, Comparison};
use crate::config::Config;
use crate::landmarks::ZoomRange;
use crate::laps::{PaceFilter, SessionKind};
use crate::session::{FileSessionProvider, Session, SessionKey, SessionProvider};
use crate::telemetry::Channel;

#[derive(Parser)]
#[command(name = "lap-delta")]
#[command(about = "Distance-aligned lap telemetry comparison")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Configuration file
    #[arg(long, default_value = "config.yaml")]
    config: String,
    #[arg(long)]
    year: u16,
    #[arg(long)]
    event: String,
    #[arg(long, value_enum)]
    session: SessionKind,
}

#[derive(Subcommand)]
enum Commands {
    /// Align two laps and report their deltas
    Compare {
        #[command(flatten)]
        session: SessionArgs,
        /// Two driver codes, reference first
        #[arg(long, num_args = 2, value_names = ["A", "B"])]
        drivers: Vec<String>,
        /// Lap number (race sessions only)
        #[arg(long)]
        lap: Option<u32>,
        /// Distance window, e.g. 2000..3000
        #[arg(long)]
        zoom: Option<ZoomRange>,
        /// Write the full comparison as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List landmarks of a course
    Landmarks {
        #[arg(long, default_value = "config.yaml")]
        config: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        zoom: Option<ZoomRange>,
    },
    /// Quick-lap race pace of one driver
    Pace {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long)]
        driver: String,
        #[arg(long)]
        compound: Option<String>,
        #[arg(long)]
        stint: Option<u32>,
    },
    /// List session files under the configured base folder
    Sessions {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
    /// Validate a session file
    Validate { session: PathBuf },
    /// Start the HTTP API
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            session,
            drivers,
            lap,
            zoom,
            out,
        } => compare(&session, &drivers, lap, zoom, out.as_deref()),
        Commands::Landmarks {
            config,
            course,
            zoom,
        } => list_landmarks(&config, &course, zoom),
        Commands::Pace {
            session,
            driver,
            compound,
            stint,
        } => pace(&session, &driver, PaceFilter { compound, stint }),
        Commands::Sessions { config } => list_sessions(&config),
        Commands::Validate { session } => validate(&session),
        Commands::Serve { config } => serve(&config),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn load_session(config: &Config, args: &SessionArgs) -> Option<Session> {
    let provider = FileSessionProvider::new(config.sessions.base_folder.clone());
    let key = SessionKey {
        year: args.year,
        event: args.event.clone(),
        kind: args.session,
    };

    match provider.load(&key) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error loading session {}: {}", key, e);
            None
        }
    }
}

fn compare(
    args: &SessionArgs,
    drivers: &[String],
    lap: Option<u32>,
    zoom: Option<ZoomRange>,
    out: Option<&Path>,
) -> ExitCode {
    let [driver_a, driver_b] = drivers else {
        eprintln!("Exactly two drivers are required");
        return ExitCode::FAILURE;
    };
    let Some(config) = load_config(&args.config) else {
        return ExitCode::FAILURE;
    };
    let Some(session) = load_session(&config, args) else {
        return ExitCode::FAILURE;
    };

    let request = CompareRequest {
        driver_a: driver_a.clone(),
        driver_b: driver_b.clone(),
        lap,
        zoom,
    };

    let comparison = match analysis::compare(
        &session,
        &request,
        &config.analysis_options(),
        &config.landmark_catalog(),
    ) {
        Ok(c) => c,
        Err(e) => return report(e),
    };

    print_summary(&comparison);

    if let Some(path) = out {
        let json = match serde_json::to_string_pretty(&comparison) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error encoding comparison: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Error writing {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Comparison written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_summary(c: &Comparison) {
    println!(
        "{} {} {} ({})",
        c.year, c.event, c.session, c.label
    );
    for lap in [&c.lap_a, &c.lap_b] {
        let time = lap
            .lap_time
            .map(|t| format!("{:.3}s", t))
            .unwrap_or_else(|| "no time".to_string());
        println!("  {} lap {}: {}", lap.driver, lap.lap_number, time);
    }

    if !c.sectors.is_empty() {
        println!("  Sector   {:>9} {:>9} {:>8}  Faster", c.lap_a.driver, c.lap_b.driver, "Delta");
        for s in &c.sectors {
            println!(
                "  S{}       {:>9.3} {:>9.3} {:>+8.3}  {}",
                s.sector, s.time_a, s.time_b, s.delta, s.faster
            );
        }
    }

    if let Some(gap) = c.time_delta.final_value() {
        println!("  Gap at finish: {:+.3}s", gap);
    }
    println!(
        "  Aligned on {} points over {:.0} m",
        c.time_delta.len(),
        c.grid.last().copied().unwrap_or_default()
    );
    println!("  Largest speed difference: {:.1} km/h", c.speed_delta.max_abs());

    let landmarks = c.zoomed_landmarks.as_ref().unwrap_or(&c.landmarks);
    if !landmarks.is_empty() {
        let names: Vec<String> = landmarks
            .iter()
            .map(|l| format!("{}@{:.0}m", l.name, l.distance))
            .collect();
        println!("  Landmarks: {}", names.join(", "));
    }
}

fn list_landmarks(config_path: &str, course: &str, zoom: Option<ZoomRange>) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    let catalog = config.landmark_catalog();

    if catalog.get(course).is_none() {
        eprintln!(
            "No landmarks for course '{}' (known: {})",
            course,
            catalog.courses().join(", ")
        );
        return ExitCode::FAILURE;
    }

    for landmark in catalog.annotate(course, zoom) {
        println!("  {:<6} {:>7.0} m", landmark.name, landmark.distance);
    }
    ExitCode::SUCCESS
}

fn pace(args: &SessionArgs, driver: &str, filter: PaceFilter) -> ExitCode {
    let Some(config) = load_config(&args.config) else {
        return ExitCode::FAILURE;
    };
    let Some(session) = load_session(&config, args) else {
        return ExitCode::FAILURE;
    };

    let points = match analysis::pace(&session, driver, &filter) {
        Ok(p) => p,
        Err(e) => return report(e),
    };

    if points.is_empty() {
        println!("No quick laps for {}", driver);
        return ExitCode::SUCCESS;
    }

    for p in &points {
        println!(
            "  Lap {:>3}  {:>8.3}s  {:<12} stint {}",
            p.lap_number,
            p.lap_time,
            p.compound.as_deref().unwrap_or("-"),
            p.stint.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
        );
    }
    ExitCode::SUCCESS
}

fn list_sessions(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    let provider = FileSessionProvider::new(config.sessions.base_folder.clone());

    match provider.list() {
        Ok(files) => {
            println!("{} session files", files.len());
            for f in files {
                println!("  {}", f.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error listing sessions: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    match Session::from_file(path) {
        Ok(session) => {
            println!(
                "Session is valid: {} ({} drivers)",
                session.key(),
                session.drivers.len()
            );
            for driver in &session.drivers {
                let samples: usize = driver.laps.iter().map(|l| l.telemetry.len()).sum();
                println!(
                    "  {}: {} laps, {} samples",
                    driver.driver,
                    driver.laps.len(),
                    samples
                );
                for lap in &driver.laps {
                    let trace = lap.trace(&driver.driver);
                    let channels: Vec<String> = Channel::ALL
                        .iter()
                        .filter(|&&c| trace.has_channel(c))
                        .map(|c| c.to_string())
                        .collect();
                    println!("    lap {}: {}", lap.lap_number, channels.join(", "));
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: AnalysisError) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}
