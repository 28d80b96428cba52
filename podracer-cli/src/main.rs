//! Podracer CLI Application
//!
//! This is the terminal frontend for the podracer-client library. It adds:
//! - Argument parsing and TOML configuration loading
//! - The interactive input dispatcher (select/start/gas/quit)
//! - Printing of the rendered views as race events arrive
//! - Plain-text race report generation

use anyhow::Result;
use clap::Parser;
use podracer_client::{
    render, ApiClient, CancelToken, ClientError, NameTable, RaceApi, RaceController, RaceEvent,
    RaceOutcome, Racer, Session, TimingConfig, Track,
};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

mod config;
mod input;
mod report;

use input::Command;

/// Podracer - race against the server simulation from your terminal
#[derive(Parser, Debug)]
#[command(name = "podracer-cli")]
#[command(about = "Terminal client for the podracer race server", long_about = None)]
#[command(version)]
struct Args {
    /// Race server base URL (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    server: Option<String>,

    /// Path to configuration file (race.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pre-select a track id
    #[arg(long, value_name = "ID")]
    track: Option<u64>,

    /// Pre-select a racer id
    #[arg(long, value_name = "ID")]
    racer: Option<u64>,

    /// Write a plain-text report after the race finishes
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("Podracer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using client library v{}", podracer_client::VERSION);

    let app = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    run(args, app).await
}

/// How the race phase ended, from the main loop's point of view
enum RaceEnd {
    /// Race finished; results were rendered
    Completed,
    /// User aborted mid-race
    Aborted,
    /// Recoverable problem (missing selection, create failure); select again
    BackToSelection,
}

async fn run(args: Args, app: config::AppConfig) -> Result<()> {
    let server_url = args
        .server
        .clone()
        .unwrap_or_else(|| app.server.url.clone());
    let api = ApiClient::new(server_url.as_str());
    let names = app.name_table();
    let timing = app.timing.clone();

    println!("═══════════════════════════════════════════════");
    println!("  Podracer — Terminal Race Client");
    println!("═══════════════════════════════════════════════\n");
    println!("Server: {}\n", server_url);

    // Initial load: fetch both lists up front. A fetch failure leaves the
    // loading placeholder in place; selection by id still works.
    let tracks = api.list_tracks().await.unwrap_or_else(|e| {
        log::warn!("Could not fetch tracks: {}", e);
        Vec::new()
    });
    let racers = api.list_racers().await.unwrap_or_else(|e| {
        log::warn!("Could not fetch racers: {}", e);
        Vec::new()
    });
    print!("{}", render::track_list(&tracks, &names));
    println!();
    print!("{}", render::racer_list(&racers, &names));
    println!();
    print!("{}", input::HELP);

    let mut session = Session::new();
    if let Some(id) = args.track {
        session.select_track(id);
    }
    if let Some(id) = args.racer {
        session.select_racer(id);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match selection_phase(&mut session, &mut lines, &tracks, &racers, &names).await? {
            SelectionEnd::Quit => return Ok(()),
            SelectionEnd::StartRace => {}
        }

        match race_phase(
            &api,
            &timing,
            &names,
            &mut session,
            &mut lines,
            args.report.as_deref(),
        )
        .await?
        {
            RaceEnd::Completed | RaceEnd::Aborted => return Ok(()),
            RaceEnd::BackToSelection => continue,
        }
    }
}

enum SelectionEnd {
    StartRace,
    Quit,
}

/// Read commands until the user starts a race or leaves
async fn selection_phase(
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
    tracks: &[Track],
    racers: &[Racer],
    names: &NameTable,
) -> Result<SelectionEnd> {
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(SelectionEnd::Quit);
        };

        match input::parse(&line) {
            Command::SelectTrack(id) => {
                session.select_track(id);
                let name = tracks
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| names.track(&t.name).to_string())
                    .unwrap_or_else(|| format!("track {}", id));
                println!("✓ Track selected: {}", name);
            }
            Command::SelectRacer(id) => {
                session.select_racer(id);
                let name = racers
                    .iter()
                    .find(|r| r.id == id)
                    .map(|r| names.racer(&r.driver_name).to_string())
                    .unwrap_or_else(|| format!("racer {}", id));
                println!("✓ Racer selected: {}", name);
            }
            Command::StartRace => return Ok(SelectionEnd::StartRace),
            Command::Gas => println!("No active race — `start` one first"),
            Command::Help => print!("{}", input::HELP),
            Command::Quit => return Ok(SelectionEnd::Quit),
            Command::Unknown => println!("Unknown command (try `help`)"),
        }
    }
}

/// Run one race: drive the lifecycle controller while forwarding gas/quit
/// input and printing each event's view as it arrives
async fn race_phase(
    api: &ApiClient,
    timing: &TimingConfig,
    names: &NameTable,
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
    report_path: Option<&Path>,
) -> Result<RaceEnd> {
    let player_id = session.player_id();
    let countdown_from = timing.countdown_from;

    let (events, mut rx) = mpsc::unbounded_channel();
    let (token, mut cancel) = CancelToken::new();
    let mut controller = RaceController::new(api.clone(), timing.clone());

    let race = async {
        let outcome = controller.run(session, &events, &mut cancel).await;
        drop(events);
        outcome
    };
    tokio::pin!(race);

    let mut active_race = None;
    let mut track_name: Option<String> = None;

    let outcome = loop {
        tokio::select! {
            outcome = &mut race => break outcome,
            Some(event) = rx.recv() => {
                if let RaceEvent::Created(race) = &event {
                    active_race = Some(race.handle());
                    track_name = race.track.as_ref().map(|t| t.name.clone());
                }
                render_event(&event, player_id, countdown_from, names);
            }
            line = lines.next_line() => match line? {
                Some(line) => match input::parse(&line) {
                    Command::Gas => gas(api, active_race),
                    Command::Quit => token.cancel(),
                    _ => println!("Race underway — `gas` to accelerate, `quit` to abort"),
                },
                // stdin closed; abort the race instead of polling forever
                None => token.cancel(),
            },
        }
    };

    // The run can complete with events still queued; render the tail.
    while let Ok(event) = rx.try_recv() {
        render_event(&event, player_id, countdown_from, names);
    }

    match outcome {
        Ok(RaceOutcome::Finished(positions)) => {
            if let Some(path) = report_path {
                report::write_race_report(path, track_name.as_deref(), &positions, player_id, names)?;
                println!("✓ Report written to {:?}", path);
            }
            Ok(RaceEnd::Completed)
        }
        Ok(RaceOutcome::Cancelled) => {
            println!("Race aborted.");
            Ok(RaceEnd::Aborted)
        }
        Err(ClientError::MissingSelection) => {
            println!("⚠ Please select a track and a racer before starting the race");
            Ok(RaceEnd::BackToSelection)
        }
        Err(e) => {
            println!("✗ Could not run the race: {}", e);
            Ok(RaceEnd::BackToSelection)
        }
    }
}

/// Accelerate side-channel: fire-and-forget, independent of lifecycle phase
fn gas(api: &ApiClient, active_race: Option<u64>) {
    match active_race {
        Some(race_id) => {
            let api = api.clone();
            tokio::spawn(async move {
                if let Err(e) = api.accelerate(race_id).await {
                    log::warn!("Accelerate request failed: {}", e);
                }
            });
        }
        None => println!("No active race yet"),
    }
}

fn render_event(event: &RaceEvent, player_id: Option<u64>, countdown_from: u32, names: &NameTable) {
    match event {
        RaceEvent::Created(race) => {
            let track = race
                .track
                .as_ref()
                .map(|t| t.name.as_str())
                .unwrap_or("Unknown Track");
            print!("\n{}", render::race_start(track, countdown_from, names));
        }
        RaceEvent::CountdownTick(t) => print!("{}", render::countdown(*t)),
        RaceEvent::Started => println!("Green flag — go!"),
        RaceEvent::Progress(positions) => {
            print!("\n{}", render::progress(positions, player_id, names));
        }
        RaceEvent::Finished(positions) => {
            print!("\n{}", render::results(positions, player_id, names));
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
