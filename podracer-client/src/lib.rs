//! Podracer Client Library
//!
//! A stateless, reusable client for a server-authoritative racing game. The
//! server owns the simulation (physics, segment advancement, win
//! detection); this library only submits intents and polls for state.
//!
//! # Architecture
//!
//! The library is intentionally minimal and focused on the client side:
//! - Talks to the race server over HTTP (tracks, racers, create, start,
//!   accelerate, status)
//! - Tracks the user's selection and the active race in a `Session`
//! - Drives the race lifecycle (create → countdown → start → poll until
//!   finished) and emits typed events
//! - Renders domain data to display strings
//!
//! The library does NOT:
//! - Read the terminal or parse command lines
//! - Decide where rendered strings go
//! - Retry failed requests or reconcile conflicting state
//! - Validate the server's physics; `segment` and `final_position` are
//!   authoritative values from the snapshot
//!
//! All interactive behavior is in the application layer (podracer-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use podracer_client::{
//!     ApiClient, CancelToken, RaceController, Session, TimingConfig,
//! };
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> podracer_client::Result<()> {
//! let api = ApiClient::new("http://localhost:8000");
//! let mut session = Session::new();
//! session.select_track(3);
//! session.select_racer(2);
//!
//! let (events, mut rx) = mpsc::unbounded_channel();
//! let (_token, mut cancel) = CancelToken::new();
//!
//! let mut controller = RaceController::new(api, TimingConfig::new());
//! let outcome = controller.run(&mut session, &events, &mut cancel).await?;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod api;
pub mod config;
pub mod lifecycle;
pub mod names;
pub mod render;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use api::{ApiClient, RaceApi};
pub use config::TimingConfig;
pub use lifecycle::{CancelSignal, CancelToken, RaceController, RaceEvent, RaceOutcome, RacePhase};
pub use names::NameTable;
pub use session::Session;
pub use types::{
    ClientError, Race, RaceStatus, Racer, RacerPosition, Result, Track, FINISH_LINE_SEGMENT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
