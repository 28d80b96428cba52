//! Interactive command parsing
//!
//! The single dispatch point for user input: every line read from the
//! terminal is parsed into a `Command` here and routed by the main loop to
//! the matching selection/create/accelerate handler.

/// A parsed user command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `track <id>`: select a track
    SelectTrack(u64),
    /// `racer <id>`: select a racer
    SelectRacer(u64),
    /// `start`: create and run a race with the current selection
    StartRace,
    /// `gas` or a bare Enter: accelerate the player's racer
    Gas,
    /// `quit`: leave (aborts a running race)
    Quit,
    /// `help`: show the command list
    Help,
    /// Anything else
    Unknown,
}

/// Parse one input line into a command
///
/// An empty line means `gas`, so the accelerate control can be hammered by
/// holding Enter during a race.
pub fn parse(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => Command::Gas,
        Some("track") | Some("t") => match parts.next().and_then(|s| s.parse().ok()) {
            Some(id) => Command::SelectTrack(id),
            None => Command::Unknown,
        },
        Some("racer") | Some("r") => match parts.next().and_then(|s| s.parse().ok()) {
            Some(id) => Command::SelectRacer(id),
            None => Command::Unknown,
        },
        Some("start") => Command::StartRace,
        Some("gas") | Some("g") => Command::Gas,
        Some("quit") | Some("q") | Some("exit") => Command::Quit,
        Some("help") | Some("?") => Command::Help,
        Some(_) => Command::Unknown,
    }
}

/// The command list shown by `help` and at startup
pub const HELP: &str = "\
Commands:
  track <id>   select a track
  racer <id>   select a racer
  start        create and start the race
  gas          accelerate (bare Enter works too)
  help         show this list
  quit         leave
";
