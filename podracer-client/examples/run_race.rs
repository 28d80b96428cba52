//! Run one race against a live server, picking the first track and racer.
//!
//! Usage: cargo run --example run_race [server-url]

use podracer_client::{
    render, ApiClient, CancelToken, NameTable, RaceApi, RaceController, RaceEvent, Session,
    TimingConfig,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> podracer_client::Result<()> {
    env_logger::init();

    let server = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let api = ApiClient::new(server);
    let names = NameTable::new();

    let tracks = api.list_tracks().await?;
    let racers = api.list_racers().await?;
    print!("{}", render::track_list(&tracks, &names));
    print!("{}", render::racer_list(&racers, &names));

    let mut session = Session::new();
    if let (Some(track), Some(racer)) = (tracks.first(), racers.first()) {
        session.select_track(track.id);
        session.select_racer(racer.id);
    }
    let player_id = session.player_id();

    let (events, mut rx) = mpsc::unbounded_channel();
    let (_token, mut cancel) = CancelToken::new();
    let mut controller = RaceController::new(api, TimingConfig::new());

    let printer = async {
        while let Some(event) = rx.recv().await {
            match event {
                RaceEvent::Created(race) => {
                    if let Some(track) = &race.track {
                        print!("{}", render::race_start(&track.name, 3, &names));
                    }
                }
                RaceEvent::CountdownTick(t) => print!("{}", render::countdown(t)),
                RaceEvent::Started => println!("Green flag!"),
                RaceEvent::Progress(positions) => {
                    print!("{}", render::progress(&positions, player_id, &names))
                }
                RaceEvent::Finished(positions) => {
                    print!("{}", render::results(&positions, player_id, &names))
                }
            }
        }
    };

    // Dropping the sender once the run ends lets the printer drain and stop.
    let race = async move {
        let outcome = controller.run(&mut session, &events, &mut cancel).await;
        drop(events);
        outcome
    };

    let (outcome, _) = tokio::join!(race, printer);
    outcome?;

    Ok(())
}
