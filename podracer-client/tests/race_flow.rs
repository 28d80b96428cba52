//! End-to-end race flow against a scripted server
//!
//! Drives the public API the way the CLI does: select, run the lifecycle,
//! render each event, and check the views that come out the other side.

use podracer_client::{
    render, CancelToken, NameTable, Race, RaceApi, RaceController, RaceEvent, RaceOutcome,
    RaceStatus, Racer, RacerPosition, Result, Session, TimingConfig, Track,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Scripted race server: one create response, then status snapshots in
/// order. Records every race id it is called with.
struct ScriptedServer {
    calls: Mutex<Vec<(String, u64)>>,
    snapshots: Mutex<VecDeque<Race>>,
}

impl ScriptedServer {
    fn new(snapshots: Vec<Race>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            snapshots: Mutex::new(snapshots.into()),
        }
    }

    fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, race_id: u64) {
        self.calls.lock().unwrap().push((op.to_string(), race_id));
    }
}

impl RaceApi for ScriptedServer {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        Ok(vec![Track {
            id: 3,
            name: "Track 3".to_string(),
        }])
    }

    async fn list_racers(&self) -> Result<Vec<Racer>> {
        Ok(vec![Racer {
            id: 2,
            driver_name: "Racer 2".to_string(),
            top_speed: 380,
            acceleration: 8,
            handling: 8,
        }])
    }

    async fn create_race(&self, _player_id: u64, track_id: u64) -> Result<Race> {
        // The server hands back ID 5; the client must talk to race 4 from
        // here on.
        Ok(Race {
            id: 5,
            track: Some(Track {
                id: track_id,
                name: "Track 3".to_string(),
            }),
            cars: self.list_racers().await?,
            status: RaceStatus::NotStarted,
            positions: Vec::new(),
        })
    }

    async fn start_race(&self, race_id: u64) -> Result<()> {
        self.record("start", race_id);
        Ok(())
    }

    async fn accelerate(&self, race_id: u64) -> Result<()> {
        self.record("accelerate", race_id);
        Ok(())
    }

    async fn get_race(&self, race_id: u64) -> Result<Race> {
        self.record("get", race_id);
        let mut snapshots = self.snapshots.lock().unwrap();
        let snapshot = if snapshots.len() > 1 {
            snapshots.pop_front().unwrap()
        } else {
            snapshots.front().cloned().expect("script exhausted")
        };
        Ok(snapshot)
    }
}

fn snapshot(status: RaceStatus, segment: u32, final_position: Option<u32>) -> Race {
    Race {
        id: 4,
        track: None,
        cars: Vec::new(),
        status,
        positions: vec![
            RacerPosition {
                id: 2,
                driver_name: "Racer 2".to_string(),
                segment,
                final_position,
            },
            RacerPosition {
                id: 3,
                driver_name: "Racer 3".to_string(),
                segment: segment / 2,
                final_position: final_position.map(|_| 2),
            },
        ],
    }
}

#[tokio::test(start_paused = true)]
async fn full_race_renders_start_progress_and_results() {
    let server = ScriptedServer::new(vec![
        snapshot(RaceStatus::InProgress, 100, None),
        snapshot(RaceStatus::Finished, 201, Some(1)),
    ]);
    let names = NameTable::new();

    let mut session = Session::new();
    session.select_track(3);
    session.select_racer(2);

    let (events, mut rx) = mpsc::unbounded_channel();
    let (_token, mut cancel) = CancelToken::new();
    let mut controller = RaceController::new(server, TimingConfig::new());

    let outcome = controller
        .run(&mut session, &events, &mut cancel)
        .await
        .expect("race should finish");
    assert!(matches!(outcome, RaceOutcome::Finished(_)));

    // Race id 5 from the server, handle 4 everywhere afterwards
    assert_eq!(session.race_id().unwrap(), 4);

    // Render every event the way the CLI would
    let mut views = Vec::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            RaceEvent::Created(race) => {
                let track = race.track.as_ref().expect("create response carries track");
                views.push(render::race_start(&track.name, 3, &names));
            }
            RaceEvent::CountdownTick(t) => views.push(render::countdown(t)),
            RaceEvent::Started => {}
            RaceEvent::Progress(positions) => {
                views.push(render::progress(&positions, Some(2), &names))
            }
            RaceEvent::Finished(positions) => {
                views.push(render::results(&positions, Some(2), &names))
            }
        }
    }

    let start_view = &views[0];
    assert!(start_view.contains("Glacier National Park"));
    assert!(start_view.contains("Race starts in... 3"));

    let results: Vec<&String> = views.iter().filter(|v| v.contains("Race Results")).collect();
    assert_eq!(results.len(), 1, "exactly one results view");
    assert!(results[0].contains("Sammy wins!"));
    assert!(results[0].contains("1. Sammy (you)"));
}

#[tokio::test(start_paused = true)]
async fn every_request_after_create_uses_the_corrected_id() {
    let server = ScriptedServer::new(vec![snapshot(RaceStatus::Finished, 201, Some(1))]);

    let mut session = Session::new();
    session.select_track(3);
    session.select_racer(2);

    let (events, _rx) = mpsc::unbounded_channel();
    let (_token, mut cancel) = CancelToken::new();
    let mut controller = RaceController::new(server, TimingConfig::new());

    controller
        .run(&mut session, &events, &mut cancel)
        .await
        .unwrap();

    // Accelerate side-channel uses the same corrected handle
    let race_id = session.race_id().unwrap();
    controller.api().accelerate(race_id).await.unwrap();

    let calls = controller.api().calls();
    assert!(!calls.is_empty());
    assert!(
        calls.iter().all(|(_, id)| *id == 4),
        "all calls must target race 4: {:?}",
        calls
    );
    assert_eq!(calls[0], ("start".to_string(), 4));
    assert_eq!(calls.last().unwrap(), &("accelerate".to_string(), 4));
}
