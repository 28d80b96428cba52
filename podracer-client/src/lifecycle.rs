//! Race lifecycle controller
//!
//! This module orchestrates the one real control-flow sequence in the
//! client: validate the selection, create the race, run the countdown,
//! start the race, then poll until the server reports it finished.
//!
//! The controller emits `RaceEvent`s over a channel and leaves rendering to
//! the consumer: the library produces typed events, the application layer
//! decides how to present them. Every wait point races against a
//! cancellation signal, so the lifecycle can be aborted from outside
//! instead of only ending on its own terminal condition.

use crate::api::RaceApi;
use crate::config::TimingConfig;
use crate::session::Session;
use crate::types::{Race, RaceStatus, RacerPosition, Result};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Where the controller currently is in the race sequence
///
/// This is a linear sequence, not a general state machine: phases only ever
/// advance, and the only exits are finishing, cancellation, or an error
/// from race creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    ValidatingSelection,
    RaceCreated,
    CountingDown,
    Started,
    Polling,
    Finished,
}

/// Events emitted while a race runs, in emission order
#[derive(Debug, Clone)]
pub enum RaceEvent {
    /// Race created; carries the create response (track + participants)
    Created(Race),
    /// Visible countdown decrement (countdown_from-1 down to 0)
    CountdownTick(u32),
    /// Start request issued
    Started,
    /// Fresh in-progress snapshot positions
    Progress(Vec<RacerPosition>),
    /// First finished snapshot; emitted exactly once
    Finished(Vec<RacerPosition>),
}

/// How a lifecycle run ended
#[derive(Debug, Clone)]
pub enum RaceOutcome {
    /// The server reported the race finished; carries the final positions
    Finished(Vec<RacerPosition>),
    /// The cancellation token fired before the race finished
    Cancelled,
}

/// Handle used to abort a running lifecycle
#[derive(Debug)]
pub struct CancelToken {
    tx: watch::Sender<bool>,
}

/// Receiving side of a `CancelToken`, observed by the controller
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Create a token and the signal the controller will watch
    pub fn new() -> (CancelToken, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelToken { tx }, CancelSignal { rx })
    }

    /// Fire the token; every waiting lifecycle step observes it
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelSignal {
    /// Whether the token has fired
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the token fires. If the token is dropped without firing,
    /// cancellation can no longer happen and this pends forever.
    pub async fn cancelled(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// The race lifecycle controller
pub struct RaceController<A: RaceApi> {
    api: A,
    timing: TimingConfig,
    phase: RacePhase,
}

impl<A: RaceApi> RaceController<A> {
    /// Create a controller over the given API client and timing
    pub fn new(api: A, timing: TimingConfig) -> Self {
        Self {
            api,
            timing,
            phase: RacePhase::Idle,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// The API client this controller drives, e.g. for the accelerate
    /// side-channel
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one full race.
    ///
    /// Steps execute strictly in sequence: the countdown completes fully
    /// before the start request is issued, and the start request is issued
    /// before polling begins. Whether the start request's *completion* is
    /// awaited before the first poll tick is governed by
    /// `TimingConfig::await_start`; by default it is not.
    ///
    /// Validation and race-creation failures are returned as errors; start
    /// and poll failures are logged and the sequence continues. Polling has
    /// no timeout: it ends on the first finished snapshot or when `cancel`
    /// fires.
    pub async fn run(
        &mut self,
        session: &mut Session,
        events: &mpsc::UnboundedSender<RaceEvent>,
        cancel: &mut CancelSignal,
    ) -> Result<RaceOutcome> {
        self.phase = RacePhase::ValidatingSelection;
        let (player_id, track_id) = session.validated()?;

        let race = self.api.create_race(player_id, track_id).await?;
        session.record_race(&race);
        let race_id = session.race_id()?;

        self.phase = RacePhase::RaceCreated;
        let _ = events.send(RaceEvent::Created(race));

        self.phase = RacePhase::CountingDown;
        if !sleep_unless_cancelled(self.timing.pre_countdown_delay(), cancel).await {
            return Ok(RaceOutcome::Cancelled);
        }
        // Minimum-time gate before the start request, not tied to server
        // state: one tick per step, counting down to zero.
        for tick in (0..self.timing.countdown_from).rev() {
            if !sleep_unless_cancelled(self.timing.countdown_step(), cancel).await {
                return Ok(RaceOutcome::Cancelled);
            }
            let _ = events.send(RaceEvent::CountdownTick(tick));
        }

        self.phase = RacePhase::Started;
        let _ = events.send(RaceEvent::Started);

        self.phase = RacePhase::Polling;
        let start = async {
            if let Err(e) = self.api.start_race(race_id).await {
                // The server may have started the race anyway; polling
                // will tell.
                log::warn!("Race start request failed: {}", e);
            }
        };

        let outcome = if self.timing.await_start {
            start.await;
            self.poll_until_finished(race_id, events, cancel).await
        } else {
            let (_, outcome) =
                tokio::join!(start, self.poll_until_finished(race_id, events, cancel));
            outcome
        };

        if matches!(outcome, RaceOutcome::Finished(_)) {
            self.phase = RacePhase::Finished;
        }
        Ok(outcome)
    }

    /// Poll the race status until the server reports it finished
    async fn poll_until_finished(
        &self,
        race_id: u64,
        events: &mpsc::UnboundedSender<RaceEvent>,
        cancel: &mut CancelSignal,
    ) -> RaceOutcome {
        loop {
            if !sleep_unless_cancelled(self.timing.poll_interval(), cancel).await {
                log::info!("Race {} polling cancelled", race_id);
                return RaceOutcome::Cancelled;
            }

            match self.api.get_race(race_id).await {
                Ok(snapshot) => match snapshot.status {
                    RaceStatus::InProgress => {
                        let _ = events.send(RaceEvent::Progress(snapshot.positions));
                    }
                    RaceStatus::Finished => {
                        log::info!("Race {} finished", race_id);
                        let _ = events.send(RaceEvent::Finished(snapshot.positions.clone()));
                        return RaceOutcome::Finished(snapshot.positions);
                    }
                    other => {
                        log::trace!("Race {} status {}, still waiting", race_id, other);
                    }
                },
                Err(e) => {
                    // Poll failures never halt the loop; the next tick may
                    // succeed.
                    log::warn!("Race status poll failed: {}", e);
                }
            }
        }
    }
}

async fn sleep_unless_cancelled(duration: Duration, cancel: &mut CancelSignal) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = cancel.cancelled() => false,
    }
}
