//! Remote API client
//!
//! This module provides the HTTP wrapper around the race server. It is
//! stateless and purely request/response: no retries, no caching, no
//! interpretation of the returned data beyond deserialization.
//!
//! The `RaceApi` trait is the seam between the lifecycle controller and the
//! network; tests drive the controller with a scripted implementation
//! instead of a live server.

use crate::types::{ClientError, Race, Racer, Result, Track};
use serde::Serialize;
use std::future::Future;

/// Operations the race server exposes
///
/// One method per endpoint, each a single request/response. Implementations
/// must not retry; failure policy is the caller's decision.
pub trait RaceApi {
    /// Fetch all selectable tracks
    fn list_tracks(&self) -> impl Future<Output = Result<Vec<Track>>> + Send;

    /// Fetch all selectable racers
    fn list_racers(&self) -> impl Future<Output = Result<Vec<Racer>>> + Send;

    /// Create a race for the given player on the given track
    fn create_race(
        &self,
        player_id: u64,
        track_id: u64,
    ) -> impl Future<Output = Result<Race>> + Send;

    /// Start a previously created race; the response body is ignored
    fn start_race(&self, race_id: u64) -> impl Future<Output = Result<()>> + Send;

    /// Give the player's racer a burst of speed; fire-and-forget
    fn accelerate(&self, race_id: u64) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the current race snapshot
    fn get_race(&self, race_id: u64) -> impl Future<Output = Result<Race>> + Send;
}

/// JSON body for race creation
#[derive(Debug, Serialize)]
struct CreateRacePayload {
    player_id: u64,
    track_id: u64,
}

/// HTTP implementation of `RaceApi` against a fixed base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given server base URL
    /// (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The server base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(ClientError::Api {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            })
        }
    }
}

impl RaceApi for ApiClient {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let url = self.url("/api/tracks");
        log::debug!("GET {}", url);

        let resp = Self::check(self.http.get(&url).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn list_racers(&self) -> Result<Vec<Racer>> {
        let url = self.url("/api/cars");
        log::debug!("GET {}", url);

        let resp = Self::check(self.http.get(&url).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn create_race(&self, player_id: u64, track_id: u64) -> Result<Race> {
        let url = self.url("/api/races");
        log::debug!("POST {} (player {}, track {})", url, player_id, track_id);

        let payload = CreateRacePayload {
            player_id,
            track_id,
        };
        let resp = Self::check(self.http.post(&url).json(&payload).send().await?)?;
        let race: Race = resp.json().await?;

        log::info!("Race created with server id {}", race.id);
        Ok(race)
    }

    async fn start_race(&self, race_id: u64) -> Result<()> {
        let url = self.url(&format!("/api/races/{}/start", race_id));
        log::debug!("POST {}", url);

        Self::check(self.http.post(&url).send().await?)?;
        log::info!("Race {} started", race_id);
        Ok(())
    }

    async fn accelerate(&self, race_id: u64) -> Result<()> {
        let url = self.url(&format!("/api/races/{}/accelerate", race_id));
        log::debug!("POST {}", url);

        Self::check(self.http.post(&url).send().await?)?;
        Ok(())
    }

    async fn get_race(&self, race_id: u64) -> Result<Race> {
        let url = self.url(&format!("/api/races/{}", race_id));
        log::trace!("GET {}", url);

        let resp = Self::check(self.http.get(&url).send().await?)?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(client.url("/api/tracks"), "http://localhost:8000/api/tracks");

        // Trailing slash on the base URL must not produce a double slash
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/api/races/4"), "http://localhost:8000/api/races/4");
    }

    #[test]
    fn test_create_race_payload_shape() {
        let payload = CreateRacePayload {
            player_id: 2,
            track_id: 3,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"player_id": 2, "track_id": 3}));
    }
}
