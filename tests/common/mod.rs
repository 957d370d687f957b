#![allow(dead_code)]

use async_trait::async_trait;
use chargepark::sdk::maps::{
    Category, DirectionsProvider, DistanceProvider, GeolocationProvider, PlaceResult,
    PlacesProvider, Position, ProviderError, Route, SearchRadius,
};
use chargepark::sdk::session::Providers;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const KOLKATA: Position = Position::new(22.5950, 88.4790);

pub fn place(id: &str, category: Category, latitude: f64, longitude: f64) -> PlaceResult {
    PlaceResult::new(id, format!("{} {}", category, id), Position::new(latitude, longitude), category)
        .with_address(format!("{} Street", id))
}

fn key(position: Position) -> String {
    format!("{:.6},{:.6}", position.latitude, position.longitude)
}

pub enum Reply {
    Places(Vec<PlaceResult>),
    Fail,
}

/// Replays queued replies per category; the last reply repeats.
#[derive(Default)]
pub struct ScriptedPlaces {
    replies: Mutex<HashMap<Category, VecDeque<Reply>>>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(Position, SearchRadius, Category)>>,
}

impl ScriptedPlaces {
    pub fn push(&self, category: Category, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(category)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesProvider for ScriptedPlaces {
    async fn nearby(
        &self,
        position: Position,
        radius: SearchRadius,
        category: Category,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((position, radius, category));
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.entry(category).or_default();
        let reply = if queue.len() > 1 { queue.pop_front() } else { None };
        let reply = reply.as_ref().or(queue.front());
        match reply {
            Some(Reply::Places(places)) => Ok(places.clone()),
            Some(Reply::Fail) => Err(ProviderError::api("REQUEST_DENIED", "scripted failure")),
            None => Ok(Vec::new()),
        }
    }
}

/// Distance derived from the coordinate delta, in metres; destinations in
/// `unreachable` fail.
#[derive(Default)]
pub struct GridDistance {
    unreachable: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl GridDistance {
    pub fn unreachable(&self, position: Position) {
        self.unreachable.lock().unwrap().push(key(position));
    }

    pub fn text(origin: Position, destination: Position) -> String {
        let meters = ((origin.latitude - destination.latitude).abs()
            + (origin.longitude - destination.longitude).abs())
            * 100_000.0;
        format!("{} m", meters.round())
    }
}

#[async_trait]
impl DistanceProvider for GridDistance {
    async fn distance(&self, origin: Position, destination: Position) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.lock().unwrap().contains(&key(destination)) {
            return Err(ProviderError::NoResult("NOT_FOUND".into()));
        }
        Ok(Self::text(origin, destination))
    }
}

/// Grid distances, except that a gated destination holds its lookup open
/// until the gate is released.
#[derive(Default)]
pub struct GatedDistance {
    grid: GridDistance,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    pub calls: AtomicUsize,
}

impl GatedDistance {
    pub fn gate(&self, destination: Position) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key(destination), rx);
        tx
    }

    /// Waits until at least one lookup has started.
    pub async fn started(&self) {
        while self.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DistanceProvider for GatedDistance {
    async fn distance(&self, origin: Position, destination: Position) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&key(destination));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.grid.distance(origin, destination).await
    }
}

/// Routes resolve immediately unless a gate was registered for the
/// destination; gated requests wait until the gate is released.
#[derive(Default)]
pub struct GatedDirections {
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failing: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl GatedDirections {
    pub fn gate(&self, destination: Position) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key(destination), rx);
        tx
    }

    pub fn fail_for(&self, destination: Position) {
        self.failing.lock().unwrap().push(key(destination));
    }

    pub fn route(origin: Position, destination: Position) -> Route {
        Route {
            origin,
            destination,
            polyline: format!("poly:{}", key(destination)),
            distance_text: GridDistance::text(origin, destination),
            distance_meters: 0,
            duration_text: "5 mins".into(),
            duration_seconds: 300,
            summary: "Scripted Rd".into(),
        }
    }
}

#[async_trait]
impl DirectionsProvider for GatedDirections {
    async fn directions(&self, origin: Position, destination: Position) -> Result<Route, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&key(destination));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing.lock().unwrap().contains(&key(destination)) {
            return Err(ProviderError::api("ZERO_RESULTS", "no route"));
        }
        Ok(Self::route(origin, destination))
    }
}

pub struct Denied;

#[async_trait]
impl GeolocationProvider for Denied {
    async fn locate(&self) -> Result<Position, ProviderError> {
        Err(ProviderError::api("PERMISSION_DENIED", "User denied Geolocation"))
    }
}

pub struct Harness {
    pub places: Arc<ScriptedPlaces>,
    pub distance: Arc<GridDistance>,
    pub directions: Arc<GatedDirections>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            places: Arc::new(ScriptedPlaces::default()),
            distance: Arc::new(GridDistance::default()),
            directions: Arc::new(GatedDirections::default()),
        }
    }

    pub fn providers(&self, geolocation: Arc<dyn GeolocationProvider>) -> Providers {
        Providers {
            geolocation,
            places: self.places.clone(),
            distance: self.distance.clone(),
            directions: self.directions.clone(),
        }
    }
}
