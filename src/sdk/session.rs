use crate::sdk::distance::DistanceAnnotator;
use crate::sdk::location::LocationProvider;
use crate::sdk::maps::model::{Category, PlaceResult, Position, SearchRadius};
use crate::sdk::maps::provider::GoogleMapsProvider;
use crate::sdk::maps::route::RouteComputer;
use crate::sdk::maps::service::{
    DirectionsProvider, DistanceProvider, GeolocationProvider, PlacesProvider,
};
use crate::sdk::places::{PlaceStore, PlacesAggregator};
use crate::sdk::relocate::RelocationDebouncer;
use crate::sdk::selection::{PendingUpdates, SelectionController, SelectionView};
use futures::future::join_all;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// The external services a session talks to.
#[derive(Clone)]
pub struct Providers {
    pub geolocation: Arc<dyn GeolocationProvider>,
    pub places: Arc<dyn PlacesProvider>,
    pub distance: Arc<dyn DistanceProvider>,
    pub directions: Arc<dyn DirectionsProvider>,
}

impl Providers {
    /// Every capability served by one Google Maps client.
    pub fn google(maps: Arc<GoogleMapsProvider>) -> Self {
        Self {
            geolocation: maps.clone(),
            places: maps.clone(),
            distance: maps.clone(),
            directions: maps,
        }
    }
}

/// Read-only view of the session for list and map collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub position: Option<Position>,
    pub radius: SearchRadius,
    pub charging: Vec<PlaceResult>,
    pub parking: Vec<PlaceResult>,
    pub selection: SelectionView,
}

struct State {
    position: Option<Position>,
    radius: SearchRadius,
    map_ready: bool,
    /// Bumped per search round; older rounds may not commit.
    search_generation: u64,
    store: PlaceStore,
}

struct SessionInner {
    location: LocationProvider,
    aggregator: PlacesAggregator,
    annotator: DistanceAnnotator,
    selection: SelectionController,
    state: Mutex<State>,
}

/// One user session: position, radius, result batches and selection, with
/// the services that keep them up to date. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(providers: Providers, fallback: Position, radius: SearchRadius) -> Self {
        let annotator = DistanceAnnotator::new(providers.distance);
        let selection = SelectionController::new(
            RouteComputer::new(providers.directions),
            annotator.clone(),
        );
        Self {
            inner: Arc::new(SessionInner {
                location: LocationProvider::new(providers.geolocation, fallback),
                aggregator: PlacesAggregator::new(providers.places),
                annotator,
                selection,
                state: Mutex::new(State {
                    position: None,
                    radius,
                    map_ready: false,
                    search_generation: 0,
                    store: PlaceStore::default(),
                }),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            position: state.position,
            radius: state.radius,
            charging: state.store.places(Category::Charging).to_vec(),
            parking: state.store.places(Category::Parking).to_vec(),
            selection: self.inner.selection.view(),
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.lock().position
    }

    pub fn radius(&self) -> SearchRadius {
        self.lock().radius
    }

    /// Asks the device for its position ("locate me"). Falls back silently.
    pub async fn locate(&self) -> Position {
        let position = self.inner.location.get_position().await;
        self.relocate(position).await;
        position
    }

    /// The map surface is ready. Searches start once a position is also known.
    pub async fn map_ready(&self) {
        let (first, located) = {
            let mut state = self.lock();
            let first = !state.map_ready;
            state.map_ready = true;
            (first, state.position.is_some())
        };
        if !first {
            return;
        }
        if located {
            self.refresh().await;
        } else {
            log::debug!("Map ready; waiting for a position before searching");
        }
    }

    /// Moves the user. Previous distances are dropped, the selection's route
    /// and distance are recomputed, and a new search runs if the map is up.
    pub async fn relocate(&self, position: Position) {
        let search = {
            let mut state = self.lock();
            if state.position != Some(position) {
                state.store.invalidate_distances();
            }
            state.position = Some(position);
            state.map_ready
        };
        let pending = self.inner.selection.relocate(position);
        if search {
            self.refresh().await;
        }
        pending.settled().await;
    }

    /// Stores a new radius (clamped to policy) and searches again.
    pub async fn set_radius(&self, radius: SearchRadius) {
        let search = {
            let mut state = self.lock();
            if state.radius == radius {
                return;
            }
            log::info!("Search radius set to {}", radius);
            state.radius = radius;
            state.map_ready
        };
        if search {
            self.refresh().await;
        }
    }

    /// Runs one search round for both categories, then annotates whatever
    /// batches are current against the current origin.
    pub async fn refresh(&self) {
        let (position, radius, generation) = {
            let mut state = self.lock();
            let Some(position) = state.position else {
                log::debug!("Position unknown; search deferred");
                return;
            };
            state.search_generation += 1;
            (position, state.radius, state.search_generation)
        };

        let outcomes = self.inner.aggregator.search_all(position, radius).await;

        let (origin, pending) = {
            let mut state = self.lock();
            if state.search_generation == generation {
                for (category, outcome) in outcomes {
                    state.store.apply(category, outcome);
                }
            } else {
                log::debug!(
                    "Discarding search round {} (current {})",
                    generation,
                    state.search_generation
                );
            }

            let Some(origin) = state.position else {
                return;
            };
            let pending: Vec<_> = Category::ALL
                .into_iter()
                .filter_map(|category| {
                    let batch = state.store.batch(category);
                    batch
                        .needs_annotation(origin)
                        .then(|| (category, batch.id, batch.places.clone()))
                })
                .collect();
            (origin, pending)
        };

        let annotator = &self.inner.annotator;
        let annotated = join_all(pending.into_iter().map(|(category, batch_id, places)| async move {
            (category, batch_id, annotator.annotate(origin, places).await)
        }))
        .await;

        let mut state = self.lock();
        for (category, batch_id, places) in annotated {
            if state.position != Some(origin) {
                log::debug!("Origin moved during annotation; dropping {} distances", category);
                continue;
            }
            state.store.apply_annotations(category, batch_id, origin, places);
        }
    }

    /// Selects a place from the current results by id.
    pub fn select(&self, place_id: &str) -> Option<PendingUpdates> {
        let place = self.lock().store.find(place_id).cloned();
        match place {
            Some(place) => Some(self.inner.selection.select(place)),
            None => {
                log::warn!("No current result with id {}", place_id);
                None
            }
        }
    }

    /// Selects a place directly, e.g. from a map marker click.
    pub fn select_place(&self, place: PlaceResult) -> PendingUpdates {
        self.inner.selection.select(place)
    }

    pub fn clear_selection(&self) {
        self.inner.selection.clear();
    }

    pub fn selection(&self) -> SelectionView {
        self.inner.selection.view()
    }

    /// Coalesces bursts of relocation events (e.g. marker drags) into one
    /// `relocate` per quiet period.
    pub fn relocation_debouncer(&self, quiet: Duration) -> RelocationDebouncer {
        let session = self.clone();
        RelocationDebouncer::spawn(quiet, move |position| {
            let session = session.clone();
            async move { session.relocate(position).await }
        })
    }
}
