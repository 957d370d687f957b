use crate::sdk::distance::DistanceAnnotator;
use crate::sdk::maps::model::{PlaceResult, Position};
use crate::sdk::maps::route::{Route, RouteComputer};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "place", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(PlaceResult),
}

/// What the map overlay and detail panel should show right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionView {
    pub state: SelectionState,
    pub route: Option<Route>,
    pub distance_text: Option<String>,
}

impl SelectionView {
    pub fn selected(&self) -> Option<&PlaceResult> {
        match &self.state {
            SelectionState::Selected(place) => Some(place),
            SelectionState::NoSelection => None,
        }
    }
}

#[derive(Default)]
struct Inner {
    origin: Option<Position>,
    view: SelectionView,
    /// Bumped on every transition; completions carrying an older ticket are stale.
    ticket: u64,
}

/// Handles for the route and distance lookups started by a transition.
#[derive(Debug, Default)]
#[must_use = "dropping the handle detaches the lookups; await `settled` to observe them"]
pub struct PendingUpdates {
    handles: Vec<JoinHandle<()>>,
}

impl PendingUpdates {
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits until every lookup has either committed or been discarded.
    pub async fn settled(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                log::error!("Selection update task failed: {}", err);
            }
        }
    }
}

/// Owns the single selected place and keeps its route and distance current.
///
/// Lookups run on spawned tasks, so this must be used inside a tokio runtime.
#[derive(Clone)]
pub struct SelectionController {
    inner: Arc<Mutex<Inner>>,
    router: RouteComputer,
    annotator: DistanceAnnotator,
}

impl SelectionController {
    pub fn new(router: RouteComputer, annotator: DistanceAnnotator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            router,
            annotator,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> SelectionView {
        self.lock().view.clone()
    }

    pub fn selected(&self) -> Option<PlaceResult> {
        self.lock().view.selected().cloned()
    }

    pub fn origin(&self) -> Option<Position> {
        self.lock().origin
    }

    /// Makes `place` the selection and starts its route and distance lookups.
    pub fn select(&self, place: PlaceResult) -> PendingUpdates {
        let (ticket, origin) = {
            let mut inner = self.lock();
            inner.ticket += 1;
            inner.view = SelectionView {
                state: SelectionState::Selected(place.clone()),
                route: None,
                distance_text: None,
            };
            (inner.ticket, inner.origin)
        };
        log::info!("Selected {} ({})", place.name, place.id);

        match origin {
            Some(origin) => self.spawn_lookups(ticket, origin, place),
            None => {
                log::debug!("No origin yet; route for {} deferred", place.id);
                PendingUpdates::default()
            }
        }
    }

    /// Returns to `NoSelection`. Lookups still in flight will be discarded.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.ticket += 1;
        inner.view = SelectionView::default();
        log::info!("Selection cleared");
    }

    /// Moves the origin. With a selection active, both the route and the
    /// distance are recomputed from the new origin.
    pub fn relocate(&self, origin: Position) -> PendingUpdates {
        let (ticket, place) = {
            let mut inner = self.lock();
            inner.origin = Some(origin);
            let Some(place) = inner.view.selected().cloned() else {
                return PendingUpdates::default();
            };
            inner.ticket += 1;
            inner.view.route = None;
            inner.view.distance_text = None;
            (inner.ticket, place)
        };
        log::debug!("Origin moved to {}; refreshing route to {}", origin, place.id);
        self.spawn_lookups(ticket, origin, place)
    }

    fn spawn_lookups(&self, ticket: u64, origin: Position, place: PlaceResult) -> PendingUpdates {
        let route_task = {
            let inner = Arc::clone(&self.inner);
            let router = self.router.clone();
            let destination = place.position;
            tokio::spawn(async move {
                let route = router.route(origin, destination).await;
                let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                if inner.ticket != ticket {
                    log::debug!("Discarding stale route to {} (ticket {})", destination, ticket);
                    return;
                }
                // A failed lookup must not leave an old path on the map.
                inner.view.route = route.ok();
            })
        };

        let distance_task = {
            let inner = Arc::clone(&self.inner);
            let annotator = self.annotator.clone();
            tokio::spawn(async move {
                let text = annotator.annotate_one(origin, &place).await;
                let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                if inner.ticket != ticket {
                    log::debug!("Discarding stale distance for {} (ticket {})", place.id, ticket);
                    return;
                }
                inner.view.distance_text = Some(text);
            })
        };

        PendingUpdates {
            handles: vec![route_task, distance_task],
        }
    }
}
