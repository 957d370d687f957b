use crate::sdk::maps::error::ProviderError;
use crate::sdk::maps::model::{Category, PlaceResult, Position, SearchRadius};
use crate::sdk::maps::service::PlacesProvider;
use std::sync::Arc;

pub type SearchOutcome = Result<Vec<PlaceResult>, ProviderError>;

/// Issues category searches against the places provider.
#[derive(Clone)]
pub struct PlacesAggregator {
    provider: Arc<dyn PlacesProvider>,
}

impl PlacesAggregator {
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self { provider }
    }

    pub async fn search(
        &self,
        position: Position,
        radius: SearchRadius,
        category: Category,
    ) -> SearchOutcome {
        let outcome = self.provider.nearby(position, radius, category).await;
        match &outcome {
            Ok(places) if places.is_empty() => {
                log::info!("No {} places within {} of {}", category, radius, position)
            }
            Ok(places) => log::info!(
                "Found {} {} places within {} of {}",
                places.len(),
                category,
                radius,
                position
            ),
            Err(err) => log::error!("Search for {} places failed: {}", category, err),
        }
        outcome
    }

    /// Searches every category concurrently and joins the outcomes.
    pub async fn search_all(
        &self,
        position: Position,
        radius: SearchRadius,
    ) -> Vec<(Category, SearchOutcome)> {
        let (charging, parking) = futures::join!(
            self.search(position, radius, Category::Charging),
            self.search(position, radius, Category::Parking),
        );
        vec![(Category::Charging, charging), (Category::Parking, parking)]
    }
}

/// One committed search result set for a category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Zero until the first search for the category lands.
    pub id: u64,
    pub places: Vec<PlaceResult>,
    /// Origin the current distance annotations were computed from.
    pub annotated_for: Option<Position>,
}

impl Batch {
    pub fn needs_annotation(&self, origin: Position) -> bool {
        !self.places.is_empty() && self.annotated_for != Some(origin)
    }
}

/// Latest batch per category. A new batch always replaces the old one whole.
#[derive(Debug, Clone, Default)]
pub struct PlaceStore {
    charging: Batch,
    parking: Batch,
    last_id: u64,
}

impl PlaceStore {
    pub fn batch(&self, category: Category) -> &Batch {
        match category {
            Category::Charging => &self.charging,
            Category::Parking => &self.parking,
        }
    }

    fn batch_mut(&mut self, category: Category) -> &mut Batch {
        match category {
            Category::Charging => &mut self.charging,
            Category::Parking => &mut self.parking,
        }
    }

    pub fn places(&self, category: Category) -> &[PlaceResult] {
        &self.batch(category).places
    }

    pub fn find(&self, id: &str) -> Option<&PlaceResult> {
        Category::ALL
            .iter()
            .flat_map(|category| self.places(*category))
            .find(|place| place.id == id)
    }

    /// Installs `places` as the category's batch and returns its id.
    pub fn replace(&mut self, category: Category, places: Vec<PlaceResult>) -> u64 {
        self.last_id += 1;
        let id = self.last_id;
        *self.batch_mut(category) = Batch {
            id,
            places,
            annotated_for: None,
        };
        id
    }

    /// Commits a search outcome. Failures leave the previous batch in place.
    pub fn apply(&mut self, category: Category, outcome: SearchOutcome) -> Option<u64> {
        match outcome {
            Ok(places) => Some(self.replace(category, places)),
            Err(err) => {
                log::warn!("Keeping previous {} results after failed search: {}", category, err);
                None
            }
        }
    }

    /// Writes distance annotations back, provided `batch_id` is still the
    /// category's current batch.
    pub fn apply_annotations(
        &mut self,
        category: Category,
        batch_id: u64,
        origin: Position,
        annotated: Vec<PlaceResult>,
    ) -> bool {
        let batch = self.batch_mut(category);
        if batch.id != batch_id {
            log::debug!(
                "Discarding {} distances for superseded batch {} (current {})",
                category,
                batch_id,
                batch.id
            );
            return false;
        }
        batch.places = annotated;
        batch.annotated_for = Some(origin);
        true
    }

    /// Drops every distance annotation; used when the origin moves.
    pub fn invalidate_distances(&mut self) {
        for category in Category::ALL {
            let batch = self.batch_mut(category);
            batch.annotated_for = None;
            for place in &mut batch.places {
                place.distance_text = None;
            }
        }
    }
}
