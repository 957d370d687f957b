use crate::sdk::maps::model::{PlaceResult, Position, DISTANCE_UNAVAILABLE};
use crate::sdk::maps::service::DistanceProvider;
use futures::future::join_all;
use std::sync::Arc;

/// Annotates places with driving distance from an origin.
#[derive(Clone)]
pub struct DistanceAnnotator {
    provider: Arc<dyn DistanceProvider>,
}

impl DistanceAnnotator {
    pub fn new(provider: Arc<dyn DistanceProvider>) -> Self {
        Self { provider }
    }

    /// Looks up every destination concurrently. Output order matches input
    /// order and every place comes back with a distance text, `"N/A"` where
    /// its lookup failed.
    pub async fn annotate(&self, origin: Position, destinations: Vec<PlaceResult>) -> Vec<PlaceResult> {
        let texts = join_all(
            destinations
                .iter()
                .map(|place| self.annotate_one(origin, place)),
        )
        .await;

        destinations
            .into_iter()
            .zip(texts)
            .map(|(mut place, text)| {
                place.distance_text = Some(text);
                place
            })
            .collect()
    }

    pub async fn annotate_one(&self, origin: Position, place: &PlaceResult) -> String {
        match self.provider.distance(origin, place.position).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Distance calc failed for {} ({}): {}", place.name, place.id, err);
                DISTANCE_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::maps::error::ProviderError;
    use crate::sdk::maps::model::Category;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Barrier;

    /// Answers slower for nearer indexes so completion order is reversed,
    /// and fails for longitude 0.
    struct ReversedDistance;

    #[async_trait]
    impl DistanceProvider for ReversedDistance {
        async fn distance(&self, _origin: Position, destination: Position) -> Result<String, ProviderError> {
            let delay = 50 - (destination.latitude as u64).min(50);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if destination.longitude == 0.0 {
                return Err(ProviderError::NoResult("unreachable".into()));
            }
            Ok(format!("{} km", destination.latitude))
        }
    }

    fn place(id: &str, latitude: f64, longitude: f64) -> PlaceResult {
        PlaceResult::new(id, id, Position::new(latitude, longitude), Category::Charging)
    }

    #[tokio::test]
    async fn order_is_preserved_and_failures_become_sentinel() {
        let annotator = DistanceAnnotator::new(Arc::new(ReversedDistance));
        let input = vec![place("a", 1.0, 1.0), place("b", 2.0, 0.0), place("c", 3.0, 1.0)];

        let out = annotator.annotate(Position::new(0.0, 0.0), input).await;

        let ids: Vec<_> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(out[0].distance_text.as_deref(), Some("1 km"));
        assert_eq!(out[1].distance_text.as_deref(), Some(DISTANCE_UNAVAILABLE));
        assert!(out[1].distance_unavailable());
        assert_eq!(out[2].distance_text.as_deref(), Some("3 km"));
    }

    /// Each lookup waits until every destination of the batch is in flight.
    struct BarrierDistance {
        barrier: Barrier,
    }

    #[async_trait]
    impl DistanceProvider for BarrierDistance {
        async fn distance(&self, _origin: Position, destination: Position) -> Result<String, ProviderError> {
            self.barrier.wait().await;
            Ok(format!("{} km", destination.latitude))
        }
    }

    #[tokio::test]
    async fn destinations_are_looked_up_concurrently() {
        let input = vec![place("a", 1.0, 1.0), place("b", 2.0, 1.0), place("c", 3.0, 1.0)];
        let annotator = DistanceAnnotator::new(Arc::new(BarrierDistance {
            barrier: Barrier::new(input.len()),
        }));

        let out = tokio::time::timeout(
            Duration::from_secs(2),
            annotator.annotate(Position::new(0.0, 0.0), input),
        )
        .await
        .expect("every lookup in flight together");

        let texts: Vec<_> = out.iter().filter_map(|p| p.distance_text.as_deref()).collect();
        assert_eq!(texts, ["1 km", "2 km", "3 km"]);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let annotator = DistanceAnnotator::new(Arc::new(ReversedDistance));
        assert!(annotator.annotate(Position::new(0.0, 0.0), Vec::new()).await.is_empty());
    }
}
