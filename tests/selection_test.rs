mod common;

use chargepark::sdk::distance::DistanceAnnotator;
use chargepark::sdk::maps::{Category, Position, RouteComputer};
use chargepark::sdk::selection::{SelectionController, SelectionState};
use common::{place, GatedDirections, GridDistance, KOLKATA};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn controller(directions: &Arc<GatedDirections>) -> SelectionController {
    let controller = SelectionController::new(
        RouteComputer::new(directions.clone()),
        DistanceAnnotator::new(Arc::new(GridDistance::default())),
    );
    let pending = controller.relocate(KOLKATA);
    assert!(pending.is_empty(), "nothing to recompute without a selection");
    controller
}

#[tokio::test]
async fn late_route_for_previous_selection_is_discarded() {
    let directions = Arc::new(GatedDirections::default());
    let selection = controller(&directions);
    let p1 = place("p1", Category::Charging, 22.6000, 88.4800);
    let p2 = place("p2", Category::Parking, 22.5900, 88.4700);

    let release_p1 = directions.gate(p1.position);
    let first = selection.select(p1.clone());
    let second = selection.select(p2.clone());
    second.settled().await;

    let route = selection.view().route.expect("p2 route");
    assert!(route.connects(KOLKATA, p2.position));

    release_p1.send(()).expect("p1 request still waiting");
    first.settled().await;

    let view = selection.view();
    assert_eq!(view.state, SelectionState::Selected(p2.clone()));
    assert!(view.route.expect("route kept").connects(KOLKATA, p2.position));
    assert_eq!(view.distance_text, Some(GridDistance::text(KOLKATA, p2.position)));
}

#[tokio::test]
async fn reselecting_keeps_identity_and_last_request_wins() {
    let directions = Arc::new(GatedDirections::default());
    let selection = controller(&directions);
    let p1 = place("p1", Category::Charging, 22.6000, 88.4800);

    let release_first = directions.gate(p1.position);
    let first = selection.select(p1.clone());
    let second = selection.select(p1.clone());
    second.settled().await;
    let committed = selection.view().route.expect("second request committed");

    release_first.send(()).expect("first request still waiting");
    first.settled().await;

    assert_eq!(selection.selected(), Some(p1));
    assert_eq!(selection.view().route, Some(committed));
    assert_eq!(directions.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn clearing_discards_in_flight_lookups() {
    let directions = Arc::new(GatedDirections::default());
    let selection = controller(&directions);
    let p1 = place("p1", Category::Charging, 22.6000, 88.4800);

    let release = directions.gate(p1.position);
    let pending = selection.select(p1);
    selection.clear();
    release.send(()).expect("request still waiting");
    pending.settled().await;

    let view = selection.view();
    assert_eq!(view.state, SelectionState::NoSelection);
    assert!(view.route.is_none());
    assert!(view.distance_text.is_none());
}

#[tokio::test]
async fn route_failure_clears_previous_route() {
    let directions = Arc::new(GatedDirections::default());
    let selection = controller(&directions);
    let p1 = place("p1", Category::Charging, 22.6000, 88.4800);
    selection.select(p1.clone()).settled().await;
    assert!(selection.view().route.is_some());

    directions.fail_for(p1.position);
    selection.relocate(Position::new(22.5800, 88.4600)).settled().await;

    let view = selection.view();
    assert!(view.route.is_none());
    assert!(view.distance_text.is_some());
}

#[tokio::test]
async fn selection_without_origin_waits_for_relocation() {
    let directions = Arc::new(GatedDirections::default());
    let selection = SelectionController::new(
        RouteComputer::new(directions.clone()),
        DistanceAnnotator::new(Arc::new(GridDistance::default())),
    );
    let p1 = place("p1", Category::Charging, 22.6000, 88.4800);

    assert!(selection.select(p1.clone()).is_empty());
    assert_eq!(directions.calls.load(Ordering::SeqCst), 0);

    selection.relocate(KOLKATA).settled().await;
    assert!(selection.view().route.expect("route once located").connects(KOLKATA, p1.position));
}
