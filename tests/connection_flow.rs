// End-to-end admission flow through the controller and the event engine
use delivery_route::admission::simulation::{demo_consumers, scatter_consumers, Scheduler};
use delivery_route::config::SimulationConfig;
use delivery_route::utils::geo_math::distance;
use delivery_route::{
    ConnectionRequestController, Coordinate, DeliveryEngine, EngineConfig, EngineError, Event,
    Node, RequestStatus, VENDOR_ID,
};
use std::sync::Arc;

fn vendor() -> Coordinate {
    Coordinate::new(28.6139, 77.2090)
}

#[test]
fn test_two_sequential_accepts() {
    let config = EngineConfig::default();
    let mut controller = ConnectionRequestController::new(vendor(), &config).unwrap();
    let c1 = Node::new("C1", Coordinate::new(28.6189, 77.2120));
    let c2 = Node::new("C2", Coordinate::new(28.6100, 77.2140));
    controller.admit(&[c1.clone(), c2.clone()]).unwrap();

    let first = controller.accept("C1").unwrap();
    assert_eq!(first.status(), RequestStatus::Accepted);
    assert_eq!(controller.route().path, vec![VENDOR_ID, "C1"]);

    controller.accept("C2").unwrap();
    let route = controller.route();
    assert!(controller.pending().is_none());
    assert_eq!(route.path.len(), 3);
    assert_eq!(route.path.iter().filter(|id| *id == "C1").count(), 1);
    assert_eq!(route.path.iter().filter(|id| *id == "C2").count(), 1);

    let coordinates = controller.route_coordinates();
    let hops: f64 = coordinates
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum();
    assert!((route.total_distance - hops).abs() < 1e-9);
}

#[test]
fn test_decline_keeps_accepted_set_and_route() {
    let mut controller =
        ConnectionRequestController::new(vendor(), &EngineConfig::default()).unwrap();
    controller
        .admit(&scatter_consumers(&vendor(), 4, 0.01, 1))
        .unwrap();

    let first = controller.pending().unwrap().consumer.id.clone();
    controller.accept(&first).unwrap();
    let route = controller.route();

    let second = controller.pending().unwrap().consumer.id.clone();
    let declined = controller.decline(&second).unwrap();
    assert_eq!(declined.status(), RequestStatus::Declined);
    assert_eq!(controller.accepted().len(), 1);
    assert!(Arc::ptr_eq(&route, &controller.route()));

    // A declined request is gone for good
    assert!(matches!(
        controller.accept(&second),
        Err(EngineError::NotPendingRequest { .. })
    ));
}

#[test]
fn test_simulated_session() {
    let config = EngineConfig {
        simulation: SimulationConfig {
            start_delay_ticks: 1,
            request_interval_ticks: 2,
            ..SimulationConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut engine = DeliveryEngine::new(config.clone()).unwrap();
    let sender = engine.sender();
    let reader = engine.snapshot();
    let mut scheduler = Scheduler::new(vendor(), demo_consumers(&vendor()), config.simulation);

    sender.send(Event::VendorLocated(vendor())).unwrap();
    let mut decisions = 0;
    for tick in 0..40 {
        for event in scheduler.tick(tick) {
            sender.send(event).unwrap();
        }
        assert!(engine.process_queued().is_empty());

        if let Some(request) = engine.pending_request() {
            let id = request.consumer.id.clone();
            let decision = if decisions == 1 {
                // Declined consumers stop being tracked
                scheduler.drop_consumer(&id);
                Event::Decline(id)
            } else {
                Event::Accept(id)
            };
            sender.send(decision).unwrap();
            assert!(engine.process_queued().is_empty());
            scheduler.request_resolved(tick);
            decisions += 1;
        }
    }

    assert_eq!(decisions, 5);
    let route = reader.current();
    println!("final route: {:?} ({:.3} km)", route.path, route.total_distance);
    assert_eq!(route.path[0], VENDOR_ID);
    assert_eq!(route.stop_count(), 4);
    assert!(!route.contains("consumer_1"));
}
