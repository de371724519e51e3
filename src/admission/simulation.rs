// Demo mode: synthetic consumers and a tick-driven request scheduler

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::debug;

use crate::admission::events::Event;
use crate::config::SimulationConfig;
use crate::models::{Coordinate, Node, NodeId, NodeMetadata};

/// A synthetic consumer; moving ones circle the vendor
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConsumer {
    pub node: Node,

    /// Angular speed factor of the orbit, `None` for consumers standing still
    pub move_speed: Option<f64>,
}

/// The five demo consumers, placed at fixed offsets around the vendor
pub fn demo_consumers(vendor: &Coordinate) -> Vec<DemoConsumer> {
    // (name, address, d_lat, d_lon, orders, value, move speed)
    #[rustfmt::skip]
    let seeds = [
        ("Raj Kumar", "500m North - Main Road", 0.005, 0.003, 3, 5500.0, None),
        ("Priya Sharma", "450m South - Market Street", -0.004, 0.005, 2, 3200.0, Some(0.0001)),
        ("Amit Patel", "650m East - Residential Area", 0.006, -0.004, 5, 8900.0, Some(0.00008)),
        ("Sneha Gupta", "300m West - Park Lane", -0.003, -0.006, 1, 1500.0, None),
        ("Vikram Singh", "700m Northeast - Commercial", 0.002, 0.007, 4, 6700.0, Some(0.00012)),
    ];

    seeds
        .iter()
        .enumerate()
        .map(|(i, &(name, address, d_lat, d_lon, order_count, order_value, move_speed))| {
            let metadata = NodeMetadata {
                name: name.to_string(),
                address: Some(address.to_string()),
                order_count,
                order_value,
                is_moving: move_speed.is_some(),
            };
            DemoConsumer {
                node: Node::with_metadata(
                    format!("consumer_{}", i),
                    Coordinate::new(vendor.latitude + d_lat, vendor.longitude + d_lon),
                    metadata,
                ),
                move_speed,
            }
        })
        .collect()
}

/// Random consumers within `spread_deg` of the vendor
pub fn scatter_consumers(
    vendor: &Coordinate,
    count: usize,
    spread_deg: f64,
    seed: u64,
) -> Vec<Node> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let latitude = vendor.latitude + rng.gen_range(-spread_deg..=spread_deg);
            let longitude = vendor.longitude + rng.gen_range(-spread_deg..=spread_deg);
            let metadata = NodeMetadata {
                name: format!("Consumer {}", i + 1),
                order_count: rng.gen_range(1..=5),
                order_value: rng.gen_range(1000.0..11000.0_f64).round(),
                ..NodeMetadata::default()
            };
            Node::with_metadata(
                format!("consumer_{}", i),
                Coordinate::new(latitude, longitude),
                metadata,
            )
        })
        .collect()
}

/// Position on the circle of `radius_deg` around `center` at the given tick.
/// One tick stands for one second.
pub fn orbit_position(
    center: &Coordinate,
    radius_deg: f64,
    move_speed: f64,
    tick: u64,
) -> Coordinate {
    let angle = (tick as f64 * 1000.0 / 10000.0 * move_speed * 360.0).to_radians();
    Coordinate::new(
        center.latitude + radius_deg * angle.sin(),
        center.longitude + radius_deg * angle.cos(),
    )
}

/// Emits demo events: moves released consumers every tick and releases one
/// candidate at a time, waiting for the previous request to be resolved.
pub struct Scheduler {
    vendor: Coordinate,
    config: SimulationConfig,
    pool: VecDeque<DemoConsumer>,
    moving: Vec<(NodeId, f64)>,
    released: usize,
    next_release: Option<u64>,
}

impl Scheduler {
    pub fn new(vendor: Coordinate, consumers: Vec<DemoConsumer>, config: SimulationConfig) -> Self {
        let next_release = Some(config.start_delay_ticks);
        Self {
            vendor,
            config,
            pool: consumers.into(),
            moving: Vec::new(),
            released: 0,
            next_release,
        }
    }

    /// Candidates released so far
    pub fn released(&self) -> usize {
        self.released
    }

    /// True once no more candidates will be released
    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty() || self.released >= self.config.max_requests
    }

    /// Events due at `tick`
    pub fn tick(&mut self, tick: u64) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .moving
            .iter()
            .map(|(id, speed)| Event::PositionUpdate {
                id: id.clone(),
                coordinate: orbit_position(
                    &self.vendor,
                    self.config.orbit_radius_deg,
                    *speed,
                    tick,
                ),
            })
            .collect();

        let due = self.next_release.is_some_and(|at| tick >= at);
        if due && !self.is_exhausted() {
            if let Some(consumer) = self.pool.pop_front() {
                debug!(consumer = %consumer.node.id, tick, "releasing candidate");
                if let Some(speed) = consumer.move_speed {
                    self.moving.push((consumer.node.id.clone(), speed));
                }
                self.released += 1;
                self.next_release = None;
                events.push(Event::NextCandidateReady(consumer.node));
            }
        }
        events
    }

    /// The released request was accepted or declined at `tick`
    pub fn request_resolved(&mut self, tick: u64) {
        self.next_release = Some(tick + self.config.request_interval_ticks);
    }

    /// Forget a consumer that never made it into the engine
    pub fn drop_consumer(&mut self, id: &str) {
        self.moving.retain(|(moving_id, _)| moving_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> Coordinate {
        Coordinate::new(28.6139, 77.2090)
    }

    fn config() -> SimulationConfig {
        SimulationConfig {
            start_delay_ticks: 2,
            request_interval_ticks: 3,
            max_requests: 2,
            ..SimulationConfig::default()
        }
    }

    fn released_ids(events: &[Event]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::NextCandidateReady(node) => Some(node.id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_demo_consumers() {
        let consumers = demo_consumers(&vendor());
        assert_eq!(consumers.len(), 5);
        assert_eq!(consumers[0].node.id, "consumer_0");
        assert_eq!(consumers[0].node.metadata.name, "Raj Kumar");
        assert_eq!(consumers.iter().filter(|c| c.move_speed.is_some()).count(), 3);
        assert!((consumers[0].node.coordinate.latitude - 28.6189).abs() < 1e-9);
    }

    #[test]
    fn test_scatter_is_seeded() {
        let a = scatter_consumers(&vendor(), 4, 0.01, 7);
        let b = scatter_consumers(&vendor(), 4, 0.01, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|n| (n.coordinate.latitude - 28.6139).abs() <= 0.01));
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let center = vendor();
        for tick in [0, 10, 1000] {
            let position = orbit_position(&center, 0.004, 0.0001, tick);
            let radius = ((position.latitude - center.latitude).powi(2)
                + (position.longitude - center.longitude).powi(2))
            .sqrt();
            assert!((radius - 0.004).abs() < 1e-12);
        }
    }

    #[test]
    fn test_releases_one_candidate_per_resolution() {
        let mut scheduler = Scheduler::new(vendor(), demo_consumers(&vendor()), config());

        assert!(released_ids(&scheduler.tick(0)).is_empty());
        assert!(released_ids(&scheduler.tick(1)).is_empty());
        assert_eq!(released_ids(&scheduler.tick(2)), vec!["consumer_0"]);

        // Nothing more until the request is resolved
        assert!(released_ids(&scheduler.tick(10)).is_empty());

        scheduler.request_resolved(10);
        assert!(released_ids(&scheduler.tick(12)).is_empty());
        assert_eq!(released_ids(&scheduler.tick(13)), vec!["consumer_1"]);

        // max_requests reached
        scheduler.request_resolved(13);
        assert!(released_ids(&scheduler.tick(100)).is_empty());
        assert!(scheduler.is_exhausted());
        assert_eq!(scheduler.released(), 2);
    }

    #[test]
    fn test_only_released_moving_consumers_get_updates() {
        let mut scheduler = Scheduler::new(vendor(), demo_consumers(&vendor()), config());
        scheduler.tick(2); // consumer_0 is static
        assert!(scheduler.tick(3).is_empty());

        scheduler.request_resolved(3);
        scheduler.tick(6); // consumer_1 moves
        let events = scheduler.tick(7);
        assert!(matches!(
            &events[..],
            [Event::PositionUpdate { id, .. }] if id == "consumer_1"
        ));

        scheduler.drop_consumer("consumer_1");
        assert!(scheduler.tick(8).is_empty());
    }
}
