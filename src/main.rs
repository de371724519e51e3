use clap::Parser;
use delivery_route::admission::simulation::{demo_consumers, Scheduler};
use delivery_route::utils::geo_math::format_distance;
use delivery_route::utils::map_region::MapRegion;
use delivery_route::{Coordinate, DeliveryEngine, EngineConfig, Event};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[clap(author, version, about = "Run the delivery route demo simulation", long_about = None)]
struct Cli {
    /// JSON configuration file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of one-second ticks to simulate
    #[arg(short, long, default_value_t = 60)]
    ticks: u64,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), delivery_route::EngineError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    let vendor = Coordinate::try_new(28.6139, 77.2090)?;
    let mut engine = DeliveryEngine::new(config.clone())?;
    let events = engine.sender();
    let route = engine.snapshot();
    let mut scheduler = Scheduler::new(vendor, demo_consumers(&vendor), config.simulation.clone());

    info!(
        "Vendor at ({:.4}, {:.4}), radius {}",
        vendor.latitude,
        vendor.longitude,
        format_distance(config.radius_km)
    );
    engine.handle(Event::VendorLocated(vendor))?;

    let mut decisions = 0usize;
    for tick in 0..cli.ticks {
        let mut released = None;
        for event in scheduler.tick(tick) {
            if let Event::NextCandidateReady(node) = &event {
                info!(
                    tick,
                    consumer = %node.id,
                    name = %node.metadata.name,
                    "new connection request"
                );
                released = Some(node.id.clone());
            }
            events.send(event).unwrap();
        }
        for error in engine.process_queued() {
            warn!(tick, error = %error, "event failed");
        }

        // Demo policy: accept two requests, then decline one
        let Some(request) = engine.pending_request() else {
            // Released but filtered out by the radius: move on to the next one
            if let Some(id) = released {
                scheduler.drop_consumer(&id);
                scheduler.request_resolved(tick);
            } else if scheduler.is_exhausted() {
                break;
            }
            continue;
        };
        let id = request.consumer.id.clone();
        let decision = if decisions % 3 == 2 {
            scheduler.drop_consumer(&id);
            Event::Decline(id)
        } else {
            Event::Accept(id)
        };
        decisions += 1;
        if let Err(e) = engine.handle(decision) {
            warn!(tick, error = %e, "decision rejected");
        }
        scheduler.request_resolved(tick);

        let current = route.current();
        info!(
            tick,
            path = ?current.path,
            total = %format_distance(current.total_distance),
            "route"
        );
    }

    if let Some(controller) = engine.controller() {
        let region = MapRegion::fit(&controller.route_coordinates(), 0.01);
        info!(
            "Final route {:?}, {} over {} stops; map centre ({:.4}, {:.4})",
            route.current().path,
            format_distance(route.current().total_distance),
            route.current().stop_count(),
            region.center.latitude,
            region.center.longitude
        );
        for candidate in controller.consumer_list() {
            info!(
                "  {} ({}): {}",
                candidate.node.id,
                candidate.node.metadata.name,
                candidate.proximity.summary()
            );
        }
    }
    Ok(())
}
