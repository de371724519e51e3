pub mod geo_math;
pub mod geocode;
pub mod location_graph;
pub mod map_region;
pub mod radius_filter;
