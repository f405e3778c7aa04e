mod zones;

pub use zones::{load_zone_map, parse_zone_map, ZoneMap, ZoneMapError, ZoneRegion};
