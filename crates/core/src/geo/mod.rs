//! City reference data and pairwise Manhattan distances.
//!
//! Coordinates live on a fixed 2-D integer plane and exist only to rank
//! events by distance; no real geocoding happens here.

mod cities;
mod distance;

pub use cities::{reference_cities, CityTable, Coord};
pub use distance::{manhattan, DistanceCache};
