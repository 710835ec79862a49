use std::collections::HashMap;

use super::cities::{CityTable, Coord};

/// Manhattan metric on the city plane: |x1 - x2| + |y1 - y2|.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Precomputed distances for every ordered pair of reference cities,
/// self-pairs included. Built once per engine and never invalidated; the
/// city table does not grow after construction.
///
/// Keys are exact-match name pairs, not delimiter-joined strings, so a city
/// name containing a separator can never alias another pair.
#[derive(Clone, Debug)]
pub struct DistanceCache {
    distances: HashMap<(String, String), u32>,
}

impl DistanceCache {
    /// O(C^2) over the city table.
    pub fn build(table: &CityTable) -> Self {
        let mut distances = HashMap::with_capacity(table.len() * table.len());

        for (from, from_coord) in table.iter() {
            for (to, to_coord) in table.iter() {
                distances.insert((from.to_owned(), to.to_owned()), manhattan(from_coord, to_coord));
            }
        }

        Self { distances }
    }

    /// `None` when either city is unknown to the reference table.
    pub fn distance(&self, from: &str, to: &str) -> Option<u32> {
        self.distances.get(&(from.to_owned(), to.to_owned())).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
