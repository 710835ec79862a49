use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy)]
struct CitySeed {
    name: &'static str,
    x: i32,
    y: i32,
}

const CITY_SEEDS: &[CitySeed] = &[
    CitySeed { name: "New York", x: 3572, y: 1455 },
    CitySeed { name: "Los Angeles", x: 462, y: 975 },
    CitySeed { name: "San Francisco", x: 330, y: 1310 },
    CitySeed { name: "Boston", x: 3740, y: 1620 },
    CitySeed { name: "Chicago", x: 2590, y: 1440 },
    CitySeed { name: "Washington", x: 3440, y: 1250 },
];

/// Read-only lookup table from city name to coordinate. City matching is
/// exact and case-sensitive throughout.
#[derive(Clone, Debug, Default)]
pub struct CityTable {
    cities: HashMap<String, Coord>,
}

impl CityTable {
    pub fn new(entries: impl IntoIterator<Item = (String, Coord)>) -> Self {
        Self { cities: entries.into_iter().collect() }
    }

    pub fn coord(&self, name: &str) -> Option<Coord> {
        self.cities.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coord)> {
        self.cities.iter().map(|(name, coord)| (name.as_str(), *coord))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// The six-city reference table the engine ships with.
pub fn reference_cities() -> CityTable {
    CityTable::new(
        CITY_SEEDS
            .iter()
            .map(|seed| (seed.name.to_owned(), Coord { x: seed.x, y: seed.y })),
    )
}
