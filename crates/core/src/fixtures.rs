//! Deterministic sample dataset: the reference catalog and customer fed to
//! the CLI commands and exercised by the integration tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::catalog::EventCatalog;
use crate::domain::customer::{Customer, CustomerId};
use crate::domain::event::{Event, EventId};

#[derive(Debug, Clone, Copy)]
struct EventSeed {
    id: u32,
    name: &'static str,
    city: &'static str,
    date: (i32, u32, u32),
    price_cents: Option<i64>,
}

// Ticket prices landed with the latest catalog revision; the Washington
// LadyGaGa date has not published one yet.
const EVENT_SEEDS: &[EventSeed] = &[
    EventSeed {
        id: 1,
        name: "Phantom of the Opera",
        city: "New York",
        date: (2023, 12, 23),
        price_cents: Some(7500),
    },
    EventSeed {
        id: 2,
        name: "Metallica",
        city: "Los Angeles",
        date: (2023, 12, 2),
        price_cents: Some(5500),
    },
    EventSeed {
        id: 3,
        name: "Metallica",
        city: "New York",
        date: (2023, 12, 6),
        price_cents: Some(5500),
    },
    EventSeed {
        id: 4,
        name: "Metallica",
        city: "Boston",
        date: (2023, 10, 23),
        price_cents: Some(4500),
    },
    EventSeed {
        id: 5,
        name: "LadyGaGa",
        city: "New York",
        date: (2023, 9, 20),
        price_cents: Some(18000),
    },
    EventSeed {
        id: 6,
        name: "LadyGaGa",
        city: "Boston",
        date: (2023, 8, 1),
        price_cents: Some(1800),
    },
    EventSeed {
        id: 7,
        name: "LadyGaGa",
        city: "Chicago",
        date: (2023, 7, 4),
        price_cents: Some(1250),
    },
    EventSeed {
        id: 8,
        name: "LadyGaGa",
        city: "San Francisco",
        date: (2023, 7, 7),
        price_cents: Some(1500),
    },
    EventSeed {
        id: 9,
        name: "LadyGaGa",
        city: "Washington",
        date: (2023, 5, 22),
        price_cents: None,
    },
    EventSeed {
        id: 10,
        name: "Metallica",
        city: "Chicago",
        date: (2023, 1, 1),
        price_cents: Some(2000),
    },
    EventSeed {
        id: 11,
        name: "Phantom of the Opera",
        city: "San Francisco",
        date: (2023, 7, 4),
        price_cents: Some(950),
    },
    EventSeed {
        id: 12,
        name: "Phantom of the Opera",
        city: "Chicago",
        date: (2024, 5, 15),
        price_cents: Some(2500),
    },
];

fn seed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample_catalog() -> EventCatalog {
    let events = EVENT_SEEDS
        .iter()
        .map(|seed| {
            let mut event =
                Event::new(EventId(seed.id), seed.name, seed.city, seed_date(seed.date));
            event.price = seed.price_cents.map(|cents| Decimal::new(cents, 2));
            event
        })
        .collect();

    EventCatalog::new(events)
}

pub fn sample_customer() -> Customer {
    Customer::new(CustomerId(1), "John", "New York", seed_date((1995, 5, 10)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{sample_catalog, sample_customer};

    #[test]
    fn catalog_has_twelve_events_with_unique_ids() {
        let catalog = sample_catalog();

        assert_eq!(catalog.len(), 12);
        let ids: HashSet<_> = catalog.iter().map(|event| event.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn seed_dates_survive_construction() {
        let catalog = sample_catalog();
        let phantom = catalog.iter().next().expect("catalog is non-empty");

        assert_eq!(phantom.name, "Phantom of the Opera");
        assert_eq!(phantom.date, NaiveDate::from_ymd_opt(2023, 12, 23).expect("valid date"));
    }

    #[test]
    fn exactly_five_events_cost_twenty_or_less() {
        let cap = Decimal::new(2000, 2);
        let affordable = sample_catalog()
            .iter()
            .filter(|event| event.price.is_some_and(|price| price <= cap))
            .count();

        assert_eq!(affordable, 5);
    }

    #[test]
    fn sample_customer_lives_in_a_reference_city() {
        let customer = sample_customer();

        assert_eq!(customer.name, "John");
        assert!(crate::geo::reference_cities().contains(&customer.city));
    }
}
