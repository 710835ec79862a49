//! Recommendation engine implementation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::catalog::EventCatalog;
use crate::clock::{Clock, SystemClock};
use crate::domain::customer::Customer;
use crate::domain::event::Event;
use crate::errors::DomainError;
use crate::geo::{CityTable, DistanceCache};

use super::RecommendationResult;

/// Wraps the event catalog, the city reference table, and the distance
/// cache built eagerly at construction. Nothing mutates after the
/// constructor returns, so the engine can be shared read-only.
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: EventCatalog,
    cities: CityTable,
    distances: DistanceCache,
    clock: Box<dyn Clock>,
}

impl RecommendationEngine {
    pub fn new(catalog: EventCatalog, cities: CityTable) -> Self {
        Self::with_clock(catalog, cities, Box::new(SystemClock))
    }

    pub fn with_clock(catalog: EventCatalog, cities: CityTable, clock: Box<dyn Clock>) -> Self {
        let distances = DistanceCache::build(&cities);
        Self { catalog, cities, distances, clock }
    }

    /// Events whose city equals the customer's home city, exact string
    /// match, catalog order. An empty result is success.
    pub fn events_in_city(&self, customer: &Customer) -> Vec<Event> {
        self.catalog
            .iter()
            .filter(|event| event.city == customer.city)
            .cloned()
            .collect()
    }

    /// Events dated exactly `days_before` whole days ahead of the
    /// customer's next birthday as seen from the injected clock. Events on
    /// the other side of the birthday, or with any other gap, are excluded.
    pub fn birthday_window(&self, customer: &Customer, days_before: u32) -> Vec<Event> {
        let next_birthday = next_birthday_on_or_after(customer.birth_date, self.clock.today());

        self.catalog
            .iter()
            .filter(|event| (next_birthday - event.date).num_days() == i64::from(days_before))
            .cloned()
            .collect()
    }

    /// Events within `max_distance` of the customer's home city, ascending
    /// by distance with catalog-order ties, at most `limit` results.
    ///
    /// The customer's own city must be a reference city; anything else is a
    /// configuration error, never an empty result. An event city unknown to
    /// the table has no computable distance and is skipped silently.
    pub fn nearby(
        &self,
        customer: &Customer,
        max_distance: u32,
        limit: usize,
    ) -> RecommendationResult<Vec<Event>> {
        if !self.cities.contains(&customer.city) {
            return Err(DomainError::UnknownCustomerCity { city: customer.city.clone() });
        }

        let mut ranked: Vec<(u32, Event)> = Vec::new();
        for event in self.catalog.iter() {
            let Some(distance) = self.distances.distance(&customer.city, &event.city) else {
                tracing::debug!(
                    event_name = "recommendations.nearby.city_skipped",
                    event_id = event.id.0,
                    city = %event.city,
                    "event city is not in the reference table"
                );
                continue;
            };

            if distance <= max_distance {
                ranked.push((distance, event.clone()));
            }
        }

        ranked.sort_by_key(|(distance, _)| *distance);
        ranked.truncate(limit);

        Ok(ranked.into_iter().map(|(_, event)| event).collect())
    }

    /// Events priced at or under `max_price`, ascending by price with
    /// catalog-order ties, at most `limit` results. Events without a
    /// published price are not eligible.
    ///
    /// The customer is accepted but unused: the cap may become
    /// per-customer later, and every query keeps the same shape until then.
    pub fn within_budget(
        &self,
        _customer: &Customer,
        max_price: Decimal,
        limit: usize,
    ) -> Vec<Event> {
        let mut priced: Vec<(Decimal, Event)> = self
            .catalog
            .iter()
            .filter_map(|event| event.price.map(|price| (price, event.clone())))
            .filter(|(price, _)| *price <= max_price)
            .collect();

        priced.sort_by_key(|(price, _)| *price);
        priced.truncate(limit);

        priced.into_iter().map(|(_, event)| event).collect()
    }

    /// Cached Manhattan distance between two reference cities; `None` when
    /// either is unknown to the table.
    pub fn distance_between(&self, from: &str, to: &str) -> Option<u32> {
        self.distances.distance(from, to)
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn cities(&self) -> &CityTable {
        &self.cities
    }
}

/// The customer's next birthday on or after `today`. A birthday falling on
/// `today` counts as this year's occurrence.
fn next_birthday_on_or_after(birth_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = birthday_in_year(birth_date, today.year());
    if this_year >= today {
        this_year
    } else {
        birthday_in_year(birth_date, today.year() + 1)
    }
}

fn birthday_in_year(birth_date: NaiveDate, year: i32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day()) {
        Some(date) => date,
        // Feb 29 birth dates clamp to Feb 28 in non-leap years.
        None => NaiveDate::from_ymd_opt(year, 2, 28).unwrap_or(birth_date),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::catalog::EventCatalog;
    use crate::clock::FixedClock;
    use crate::domain::customer::{Customer, CustomerId};
    use crate::domain::event::{Event, EventId};
    use crate::errors::DomainError;
    use crate::fixtures::{sample_catalog, sample_customer};
    use crate::geo::reference_cities;

    use super::{next_birthday_on_or_after, RecommendationEngine};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn fixture_engine(today: NaiveDate) -> RecommendationEngine {
        RecommendationEngine::with_clock(
            sample_catalog(),
            reference_cities(),
            Box::new(FixedClock::on(today)),
        )
    }

    fn ids(events: &[Event]) -> Vec<u32> {
        events.iter().map(|event| event.id.0).collect()
    }

    #[test]
    fn city_match_returns_the_new_york_events_in_catalog_order() {
        let engine = fixture_engine(date(2023, 6, 1));
        let matched = engine.events_in_city(&sample_customer());

        assert_eq!(ids(&matched), vec![1, 3, 5]);
    }

    #[test]
    fn city_match_is_exact_and_case_sensitive() {
        let engine = fixture_engine(date(2023, 6, 1));
        let customer = Customer::new(CustomerId(2), "Dana", "new york", date(1990, 1, 1));

        assert!(engine.events_in_city(&customer).is_empty());
    }

    #[test]
    fn birthday_window_matches_the_exact_gap_only() {
        // Birthday May 10 already passed on June 1, so the next occurrence
        // is May 10 of the following year.
        let customer = Customer::new(CustomerId(2), "Dana", "Chicago", date(1995, 5, 10));
        let catalog = EventCatalog::new(vec![
            Event::new(EventId(1), "Metallica", "Chicago", date(2024, 5, 3)),
            Event::new(EventId(2), "Metallica", "Chicago", date(2024, 5, 2)),
            Event::new(EventId(3), "Metallica", "Chicago", date(2024, 5, 12)),
        ]);
        let engine = RecommendationEngine::with_clock(
            catalog,
            reference_cities(),
            Box::new(FixedClock::on(date(2023, 6, 1))),
        );

        let matched = engine.birthday_window(&customer, 7);
        assert_eq!(ids(&matched), vec![1]);
    }

    #[test]
    fn birthday_on_the_current_day_counts_as_this_year() {
        let today = date(2023, 5, 10);
        let birth = date(1995, 5, 10);

        assert_eq!(next_birthday_on_or_after(birth, today), today);
    }

    #[test]
    fn leap_day_birthdays_clamp_to_february_28() {
        let birth = date(1996, 2, 29);

        assert_eq!(next_birthday_on_or_after(birth, date(2025, 1, 15)), date(2025, 2, 28));
        // In a leap year the true date is kept.
        assert_eq!(next_birthday_on_or_after(birth, date(2024, 1, 15)), date(2024, 2, 29));
    }

    #[test]
    fn nearby_rejects_an_unknown_customer_city() {
        let engine = fixture_engine(date(2023, 6, 1));
        let customer = Customer::new(CustomerId(3), "Mara", "Atlantis", date(1990, 1, 1));

        let error = engine.nearby(&customer, 50, 5).expect_err("unknown home city must fail");
        assert_eq!(error, DomainError::UnknownCustomerCity { city: "Atlantis".to_owned() });
    }

    #[test]
    fn nearby_with_a_tight_budget_keeps_only_same_city_events() {
        let engine = fixture_engine(date(2023, 6, 1));

        let matched =
            engine.nearby(&sample_customer(), 50, 5).expect("reference customer city is known");
        assert_eq!(ids(&matched), vec![1, 3, 5]);
    }

    #[test]
    fn nearby_ranks_ascending_with_catalog_order_ties() {
        let engine = fixture_engine(date(2023, 6, 1));

        // From New York: Boston 333, Washington 337, Chicago 997; Los
        // Angeles (3590) and San Francisco (3387) stay over budget.
        let matched =
            engine.nearby(&sample_customer(), 1000, 12).expect("reference customer city is known");
        assert_eq!(ids(&matched), vec![1, 3, 5, 4, 6, 9, 7, 10, 12]);
    }

    #[test]
    fn nearby_truncates_to_the_limit() {
        let engine = fixture_engine(date(2023, 6, 1));

        let matched =
            engine.nearby(&sample_customer(), 1000, 4).expect("reference customer city is known");
        assert_eq!(ids(&matched), vec![1, 3, 5, 4]);
    }

    #[test]
    fn nearby_silently_skips_events_in_unknown_cities() {
        let catalog = EventCatalog::new(vec![
            Event::new(EventId(1), "Metallica", "Austin", date(2023, 9, 1)),
            Event::new(EventId(2), "Metallica", "New York", date(2023, 9, 2)),
        ]);
        let engine = RecommendationEngine::new(catalog, reference_cities());

        let matched =
            engine.nearby(&sample_customer(), 5000, 5).expect("known city with unknown-city event");
        assert_eq!(ids(&matched), vec![2]);
    }

    #[test]
    fn within_budget_ranks_ascending_and_truncates() {
        let engine = fixture_engine(date(2023, 6, 1));
        let cap = Decimal::new(2000, 2);

        let matched = engine.within_budget(&sample_customer(), cap, 5);
        assert_eq!(ids(&matched), vec![11, 7, 8, 6, 10]);

        let truncated = engine.within_budget(&sample_customer(), cap, 3);
        assert_eq!(ids(&truncated), vec![11, 7, 8]);
    }

    #[test]
    fn within_budget_never_returns_unpriced_events() {
        let engine = fixture_engine(date(2023, 6, 1));

        let matched = engine.within_budget(&sample_customer(), Decimal::new(1_000_000, 2), 20);
        assert!(matched.iter().all(|event| event.price.is_some()));
        assert!(!ids(&matched).contains(&9));
    }

    #[test]
    fn within_budget_keeps_catalog_order_for_price_ties() {
        let engine = fixture_engine(date(2023, 6, 1));

        // Events 2 and 3 share a 55.00 price; catalog order breaks the tie.
        let matched = engine.within_budget(&sample_customer(), Decimal::new(5500, 2), 12);
        let twos_and_threes: Vec<u32> =
            ids(&matched).into_iter().filter(|id| *id == 2 || *id == 3).collect();
        assert_eq!(twos_and_threes, vec![2, 3]);
    }

    #[test]
    fn distance_between_exposes_the_cache() {
        let engine = fixture_engine(date(2023, 6, 1));

        assert_eq!(engine.distance_between("New York", "Los Angeles"), Some(3590));
        assert_eq!(engine.distance_between("New York", "Atlantis"), None);
    }
}
