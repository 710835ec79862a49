use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

/// A single show occurrence. Names recur across cities and dates; only the
/// id is unique. The price field arrived in the latest catalog revision, so
/// older entries may not carry one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub city: String,
    pub date: NaiveDate,
    pub price: Option<Decimal>,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>, city: impl Into<String>, date: NaiveDate) -> Self {
        Self { id, name: name.into(), city: city.into(), date, price: None }
    }

    /// Attach a ticket price. Prices are non-negative.
    pub fn with_price(mut self, price: Decimal) -> Result<Self, DomainError> {
        if price.is_sign_negative() {
            return Err(DomainError::InvariantViolation(format!(
                "event {} has negative price {price}",
                self.id.0
            )));
        }

        self.price = Some(price);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::errors::DomainError;

    use super::{Event, EventId};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn with_price_accepts_non_negative_amounts() {
        let event = Event::new(EventId(1), "Metallica", "Boston", date(2023, 10, 23))
            .with_price(Decimal::new(4500, 2))
            .expect("non-negative price");

        assert_eq!(event.price, Some(Decimal::new(4500, 2)));
    }

    #[test]
    fn with_price_rejects_negative_amounts() {
        let error = Event::new(EventId(1), "Metallica", "Boston", date(2023, 10, 23))
            .with_price(Decimal::new(-1, 2))
            .expect_err("negative price should fail");

        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }
}
