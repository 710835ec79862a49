use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

/// The customer a notification run is computed for. The home city is
/// expected to be a key of the city reference table; the birth date's year
/// only matters at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub city: String,
    pub birth_date: NaiveDate,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        city: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self { id, name: name.into(), city: city.into(), birth_date }
    }
}
