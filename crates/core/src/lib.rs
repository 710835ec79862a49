pub mod catalog;
pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod geo;
pub mod notify;
pub mod recommendations;

pub use catalog::EventCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::customer::{Customer, CustomerId};
pub use domain::event::{Event, EventId};
pub use errors::{ApplicationError, DomainError};
pub use geo::{manhattan, reference_cities, CityTable, Coord, DistanceCache};
pub use notify::{
    format_notification, notify_all, BufferNotifier, ConsoleNotifier, Notifier, NotifyError,
};
pub use recommendations::{merge_first_seen, RecommendationEngine, RecommendationResult};
