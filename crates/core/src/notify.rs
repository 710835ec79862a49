//! Notification formatting and delivery.
//!
//! Formatting is pure; the sink sits behind the [`Notifier`] trait so the
//! engine side never touches stdout directly. Sink failures are non-fatal:
//! the remaining events still go out.

use std::io::{self, Write};

use thiserror::Error;

use crate::domain::customer::Customer;
use crate::domain::event::Event;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification sink failed: {0}")]
    Sink(#[from] io::Error),
}

/// One line per (customer, event) pair; the price only appears when the
/// event carries one.
pub fn format_notification(customer: &Customer, event: &Event) -> String {
    match event.price {
        Some(price) => format!(
            "Hi {} from {}: {} plays {} on {} (tickets from ${price})",
            customer.name, customer.city, event.name, event.city, event.date
        ),
        None => format!(
            "Hi {} from {}: {} plays {} on {}",
            customer.name, customer.city, event.name, event.city, event.date
        ),
    }
}

pub trait Notifier {
    fn notify(&mut self, customer: &Customer, event: &Event) -> Result<(), NotifyError>;
}

/// Writes each notification line to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, customer: &Customer, event: &Event) -> Result<(), NotifyError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", format_notification(customer, event))?;
        Ok(())
    }
}

/// Collects formatted lines in memory for tests and command output.
#[derive(Clone, Debug, Default)]
pub struct BufferNotifier {
    lines: Vec<String>,
}

impl BufferNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Notifier for BufferNotifier {
    fn notify(&mut self, customer: &Customer, event: &Event) -> Result<(), NotifyError> {
        self.lines.push(format_notification(customer, event));
        Ok(())
    }
}

/// Drives the sink across a merged result list in order. A failed delivery
/// is logged and skipped; the count of delivered notifications is returned.
pub fn notify_all(notifier: &mut dyn Notifier, customer: &Customer, events: &[Event]) -> usize {
    let mut delivered = 0;

    for event in events {
        match notifier.notify(customer, event) {
            Ok(()) => delivered += 1,
            Err(error) => {
                tracing::warn!(
                    event_name = "notify.delivery_failed",
                    event_id = event.id.0,
                    %error,
                    "skipping undeliverable notification"
                );
            }
        }
    }

    delivered
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::customer::{Customer, CustomerId};
    use crate::domain::event::{Event, EventId};

    use super::{format_notification, notify_all, BufferNotifier, Notifier, NotifyError};

    fn customer() -> Customer {
        let birth = NaiveDate::from_ymd_opt(1995, 5, 10).expect("valid test date");
        Customer::new(CustomerId(1), "John", "New York", birth)
    }

    fn event(id: u32, price_cents: Option<i64>) -> Event {
        let date = NaiveDate::from_ymd_opt(2023, 12, 6).expect("valid test date");
        let mut event = Event::new(EventId(id), "Metallica", "New York", date);
        event.price = price_cents.map(|cents| Decimal::new(cents, 2));
        event
    }

    #[test]
    fn formats_price_only_when_present() {
        let priced = format_notification(&customer(), &event(3, Some(5500)));
        assert_eq!(
            priced,
            "Hi John from New York: Metallica plays New York on 2023-12-06 (tickets from $55.00)"
        );

        let unpriced = format_notification(&customer(), &event(9, None));
        assert!(!unpriced.contains('$'));
        assert!(unpriced.contains("2023-12-06"));
    }

    #[test]
    fn notify_all_delivers_in_order() {
        let mut sink = BufferNotifier::new();
        let events = vec![event(1, Some(7500)), event(3, Some(5500))];

        let delivered = notify_all(&mut sink, &customer(), &events);

        assert_eq!(delivered, 2);
        assert_eq!(sink.lines().len(), 2);
        assert!(sink.lines()[0].contains("$75.00"));
    }

    #[test]
    fn notify_all_continues_past_a_failing_sink() {
        struct FlakySink {
            delivered: Vec<u32>,
        }

        impl Notifier for FlakySink {
            fn notify(&mut self, _: &Customer, event: &Event) -> Result<(), NotifyError> {
                if event.id.0 == 2 {
                    return Err(NotifyError::Sink(std::io::Error::other("sink closed")));
                }
                self.delivered.push(event.id.0);
                Ok(())
            }
        }

        let mut sink = FlakySink { delivered: Vec::new() };
        let events = vec![event(1, None), event(2, None), event(3, None)];

        let delivered = notify_all(&mut sink, &customer(), &events);

        assert_eq!(delivered, 2);
        assert_eq!(sink.delivered, vec![1, 3]);
    }
}
