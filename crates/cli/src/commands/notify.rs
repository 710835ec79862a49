use encore_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use encore_core::errors::ApplicationError;
use encore_core::fixtures::{sample_catalog, sample_customer};
use encore_core::geo::reference_cities;
use encore_core::notify::{notify_all, BufferNotifier};
use encore_core::recommendations::{merge_first_seen, RecommendationEngine};
use rust_decimal::Decimal;

use crate::commands::CommandResult;

#[derive(Debug, Default)]
pub struct NotifyArgs {
    pub city: bool,
    pub birthday: bool,
    pub nearby: bool,
    pub budget: bool,
    pub home_city: Option<String>,
    pub days_before: Option<u32>,
    pub max_distance: Option<u32>,
    pub max_price: Option<String>,
    pub limit: Option<usize>,
}

pub fn run(args: NotifyArgs) -> CommandResult {
    let max_price = match args.max_price.as_deref().map(str::parse::<Decimal>).transpose() {
        Ok(value) => value,
        Err(_) => {
            return CommandResult::failure(
                "notify",
                "invalid_argument",
                format!(
                    "--max-price must be a decimal amount, got `{}`",
                    args.max_price.unwrap_or_default()
                ),
                2,
            );
        }
    };

    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides {
            birthday_days_before: args.days_before,
            max_distance: args.max_distance,
            max_results: args.limit,
            max_price,
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "notify",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let engine = RecommendationEngine::new(sample_catalog(), reference_cities());
    let mut customer = sample_customer();
    if let Some(home_city) = args.home_city {
        customer.city = home_city;
    }

    // No explicit selection means every rule runs.
    let all = !(args.city || args.birthday || args.nearby || args.budget);
    let settings = &config.notifications;

    let mut lists = Vec::new();
    if all || args.city {
        lists.push(engine.events_in_city(&customer));
    }
    if all || args.birthday {
        lists.push(engine.birthday_window(&customer, settings.birthday_days_before));
    }
    if all || args.nearby {
        match engine.nearby(&customer, settings.max_distance, settings.max_results) {
            Ok(events) => lists.push(events),
            Err(error) => {
                let error = ApplicationError::from(error);
                return CommandResult::failure("notify", error.error_class(), error.to_string(), 4);
            }
        }
    }
    if all || args.budget {
        lists.push(engine.within_budget(&customer, settings.max_price, settings.max_results));
    }

    let merged = merge_first_seen(lists);
    let mut sink = BufferNotifier::new();
    let delivered = notify_all(&mut sink, &customer, &merged);

    let message = format!("notified {delivered} events for {}", customer.name);
    CommandResult::success("notify", message).with_preamble(sink.lines())
}
