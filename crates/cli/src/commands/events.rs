use encore_core::fixtures::sample_catalog;

pub fn run() -> String {
    let catalog = sample_catalog();
    let mut lines = vec![format!("sample catalog ({} events):", catalog.len())];

    for event in catalog.iter() {
        let price = match event.price {
            Some(price) => format!("${price}"),
            None => "unpriced".to_string(),
        };
        lines.push(format!(
            "{:>3}  {}  {:<13}  {}  [{price}]",
            event.id.0, event.date, event.city, event.name
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #[test]
    fn listing_covers_the_whole_catalog() {
        let output = super::run();

        assert_eq!(output.lines().count(), 13);
        assert!(output.contains("Phantom of the Opera"));
        assert!(output.contains("unpriced"));
    }
}
