use clap::Parser;
use rate_filter::domain::model::format_rate;
use rate_filter::utils::validation::{lint_profile, Validate};
use rate_filter::utils::logger;
use rate_filter::{evaluate, CliConfig, FileProfileStore, JsonQuoteFile, ProfileStore, QuoteSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting rate-filter CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let store = FileProfileStore::new(&config.profile);
    let profile = store.load()?;
    for warning in lint_profile(&profile) {
        tracing::warn!("{}", warning);
    }

    let quotes = JsonQuoteFile::new(&config.quotes).quotes()?;
    tracing::info!(
        "Loaded {} quotes, {} manual configs, {} rules",
        quotes.len(),
        profile.manual_services.len(),
        profile.rules.len()
    );

    if !profile.rules.is_empty() {
        println!("Rules:");
        for (index, rule) in profile.rules.iter().enumerate() {
            let state = if rule.enabled { "on " } else { "off" };
            if rule.description.is_empty() {
                println!("  {}. [{}] {}", index + 1, state, rule);
            } else {
                println!("  {}. [{}] {} - {}", index + 1, state, rule, rule.description);
            }
        }
        println!();
    }

    let outcome = evaluate(&quotes, &profile.manual_services, &profile.rules);

    println!("Visible services:");
    if outcome.visible.is_empty() {
        println!("  (none)");
    }
    for quote in &outcome.visible {
        println!(
            "  {}: {} - ${}",
            quote.carrier,
            quote.service,
            format_rate(quote.rate)
        );
    }

    if config.show_hidden && !outcome.hidden.is_empty() {
        println!("\nHidden services:");
        for hidden in &outcome.hidden {
            println!(
                "  {}: {} - ${} - {}",
                hidden.quote.carrier,
                hidden.quote.service,
                format_rate(hidden.quote.rate),
                hidden.hidden_reason
            );
        }
    }

    println!(
        "\n✅ {} visible, {} hidden",
        outcome.visible.len(),
        outcome.hidden.len()
    );

    Ok(())
}
