use super::ui;
use crate::core::config::AppConfig;
use crate::store::{CachedQuote, QuoteStore};
use anyhow::Result;
use chrono::{TimeZone, Utc};

pub fn run(config: &AppConfig) -> Result<()> {
    let store = QuoteStore::open_default(config)?;
    let offers = store.latest_all()?;

    if offers.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No cached offers yet. Run `ramprate refresh` first.",
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!("{}", render(&offers, &config.pair.to));
    Ok(())
}

fn render(offers: &[CachedQuote], to_currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Provider"),
        ui::header_cell(&format!("Amount ({to_currency})")),
        ui::header_cell("Observed"),
    ]);

    for offer in offers {
        let observed = Utc
            .timestamp_millis_opt(offer.created_at)
            .single()
            .map_or("unknown".to_string(), |dt| {
                dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
            });

        table.add_row(vec![
            comfy_table::Cell::new(offer.provider),
            ui::amount_cell(&offer.amount_out),
            comfy_table::Cell::new(observed),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Cached offers", ui::StyleType::Title),
        table
    )
}
