use super::ui;
use crate::core::config::AppConfig;
use crate::core::quote::Comparison;
use anyhow::Result;

pub async fn run(config: &AppConfig, amount: f64) -> Result<()> {
    let aggregator = crate::build_aggregator(config);
    let comparison = aggregator.compare(amount).await?;

    println!(
        "{}",
        render(&comparison, amount, &config.pair.from, &config.pair.to)
    );
    Ok(())
}

fn render(comparison: &Comparison, amount: f64, from_currency: &str, to_currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Provider"),
        ui::header_cell(&format!("Amount ({to_currency})")),
    ]);

    for result in comparison.results() {
        let amount_cell = match result.amount_out {
            Some(v) => ui::amount_cell(&format!("{v:.8}")),
            None => ui::na_cell(true),
        };
        table.add_row(vec![comfy_table::Cell::new(result.provider), amount_cell]);
    }

    let mut output = format!(
        "Buy quotes for {}\n\n",
        ui::style_text(&format!("{amount} {from_currency}"), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    match comparison.best() {
        Some(best) => {
            output.push_str(&format!(
                "\n\n{}: {}",
                ui::style_text("Best offer", ui::StyleType::BestLabel),
                ui::style_text(
                    &format!(
                        "{} ({:.8} {})",
                        best.provider,
                        best.amount_or_zero(),
                        to_currency
                    ),
                    ui::StyleType::BestValue
                )
            ));
        }
        None => {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text("No provider returned a usable quote.", ui::StyleType::Error)
            ));
        }
    }

    output
}
