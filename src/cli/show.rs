use super::ui;
use crate::core::{Explorer, FilterState, RankedView};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub fn run(explorer: &Explorer, state: &FilterState, top_n: usize) -> Result<()> {
    match explorer.view_for(state)? {
        Some(view) => {
            info!("Showing {} funds", view.len());
            println!("{}", render(&view, top_n));
        }
        None => println!(
            "{}",
            ui::style_text("No funds available to explore.", ui::StyleType::Warning)
        ),
    }
    Ok(())
}

/// Title, top-N chart, summary and full table for a view.
pub fn render(view: &RankedView, top_n: usize) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text(
            &format!(
                "1-Year Return Overview → {} / {}",
                view.category(),
                view.amc_name()
            ),
            ui::StyleType::Title
        )
    );

    if view.is_empty() {
        output.push_str(&ui::style_text(
            "No data found for the selected category and AMC.",
            ui::StyleType::Warning,
        ));
        return output;
    }

    output.push_str(&ui::bar_chart(&view.chart(Some(top_n))));
    if view.len() > top_n {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Top {top_n} of {} funds", view.len()),
                ui::StyleType::Subtle
            )
        ));
    }

    if let Some(stats) = view.stats() {
        output.push_str(&format!(
            "\n\n{} {}   {} {:.2}%   {} {:.2}%",
            ui::style_text("Average return:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{:.2}%", stats.mean), ui::StyleType::TotalValue),
            ui::style_text("Best:", ui::StyleType::TotalLabel),
            stats.best,
            ui::style_text("Worst:", ui::StyleType::TotalLabel),
            stats.worst,
        ));
    }

    output.push_str("\n\n");
    output.push_str(&records_table(view).to_string());
    output
}

/// Every column of every fund, in ranked order.
fn records_table(view: &RankedView) -> comfy_table::Table {
    let schema = view.table().schema();
    let mut table = ui::new_styled_table();
    table.set_header(
        schema
            .columns
            .iter()
            .map(|c| ui::header_cell(c))
            .collect::<Vec<_>>(),
    );

    for record in view.rows() {
        let cells = record.cells().iter().enumerate().map(|(idx, value)| {
            if idx == schema.return_idx {
                match record.return_1yr {
                    Some(r) => ui::return_cell(r),
                    None => ui::na_cell(),
                }
            } else {
                Cell::new(value)
            }
        });
        table.add_row(cells.collect::<Vec<_>>());
    }
    table
}
