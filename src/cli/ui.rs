use crate::core::ChartPoint;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Alignment, pad_str, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 36;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a cell for displaying a percentage return with color coding.
pub fn return_cell(value: f64) -> Cell {
    let text = format!("{value:.2}%");
    let color = if value >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a dimmed "N/A" cell for a missing return.
pub fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Renders a horizontal bar chart, one line per point, bars scaled to the
/// largest absolute return.
pub fn bar_chart(points: &[ChartPoint]) -> String {
    let max_abs = points
        .iter()
        .filter_map(|p| p.return_1yr)
        .map(f64::abs)
        .fold(0.0, f64::max);

    let mut lines = Vec::with_capacity(points.len());
    for point in points {
        let label = pad_str(&point.label, LABEL_WIDTH, Alignment::Left, Some("…"));
        let line = match point.return_1yr {
            Some(value) => {
                let len = if max_abs > 0.0 {
                    ((value.abs() / max_abs) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let bar = "█".repeat(len.max(1));
                let bar = if value >= 0.0 {
                    style(bar).green()
                } else {
                    style(bar).red()
                };
                format!("{label} │ {bar} {value:.2}%")
            }
            None => format!("{label} │ {}", style("N/A").dim()),
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Creates a spinner for work of unknown length, such as loading the dataset.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, value: Option<f64>) -> ChartPoint {
        ChartPoint {
            label: label.to_string(),
            return_1yr: value,
        }
    }

    #[test]
    fn test_bar_chart_one_line_per_point_in_order() {
        console::set_colors_enabled(false);
        let chart = bar_chart(&[
            point("Alpha Midcap", Some(12.7)),
            point("Alpha Value", Some(-2.5)),
            point("Alpha Contra", None),
        ]);

        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Alpha Midcap"));
        assert!(lines[0].ends_with("12.70%"));
        assert!(lines[0].contains(&"█".repeat(BAR_WIDTH)));
        assert!(lines[1].ends_with("-2.50%"));
        assert!(lines[2].ends_with("N/A"));
    }

    #[test]
    fn test_bar_chart_empty() {
        assert_eq!(bar_chart(&[]), "");
    }

    #[test]
    fn test_return_cell_formats_two_decimals() {
        assert_eq!(return_cell(5.0).content(), "5.00%");
        assert_eq!(return_cell(-0.456).content(), "-0.46%");
    }

    #[test]
    fn test_na_cell() {
        assert_eq!(na_cell().content(), "N/A");
    }
}
