use super::ui;
use crate::core::format::{format_number, time_ago};
use crate::core::history::History;
use chrono::{DateTime, Utc};
use comfy_table::Cell;

impl History {
    pub fn display_as_table(&self, now: DateTime<Utc>) -> String {
        if self.is_empty() {
            return ui::style_text("No conversion history yet", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Conversion"),
            ui::header_cell("When"),
        ]);

        for entry in self.entries() {
            table.add_row(vec![
                Cell::new(format!(
                    "{} {} → {} {}",
                    format_number(entry.from_amount),
                    entry.from_currency,
                    format_number(entry.to_amount),
                    entry.to_currency
                )),
                Cell::new(time_ago(entry.timestamp, now)),
            ]);
        }

        format!(
            "{}\n\n{}",
            ui::style_text("Recent conversions", ui::StyleType::Title),
            table
        )
    }
}

pub fn run(history: &History) {
    println!("{}", history.display_as_table(Utc::now()));
}
