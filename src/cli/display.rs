//! Display formatting for CLI output

use crate::export::ExportStats;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// Summary row for table display
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Exported")]
    metric: String,
    #[tabled(rename = "Count")]
    count: String,
}

/// Display the export summary as a table
pub fn display_summary(stats: &ExportStats) {
    let rows = vec![
        SummaryRow {
            metric: "Areas".to_string(),
            count: stats.areas.to_string(),
        },
        SummaryRow {
            metric: "Projects".to_string(),
            count: stats.projects.to_string(),
        },
        SummaryRow {
            metric: "To-dos".to_string(),
            count: stats.todos.to_string(),
        },
        SummaryRow {
            metric: "Headings (inlined)".to_string(),
            count: stats.headings_skipped.to_string(),
        },
        SummaryRow {
            metric: "List pages".to_string(),
            count: stats.list_pages.to_string(),
        },
        SummaryRow {
            metric: "---".to_string(),
            count: "---".to_string(),
        },
        SummaryRow {
            metric: "Directories".to_string(),
            count: stats.directories_created.to_string(),
        },
        SummaryRow {
            metric: "Files".to_string(),
            count: stats.files_written.to_string(),
        },
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Format for success messages
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}
