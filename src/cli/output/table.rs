//! Table output for the per-project export summary using comfy-table.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use crate::cli::commands::export::ProjectSummary;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format one row per Jira project with its issue breakdown
    pub fn format_projects(&self, projects: &[ProjectSummary]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Project").add_attribute(Attribute::Bold),
            Cell::new("Issues").add_attribute(Attribute::Bold),
            Cell::new("Epics").add_attribute(Attribute::Bold),
            Cell::new("Bugs").add_attribute(Attribute::Bold),
            Cell::new("Stories").add_attribute(Attribute::Bold),
            Cell::new("Done").add_attribute(Attribute::Bold),
        ]);

        for project in projects {
            let key_cell = if self.use_colors {
                Cell::new(&project.key).fg(Color::Cyan)
            } else {
                Cell::new(&project.key)
            };

            table.add_row(vec![
                key_cell,
                count_cell(project.issues),
                count_cell(project.epics),
                count_cell(project.bugs),
                count_cell(project.stories),
                count_cell(project.done),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).set_alignment(CellAlignment::Right)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    console::colors_enabled()
}
