use crate::api::item::Item;
use crate::utils::text::{single_line, truncate_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;
use serde_json::Value;

const MIN_COLUMN_WIDTH: usize = 8;

/// Renders items as a terminal table, one column per field
pub struct ItemTable {
    max_width: usize,
    use_colors: bool,
    columns: Option<Vec<String>>,
}

impl Default for ItemTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTable {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
            columns: None,
        }
    }

    fn detect_terminal_width() -> usize {
        match terminal::size() {
            Ok((cols, _)) => (cols as usize).clamp(40, 200),
            Err(_) => 80,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Only show these fields, in this order
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Column names: the configured ones, or every key in first-seen order
    pub fn column_names(&self, items: &[Item]) -> Vec<String> {
        if let Some(columns) = &self.columns {
            return columns.clone();
        }

        let mut names: Vec<String> = Vec::new();
        for key in items.iter().flat_map(Item::keys) {
            if !names.iter().any(|name| name == key) {
                names.push(key.to_string());
            }
        }
        names
    }

    pub fn render(&self, items: &[Item]) -> String {
        let columns = self.column_names(items);

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(u16::try_from(self.max_width).unwrap_or(u16::MAX));

        let header: Vec<Cell> = columns.iter().map(|name| self.header_cell(name)).collect();
        table.set_header(header);

        let cell_width = self.cell_width(columns.len());
        for item in items {
            let row: Vec<Cell> = columns
                .iter()
                .map(|name| Cell::new(truncate_text(&cell_text(item, name), cell_width)))
                .collect();
            table.add_row(row);
        }

        format!("{}\n{} item(s)", table, items.len())
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    // Borders and padding take roughly three columns per cell.
    fn cell_width(&self, column_count: usize) -> usize {
        if column_count == 0 {
            return self.max_width;
        }
        (self.max_width / column_count)
            .saturating_sub(3)
            .max(MIN_COLUMN_WIDTH)
    }
}

fn cell_text(item: &Item, name: &str) -> String {
    match item.get(name).map(|field| field.to_json()) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => single_line(&s),
        Some(other) => other.to_string(),
    }
}
