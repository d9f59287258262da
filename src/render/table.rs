// Pipe table renderer
// Produces the markdown-style tables every listing tool returns

/// A header plus rows of already formatted cells
///
/// Cells are written as-is. A `|` or newline inside a cell is not escaped
/// and will break the table layout for that line.
#[derive(Debug, Clone)]
pub struct Table {
    header: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &'static [&'static str]) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per header column
    pub fn push_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.header.len());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header line, separator line, then one line per row
    ///
    /// The separator is always followed by a newline, so an empty table
    /// ends with `\n` and a non-empty one ends with its last row.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push('|');
        for name in self.header {
            out.push_str(name);
            out.push('|');
        }
        out.push('\n');

        out.push('|');
        out.push_str(&"--|".repeat(self.header.len()));
        out.push('\n');

        let body: Vec<String> = self
            .rows
            .iter()
            .map(|cells| format!("|{}|", cells.join("|")))
            .collect();
        out.push_str(&body.join("\n"));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &[&str] = &["ID", "名前"];

    #[test]
    fn test_empty_table_keeps_header() {
        let table = Table::new(HEADER);
        assert!(table.is_empty());
        assert_eq!(table.render(), "|ID|名前|\n|--|--|\n");
    }

    #[test]
    fn test_rows_in_insertion_order() {
        let mut table = Table::new(HEADER);
        table.push_row(vec!["2".to_string(), "b".to_string()]);
        table.push_row(vec!["1".to_string(), "a".to_string()]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.render(), "|ID|名前|\n|--|--|\n|2|b|\n|1|a|");
    }

    #[test]
    fn test_cells_are_not_escaped() {
        let mut table = Table::new(HEADER);
        table.push_row(vec!["1".to_string(), "a|b".to_string()]);
        assert_eq!(table.render(), "|ID|名前|\n|--|--|\n|1|a|b|");
    }
}
