//! Plain-text rendering of the artwork table for terminals.

use crate::catalog::Artwork;
use crate::table::ArtworkTable;
use itertools::Itertools;

/// Column headers in display order, after the selection column.
pub const COLUMN_HEADERS: [&str; 6] = [
    "Title",
    "Artist",
    "Place of Origin",
    "Inscriptions",
    "Date Start",
    "Date End",
];

const COLUMN_WIDTHS: [usize; 6] = [32, 28, 16, 20, 10, 8];
const ROW_NUMBER_WIDTH: usize = 3;

/// Cell values for one record, one per entry of `COLUMN_HEADERS`.
pub fn row_cells(artwork: &Artwork) -> [String; 6] {
    [
        single_line(&artwork.title),
        single_line(&artwork.artist_display),
        single_line(&artwork.place_of_origin),
        single_line(&artwork.inscriptions),
        artwork.date_start_text(),
        artwork.date_end_text(),
    ]
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).join(", ")
}

/// Cut `text` to `width` characters, marking the cut with `~`.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{:<width$}", text, width = width)
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}~", cut)
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn header_line(selection_cell: &str) -> String {
    std::iter::once(selection_cell.to_string())
        .chain(std::iter::once(fit("#", ROW_NUMBER_WIDTH)))
        .chain(
            COLUMN_HEADERS
                .iter()
                .zip(COLUMN_WIDTHS)
                .map(|(header, width)| fit(header, width)),
        )
        .join(" | ")
}

fn record_line(selection_cell: &str, number: usize, artwork: &Artwork) -> String {
    std::iter::once(selection_cell.to_string())
        .chain(std::iter::once(fit(&number.to_string(), ROW_NUMBER_WIDTH)))
        .chain(
            row_cells(artwork)
                .into_iter()
                .zip(COLUMN_WIDTHS)
                .map(|(cell, width)| fit(&cell, width)),
        )
        .join(" | ")
}

/// Current page of `table` with checkboxes, 1-based row numbers and a pager line.
pub fn render_page(table: &ArtworkTable) -> String {
    let mut lines = vec![header_line(checkbox(table.all_selected()))];
    lines.push("-".repeat(lines[0].chars().count()));

    if table.rows().is_empty() {
        lines.push("(no rows)".to_string());
    }
    for (i, artwork) in table.rows().iter().enumerate() {
        lines.push(record_line(
            checkbox(table.is_selected(artwork.id)),
            i + 1,
            artwork,
        ));
    }

    let pager = table.paginator();
    lines.push(format!(
        "Page {} of {} | {} records | {} selected",
        pager.current_page,
        pager.total_pages(),
        table.total_records(),
        table.selection().len()
    ));
    if let Some(error) = table.last_error() {
        lines.push(format!("Error: {}", error));
    }
    lines.join("\n")
}

/// Records without selection state, numbered from 1.
pub fn render_records(records: &[Artwork]) -> String {
    let mut lines = vec![header_line("   ")];
    lines.push("-".repeat(lines[0].chars().count()));
    lines.extend(
        records
            .iter()
            .enumerate()
            .map(|(i, artwork)| record_line("   ", i + 1, artwork)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd~");
        assert_eq!(fit("Ædelstén", 4), "Æde~");
    }

    #[test]
    fn test_multiline_artist_is_flattened() {
        let artwork = Artwork {
            id: 1,
            title: "Nighthawks".to_string(),
            artist_display: "Edward Hopper\nAmerican, 1882–1967".to_string(),
            place_of_origin: "United States".to_string(),
            inscriptions: String::new(),
            date_start: Some(1942),
            date_end: None,
        };
        let cells = row_cells(&artwork);
        assert_eq!(cells[1], "Edward Hopper, American, 1882–1967");
        assert_eq!(cells[4], "1942");
        assert_eq!(cells[5], "");
    }

    #[tokio::test]
    async fn test_render_page_marks_selection() {
        let catalog = InMemoryCatalog::generated(20);
        let mut table = ArtworkTable::default();
        table.go_to_page(&catalog, 1).await.unwrap();
        table.toggle_row_at(1);

        let output = render_page(&table);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("[ ] | #   | Title"));
        assert!(lines[2].starts_with("[ ] | 1   | Artwork 1 "));
        assert!(lines[3].starts_with("[x] | 2   | Artwork 2 "));
        assert_eq!(lines.len(), 2 + 12 + 1);
        assert_eq!(*lines.last().unwrap(), "Page 1 of 2 | 20 records | 1 selected");

        table.toggle_select_all();
        assert!(render_page(&table).starts_with("[x]"));
    }

    #[test]
    fn test_render_empty_table() {
        let output = render_page(&ArtworkTable::default());
        assert!(output.contains("(no rows)"));
        assert!(output.ends_with("Page 1 of 1 | 0 records | 0 selected"));
    }
}
