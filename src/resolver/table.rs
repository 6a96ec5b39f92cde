//! Dictionary-driven table reading.
//!
//! The header is the last row made only of `th` cells; tables often carry
//! a decorative title row above the real column header. Header cells are
//! mapped to column keys through a [`FieldDictionary`]. A table without any
//! header row falls back to its first multi-cell row as a synthetic header.
//!
//! Data rows are rows with at least one `td`. Their cells are the direct
//! `th` and `td` children, so a row-header number cell still counts. A data
//! row is only read when it has exactly as many cells as the header; rows
//! with spans or summary rows are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use super::dom;
use crate::dictionary::{FieldDictionary, matches_label};
use crate::document::Language;
use crate::text;

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));

static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid list item selector"));

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// One entry of a multi-item cell: the visible text and its link, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellItem {
    pub text: String,
    pub url: Option<String>,
}

/// A table with its column map resolved.
#[derive(Debug)]
pub struct Table<'a, K> {
    columns: BTreeMap<K, usize>,
    width: usize,
    rows: Vec<Vec<ElementRef<'a>>>,
}

impl<'a, K: Ord + Copy + std::fmt::Debug> Table<'a, K> {
    /// Read `table`, mapping its header with the labels of `language`.
    pub fn new(table: ElementRef<'a>, dictionary: &FieldDictionary<K>, language: &Language) -> Self {
        let mut rows: Vec<Vec<ElementRef<'a>>> = table
            .select(&ROW)
            .filter(|tr| dom::closest(*tr, "table").is_some_and(|t| t.id() == table.id()))
            .map(row_cells)
            .collect();

        let header_row = rows
            .iter()
            .rposition(|cells| !cells.is_empty() && cells.iter().all(|c| is_cell(*c, "th")));

        let header = match header_row {
            Some(i) => rows[i].clone(),
            None => match rows.iter().position(|cells| cells.len() > 1) {
                Some(i) => {
                    tracing::warn!("Table has no header cells, using first row as header");
                    rows.remove(i)
                }
                None => {
                    tracing::warn!("Table has no header cells");
                    Vec::new()
                }
            },
        };

        rows.retain(|cells| cells.iter().any(|c| is_cell(*c, "td")));

        let columns = map_columns(&header, dictionary, language);
        tracing::debug!(?columns, width = header.len(), "Table columns mapped");

        Self {
            columns,
            width: header.len(),
            rows,
        }
    }

    /// Number of header cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Column index of `key`, if the header has it.
    pub fn column(&self, key: K) -> Option<usize> {
        self.columns.get(&key).copied()
    }

    /// Data rows whose cell count matches the header.
    pub fn rows(&self) -> Vec<TableRow<'_, 'a, K>> {
        self.rows
            .iter()
            .filter(|cells| cells.len() == self.width)
            .map(|cells| TableRow {
                cells,
                columns: &self.columns,
            })
            .collect()
    }
}

fn is_cell(element: ElementRef<'_>, name: &str) -> bool {
    element.value().name() == name
}

fn row_cells(tr: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| is_cell(*c, "th") || is_cell(*c, "td"))
        .collect()
}

/// Assign each header cell the first still-unassigned key whose labels
/// contain the cell text. A key is never reassigned.
fn map_columns<K: Ord + Copy>(
    header: &[ElementRef<'_>],
    dictionary: &FieldDictionary<K>,
    language: &Language,
) -> BTreeMap<K, usize> {
    let mut columns = BTreeMap::new();
    let Some(labels) = dictionary.labels(language) else {
        return columns;
    };

    let mut assigned = BTreeSet::new();
    for (position, cell) in header.iter().enumerate() {
        let cell_text = dom::text_of(*cell);
        let key = labels
            .iter()
            .filter(|(key, _)| !assigned.contains(*key))
            .find(|(_, labels)| matches_label(&cell_text, labels))
            .map(|(key, _)| *key);

        if let Some(key) = key {
            assigned.insert(key);
            columns.insert(key, position);
        }
    }
    columns
}

/// One accepted data row.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'t, 'a, K> {
    cells: &'t [ElementRef<'a>],
    columns: &'t BTreeMap<K, usize>,
}

impl<'t, 'a, K: Ord> TableRow<'t, 'a, K> {
    /// The cell under `key`'s column.
    pub fn cell(&self, key: K) -> Option<ElementRef<'a>> {
        let index = *self.columns.get(&key)?;
        self.cells.get(index).copied()
    }

    /// Trimmed cell text, `None` when the column is missing or blank.
    pub fn cell_text(&self, key: K) -> Option<String> {
        let value = text::normalize_spaces(&dom::text_of(self.cell(key)?));
        (!value.is_empty()).then_some(value)
    }

    /// Read a cell holding several entries, each possibly linked.
    ///
    /// List items are taken with their own first link. Otherwise the flat
    /// text is split into entries and each entry is paired with a link whose
    /// anchor text is exactly the entry.
    pub fn multi_item_cell(&self, key: K) -> Vec<CellItem> {
        let Some(cell) = self.cell(key) else {
            return Vec::new();
        };

        let items: Vec<_> = cell.select(&LIST_ITEM).collect();
        if !items.is_empty() {
            return items
                .into_iter()
                .map(|item| CellItem {
                    text: text::normalize_spaces(&dom::text_of(item)),
                    url: first_href(item),
                })
                .collect();
        }

        let links: Vec<(String, String)> = cell
            .select(&LINK)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                Some((text::normalize_spaces(&dom::text_of(a)), href.to_string()))
            })
            .collect();

        text::split_list(&text::normalize_spaces(&dom::text_of(cell)))
            .into_iter()
            .map(|text| {
                let url = links
                    .iter()
                    .find(|(anchor, _)| *anchor == text)
                    .map(|(_, href)| href.clone());
                CellItem { text, url }
            })
            .collect()
    }
}

fn first_href(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
