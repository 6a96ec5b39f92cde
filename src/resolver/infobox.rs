//! Infobox field lookup.
//!
//! An infobox is a two-column table whose rows start with a label cell
//! (`th[scope=row]`) followed by one or more content cells. A field is
//! found by scanning the label cells in document order and taking the
//! first one whose text equals one of the field's dictionary labels. The
//! label may sit directly in the cell or inside a link, span or div child.
//!
//! There is no scoring between candidates: when two rows carry the same
//! label, the first one wins.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use super::dom::{self, Side};
use crate::calendar::{self, CalendarDate};
use crate::dictionary::matches_label;
use crate::document::Document;
use crate::source::url;
use crate::text;

static ROW_LABELS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"table.infobox th[scope="row"]"#).expect("valid row label selector")
});

static HEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".infobox th").expect("valid infobox head selector"));

static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".infobox .image img").expect("valid image selector"));

static ANY_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".infobox img").expect("valid image selector"));

static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid list item selector"));

static BREAK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("br").expect("valid break selector"));

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Inline wrappers a label may be nested in.
const LABEL_WRAPPERS: [&str; 3] = ["a", "span", "div"];

/// A `from–to` year span. Missing ends are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub from: u32,
    pub to: u32,
}

/// The infobox of one document.
#[derive(Debug, Clone, Copy)]
pub struct Infobox<'a> {
    doc: &'a Document,
}

impl<'a> Infobox<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Locate the row labelled with any of `labels`.
    ///
    /// Returns `None` when no label cell matches or when the matching label
    /// has no content cell after it.
    pub fn find_row(&self, labels: &[&str]) -> Option<InfoboxRow<'a>> {
        if labels.is_empty() {
            return None;
        }

        let Some(label) = self
            .doc
            .html()
            .select(&ROW_LABELS)
            .find(|th| label_matches(*th, labels))
        else {
            tracing::debug!(?labels, "Infobox label not found");
            return None;
        };

        let content = dom::following_elements(label);
        if content.is_empty() {
            tracing::debug!(?labels, "Infobox row has no content");
            return None;
        }

        Some(InfoboxRow { label, content })
    }

    /// Row text with citations stripped, `None` when absent or empty.
    pub fn read_text(&self, labels: &[&str]) -> Option<String> {
        self.find_row(labels)?.text()
    }

    /// Row content as a list of strings, empty when absent.
    pub fn read_list(&self, labels: &[&str]) -> Vec<String> {
        self.find_row(labels).map(|row| row.list()).unwrap_or_default()
    }

    /// Target of the first link in the row.
    pub fn read_link(&self, labels: &[&str]) -> Option<String> {
        self.find_row(labels)?.link()
    }

    /// Row text resolved as a date in the document's language.
    pub fn read_date(&self, labels: &[&str]) -> Option<CalendarDate> {
        let text = self.read_text(labels)?;
        calendar::resolve_date(&text, self.doc.language())
    }

    /// Row text read as a `from–to` year span.
    ///
    /// The span is split on an en dash, or on the Persian ` تا `; each side
    /// contributes its leading integer. `1970–present` gives `{1970, 0}`.
    pub fn read_date_range(&self, labels: &[&str]) -> YearRange {
        let Some(text) = self.read_text(labels) else {
            return YearRange::default();
        };
        let text = text::normalize_numerals(&text);

        let mut range: Vec<&str> = text.split('–').collect();
        if range.len() != 2 {
            range = text.split(" تا ").collect();
        }

        YearRange {
            from: range.first().map_or(0, |s| text::leading_int(s)),
            to: range.get(1).map_or(0, |s| text::leading_int(s)),
        }
    }

    /// The infobox caption, usually the subject's name.
    ///
    /// Only the first line is kept when the caption is broken over lines.
    pub fn title(&self) -> Option<String> {
        let head = self.doc.html().select(&HEAD).next()?;
        let title = match head.select(&BREAK).next() {
            Some(br) => dom::text_beside(br, Side::Before),
            None => dom::text_of(head),
        };
        non_empty(text::clean(&title))
    }

    /// Absolute URL of the main infobox image.
    pub fn image(&self) -> Option<String> {
        let html = self.doc.html();
        let img = html
            .select(&IMAGE)
            .next()
            .or_else(|| html.select(&ANY_IMAGE).next())?;
        let src = img.value().attr("src")?;
        url::absolutize(self.doc.url(), src)
    }
}

fn label_matches(th: ElementRef<'_>, labels: &[&str]) -> bool {
    if matches_label(&dom::text_of(th), labels) {
        return true;
    }
    if dom::direct_text(th).any(|t| matches_label(t, labels)) {
        return true;
    }

    th.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| LABEL_WRAPPERS.contains(&child.value().name()))
        .any(|child| {
            dom::direct_text(child).any(|t| matches_label(t, labels))
                || matches_label(&dom::text_of(child), labels)
        })
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// A located infobox row: its label cell and the content cells after it.
#[derive(Debug, Clone)]
pub struct InfoboxRow<'a> {
    label: ElementRef<'a>,
    content: Vec<ElementRef<'a>>,
}

impl<'a> InfoboxRow<'a> {
    pub fn label(&self) -> ElementRef<'a> {
        self.label
    }

    pub fn content(&self) -> &[ElementRef<'a>] {
        &self.content
    }

    fn raw_text(&self) -> String {
        self.content.iter().map(|el| dom::text_of(*el)).collect()
    }

    /// Text of all content cells, citations stripped, whitespace collapsed.
    pub fn text(&self) -> Option<String> {
        non_empty(text::clean(&text::strip_bracketed(&self.raw_text())))
    }

    /// Content read as a list.
    ///
    /// List items win over line breaks, which win over splitting the flat
    /// text on delimiters. Later strategies only apply when the earlier,
    /// structural ones find nothing.
    pub fn list(&self) -> Vec<String> {
        let items = dom::select_in(&self.content, &LIST_ITEM);
        if !items.is_empty() {
            return clean_all(items.into_iter().map(dom::text_of));
        }

        if let Some(br) = dom::select_first_in(&self.content, &BREAK)
            && let Some(parent) = dom::parent_element(br)
        {
            return clean_all(dom::split_on_breaks(parent).into_iter());
        }

        text::split_list(&text::clean(&text::strip_bracketed(&self.raw_text())))
    }

    /// Target of the first link in the content.
    pub fn link(&self) -> Option<String> {
        let link = dom::select_first_in(&self.content, &LINK)?;
        link.value().attr("href").map(str::to_string)
    }

    /// Text before the first line break, `None` without a break.
    pub fn first_line(&self) -> Option<String> {
        let br = dom::select_first_in(&self.content, &BREAK)?;
        non_empty(text::clean(&dom::text_beside(br, Side::Before)))
    }

    /// Text after the last line break, `None` without a break.
    pub fn last_line(&self) -> Option<String> {
        let br = dom::select_in(&self.content, &BREAK).pop()?;
        non_empty(text::clean(&dom::text_beside(br, Side::After)))
    }

    /// First element in the content matching `selector`.
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        dom::select_first_in(&self.content, selector)
    }
}

fn clean_all(items: impl Iterator<Item = String>) -> Vec<String> {
    items
        .map(|item| text::clean(&text::strip_bracketed(&item)))
        .filter(|item| !item.is_empty())
        .collect()
}
