//! Small DOM walking helpers on top of `scraper`.

use scraper::node::Node;
use scraper::{ElementRef, Selector};

/// All text below `element`, concatenated.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the element's own text children, skipping nested elements.
pub fn direct_text(element: ElementRef<'_>) -> impl Iterator<Item = &str> {
    element.children().filter_map(|child| match child.value() {
        Node::Text(text) => Some(&**text),
        _ => None,
    })
}

/// Child elements with the given tag name.
pub fn child_elements<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

/// Element siblings that follow `element`, in document order.
pub fn following_elements(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element.next_siblings().filter_map(ElementRef::wrap).collect()
}

/// The parent element, if any.
pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Walk `levels` parent elements up.
pub fn ancestor(element: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    (0..levels).try_fold(element, |current, _| parent_element(current))
}

/// Nearest ancestor element with the given tag name.
pub fn closest<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    let mut current = parent_element(element);
    while let Some(el) = current {
        if el.value().name() == name {
            return Some(el);
        }
        current = parent_element(el);
    }
    None
}

/// Every element in `scope` or below it that matches, in document order.
///
/// Unlike [`ElementRef::select`], the scope elements themselves are
/// candidates too.
pub fn select_in<'a>(scope: &[ElementRef<'a>], selector: &Selector) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    for element in scope {
        if selector.matches(element) {
            found.push(*element);
        }
        found.extend(element.select(selector));
    }
    found
}

/// First element in `scope` or below it that matches.
pub fn select_first_in<'a>(scope: &[ElementRef<'a>], selector: &Selector) -> Option<ElementRef<'a>> {
    scope.iter().find_map(|element| {
        if selector.matches(element) {
            Some(*element)
        } else {
            element.select(selector).next()
        }
    })
}

/// Text of the siblings before (`Before`) or after (`After`) `marker`.
pub fn text_beside(marker: ElementRef<'_>, side: Side) -> String {
    let siblings: Vec<_> = match side {
        Side::Before => {
            let mut nodes: Vec<_> = marker.prev_siblings().collect();
            nodes.reverse();
            nodes
        }
        Side::After => marker.next_siblings().collect(),
    };

    siblings
        .into_iter()
        .map(|node| match node.value() {
            Node::Text(text) => String::from(&**text),
            Node::Element(_) => ElementRef::wrap(node).map(text_of).unwrap_or_default(),
            _ => String::new(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// Split the children of `element` into the texts between `<br>` elements.
pub fn split_on_breaks(element: ElementRef<'_>) -> Vec<String> {
    let mut segments = vec![String::new()];
    for child in element.children() {
        match child.value() {
            Node::Element(el) if el.name() == "br" => segments.push(String::new()),
            Node::Text(text) => {
                if let Some(last) = segments.last_mut() {
                    last.push_str(text);
                }
            }
            Node::Element(_) => {
                if let (Some(last), Some(el)) = (segments.last_mut(), ElementRef::wrap(child)) {
                    last.push_str(&text_of(el));
                }
            }
            _ => {}
        }
    }
    segments
}
