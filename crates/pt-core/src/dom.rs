//! Minimal element model for page cleaning
//!
//! `PageElement` is the seam between the cleaning heuristics and whatever
//! actually holds the page. `Element` is an owned implementation used for
//! tests and offline processing.

use std::fmt;

/// Read access to one element of a page tree.
pub trait PageElement: Sized {
    /// Lowercase tag name.
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn children(&self) -> &[Self];

    /// Text directly inside this element, not counting children.
    fn own_text(&self) -> &str;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of this element and all descendants.
    fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text<E: PageElement>(element: &E, out: &mut String) {
    out.push_str(element.own_text());
    for child in element.children() {
        collect_text(child, out);
    }
}

// =============================================================================
// Owned tree
// =============================================================================

/// Owned element with attributes in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns true if the attribute was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(n, _)| n != name);
        self.attributes.len() != before
    }

    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Number of elements in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }

    /// Pre-order walk over this subtree.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            stack.extend(element.children.iter().rev());
        }
        out
    }
}

impl PageElement for Element {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn own_text(&self) -> &str {
        &self.text
    }
}

// =============================================================================
// Selectors
// =============================================================================

/// Attribute condition of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Present(&'static str),
    /// `[name="value"]`
    Equals(&'static str, &'static str),
}

/// Compound selector of the form `tag`, `tag.class` or `tag[attr]`/`tag[attr="v"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: &'static str,
    class: Option<&'static str>,
    attr: Option<AttrMatch>,
}

impl Selector {
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag, class: None, attr: None }
    }

    pub const fn class(tag: &'static str, class: &'static str) -> Self {
        Self { tag, class: Some(class), attr: None }
    }

    pub const fn has_attr(tag: &'static str, name: &'static str) -> Self {
        Self { tag, class: None, attr: Some(AttrMatch::Present(name)) }
    }

    pub const fn attr_eq(tag: &'static str, name: &'static str, value: &'static str) -> Self {
        Self { tag, class: None, attr: Some(AttrMatch::Equals(name, value)) }
    }

    pub fn matches<E: PageElement>(&self, element: &E) -> bool {
        if element.tag_name() != self.tag {
            return false;
        }
        if let Some(class) = self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        match &self.attr {
            None => true,
            Some(AttrMatch::Present(name)) => element.has_attribute(name),
            Some(AttrMatch::Equals(name, value)) => element.attribute(name) == Some(*value),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)?;
        if let Some(class) = self.class {
            write!(f, ".{}", class)?;
        }
        match &self.attr {
            None => Ok(()),
            Some(AttrMatch::Present(name)) => write!(f, "[{}]", name),
            Some(AttrMatch::Equals(name, value)) => write!(f, "[{}=\"{}\"]", name, value),
        }
    }
}

/// Join selectors into one selector list, e.g. for `querySelectorAll`.
pub fn selector_list(selectors: &[Selector]) -> String {
    selectors
        .iter()
        .map(Selector::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
