//! Display Surface
//!
//! The renderer only needs to find a named element and set its text, markers,
//! attributes or children. `MemorySurface` is an element tree keyed by id; the
//! CLI prints it and tests inspect it.
//!
//! ```text
//! balance-amount     "$25390.50"
//! balance-change     "+$500.00 this month"   [balance-change positive]
//! transaction-list   [transaction-item]*      newest first
//! spending-list      [spending-item] x3
//! main-chart         drawn by the chart widget
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Element identifiers of the standard dashboard layout
pub mod ids {
    pub const BALANCE_AMOUNT: &str = "balance-amount";
    pub const BALANCE_CHANGE: &str = "balance-change";
    pub const TRANSACTION_LIST: &str = "transaction-list";
    pub const SPENDING_LIST: &str = "spending-list";
    pub const MAIN_CHART: &str = "main-chart";

    pub const ALL: [&str; 5] = [
        BALANCE_AMOUNT,
        BALANCE_CHANGE,
        TRANSACTION_LIST,
        SPENDING_LIST,
        MAIN_CHART,
    ];
}

/// A node in the display tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    pub classes: Vec<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with one class
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Default::default()
        }
    }

    /// Builder: set text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder: set an attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append a child
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_classes(&mut self, classes: &[&str]) {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
    }

    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    /// Children carrying `class`
    pub fn children_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.has_class(class))
    }

    /// Depth-first search for the first descendant carrying `class`
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        for child in &self.children {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.find_class(class) {
                return Some(found);
            }
        }
        None
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{}[{}]", indent, self.classes.join(" "))?;
        if !self.text.is_empty() {
            write!(f, " {}", self.text)?;
        }
        for (key, value) in &self.attributes {
            write!(f, " {}={}", key, value)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Named elements the renderer writes into
pub trait DisplaySurface: Send {
    fn element(&self, id: &str) -> Option<&Element>;

    fn element_mut(&mut self, id: &str) -> Option<&mut Element>;
}

/// In-memory display tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    elements: BTreeMap<String, Element>,
}

impl MemorySurface {
    /// Surface without any elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with every element of the standard dashboard layout
    pub fn dashboard_layout() -> Self {
        let mut surface = Self::new();
        surface.insert(ids::BALANCE_AMOUNT, Element::new("balance-amount"));
        surface.insert(ids::BALANCE_CHANGE, Element::new("balance-change"));
        surface.insert(ids::TRANSACTION_LIST, Element::new("transaction-list"));
        surface.insert(ids::SPENDING_LIST, Element::new("spending-list"));
        surface.insert(ids::MAIN_CHART, Element::new("chart-container"));
        surface
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(|k| k.as_str())
    }
}

impl DisplaySurface for MemorySurface {
    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}

impl fmt::Display for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, element) in &self.elements {
            writeln!(f, "#{}", id)?;
            element.write_tree(f, 1)?;
        }
        Ok(())
    }
}

/// Text dump of the standard layout elements present on any surface
pub fn describe(surface: &dyn DisplaySurface) -> String {
    let mut out = String::new();
    for id in ids::ALL {
        if let Some(element) = surface.element(id) {
            out.push_str(&format!("#{}\n{}", id, element));
        }
    }
    out
}
