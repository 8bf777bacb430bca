use regex::Regex;
use scraper::node::Node as HtmlNode;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
///
/// Parsing never fails: html5ever recovers from broken markup the way a
/// browser does, so every query below returns `None` or an empty list rather
/// than an error when nothing matches.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw markup into a document tree
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            ::log::trace!("HTML parser recovered from {} errors", html.errors.len());
        }
        Self { html }
    }

    /// The `<html>` element
    pub fn root(&self) -> Element<'_> {
        Element(self.html.root_element())
    }

    /// First element (root included) with the given tag that satisfies `predicate`
    pub fn find_first<P>(&self, tag: &str, predicate: P) -> Option<Element<'_>>
    where
        P: Fn(&Element<'_>) -> bool,
    {
        self.root()
            .descendants_and_self()
            .find(|e| e.name() == tag && predicate(e))
    }

    /// First element with the given tag carrying `class`
    pub fn find_by_class(&self, tag: &str, class: &str) -> Option<Element<'_>> {
        self.find_first(tag, |e| e.has_class(class))
    }

    /// All elements with the given tag whose visible text matches `pattern`
    pub fn find_all_by_text(&self, tag: &str, pattern: &Regex) -> Vec<Element<'_>> {
        let matches: Vec<_> = self
            .root()
            .descendants_and_self()
            .filter(|e| e.name() == tag && pattern.is_match(&e.text()))
            .collect();

        ::log::debug!(
            "Found {} <{}> elements matching '{}'",
            matches.len(),
            tag,
            pattern
        );
        matches
    }
}

/// An element of a parsed document
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Lowercase tag name
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    /// Value of the attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Whether the element's class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// First descendant element (self excluded) with the given tag
    pub fn find_first(&self, tag: &str) -> Option<Element<'a>> {
        self.descendants().find(|e| e.name() == tag)
    }

    /// First descendant element (self excluded) matching a CSS selector
    pub fn select_first(&self, selector: &Selector) -> Option<Element<'a>> {
        self.0.select(selector).next().map(Element)
    }

    /// Direct children, text nodes included
    ///
    /// Comments, doctypes and processing instructions are not reported.
    pub fn children(&self) -> Vec<Node<'a>> {
        self.0
            .children()
            .filter_map(|child| match child.value() {
                HtmlNode::Element(_) => ElementRef::wrap(child).map(|e| Node::Element(Element(e))),
                HtmlNode::Text(text) => Some(Node::Text(&**text)),
                _ => None,
            })
            .collect()
    }

    /// Direct child counted from the end; `1` is the last child
    pub fn child_from_end(&self, position: usize) -> Option<Node<'a>> {
        if position == 0 {
            return None;
        }
        let children = self.children();
        let index = children.len().checked_sub(position)?;
        children.get(index).copied()
    }

    fn descendants(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap).map(Element)
    }

    fn descendants_and_self(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.0.descendants().filter_map(ElementRef::wrap).map(Element)
    }
}

/// A direct child of an element
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

impl<'a> Node<'a> {
    /// Visible text of the node
    pub fn text(&self) -> String {
        match self {
            Node::Element(element) => element.text(),
            Node::Text(text) => text.to_string(),
        }
    }

    pub fn as_element(&self) -> Option<Element<'a>> {
        match self {
            Node::Element(element) => Some(*element),
            Node::Text(_) => None,
        }
    }
}
