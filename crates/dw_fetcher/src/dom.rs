//! Owned, typed view of a parsed HTML document.
//!
//! `scraper::Html` is converted once into a tree of [`Node`] values so the
//! extractors can walk (and, for the layout fix, edit) it without touching the
//! parser's arena. Comments stay in the tree since they count as siblings in
//! positional checks; doctypes and processing instructions are dropped.

use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Text for a text or comment node, tag name for an element.
    pub fn data(&self) -> &str {
        match self {
            Node::Element(el) => &el.name,
            Node::Text(text) | Node::Comment(text) => text,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(Node::Text(text.to_string()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |v| v.split_whitespace().any(|c| c == class))
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Elements named in `tags`, this one included, in document order.
    pub fn elements_by_tag<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Element> {
        let mut found = Vec::new();
        walk(self, &mut |el| {
            if tags.iter().any(|t| t.as_ref() == el.name) {
                found.push(el);
            }
        });
        found
    }

    /// First element with the given tag whose class list contains `class`.
    pub fn find_by_tag_and_class(&self, tag: &str, class: &str) -> Option<&Element> {
        if self.name == tag && self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find_by_tag_and_class(tag, class))
    }
}

fn walk<'a, F: FnMut(&'a Element)>(el: &'a Element, visit: &mut F) {
    visit(el);
    for child in &el.children {
        if let Node::Element(child) = child {
            walk(child, visit);
        }
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
            Node::Comment(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self {
            root: convert(parsed.root_element()),
        }
    }

    pub fn from_root(root: Element) -> Self {
        Self { root }
    }

    /// The `<html>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn convert(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut converted = Element {
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: Vec::new(),
    };

    for child in el.children() {
        match child.value() {
            scraper::Node::Text(text) => converted.children.push(Node::Text(String::from(&**text))),
            scraper::Node::Comment(comment) => {
                converted.children.push(Node::Comment(comment.comment.to_string()))
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    converted.children.push(Node::Element(convert(child_el)));
                }
            }
            _ => {}
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text_and_attribute_order() {
        let doc = Document::parse(
            r#"<html><head><title>Hello | DW</title></head>
            <body><div id="x" class="longText big"><p>one</p><!-- c --><p>two</p></div></body></html>"#,
        );
        let titles = doc.root().elements_by_tag(&["title"]);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].first_child().unwrap().data(), "Hello | DW");

        let container = doc.root().find_by_tag_and_class("div", "longText").unwrap();
        assert_eq!(container.attrs[0], ("id".to_string(), "x".to_string()));
        assert_eq!(container.children.len(), 3);
        assert_eq!(container.children[1], Node::Comment(" c ".to_string()));
        assert_eq!(container.children[1].data(), " c ");
        assert_eq!(container.text(), "onetwo");
    }

    #[test]
    fn test_data_of_element_is_tag_name() {
        let p = Element::new("p").with_child(Node::Element(Element::new("strong").with_text("x")));
        assert_eq!(p.first_child().unwrap().data(), "strong");
    }

    #[test]
    fn test_elements_by_tag_is_document_order() {
        let root = Element::new("div")
            .with_child(Node::Element(Element::new("h2").with_text("a")))
            .with_child(Node::Element(
                Element::new("section").with_child(Node::Element(Element::new("p").with_text("b"))),
            ))
            .with_child(Node::Element(Element::new("p").with_text("c")));
        let found: Vec<String> = root
            .elements_by_tag(&["p", "h2"])
            .iter()
            .map(|el| el.text())
            .collect();
        assert_eq!(found, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let el = Element::new("div").with_attr("class", "longTextual col");
        assert!(!el.has_class("longText"));
        assert!(el.has_class("col"));
        assert!(Element::new("div").find_by_tag_and_class("div", "col").is_none());
    }
}
