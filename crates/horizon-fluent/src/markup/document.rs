//! Owned SVG document tree.
//!
//! [`SvgDocument`] is an immutable value parsed from markup with `quick-xml`.
//! Edits produce a new document; the original is never touched. Attribute
//! order, text, comments, CDATA sections and processing instructions survive
//! a parse/serialize cycle.

use std::fmt;
use std::io::{self, Write};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

use super::rewrite::ColorAttributes;

/// Local name the document root must have.
pub const SVG_TAG: &str = "svg";

// ============================================================================
// SvgDocument
// ============================================================================

/// The XML declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// XML version.
    pub version: String,
    /// Declared encoding.
    pub encoding: Option<String>,
    /// Declared standalone flag, kept verbatim.
    pub standalone: Option<String>,
}

/// A parsed SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    declaration: Option<Declaration>,
    prolog: Vec<SvgNode>,
    root: SvgElement,
    epilog: Vec<SvgNode>,
}

impl SvgDocument {
    /// Parse SVG markup.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedMarkup`] when the markup is not well-formed XML or
    /// its root element is not `svg`.
    pub fn parse(markup: &str) -> Result<Self> {
        let markup = markup.strip_prefix('\u{feff}').unwrap_or(markup);
        let mut reader = Reader::from_str(markup);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<SvgElement> = None;
        let mut stack: Vec<SvgElement> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event()
                .map_err(|e| Error::malformed(e.to_string(), reader.error_position() as u64))?;

            match event {
                Event::Eof => break,
                Event::Decl(decl) => {
                    if root.is_some() || !stack.is_empty() || !prolog.is_empty() {
                        return Err(Error::malformed("misplaced XML declaration", position));
                    }
                    declaration = Some(parse_declaration(&decl, position)?);
                }
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(Error::malformed("content after the root element", position));
                    }
                    stack.push(parse_element(&start, position)?);
                }
                Event::Empty(empty) => {
                    let element = parse_element(&empty, position)?;
                    attach(element, &mut stack, &mut root, position)?;
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        Error::malformed(
                            format!("unexpected closing tag </{}>", String::from_utf8_lossy(end.name().as_ref())),
                            position,
                        )
                    })?;
                    attach(element, &mut stack, &mut root, position)?;
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(&text).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(SvgNode::Text(raw));
                    } else if !raw.trim().is_empty() {
                        return Err(Error::malformed("text outside the root element", position));
                    }
                }
                Event::CData(cdata) => {
                    let content = String::from_utf8_lossy(&cdata).into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(SvgNode::CData(content)),
                        None => return Err(Error::malformed("CDATA outside the root element", position)),
                    }
                }
                Event::Comment(comment) => {
                    let node = SvgNode::Comment(String::from_utf8_lossy(&comment).into_owned());
                    push_misc(node, &mut stack, &root, &mut prolog, &mut epilog);
                }
                Event::PI(pi) => {
                    let node = SvgNode::ProcessingInstruction(String::from_utf8_lossy(&pi).into_owned());
                    push_misc(node, &mut stack, &root, &mut prolog, &mut epilog);
                }
                Event::DocType(doctype) => {
                    if root.is_some() || !stack.is_empty() {
                        return Err(Error::malformed("misplaced DOCTYPE", position));
                    }
                    prolog.push(SvgNode::DocType(String::from_utf8_lossy(&doctype).into_owned()));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::malformed(
                format!("unclosed element <{}>", open.name),
                reader.buffer_position() as u64,
            ));
        }

        let root = root.ok_or_else(|| Error::malformed("no root element", 0))?;
        if root.local_name() != SVG_TAG {
            return Err(Error::malformed(
                format!("root element is <{}>, expected <{}>", root.name, SVG_TAG),
                0,
            ));
        }

        tracing::trace!(elements = root.descendant_count() + 1, "parsed SVG document");

        Ok(Self {
            declaration,
            prolog,
            root,
            epilog,
        })
    }

    /// The XML declaration, if the markup had one.
    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// The root `svg` element.
    pub fn root(&self) -> &SvgElement {
        &self.root
    }

    /// All elements whose local name is `tag`, in document order.
    ///
    /// The root is included when it matches.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<&SvgElement> {
        let mut found = Vec::new();
        self.root.collect_by_tag(tag, &mut found);
        found
    }

    /// Number of elements whose local name is `tag`.
    pub fn count_elements(&self, tag: &str) -> usize {
        self.elements_by_tag(tag).len()
    }

    /// A copy of this document with `attributes` applied to the selected
    /// `tag` elements.
    ///
    /// Elements are numbered from zero in document order. With no target
    /// indexes every matching element is edited.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyAttributes`] when there is nothing to assign
    /// - [`Error::IndexOutOfRange`] when an index addresses no element
    pub fn with_attributes(&self, tag: &str, attributes: &ColorAttributes) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Error::EmptyAttributes);
        }

        let count = self.count_elements(tag);
        let selected: Option<&[usize]> = attributes.indexes().filter(|indexes| !indexes.is_empty());
        if let Some(indexes) = selected
            && let Some(&index) = indexes.iter().find(|&&index| index >= count)
        {
            return Err(Error::IndexOutOfRange { index, count });
        }

        let mut edited = self.clone();
        let mut position = 0;
        edited.root.visit_by_tag_mut(tag, &mut position, &mut |index: usize, element: &mut SvgElement| {
            if selected.is_none_or(|indexes| indexes.contains(&index)) {
                for (name, value) in attributes.assignments() {
                    element.set_attribute(name, value);
                }
            }
        });

        tracing::trace!(tag, count, targets = ?selected, "applied attribute overrides");
        Ok(edited)
    }

    /// Serialize to compact markup.
    pub fn to_markup(&self) -> String {
        let bytes = self
            .write_markup(Vec::new())
            .expect("writing markup into a Vec cannot fail");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Serialize to compact markup into `out`, returning it.
    ///
    /// # Errors
    ///
    /// Any error reported by `out`.
    pub fn write_markup<W: Write>(&self, out: W) -> io::Result<W> {
        let mut writer = Writer::new(out);
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if let Some(decl) = &self.declaration {
            let event = BytesDecl::new(&decl.version, decl.encoding.as_deref(), decl.standalone.as_deref());
            writer.write_event(Event::Decl(event))?;
        }
        for node in &self.prolog {
            node.write_to(writer)?;
        }
        self.root.write_to(writer)?;
        for node in &self.epilog {
            node.write_to(writer)?;
        }
        Ok(())
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

fn parse_declaration(decl: &BytesDecl<'_>, position: u64) -> Result<Declaration> {
    let version = decl
        .version()
        .map_err(|e| Error::malformed(e.to_string(), position))?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(|e| Error::malformed(e.to_string(), position))?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(|e| Error::malformed(e.to_string(), position))?;

    Ok(Declaration {
        version: String::from_utf8_lossy(&version).into_owned(),
        encoding: encoding.map(|e| String::from_utf8_lossy(&e).into_owned()),
        standalone: standalone.map(|s| String::from_utf8_lossy(&s).into_owned()),
    })
}

fn parse_element(start: &BytesStart<'_>, position: u64) -> Result<SvgElement> {
    let mut element = SvgElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::malformed(e.to_string(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::malformed(e.to_string(), position))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    element: SvgElement,
    stack: &mut [SvgElement],
    root: &mut Option<SvgElement>,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(SvgNode::Element(element));
    } else if root.is_some() {
        return Err(Error::malformed("more than one root element", position));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn push_misc(
    node: SvgNode,
    stack: &mut [SvgElement],
    root: &Option<SvgElement>,
    prolog: &mut Vec<SvgNode>,
    epilog: &mut Vec<SvgNode>,
) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        epilog.push(node);
    } else {
        prolog.push(node);
    }
}

// ============================================================================
// SvgElement
// ============================================================================

/// An element with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<SvgNode>,
}

impl SvgElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The qualified name (`svg:path`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without its namespace prefix (`path`).
    pub fn local_name(&self) -> &str {
        self.name.rsplit_once(':').map_or(self.name.as_str(), |(_, local)| local)
    }

    /// An attribute value, unescaped.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[SvgNode] {
        &self.children
    }

    /// Child elements in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(SvgNode::as_element)
    }

    fn descendant_count(&self) -> usize {
        self.child_elements().map(|child| 1 + child.descendant_count()).sum()
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a SvgElement>) {
        if self.local_name() == tag {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_tag(tag, found);
        }
    }

    fn visit_by_tag_mut(&mut self, tag: &str, position: &mut usize, visit: &mut impl FnMut(usize, &mut SvgElement)) {
        if self.local_name() == tag {
            visit(*position, self);
            *position += 1;
        }
        for child in &mut self.children {
            if let SvgNode::Element(element) = child {
                element.visit_by_tag_mut(tag, position, visit);
            }
        }
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }
}

// ============================================================================
// SvgNode
// ============================================================================

/// A node in the document tree.
///
/// Text, comment and DOCTYPE contents are kept exactly as written, entity
/// references included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgNode {
    /// An element.
    Element(SvgElement),
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
    /// A CDATA section.
    CData(String),
    /// A processing instruction (target and data).
    ProcessingInstruction(String),
    /// A DOCTYPE declaration.
    DocType(String),
}

impl SvgNode {
    /// This node as an element, if it is one.
    pub fn as_element(&self) -> Option<&SvgElement> {
        match self {
            SvgNode::Element(element) => Some(element),
            _ => None,
        }
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let event = match self {
            SvgNode::Element(element) => return element.write_to(writer),
            SvgNode::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
            SvgNode::Comment(raw) => Event::Comment(BytesText::from_escaped(raw.as_str())),
            SvgNode::CData(content) => Event::CData(BytesCData::new(content.as_str())),
            SvgNode::ProcessingInstruction(content) => Event::PI(BytesPI::new(content.as_str())),
            SvgNode::DocType(raw) => Event::DocType(BytesText::from_escaped(raw.as_str())),
        };
        writer.write_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<!-- icon -->
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16">
  <g id="layer">
    <path d="M0 0H8V8H0Z" fill="#000000"/>
    <path d="M8 8H16V16H8Z"/>
  </g>
  <path d="M0 8H8V16H0Z" fill="#000000" opacity="0.5"/>
</svg>"##;

    #[test]
    fn test_parse_structure() {
        let doc = SvgDocument::parse(ICON).unwrap();
        assert_eq!(doc.root().name(), "svg");
        assert_eq!(doc.declaration().unwrap().version, "1.0");
        assert_eq!(doc.count_elements("path"), 3);
        assert_eq!(doc.count_elements("g"), 1);
        assert_eq!(doc.count_elements("circle"), 0);
    }

    #[test]
    fn test_document_order() {
        let doc = SvgDocument::parse(ICON).unwrap();
        let paths = doc.elements_by_tag("path");
        assert_eq!(paths[0].attribute("d"), Some("M0 0H8V8H0Z"));
        assert_eq!(paths[1].attribute("d"), Some("M8 8H16V16H8Z"));
        assert_eq!(paths[2].attribute("opacity"), Some("0.5"));
    }

    #[test]
    fn test_serialize_roundtrip_is_stable() {
        let doc = SvgDocument::parse(ICON).unwrap();
        let markup = doc.to_markup();
        let reparsed = SvgDocument::parse(&markup).unwrap();
        assert_eq!(reparsed, doc);
        assert!(markup.contains("<!-- icon -->"));
        assert!(markup.starts_with("<?xml"));
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let doc = SvgDocument::parse(ICON).unwrap();
        let mut path = doc.elements_by_tag("path")[2].clone();
        path.set_attribute("fill", "white");
        path.set_attribute("stroke", "red");

        let names: Vec<_> = path.attributes().map(|(k, _)| k).collect();
        assert_eq!(names, ["d", "fill", "opacity", "stroke"]);
        assert_eq!(path.attribute("fill"), Some("white"));
    }

    #[test]
    fn test_with_attributes_leaves_original() {
        let doc = SvgDocument::parse(ICON).unwrap();
        let edited = doc
            .with_attributes("path", &ColorAttributes::new().set("fill", "white"))
            .unwrap();

        assert!(doc.elements_by_tag("path").iter().all(|p| p.attribute("fill") != Some("white")));
        assert!(edited.elements_by_tag("path").iter().all(|p| p.attribute("fill") == Some("white")));
        assert_eq!(edited.elements_by_tag("g")[0].attribute("fill"), None);
    }

    #[test]
    fn test_namespaced_tags_match_local_name() {
        let doc = SvgDocument::parse(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:path d="M0 0"/></svg:svg>"#,
        )
        .unwrap();
        assert_eq!(doc.count_elements("path"), 1);
        assert_eq!(doc.elements_by_tag("path")[0].name(), "svg:path");
    }

    #[test]
    fn test_escaping_preserved() {
        let doc = SvgDocument::parse(r#"<svg><title>A &amp; B</title><path data-x="a&lt;b"/></svg>"#).unwrap();
        assert_eq!(doc.elements_by_tag("path")[0].attribute("data-x"), Some("a<b"));

        let markup = doc.to_markup();
        assert!(markup.contains("A &amp; B"));
        assert!(markup.contains(r#"data-x="a&lt;b""#));
    }

    #[test]
    fn test_cdata_preserved() {
        let doc = SvgDocument::parse("<svg><style><![CDATA[path { fill: red; }]]></style></svg>").unwrap();
        assert!(doc.to_markup().contains("<![CDATA[path { fill: red; }]]>"));
    }

    #[test]
    fn test_bom_is_skipped() {
        let doc = SvgDocument::parse("\u{feff}<svg/>").unwrap();
        assert_eq!(doc.root().name(), "svg");
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "",
            "not markup",
            "<svg><path></svg>",
            "<svg><path/>",
            "<svg/><svg/>",
            "<svg/>trailing",
            "<html/>",
            "<svg a=\"1\" a=\"2\"/>",
            "</svg>",
        ];
        for case in cases {
            let result = SvgDocument::parse(case);
            assert!(
                matches!(result, Err(Error::MalformedMarkup { .. })),
                "expected malformed markup for {case:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_malformed_reports_position() {
        let err = SvgDocument::parse("<svg><g></path></svg>").unwrap_err();
        match err {
            Error::MalformedMarkup { position, .. } => assert!(position > 0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[derive(Debug)]
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_markup_reports_writer_errors() {
        let doc = SvgDocument::parse(r#"<svg><path d="M0 0"/></svg>"#).unwrap();

        let err = doc.write_markup(BrokenSink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let bytes = doc.write_markup(Vec::new()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), doc.to_markup());
    }
}
