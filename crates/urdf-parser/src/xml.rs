use std::collections::BTreeMap;

use roxmltree::{Document, Node};
use urdf_core::UrdfError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrib: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrib: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrib.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrib.get(name).map(String::as_str)
    }
}

pub fn parse_xml_element(source: &str) -> Result<Element, UrdfError> {
    let document = Document::parse(source)
        .map_err(|error| UrdfError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(UrdfError::new(
            "XML_PARSE_ERROR",
            "XML document must contain a root element.",
        ));
    };

    Ok(convert(root))
}

// Text, comments and processing instructions carry nothing in this dialect.
fn convert(node: Node<'_, '_>) -> Element {
    let attrib = node
        .attributes()
        .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
        .collect();

    let children = node
        .children()
        .filter(|child| child.is_element())
        .map(convert)
        .collect();

    Element {
        tag: node.tag_name().name().to_string(),
        attrib,
        children,
    }
}
