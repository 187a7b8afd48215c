mod xml;

pub use xml::{parse_xml_element, Element};
