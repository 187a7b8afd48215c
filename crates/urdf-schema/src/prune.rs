use urdf_parser::Element;

// Only a subset of URDF is processed; see http://wiki.ros.org/urdf/XML.
const CHILD_ELEMENTS: &[(&str, &[&str])] = &[
    ("robot", &["link", "joint", "material"]),
    ("link", &["visual", "collision"]),
    ("joint", &["origin", "parent", "child", "axis", "limit"]),
    ("visual", &["origin", "geometry", "material"]),
    ("collision", &["origin", "geometry"]),
    ("geometry", &["box", "cylinder", "sphere", "mesh"]),
    ("material", &["color", "texture"]),
];

pub fn allowed_children(tag: &str) -> &'static [&'static str] {
    CHILD_ELEMENTS
        .iter()
        .find(|(parent, _)| *parent == tag)
        .map(|(_, allowed)| *allowed)
        .unwrap_or_default()
}

pub fn prune(element: &Element) -> Element {
    let allowed = allowed_children(&element.tag);
    Element {
        tag: element.tag.clone(),
        attrib: element.attrib.clone(),
        children: element
            .children
            .iter()
            .filter(|child| allowed.contains(&child.tag.as_str()))
            .map(prune)
            .collect(),
    }
}
