use std::collections::BTreeMap;

use urdf_parser::Element;

use crate::result::{ErrorNode, Extracted};

pub type BoxedExtractor<T> = Box<dyn Fn(&Element) -> Extracted<T>>;

pub fn tag(expected: &'static str) -> impl Fn(&Element) -> Extracted<()> {
    move |element: &Element| {
        if element.tag == expected {
            Extracted::Success(())
        } else {
            Extracted::fail(format!(
                "expected tag: {}, received: {}",
                expected, element.tag
            ))
        }
    }
}

pub struct AttributeFields<'e> {
    element: &'e Element,
    errors: Vec<ErrorNode>,
}

impl<'e> AttributeFields<'e> {
    pub fn required<V>(
        &mut self,
        name: &str,
        decode: impl Fn(&str) -> Extracted<V>,
    ) -> Option<V> {
        let outcome = match self.element.attr(name) {
            Some(text) => decode(text),
            None => Extracted::fail("missing"),
        };
        self.record(name, outcome)
    }

    pub fn optional<V>(
        &mut self,
        name: &str,
        decode: impl Fn(&str) -> Extracted<V>,
    ) -> Option<Option<V>> {
        match self.element.attr(name) {
            None => Some(None),
            Some(text) => {
                let outcome = decode(text);
                self.record(name, outcome).map(Some)
            }
        }
    }

    fn record<V>(&mut self, name: &str, outcome: Extracted<V>) -> Option<V> {
        match outcome
            .within(|| format!("invalid attribute: \"{}\"", name))
            .into_result()
        {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }
}

pub fn attribute<T>(
    build: impl Fn(&mut AttributeFields<'_>) -> Option<T>,
) -> impl Fn(&Element) -> Extracted<T> {
    move |element: &Element| {
        let mut fields = AttributeFields {
            element,
            errors: Vec::new(),
        };
        let value = build(&mut fields);
        finish(&element.tag, "attributes", value, fields.errors)
    }
}

pub struct ChildGroups<'e> {
    parent: &'e str,
    groups: BTreeMap<&'e str, Vec<&'e Element>>,
    errors: Vec<ErrorNode>,
}

impl<'e> ChildGroups<'e> {
    fn new(element: &'e Element) -> Self {
        let mut groups: BTreeMap<&str, Vec<&Element>> = BTreeMap::new();
        for child in &element.children {
            groups.entry(child.tag.as_str()).or_default().push(child);
        }
        Self {
            parent: &element.tag,
            groups,
            errors: Vec::new(),
        }
    }

    pub fn extract<V>(
        &mut self,
        name: &str,
        extractor: impl Fn(&[&Element]) -> Extracted<V>,
    ) -> Option<V> {
        let elements: &[&Element] = self
            .groups
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let parent = self.parent;
        match extractor(elements)
            .within(|| format!("invalid {} children: {}", parent, name))
            .into_result()
        {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }
}

pub fn children<T>(
    build: impl Fn(&mut ChildGroups<'_>) -> Option<T>,
) -> impl Fn(&Element) -> Extracted<T> {
    move |element: &Element| {
        let mut groups = ChildGroups::new(element);
        let value = build(&mut groups);
        finish(&element.tag, "children", value, groups.errors)
    }
}

fn finish<T>(tag: &str, what: &str, value: Option<T>, errors: Vec<ErrorNode>) -> Extracted<T> {
    match value {
        Some(value) if errors.is_empty() => Extracted::Success(value),
        _ if !errors.is_empty() => Extracted::Failure(errors),
        _ => Extracted::fail(format!("incomplete {} {}", tag, what)),
    }
}

pub fn child<T>(inner: impl Fn(&Element) -> Extracted<T>) -> impl Fn(&Element) -> Extracted<T> {
    move |element: &Element| match element.children.as_slice() {
        [only] => inner(only),
        children => Extracted::fail(format!(
            "expected {} element to have single child, received: {}",
            element.tag,
            children.len()
        )),
    }
}

pub fn optional<T>(
    inner: impl Fn(&Element) -> Extracted<T>,
) -> impl Fn(&[&Element]) -> Extracted<Option<T>> {
    move |elements: &[&Element]| match elements {
        [] => Extracted::Success(None),
        [only] => inner(*only).map(Some),
        _ => Extracted::fail(format!(
            "expected elements to have length 0 or 1, received: {}",
            elements.len()
        )),
    }
}

pub fn one<T>(inner: impl Fn(&Element) -> Extracted<T>) -> impl Fn(&[&Element]) -> Extracted<T> {
    move |elements: &[&Element]| match elements {
        [only] => inner(*only),
        _ => Extracted::fail(format!(
            "expected elements to have length 1, received: {}",
            elements.len()
        )),
    }
}

// Stops at the first element that fails.
pub fn many<T>(
    inner: impl Fn(&Element) -> Extracted<T>,
) -> impl Fn(&[&Element]) -> Extracted<Vec<T>> {
    move |elements: &[&Element]| {
        let mut values = Vec::with_capacity(elements.len());
        for &element in elements {
            match inner(element) {
                Extracted::Success(value) => values.push(value),
                Extracted::Failure(errors) => return Extracted::Failure(errors),
            }
        }
        Extracted::Success(values)
    }
}

// On total failure, every alternative's errors are kept, one group each.
pub fn one_of<T>(alternatives: Vec<BoxedExtractor<T>>) -> impl Fn(&Element) -> Extracted<T> {
    move |element: &Element| {
        let mut errors = vec![ErrorNode::leaf("no match")];
        for alternative in &alternatives {
            match alternative(element) {
                Extracted::Success(value) => return Extracted::Success(value),
                Extracted::Failure(branch) => errors.push(ErrorNode::Group(branch)),
            }
        }
        Extracted::Failure(errors)
    }
}

pub fn combine<A, B, T>(
    first: impl Fn(&Element) -> Extracted<A>,
    second: impl Fn(&Element) -> Extracted<B>,
    merge: impl Fn(A, B) -> T,
) -> impl Fn(&Element) -> Extracted<T> {
    move |element: &Element| {
        first(element).and_then(|a| second(element).map(|b| merge(a, b)))
    }
}

#[cfg(test)]
mod extract_tests {
    use super::*;
    use crate::decode::{float, string};

    fn leaves<T: std::fmt::Debug>(outcome: Extracted<T>) -> Vec<String> {
        match outcome {
            Extracted::Failure(errors) => ErrorNode::leaves(&errors)
                .into_iter()
                .map(str::to_string)
                .collect(),
            Extracted::Success(value) => panic!("expected failure, got {:?}", value),
        }
    }

    #[test]
    fn tag_reports_expected_and_received() {
        let element = Element::new("sphere");
        assert_eq!(tag("sphere")(&element), Extracted::Success(()));
        assert_eq!(
            leaves(tag("box")(&element)),
            vec!["expected tag: box, received: sphere"]
        );
    }

    #[test]
    fn attribute_collects_every_failing_field() {
        let element = Element::new("limit").with_attr("upper", "high");
        let extractor = attribute(|fields| {
            let lower = fields.required("lower", float);
            let upper = fields.required("upper", float);
            Some((lower?, upper?))
        });
        let outcome = extractor(&element);
        assert_eq!(
            outcome,
            Extracted::Failure(vec![
                ErrorNode::leaf("invalid attribute: \"lower\""),
                ErrorNode::Group(vec![ErrorNode::leaf("missing")]),
                ErrorNode::leaf("invalid attribute: \"upper\""),
                ErrorNode::Group(vec![ErrorNode::leaf("invalid number: \"high\"")]),
            ])
        );
    }

    #[test]
    fn attribute_optional_absent_is_none_but_malformed_fails() {
        let extractor = attribute(|fields| fields.optional("radius", float));
        assert_eq!(extractor(&Element::new("x")), Extracted::Success(None));
        assert_eq!(
            extractor(&Element::new("x").with_attr("radius", "2")),
            Extracted::Success(Some(2.0))
        );
        assert!(!extractor(&Element::new("x").with_attr("radius", "r")).is_success());
    }

    #[test]
    fn children_groups_by_tag_and_feeds_empty_groups() {
        let element = Element::new("link")
            .with_child(Element::new("visual").with_attr("id", "a"))
            .with_child(Element::new("collision").with_attr("id", "c"))
            .with_child(Element::new("visual").with_attr("id", "b"));
        let id = |element: &Element| attribute(|fields| fields.required("id", string))(element);
        let extractor = children(|groups| {
            let visual = groups.extract("visual", many(id));
            let inertial = groups.extract("inertial", optional(id));
            Some((visual?, inertial?))
        });
        assert_eq!(
            extractor(&element),
            Extracted::Success((vec!["a".to_string(), "b".to_string()], None))
        );
    }

    #[test]
    fn children_prefixes_failures_with_parent_and_group() {
        let element = Element::new("joint");
        let extractor = children(|groups| groups.extract("parent", one(tag("parent"))));
        assert_eq!(
            leaves(extractor(&element)),
            vec![
                "invalid joint children: parent",
                "expected elements to have length 1, received: 0",
            ]
        );
    }

    #[test]
    fn child_requires_exactly_one_child() {
        let empty = Element::new("geometry");
        let two = Element::new("geometry")
            .with_child(Element::new("box"))
            .with_child(Element::new("sphere"));
        assert_eq!(
            leaves(child(tag("box"))(&empty)),
            vec!["expected geometry element to have single child, received: 0"]
        );
        assert_eq!(
            leaves(child(tag("box"))(&two)),
            vec!["expected geometry element to have single child, received: 2"]
        );
        let single = Element::new("geometry").with_child(Element::new("box"));
        assert!(child(tag("box"))(&single).is_success());
    }

    #[test]
    fn optional_accepts_zero_or_one() {
        let origin = Element::new("origin");
        let extractor = optional(tag("origin"));
        assert_eq!(extractor(&[]), Extracted::Success(None));
        assert_eq!(extractor(&[&origin]), Extracted::Success(Some(())));
        assert_eq!(
            leaves(extractor(&[&origin, &origin])),
            vec!["expected elements to have length 0 or 1, received: 2"]
        );
    }

    #[test]
    fn many_stops_at_first_failure() {
        let good = Element::new("link");
        let bad_a = Element::new("joint");
        let bad_b = Element::new("material");
        let outcome = many(tag("link"))(&[&good, &bad_a, &bad_b]);
        assert_eq!(
            leaves(outcome),
            vec!["expected tag: link, received: joint"]
        );
        assert_eq!(many(tag("link"))(&[]), Extracted::Success(Vec::new()));
    }

    #[test]
    fn one_of_returns_first_success() {
        let element = Element::new("b");
        let alternatives: Vec<BoxedExtractor<char>> = vec![
            Box::new(|element: &Element| tag("a")(element).map(|_| 'a')),
            Box::new(|element: &Element| tag("b")(element).map(|_| 'b')),
            Box::new(|_: &Element| Extracted::Success('c')),
        ];
        let extractor = one_of(alternatives);
        assert_eq!(extractor(&element), Extracted::Success('b'));
    }

    #[test]
    fn one_of_keeps_every_branch_failure() {
        let element = Element::new("capsule");
        let alternatives: Vec<BoxedExtractor<()>> = vec![
            Box::new(|element: &Element| tag("box")(element)),
            Box::new(|element: &Element| tag("sphere")(element)),
        ];
        let extractor = one_of(alternatives);
        assert_eq!(
            extractor(&element),
            Extracted::Failure(vec![
                ErrorNode::leaf("no match"),
                ErrorNode::Group(vec![ErrorNode::leaf(
                    "expected tag: box, received: capsule"
                )]),
                ErrorNode::Group(vec![ErrorNode::leaf(
                    "expected tag: sphere, received: capsule"
                )]),
            ])
        );
    }

    #[test]
    fn combine_short_circuits_on_first_extractor() {
        let element = Element::new("sphere");
        let extractor = combine(
            tag("box"),
            attribute(|fields| fields.required("size", string)),
            |(), size| size,
        );
        assert_eq!(
            leaves(extractor(&element)),
            vec!["expected tag: box, received: sphere"]
        );
    }

    #[test]
    fn combine_merges_both_records() {
        let element = Element::new("sphere").with_attr("radius", "0.5");
        let extractor = combine(
            tag("sphere"),
            attribute(|fields| fields.required("radius", float)),
            |(), radius| radius,
        );
        assert_eq!(extractor(&element), Extracted::Success(0.5));
    }
}
