mod decode;
mod extract;
mod format;
mod prune;
mod result;
pub mod schema;

use urdf_core::Robot;
use urdf_parser::Element;

pub use decode::{float, joint_type, string, vector3, vector4};
pub use extract::{
    attribute, child, children, combine, many, one, one_of, optional, tag, AttributeFields,
    BoxedExtractor, ChildGroups,
};
pub use format::format_errors;
pub use prune::{allowed_children, prune};
pub use result::{ErrorNode, Extracted};

pub fn extract_robot(element: &Element) -> Extracted<Robot> {
    schema::robot(&prune(element))
}
