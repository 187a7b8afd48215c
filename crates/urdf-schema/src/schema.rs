use urdf_core::{
    Collision, Color, Geometry, Joint, Limit, Link, Material, Origin, Robot, Vector3, Visual,
};
use urdf_parser::Element;

use crate::decode::{float, joint_type, string, vector3, vector4};
use crate::extract::{
    attribute, child, children, combine, many, one, one_of, optional, tag, BoxedExtractor,
};
use crate::result::Extracted;

pub fn origin(element: &Element) -> Extracted<Origin> {
    attribute(|fields| {
        let xyz = fields.optional("xyz", vector3);
        let rpy = fields.optional("rpy", vector3);
        Some(Origin { xyz: xyz?, rpy: rpy? })
    })(element)
}

fn axis(element: &Element) -> Extracted<Vector3> {
    attribute(|fields| fields.required("xyz", vector3))(element)
}

fn limit(element: &Element) -> Extracted<Limit> {
    attribute(|fields| {
        let lower = fields.required("lower", float);
        let upper = fields.required("upper", float);
        Some(Limit {
            lower: lower?,
            upper: upper?,
        })
    })(element)
}

fn link_ref(element: &Element) -> Extracted<String> {
    attribute(|fields| fields.required("link", string))(element)
}

pub fn joint(element: &Element) -> Extracted<Joint> {
    combine(
        attribute(|fields| {
            let name = fields.required("name", string);
            let kind = fields.required("type", joint_type);
            Some((name?, kind?))
        }),
        children(|groups| {
            let origin = groups.extract("origin", optional(origin));
            let parent = groups.extract("parent", one(link_ref));
            let child = groups.extract("child", one(link_ref));
            let axis = groups.extract("axis", optional(axis));
            let limit = groups.extract("limit", optional(limit));
            Some((origin?, parent?, child?, axis?, limit?))
        }),
        |(name, r#type), (origin, parent, child, axis, limit)| Joint {
            name,
            r#type,
            origin,
            parent,
            child,
            axis,
            limit,
        },
    )(element)
}

fn color(element: &Element) -> Extracted<Color> {
    attribute(|fields| fields.required("rgba", vector4))(element)
}

fn texture(element: &Element) -> Extracted<String> {
    attribute(|fields| fields.required("filename", string))(element)
}

pub fn material(element: &Element) -> Extracted<Material> {
    combine(
        attribute(|fields| fields.optional("name", string)),
        children(|groups| {
            let color = groups.extract("color", optional(color));
            let texture = groups.extract("texture", optional(texture));
            Some((color?, texture?))
        }),
        |name, (color, texture)| Material {
            name,
            color,
            texture,
        },
    )(element)
}

fn box_geometry(element: &Element) -> Extracted<Geometry> {
    combine(
        tag("box"),
        attribute(|fields| fields.required("size", vector3)),
        |(), size| Geometry::Box { size },
    )(element)
}

fn cylinder_geometry(element: &Element) -> Extracted<Geometry> {
    combine(
        tag("cylinder"),
        attribute(|fields| {
            let radius = fields.required("radius", float);
            let length = fields.required("length", float);
            Some((radius?, length?))
        }),
        |(), (radius, length)| Geometry::Cylinder { radius, length },
    )(element)
}

fn sphere_geometry(element: &Element) -> Extracted<Geometry> {
    combine(
        tag("sphere"),
        attribute(|fields| fields.required("radius", float)),
        |(), radius| Geometry::Sphere { radius },
    )(element)
}

fn mesh_geometry(element: &Element) -> Extracted<Geometry> {
    combine(
        tag("mesh"),
        attribute(|fields| {
            let filename = fields.required("filename", string);
            let scale = fields.optional("scale", vector3);
            Some((filename?, scale?))
        }),
        |(), (filename, scale)| Geometry::Mesh { filename, scale },
    )(element)
}

pub fn geometry(element: &Element) -> Extracted<Geometry> {
    let alternatives: Vec<BoxedExtractor<Geometry>> = vec![
        Box::new(box_geometry),
        Box::new(cylinder_geometry),
        Box::new(sphere_geometry),
        Box::new(mesh_geometry),
    ];
    child(one_of(alternatives))(element)
}

pub fn visual(element: &Element) -> Extracted<Visual> {
    children(|groups| {
        let origin = groups.extract("origin", optional(origin));
        let geometry = groups.extract("geometry", one(geometry));
        let material = groups.extract("material", optional(material));
        Some(Visual {
            origin: origin?,
            geometry: geometry?,
            material: material?,
        })
    })(element)
}

pub fn collision(element: &Element) -> Extracted<Collision> {
    children(|groups| {
        let origin = groups.extract("origin", optional(origin));
        let geometry = groups.extract("geometry", one(geometry));
        Some(Collision {
            origin: origin?,
            geometry: geometry?,
        })
    })(element)
}

pub fn link(element: &Element) -> Extracted<Link> {
    combine(
        attribute(|fields| {
            let name = fields.required("name", string);
            let kind = fields.optional("type", string);
            Some((name?, kind?))
        }),
        children(|groups| {
            let visual = groups.extract("visual", many(visual));
            let collision = groups.extract("collision", many(collision));
            Some((visual?, collision?))
        }),
        |(name, r#type), (visual, collision)| Link {
            name,
            r#type,
            visual,
            collision,
        },
    )(element)
}

pub fn robot(element: &Element) -> Extracted<Robot> {
    combine(
        tag("robot"),
        combine(
            attribute(|fields| fields.required("name", string)),
            children(|groups| {
                let link = groups.extract("link", many(link));
                let joint = groups.extract("joint", many(joint));
                let material = groups.extract("material", many(material));
                Some((link?, joint?, material?))
            }),
            |name, (link, joint, material)| Robot {
                name,
                link,
                joint,
                material,
            },
        ),
        |(), robot| robot,
    )(element)
}
