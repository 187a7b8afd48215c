use std::f64::consts::FRAC_PI_2;
use std::sync::OnceLock;

use regex::Regex;
use urdf_core::{
    EulerOrder, Geometry, MeshKind, MeshNode, Origin, ResolvedVisual, Rotation, Transform,
    Vector3, DEFAULT_MATERIAL,
};

use crate::math::{euler_to_quaternion, quaternion_multiply, quaternion_to_euler, round};

// URDF cylinders run along Z, renderer cylinders along Y.
const CYLINDER_ALIGNMENT: Vector3 = [FRAC_PI_2, 0.0, 0.0];

pub fn origin_transform(origin: Option<&Origin>) -> Transform {
    let Some(origin) = origin else {
        return Transform::default();
    };
    Transform {
        position: origin.xyz,
        rotation: origin.rpy.map(|angles| Rotation {
            angles,
            order: EulerOrder::Zyx,
        }),
    }
}

pub fn cylinder_rotation(rpy: Option<Vector3>, precision: u32) -> Rotation {
    let quaternion = quaternion_multiply(
        euler_to_quaternion(rpy.unwrap_or_default(), EulerOrder::Zyx),
        euler_to_quaternion(CYLINDER_ALIGNMENT, EulerOrder::Xyz),
    );
    let angles =
        quaternion_to_euler(quaternion, EulerOrder::Xyz).map(|angle| round(angle, precision));
    Rotation {
        angles,
        order: EulerOrder::Xyz,
    }
}

pub fn resolve_url(filename: &str) -> String {
    package_regex().replace(filename, "").into_owned()
}

pub fn make_mesh(visual: &ResolvedVisual, precision: u32) -> MeshNode {
    let origin = visual.origin.as_ref();
    let material = visual.material.clone().unwrap_or(DEFAULT_MATERIAL);

    match &visual.geometry {
        Geometry::Box { size } => MeshNode {
            kind: MeshKind::Box { size: *size },
            transform: origin_transform(origin),
            material: Some(material),
        },
        Geometry::Cylinder { radius, length } => MeshNode {
            kind: MeshKind::Cylinder {
                radius_top: *radius,
                radius_bottom: *radius,
                length: *length,
            },
            transform: Transform {
                position: origin.and_then(|origin| origin.xyz),
                rotation: Some(cylinder_rotation(
                    origin.and_then(|origin| origin.rpy),
                    precision,
                )),
            },
            material: Some(material),
        },
        Geometry::Sphere { radius } => MeshNode {
            kind: MeshKind::Sphere { radius: *radius },
            transform: origin_transform(origin),
            material: Some(material),
        },
        Geometry::Mesh { filename, scale } => {
            let url = resolve_url(filename);
            if filename.ends_with(".dae") {
                MeshNode {
                    kind: MeshKind::ColladaModel { url, scale: *scale },
                    transform: origin_transform(origin),
                    material: None,
                }
            } else {
                MeshNode {
                    kind: MeshKind::StlModel { url, scale: *scale },
                    transform: origin_transform(origin),
                    material: Some(material),
                }
            }
        }
    }
}

fn package_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^package:/").expect("package url regex"))
}
