use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Color, KnownMaterial, ResolvedRobot, Vector3};

pub const DEFAULT_MATERIAL: KnownMaterial = KnownMaterial::Color(WHITE);

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EulerOrder {
    Xyz,
    Zyx,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angles: Vector3,
    pub order: EulerOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MeshKind {
    Box {
        size: Vector3,
    },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        length: f64,
    },
    Sphere {
        radius: f64,
    },
    StlModel {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<Vector3>,
    },
    ColladaModel {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<Vector3>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    pub kind: MeshKind,
    pub transform: Transform,
    // None for Collada models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<KnownMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointNode {
    pub name: String,
    pub transform: Transform,
    pub child: LinkNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkNode {
    pub name: String,
    pub meshes: Vec<MeshNode>,
    pub joints: Vec<JointNode>,
}

impl LinkNode {
    // Depth first, starting with this node.
    pub fn link_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            names.push(node.name.as_str());
            pending.extend(node.joints.iter().rev().map(|joint| &joint.child));
        }
        names
    }
}

// Long chains would otherwise overflow the stack in the generated drop glue.
impl Drop for LinkNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.joints);
        while let Some(mut joint) = pending.pop() {
            pending.append(&mut joint.child.joints);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JointMotion {
    Fixed,
    Floating,
    Planar,
    Continuous {
        axis: Vector3,
        offset: Quaternion,
    },
    Revolute {
        axis: Vector3,
        offset: Quaternion,
        lower: f64,
        upper: f64,
    },
    Prismatic {
        axis: Vector3,
        offset: Vector3,
        lower: f64,
        upper: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSchema {
    pub name: String,
    #[serde(flatten)]
    pub motion: JointMotion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedRobot {
    pub robot: ResolvedRobot,
    pub texture: BTreeMap<String, String>,
    pub root_link: String,
    pub tree: LinkNode,
    pub joint_schema: Vec<JointSchema>,
}
