use std::fmt;

use serde::{Deserialize, Serialize};

pub type Vector3 = [f64; 3];
pub type Vector4 = [f64; 4];
pub type Color = Vector4;

pub const DEFAULT_AXIS: Vector3 = [1.0, 0.0, 0.0];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xyz: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpy: Option<Vector3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
    Floating,
    Planar,
}

impl JointType {
    pub const ALL: [JointType; 6] = [
        JointType::Revolute,
        JointType::Continuous,
        JointType::Prismatic,
        JointType::Fixed,
        JointType::Floating,
        JointType::Planar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JointType::Revolute => "revolute",
            JointType::Continuous => "continuous",
            JointType::Prismatic => "prismatic",
            JointType::Fixed => "fixed",
            JointType::Floating => "floating",
            JointType::Planar => "planar",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }

    pub fn requires_limit(self) -> bool {
        matches!(self, JointType::Revolute | JointType::Prismatic)
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub name: String,
    pub r#type: JointType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    pub parent: String,
    pub child: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl Joint {
    pub fn axis_or_default(&self) -> Vector3 {
        self.axis.unwrap_or(DEFAULT_AXIS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

impl Material {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.texture.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KnownMaterial {
    Name(String),
    Color(Color),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    Box {
        size: Vector3,
    },
    Cylinder {
        radius: f64,
        length: f64,
    },
    Sphere {
        radius: f64,
    },
    Mesh {
        filename: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<Vector3>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual<M = Material> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    pub geometry: Geometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<M>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link<M = Material> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    pub visual: Vec<Visual<M>>,
    pub collision: Vec<Collision>,
}

// `M` is `Material` straight from the schema, `KnownMaterial` once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot<M = Material> {
    pub name: String,
    pub link: Vec<Link<M>>,
    pub joint: Vec<Joint>,
    pub material: Vec<Material>,
}

pub type ResolvedVisual = Visual<KnownMaterial>;
pub type ResolvedLink = Link<KnownMaterial>;
pub type ResolvedRobot = Robot<KnownMaterial>;
