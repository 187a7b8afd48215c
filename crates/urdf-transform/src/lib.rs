mod joint_schema;
mod kinematics;
mod material;
mod math;
mod scene;

use tracing::debug;
use urdf_core::{ResolvedRobot, Robot, TransformedRobot, UrdfError};

pub use joint_schema::build_joint_schema;
pub use kinematics::{assemble_tree, get_root_link};
pub use material::{
    global_textures, material_lookup, populate_material, MaterialTable, MaterialValue, TextureMap,
    TEXTURE_PREFIX,
};
pub use math::{
    clamp, euler_to_quaternion, quaternion_multiply, quaternion_to_euler, round,
    GIMBAL_LOCK_THRESHOLD,
};
pub use scene::{cylinder_rotation, make_mesh, origin_transform, resolve_url};

pub const DEFAULT_ROTATION_PRECISION: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub rotation_precision: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            rotation_precision: DEFAULT_ROTATION_PRECISION,
        }
    }
}

pub fn transform(
    robot: &Robot,
    options: &TransformOptions,
) -> Result<TransformedRobot, UrdfError> {
    let table = material_lookup(&robot.material);
    let mut texture = global_textures(&table);
    let (link, inline_texture) = populate_material(&robot.link, &table)?;
    debug!(
        robot = %robot.name,
        materials = table.len(),
        global_textures = texture.len(),
        inline_textures = inline_texture.len(),
        "resolved materials"
    );
    texture.extend(inline_texture);

    let resolved = ResolvedRobot {
        name: robot.name.clone(),
        link,
        joint: robot.joint.clone(),
        material: robot.material.clone(),
    };

    let root_link = get_root_link(&resolved)?;
    let tree = assemble_tree(&resolved, &root_link, options)?;
    let joint_schema = build_joint_schema(&resolved.joint)?;
    debug!(
        robot = %resolved.name,
        root = %root_link,
        links = resolved.link.len(),
        joints = joint_schema.len(),
        "assembled kinematic tree"
    );

    Ok(TransformedRobot {
        robot: resolved,
        texture,
        root_link,
        tree,
        joint_schema,
    })
}
