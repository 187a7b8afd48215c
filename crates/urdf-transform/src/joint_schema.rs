use tracing::debug;
use urdf_core::{EulerOrder, Joint, JointMotion, JointSchema, JointType, Limit, UrdfError};

use crate::math::euler_to_quaternion;

pub fn build_joint_schema(joints: &[Joint]) -> Result<Vec<JointSchema>, UrdfError> {
    joints.iter().map(joint_schema).collect()
}

fn joint_schema(joint: &Joint) -> Result<JointSchema, UrdfError> {
    let axis = joint.axis_or_default();
    let origin = joint.origin.clone().unwrap_or_default();
    let rotation = euler_to_quaternion(origin.rpy.unwrap_or_default(), EulerOrder::Zyx);

    let limit = match joint.limit {
        Some(_) if !joint.r#type.requires_limit() => {
            debug!(
                joint = %joint.name,
                kind = %joint.r#type,
                "ignoring limit on unbounded joint"
            );
            None
        }
        limit => limit,
    };

    let motion = match (joint.r#type, limit) {
        (JointType::Fixed, _) => JointMotion::Fixed,
        (JointType::Floating, _) => JointMotion::Floating,
        (JointType::Planar, _) => JointMotion::Planar,
        (JointType::Continuous, _) => JointMotion::Continuous {
            axis,
            offset: rotation,
        },
        (JointType::Revolute, Some(Limit { lower, upper })) => JointMotion::Revolute {
            axis,
            offset: rotation,
            lower,
            upper,
        },
        (JointType::Prismatic, Some(Limit { lower, upper })) => JointMotion::Prismatic {
            axis,
            offset: origin.xyz.unwrap_or_default(),
            lower,
            upper,
        },
        (JointType::Revolute | JointType::Prismatic, None) => {
            return Err(UrdfError::new(
                "URDF_JOINT_LIMIT_MISSING",
                format!("{} joint \"{}\" requires a limit", joint.r#type, joint.name),
            ))
        }
    };

    Ok(JointSchema {
        name: joint.name.clone(),
        motion,
    })
}
