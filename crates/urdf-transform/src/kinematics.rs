use std::collections::{BTreeMap, BTreeSet};

use urdf_core::{Joint, JointNode, LinkNode, ResolvedRobot, Robot, UrdfError};

use crate::scene::{make_mesh, origin_transform};
use crate::TransformOptions;

pub fn get_root_link<M>(robot: &Robot<M>) -> Result<String, UrdfError> {
    let child_links = robot
        .joint
        .iter()
        .map(|joint| joint.child.as_str())
        .collect::<BTreeSet<_>>();
    let roots = robot
        .link
        .iter()
        .map(|link| link.name.as_str())
        .filter(|name| !child_links.contains(name))
        .collect::<Vec<_>>();

    match roots.as_slice() {
        [root] => Ok((*root).to_string()),
        _ => Err(UrdfError::new(
            "URDF_ROOT_INVALID",
            format!(
                "URDF must have only one root, found {}: [{}]",
                roots.len(),
                roots.join(", ")
            ),
        )),
    }
}

pub fn assemble_tree(
    robot: &ResolvedRobot,
    root: &str,
    options: &TransformOptions,
) -> Result<LinkNode, UrdfError> {
    let mut meshes = robot
        .link
        .iter()
        .map(|link| {
            let meshes = link
                .visual
                .iter()
                .map(|visual| make_mesh(visual, options.rotation_precision))
                .collect::<Vec<_>>();
            (link.name.as_str(), meshes)
        })
        .collect::<BTreeMap<_, _>>();
    if !meshes.contains_key(root) {
        return Err(UrdfError::new(
            "URDF_LINK_UNKNOWN",
            format!("unknown root link \"{}\"", root),
        ));
    }

    let mut attached: BTreeMap<&str, Vec<&Joint>> = BTreeMap::new();
    let mut parent_joint: BTreeMap<&str, &str> = BTreeMap::new();
    for joint in &robot.joint {
        for link in [&joint.parent, &joint.child] {
            if !meshes.contains_key(link.as_str()) {
                return Err(UrdfError::new(
                    "URDF_LINK_UNKNOWN",
                    format!("joint \"{}\" references unknown link \"{}\"", joint.name, link),
                ));
            }
        }
        if let Some(previous) = parent_joint.insert(joint.child.as_str(), joint.name.as_str()) {
            return Err(UrdfError::new(
                "URDF_LINK_MULTIPARENT",
                format!(
                    "link \"{}\" is the child of both joint \"{}\" and joint \"{}\"",
                    joint.child, previous, joint.name
                ),
            ));
        }
        attached.entry(joint.parent.as_str()).or_default().push(joint);
    }

    // With one parent per link, reaching a link twice means a cycle.
    let mut order = Vec::with_capacity(meshes.len());
    let mut visited = BTreeSet::new();
    let mut pending = vec![root];
    while let Some(name) = pending.pop() {
        if !visited.insert(name) {
            return Err(cycle_error(&[name]));
        }
        order.push(name);
        if let Some(joints) = attached.get(name) {
            pending.extend(joints.iter().map(|joint| joint.child.as_str()));
        }
    }
    let detached = parent_joint
        .keys()
        .filter(|link| !visited.contains(*link))
        .copied()
        .collect::<Vec<_>>();
    if !detached.is_empty() {
        return Err(cycle_error(&detached));
    }

    // Children follow their parent in `order`, so walking it backwards
    // finishes every subtree before the link that owns it.
    let mut built: BTreeMap<&str, LinkNode> = BTreeMap::new();
    for &name in order.iter().rev() {
        let mut joints = Vec::new();
        for &joint in attached.get(name).map(Vec::as_slice).unwrap_or_default() {
            let child = built
                .remove(joint.child.as_str())
                .ok_or_else(|| cycle_error(&[joint.child.as_str()]))?;
            joints.push(JointNode {
                name: joint.name.clone(),
                transform: origin_transform(joint.origin.as_ref()),
                child,
            });
        }
        let node = LinkNode {
            name: name.to_string(),
            meshes: meshes.remove(name).unwrap_or_default(),
            joints,
        };
        built.insert(name, node);
    }

    built.remove(root).ok_or_else(|| cycle_error(&[root]))
}

fn cycle_error(links: &[&str]) -> UrdfError {
    UrdfError::new(
        "URDF_JOINT_CYCLE",
        format!("joints form a cycle through [{}]", links.join(", ")),
    )
}
