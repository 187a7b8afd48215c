use tracing::debug;
use urdf_core::{Robot, TransformedRobot, UrdfError};
use urdf_parser::{parse_xml_element, Element};
use urdf_schema::{extract_robot, format_errors, Extracted};
use urdf_transform::transform;

pub use urdf_transform::TransformOptions;

pub fn parse_urdf(source: &str) -> Result<Robot, UrdfError> {
    let element = parse_xml_element(source)?;
    debug!(
        root = %element.tag,
        children = element.children.len(),
        "parsed xml"
    );
    parse_urdf_element(&element)
}

pub fn parse_urdf_element(element: &Element) -> Result<Robot, UrdfError> {
    match extract_robot(element) {
        Extracted::Success(robot) => {
            debug!(
                robot = %robot.name,
                links = robot.link.len(),
                joints = robot.joint.len(),
                materials = robot.material.len(),
                "extracted robot"
            );
            Ok(robot)
        }
        Extracted::Failure(errors) => Err(UrdfError::new(
            "URDF_SCHEMA_INVALID",
            format_errors(&errors),
        )),
    }
}

pub fn transform_robot(robot: &Robot) -> Result<TransformedRobot, UrdfError> {
    transform(robot, &TransformOptions::default())
}

pub fn convert_urdf(
    source: &str,
    options: &TransformOptions,
) -> Result<TransformedRobot, UrdfError> {
    let robot = parse_urdf(source)?;
    transform(&robot, options)
}

pub fn export_json(robot: &TransformedRobot) -> Result<String, UrdfError> {
    serde_json::to_string_pretty(robot)
        .map_err(|error| UrdfError::new("URDF_EXPORT_ERROR", error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use urdf_core::{Geometry, JointType, Link};

    #[test]
    fn parse_urdf_accepts_single_link_robot() {
        let robot = parse_urdf(r#"<robot name="solo"><link name="base"/></robot>"#)
            .expect("parse should pass");
        assert_eq!(
            robot,
            Robot {
                name: "solo".to_string(),
                link: vec![Link {
                    name: "base".to_string(),
                    r#type: None,
                    visual: Vec::new(),
                    collision: Vec::new(),
                }],
                joint: Vec::new(),
                material: Vec::new(),
            }
        );
        let transformed = transform_robot(&robot).expect("transform should pass");
        assert_eq!(transformed.root_link, "base");
        assert!(transformed.tree.joints.is_empty());
    }

    #[test]
    fn parse_urdf_reports_malformed_xml() {
        let error = parse_urdf("<robot name=\"x\">").expect_err("unclosed tag should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }

    #[test]
    fn parse_urdf_reports_wrong_root_tag() {
        let error = parse_urdf(r#"<model name="x"/>"#).expect_err("wrong root should fail");
        assert_eq!(error.code, "URDF_SCHEMA_INVALID");
        assert!(error.message.contains("expected tag: robot, received: model"));
    }

    #[test]
    fn missing_joint_type_names_joint_and_attribute() {
        let source = r#"
            <robot name="r">
              <link name="a"/>
              <link name="b"/>
              <joint name="j">
                <parent link="a"/>
                <child link="b"/>
              </joint>
            </robot>"#;
        let error = parse_urdf(source).expect_err("missing type should fail");
        assert_eq!(error.code, "URDF_SCHEMA_INVALID");
        assert!(error.message.contains("joint"));
        assert!(error.message.contains("invalid attribute: \"type\""));
        assert!(error.message.contains("missing"));
    }

    #[test]
    fn geometry_failure_lists_every_alternative() {
        let source = r#"
            <robot name="r">
              <link name="a">
                <visual><geometry><box/></geometry></visual>
              </link>
            </robot>"#;
        let error = parse_urdf(source).expect_err("box without size should fail");
        let message = error.message;
        assert!(message.contains("no match"));
        assert!(message.contains("invalid attribute: \"size\""));
        assert!(message.contains("expected tag: cylinder, received: box"));
        assert!(message.contains("expected tag: sphere, received: box"));
        assert!(message.contains("expected tag: mesh, received: box"));
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let source = r#"
            <robot name="r">
              <gazebo reference="a"/>
              <link name="a">
                <inertial><mass value="1"/></inertial>
                <visual>
                  <geometry><sphere radius="0.5"/></geometry>
                </visual>
              </link>
            </robot>"#;
        let robot = parse_urdf(source).expect("foreign elements should be pruned");
        assert_eq!(
            robot.link[0].visual[0].geometry,
            Geometry::Sphere { radius: 0.5 }
        );
    }

    #[test]
    fn convert_urdf_honours_rotation_precision() {
        let source = r#"
            <robot name="r">
              <link name="a">
                <visual><geometry><cylinder radius="1" length="2"/></geometry></visual>
              </link>
            </robot>"#;
        let transformed = convert_urdf(
            source,
            &TransformOptions {
                rotation_precision: 2,
            },
        )
        .expect("convert should pass");
        let rotation = transformed.tree.meshes[0]
            .transform
            .rotation
            .expect("cylinder rotation");
        assert_eq!(rotation.angles, [1.57, 0.0, 0.0]);
    }

    #[test]
    fn convert_urdf_with_excessive_precision_keeps_finite_angles() {
        let source = r#"
            <robot name="r">
              <link name="a">
                <visual><geometry><cylinder radius="1" length="2"/></geometry></visual>
              </link>
            </robot>"#;
        let transformed = convert_urdf(
            source,
            &TransformOptions {
                rotation_precision: 400,
            },
        )
        .expect("convert should pass");
        let angles = transformed.tree.meshes[0]
            .transform
            .rotation
            .expect("cylinder rotation")
            .angles;
        assert!(angles.iter().all(|angle| angle.is_finite()), "{:?}", angles);
        assert!((angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn convert_urdf_rejects_unknown_material() {
        let source = r#"
            <robot name="r">
              <link name="a">
                <visual>
                  <geometry><sphere radius="1"/></geometry>
                  <material name="X"/>
                </visual>
              </link>
            </robot>"#;
        let error =
            convert_urdf(source, &TransformOptions::default()).expect_err("unknown material");
        assert_eq!(error.code, "URDF_MATERIAL_UNKNOWN");
        assert_eq!(error.message, "unknown material: X");
    }

    #[test]
    fn export_json_uses_lowercase_wire_names() {
        let source = r#"
            <robot name="r">
              <link name="a"/>
              <link name="b"/>
              <joint name="j" type="continuous">
                <parent link="a"/>
                <child link="b"/>
              </joint>
            </robot>"#;
        let transformed =
            convert_urdf(source, &TransformOptions::default()).expect("convert should pass");
        assert_eq!(transformed.robot.joint[0].r#type, JointType::Continuous);
        let json = export_json(&transformed).expect("export should pass");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["root_link"], "a");
        assert_eq!(value["robot"]["joint"][0]["type"], "continuous");
        assert_eq!(value["joint_schema"][0]["type"], "continuous");
        assert_eq!(value["joint_schema"][0]["name"], "j");
    }
}
