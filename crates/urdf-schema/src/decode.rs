use std::sync::OnceLock;

use regex::Regex;
use urdf_core::{JointType, Vector3, Vector4};

use crate::result::Extracted;

pub fn string(text: &str) -> Extracted<String> {
    Extracted::Success(text.to_string())
}

pub fn float(text: &str) -> Extracted<f64> {
    match parse_number(text) {
        Some(value) => Extracted::Success(value),
        None => Extracted::fail(format!("invalid number: \"{}\"", text)),
    }
}

pub fn vector3(text: &str) -> Extracted<Vector3> {
    match parse_numbers(text).as_deref() {
        Some(&[x, y, z]) => Extracted::Success([x, y, z]),
        _ => Extracted::fail(format!("invalid vector3: \"{}\"", text)),
    }
}

pub fn vector4(text: &str) -> Extracted<Vector4> {
    match parse_numbers(text).as_deref() {
        Some(&[x, y, z, w]) => Extracted::Success([x, y, z, w]),
        _ => Extracted::fail(format!("invalid vector4: \"{}\"", text)),
    }
}

pub fn joint_type(text: &str) -> Extracted<JointType> {
    match JointType::from_token(text) {
        Some(kind) => Extracted::Success(kind),
        None => Extracted::fail(format!("invalid joint type: \"{}\"", text)),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    whitespace_regex()
        .split(text.trim())
        .map(parse_number)
        .collect()
}

fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}
