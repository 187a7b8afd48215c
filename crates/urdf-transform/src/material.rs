use std::collections::BTreeMap;

use tracing::trace;
use urdf_core::{
    Color, KnownMaterial, Link, Material, ResolvedLink, ResolvedVisual, UrdfError, Visual,
};

pub const TEXTURE_PREFIX: &str = "_texture";

pub type TextureMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValue {
    Color(Color),
    Texture(String),
}

pub type MaterialTable = BTreeMap<String, MaterialValue>;

// Last declaration of a name wins.
pub fn material_lookup(materials: &[Material]) -> MaterialTable {
    let mut declared: BTreeMap<String, Option<MaterialValue>> = BTreeMap::new();
    for material in materials {
        let Some(name) = &material.name else {
            continue;
        };
        let value = match (material.color, &material.texture) {
            (Some(color), _) => Some(MaterialValue::Color(color)),
            (None, Some(url)) => Some(MaterialValue::Texture(url.clone())),
            (None, None) => None,
        };
        declared.insert(name.clone(), value);
    }
    declared
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
}

pub fn global_textures(table: &MaterialTable) -> TextureMap {
    table
        .iter()
        .filter_map(|(name, value)| match value {
            MaterialValue::Texture(url) => Some((name.clone(), url.clone())),
            MaterialValue::Color(_) => None,
        })
        .collect()
}

pub fn populate_material(
    links: &[Link],
    global: &MaterialTable,
) -> Result<(Vec<ResolvedLink>, TextureMap), UrdfError> {
    links.iter().try_fold(
        (Vec::with_capacity(links.len()), TextureMap::new()),
        |(mut resolved, texture), link| {
            let (visual, texture) = swap_material(&link.visual, global, texture)?;
            resolved.push(Link {
                name: link.name.clone(),
                r#type: link.r#type.clone(),
                visual,
                collision: link.collision.clone(),
            });
            Ok((resolved, texture))
        },
    )
}

fn swap_material(
    visuals: &[Visual],
    global: &MaterialTable,
    texture: TextureMap,
) -> Result<(Vec<ResolvedVisual>, TextureMap), UrdfError> {
    visuals.iter().try_fold(
        (Vec::with_capacity(visuals.len()), texture),
        |(mut resolved, texture), visual| {
            let (material, texture) = match visual.material.as_ref().filter(|m| !m.is_empty()) {
                None => (None, texture),
                Some(material) => {
                    let (known, texture) = resolve_material(material, global, texture)?;
                    (Some(known), texture)
                }
            };
            resolved.push(Visual {
                origin: visual.origin.clone(),
                geometry: visual.geometry.clone(),
                material,
            });
            Ok((resolved, texture))
        },
    )
}

// Inline color beats a name, a name beats an inline texture.
fn resolve_material(
    material: &Material,
    global: &MaterialTable,
    mut texture: TextureMap,
) -> Result<(KnownMaterial, TextureMap), UrdfError> {
    if let Some(color) = material.color {
        return Ok((KnownMaterial::Color(color), texture));
    }

    if let Some(name) = &material.name {
        let known = match global.get(name) {
            Some(MaterialValue::Color(color)) => KnownMaterial::Color(*color),
            Some(MaterialValue::Texture(_)) => KnownMaterial::Name(name.clone()),
            None => {
                return Err(UrdfError::new(
                    "URDF_MATERIAL_UNKNOWN",
                    format!("unknown material: {}", name),
                ))
            }
        };
        return Ok((known, texture));
    }

    let url = material.texture.clone().unwrap_or_default();
    let key = format!("{}{}", TEXTURE_PREFIX, texture.len());
    trace!(key = %key, url = %url, "synthesized texture key");
    texture.insert(key.clone(), url);
    Ok((KnownMaterial::Name(key), texture))
}
