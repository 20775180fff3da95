//! glTF 2.0 document construction for glyph models
//!
//! One mesh with one triangle primitive. Attributes: `POSITION`, `NORMAL`,
//! plus `COLOR_0` and the raw `_SCALAR` values when the model is colormapped.
//! A fixed color goes into the material's `baseColorFactor` instead. The
//! coloring directive itself is recorded in the mesh `extras`.

use crate::error::IoError;
use base64::Engine;
use glyphview_core::{Color, ColoringDirective, Drawable, GlyphModel};
use serde_json::{json, Value};

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Name written to `asset.generator`
pub const GENERATOR: &str = concat!("glyphview ", env!("CARGO_PKG_VERSION"));

/// A glTF JSON document and the bytes of its single buffer
#[derive(Debug, Clone)]
pub struct GltfParts {
    pub json: Value,
    pub bin: Vec<u8>,
}

/// Where the buffer bytes live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferStorage {
    /// Base64 data URI inside the JSON
    Embedded,
    /// Separate GLB BIN chunk
    BinaryChunk,
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for &f in data {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    bytes
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for &v in data {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Collects buffer views and accessors over one growing binary buffer
struct BufferBuilder {
    bin: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
}

impl BufferBuilder {
    fn new() -> Self {
        Self {
            bin: Vec::new(),
            views: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Append `bytes` as a new buffer view and describe it with an accessor.
    /// Returns the accessor index.
    fn push(&mut self, bytes: Vec<u8>, target: u32, mut accessor: Value) -> usize {
        let offset = self.bin.len();
        let length = bytes.len();
        self.bin.extend_from_slice(&bytes);
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }

        self.views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": length,
            "target": target
        }));
        accessor["bufferView"] = json!(self.views.len() - 1);
        accessor["byteOffset"] = json!(0);
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }
}

fn coloring_extras(coloring: &ColoringDirective) -> Value {
    match coloring {
        ColoringDirective::Fixed(color) => json!({
            "mode": "fixed",
            "color": color.to_hex()
        }),
        ColoringDirective::Mapped {
            colormap,
            low,
            high,
        } => json!({
            "mode": "mapped",
            "colormap": colormap.name,
            "clim": [low, high]
        }),
    }
}

fn material(coloring: &ColoringDirective) -> Value {
    let base = match coloring {
        ColoringDirective::Fixed(color) => color.to_linear(),
        ColoringDirective::Mapped { .. } => Color::rgb(1.0, 1.0, 1.0),
    };
    json!({
        "name": "glyphs",
        "pbrMetallicRoughness": {
            "baseColorFactor": base.to_array(),
            "metallicFactor": 0.0,
            "roughnessFactor": 1.0
        }
    })
}

/// Build the glTF document for `model`
pub fn build_document(model: &GlyphModel, storage: BufferStorage) -> Result<GltfParts, IoError> {
    let mesh = &model.mesh;
    let extras = json!({
        "label": model.label,
        "glyphs": mesh.glyph_count(),
        "pointsPerGlyph": mesh.points_per_glyph,
        "baseRadius": mesh.base_radius,
        "coloring": coloring_extras(&model.coloring)
    });

    let mut root = json!({
        "asset": {
            "version": "2.0",
            "generator": GENERATOR
        },
        "scene": 0,
        "materials": [material(&model.coloring)]
    });

    if mesh.is_empty() {
        root["scenes"] = json!([{ "name": model.label, "nodes": [], "extras": extras }]);
        return Ok(GltfParts {
            json: root,
            bin: Vec::new(),
        });
    }

    let mut buffer = BufferBuilder::new();
    let mut attributes = serde_json::Map::new();

    let (min, max) = mesh.bounding_box();
    let positions: &[f32] = bytemuck::cast_slice(&mesh.vertices);
    let position = buffer.push(
        floats_to_bytes(positions),
        ARRAY_BUFFER,
        json!({
            "componentType": FLOAT,
            "count": mesh.vertex_count(),
            "type": "VEC3",
            "min": [min.x, min.y, min.z],
            "max": [max.x, max.y, max.z]
        }),
    );
    attributes.insert("POSITION".into(), json!(position));

    let normals: &[f32] = bytemuck::cast_slice(&mesh.normals);
    let normal = buffer.push(
        floats_to_bytes(normals),
        ARRAY_BUFFER,
        json!({
            "componentType": FLOAT,
            "count": mesh.normals.len(),
            "type": "VEC3"
        }),
    );
    attributes.insert("NORMAL".into(), json!(normal));

    if let (ColoringDirective::Mapped { colormap, low, high }, Some(scalars)) =
        (&model.coloring, &mesh.scalars)
    {
        let colors: Vec<Color> = scalars
            .iter()
            .map(|&s| colormap.map_value(s as f64, *low, *high).to_linear())
            .collect();
        let color = buffer.push(
            floats_to_bytes(bytemuck::cast_slice(&colors)),
            ARRAY_BUFFER,
            json!({
                "componentType": FLOAT,
                "count": colors.len(),
                "type": "VEC4"
            }),
        );
        attributes.insert("COLOR_0".into(), json!(color));

        let scalar = buffer.push(
            floats_to_bytes(scalars),
            ARRAY_BUFFER,
            json!({
                "componentType": FLOAT,
                "count": scalars.len(),
                "type": "SCALAR"
            }),
        );
        attributes.insert("_SCALAR".into(), json!(scalar));
    }

    let indices = mesh
        .faces
        .iter()
        .flatten()
        .map(|&i| u32::try_from(i))
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| IoError::Encode {
            message: format!("{} vertices exceed 32-bit indices", mesh.vertex_count()),
        })?;
    let index = buffer.push(
        u32s_to_bytes(&indices),
        ELEMENT_ARRAY_BUFFER,
        json!({
            "componentType": UNSIGNED_INT,
            "count": indices.len(),
            "type": "SCALAR"
        }),
    );

    let mut gltf_buffer = json!({ "byteLength": buffer.bin.len() });
    if storage == BufferStorage::Embedded {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer.bin);
        gltf_buffer["uri"] = json!(format!("data:application/octet-stream;base64,{}", encoded));
    }

    root["scenes"] = json!([{ "name": model.label, "nodes": [0] }]);
    root["nodes"] = json!([{ "name": model.label, "mesh": 0 }]);
    root["meshes"] = json!([{
        "name": model.label,
        "primitives": [{
            "attributes": attributes,
            "indices": index,
            "material": 0,
            "mode": 4
        }],
        "extras": extras
    }]);
    root["accessors"] = Value::Array(buffer.accessors);
    root["bufferViews"] = Value::Array(buffer.views);
    root["buffers"] = json!([gltf_buffer]);

    Ok(GltfParts {
        json: root,
        bin: buffer.bin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glyphview_core::{Colormap, GlyphMesh, Point3f, Vector3f};

    fn triangle_model(coloring: ColoringDirective) -> GlyphModel {
        let mut mesh = GlyphMesh::new();
        mesh.vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 2.0, 0.0),
        ];
        mesh.normals = vec![Vector3f::new(0.0, 0.0, 1.0); 3];
        mesh.faces = vec![[0, 1, 2]];
        mesh.points_per_glyph = 3;
        GlyphModel {
            label: "tri".to_string(),
            mesh,
            coloring,
        }
    }

    #[test]
    fn test_fixed_color_document() {
        let model = triangle_model(ColoringDirective::Fixed(Color::rgb(1.0, 0.0, 0.0)));
        let parts = build_document(&model, BufferStorage::BinaryChunk).unwrap();
        let json = &parts.json;

        assert_eq!(json["asset"]["version"], "2.0");
        let attributes = &json["meshes"][0]["primitives"][0]["attributes"];
        assert!(attributes.get("POSITION").is_some());
        assert!(attributes.get("NORMAL").is_some());
        assert!(attributes.get("COLOR_0").is_none());
        assert_eq!(json["accessors"][0]["max"], json!([1.0, 2.0, 0.0]));
        let factor = json["materials"][0]["pbrMetallicRoughness"]["baseColorFactor"]
            .as_array()
            .unwrap();
        assert_relative_eq!(factor[0].as_f64().unwrap(), 1.0, epsilon = 1e-5);
        assert_eq!(factor[1].as_f64().unwrap(), 0.0);
        assert_eq!(factor[3].as_f64().unwrap(), 1.0);
        assert_eq!(json["meshes"][0]["extras"]["coloring"]["color"], "#ff0000");
        assert!(json["buffers"][0].get("uri").is_none());
        // positions + normals (36 bytes each) + 3 indices
        assert_eq!(parts.bin.len(), 36 + 36 + 12);
        assert_eq!(json["buffers"][0]["byteLength"], parts.bin.len());
    }

    #[test]
    fn test_mapped_document_has_colors_and_scalars() {
        let coloring = ColoringDirective::Mapped {
            colormap: Colormap::from_colors("ramp", vec![Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0)]),
            low: 0.0,
            high: 1.0,
        };
        let mut model = triangle_model(coloring);
        model.mesh.set_scalars(vec![0.0, 0.5, 1.0]);

        let parts = build_document(&model, BufferStorage::Embedded).unwrap();
        let json = &parts.json;
        let attributes = &json["meshes"][0]["primitives"][0]["attributes"];
        let color = attributes["COLOR_0"].as_u64().unwrap() as usize;
        assert_eq!(json["accessors"][color]["type"], "VEC4");
        assert_eq!(json["accessors"][color]["count"], 3);
        assert!(attributes.get("_SCALAR").is_some());
        assert_eq!(json["meshes"][0]["extras"]["coloring"]["colormap"], "ramp");
        assert_eq!(json["meshes"][0]["extras"]["coloring"]["clim"], json!([0.0, 1.0]));

        let uri = json["buffers"][0]["uri"].as_str().unwrap();
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_buffer_views_are_aligned() {
        let model = triangle_model(ColoringDirective::Fixed(Color::default()));
        let parts = build_document(&model, BufferStorage::BinaryChunk).unwrap();
        for view in parts.json["bufferViews"].as_array().unwrap() {
            assert_eq!(view["byteOffset"].as_u64().unwrap() % 4, 0);
        }
    }

    #[test]
    fn test_empty_mesh_document() {
        let model = GlyphModel {
            label: "empty".to_string(),
            mesh: GlyphMesh::new(),
            coloring: ColoringDirective::Fixed(Color::default()),
        };
        let parts = build_document(&model, BufferStorage::Embedded).unwrap();
        assert!(parts.bin.is_empty());
        assert!(parts.json.get("meshes").is_none());
        assert_eq!(parts.json["scenes"][0]["nodes"], json!([]));
    }
}
