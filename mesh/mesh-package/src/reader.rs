//! Reading packages back from 3MF files.
//!
//! Only the subset this crate writes is understood: one model part, mesh
//! objects, `basematerials` display colors, a title and untransformed
//! build items.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Rgb, Vertex};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::{PackageError, PackageResult};
use crate::writer::MODEL_PATH;

/// One object read back from a package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagedObject {
    /// Resource id inside the model.
    pub id: u32,
    /// Object name, empty if the file had none.
    pub name: String,
    /// Display color from the referenced material, if any.
    pub color: Option<Rgb>,
    /// Object geometry.
    pub mesh: IndexedMesh,
}

/// Contents of a 3MF package, objects in build order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageContents {
    /// Model title from the `Title` metadata entry.
    pub title: Option<String>,
    /// Objects in the order of the build section.
    pub objects: Vec<PackagedObject>,
}

impl PackageContents {
    /// Look up an object by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackagedObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Object names in build order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }
}

/// Load a package written by [`ModelPackage::save`](crate::ModelPackage::save)
/// or any 3MF producer using the same subset.
///
/// # Errors
///
/// - [`PackageError::Io`] if the file cannot be read
/// - [`PackageError::Zip`] if it is not a ZIP archive
/// - [`PackageError::Xml`] if the model part is malformed XML
/// - [`PackageError::InvalidContent`] if the model is missing or
///   inconsistent
///
/// # Example
///
/// ```no_run
/// use mesh_package::load_package;
///
/// let contents = load_package("mosaic.3mf").unwrap();
/// for object in &contents.objects {
///     println!("{} {:?} {} faces", object.name, object.color, object.mesh.faces.len());
/// }
/// ```
pub fn load_package<P: AsRef<Path>>(path: P) -> PackageResult<PackageContents> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PackageError::io(path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(PackageError::zip)?;

    let mut content = String::new();
    archive
        .by_name(MODEL_PATH)
        .map_err(|_| PackageError::invalid_content(format!("archive has no {MODEL_PATH}")))?
        .read_to_string(&mut content)
        .map_err(|e| PackageError::io(path, e))?;

    parse_model(&content)
}

/// An object whose closing tag has not been seen yet.
struct PendingObject {
    id: u32,
    name: String,
    material: Option<(u32, usize)>,
    mesh: IndexedMesh,
}

#[derive(Default)]
struct ModelParser {
    title: Option<String>,
    in_title: bool,
    /// Display colors per material group id.
    materials: HashMap<u32, Vec<Option<Rgb>>>,
    current_group: Option<u32>,
    current: Option<PendingObject>,
    in_vertices: bool,
    in_triangles: bool,
    objects: HashMap<u32, PendingObject>,
    build: Vec<u32>,
}

fn parse_model(content: &str) -> PackageResult<PackageContents> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut parser = ModelParser::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(PackageError::xml)? {
            Event::Start(ref e) => parser.open(e, false)?,
            Event::Empty(ref e) => parser.open(e, true)?,
            Event::End(ref e) => parser.close(e.local_name().as_ref())?,
            Event::Text(ref e) if parser.in_title => {
                parser.title = Some(e.unescape().map_err(PackageError::xml)?.into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

impl ModelParser {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> PackageResult<()> {
        match e.local_name().as_ref() {
            b"metadata" => {
                self.in_title = !empty && attr(e, b"name")?.as_deref() == Some("Title");
            }
            b"basematerials" => {
                let id = required(e, b"id", "basematerials")?;
                self.materials.entry(id).or_default();
                self.current_group = (!empty).then_some(id);
            }
            b"base" => {
                if let Some(group) = self.current_group {
                    let color = attr(e, b"displaycolor")?.and_then(|c| Rgb::parse_hex(&c));
                    self.materials.entry(group).or_default().push(color);
                }
            }
            b"object" => {
                let id = required(e, b"id", "object")?;
                let name = attr(e, b"name")?.unwrap_or_default();
                let pid = parse_opt::<u32>(e, b"pid")?;
                let pindex = parse_opt::<usize>(e, b"pindex")?;
                let pending = PendingObject {
                    id,
                    name,
                    material: pid.map(|pid| (pid, pindex.unwrap_or(0))),
                    mesh: IndexedMesh::new(),
                };
                if empty {
                    self.store(pending)?;
                } else {
                    self.current = Some(pending);
                }
            }
            b"vertices" => self.in_vertices = !empty,
            b"triangles" => self.in_triangles = !empty,
            b"vertex" if self.in_vertices => {
                if let Some(object) = self.current.as_mut() {
                    let x = required(e, b"x", "vertex")?;
                    let y = required(e, b"y", "vertex")?;
                    let z = required(e, b"z", "vertex")?;
                    object.mesh.vertices.push(Vertex::from_coords(x, y, z));
                }
            }
            b"triangle" if self.in_triangles => {
                if let Some(object) = self.current.as_mut() {
                    let face = [
                        required(e, b"v1", "triangle")?,
                        required(e, b"v2", "triangle")?,
                        required(e, b"v3", "triangle")?,
                    ];
                    object.mesh.faces.push(face);
                }
            }
            b"item" => self.build.push(required(e, b"objectid", "item")?),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, local_name: &[u8]) -> PackageResult<()> {
        match local_name {
            b"metadata" => self.in_title = false,
            b"basematerials" => self.current_group = None,
            b"vertices" => self.in_vertices = false,
            b"triangles" => self.in_triangles = false,
            b"object" => {
                if let Some(pending) = self.current.take() {
                    self.store(pending)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn store(&mut self, pending: PendingObject) -> PackageResult<()> {
        let vertex_count = pending.mesh.vertices.len();
        let dangling = pending
            .mesh
            .faces
            .iter()
            .flatten()
            .any(|&v| !usize::try_from(v).is_ok_and(|v| v < vertex_count));
        if dangling {
            return Err(PackageError::invalid_content(format!(
                "object {} references a vertex past its {vertex_count} vertices",
                pending.id
            )));
        }
        if self.objects.insert(pending.id, pending).is_some() {
            return Err(PackageError::invalid_content("duplicate object id"));
        }
        Ok(())
    }

    fn finish(mut self) -> PackageResult<PackageContents> {
        let mut objects = Vec::with_capacity(self.build.len());
        for id in std::mem::take(&mut self.build) {
            let pending = self.objects.remove(&id).ok_or_else(|| {
                PackageError::invalid_content(format!("build item references unknown object {id}"))
            })?;
            let color = pending.material.and_then(|(pid, pindex)| {
                self.materials
                    .get(&pid)
                    .and_then(|group| group.get(pindex).copied().flatten())
            });
            objects.push(PackagedObject {
                id,
                name: pending.name,
                color,
                mesh: pending.mesh,
            });
        }

        Ok(PackageContents {
            title: self.title,
            objects,
        })
    }
}

/// Unescaped value of attribute `key`, if present.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> PackageResult<Option<String>> {
    for a in e.attributes() {
        let a = a.map_err(PackageError::xml)?;
        if a.key.local_name().as_ref() == key {
            return Ok(Some(a.unescape_value().map_err(PackageError::xml)?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_opt<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> PackageResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    attr(e, key)?
        .map(|value| {
            value.trim().parse::<T>().map_err(|err| {
                PackageError::invalid_content(format!(
                    "invalid {} '{value}': {err}",
                    String::from_utf8_lossy(key)
                ))
            })
        })
        .transpose()
}

fn required<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8], element: &str) -> PackageResult<T>
where
    T::Err: std::fmt::Display,
{
    parse_opt(e, key)?.ok_or_else(|| {
        PackageError::invalid_content(format!(
            "<{element}> is missing '{}'",
            String::from_utf8_lossy(key)
        ))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02" unit="millimeter">
  <metadata name="Title">tiles &amp; grout</metadata>
  <resources>
    <basematerials id="1">
      <base name="a" displaycolor="#FF000080"/>
      <base name="b" displaycolor="#00ff00"/>
    </basematerials>
    <object id="2" type="model" name="first" pid="1" pindex="1">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2"/>
        </triangles>
      </mesh>
    </object>
    <object id="3" type="model" name="second">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="1"/>
          <vertex x="1" y="0" z="1"/>
          <vertex x="0" y="1" z="1"/>
        </vertices>
        <triangles>
          <triangle v1="2" v2="1" v3="0"/>
        </triangles>
      </mesh>
    </object>
  </resources>
  <build>
    <item objectid="3"/>
    <item objectid="2"/>
  </build>
</model>"##;

    #[test]
    fn objects_follow_build_order() {
        let contents = parse_model(MINIMAL).unwrap();

        assert_eq!(contents.names().collect::<Vec<_>>(), ["second", "first"]);
        assert_eq!(contents.title.as_deref(), Some("tiles & grout"));
    }

    #[test]
    fn colors_resolve_through_material_group() {
        let contents = parse_model(MINIMAL).unwrap();

        assert_eq!(contents.get("first").unwrap().color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(contents.get("second").unwrap().color, None);
    }

    #[test]
    fn meshes_are_per_object() {
        let contents = parse_model(MINIMAL).unwrap();
        let second = contents.get("second").unwrap();

        assert_eq!(second.mesh.vertices.len(), 3);
        assert_eq!(second.mesh.faces, vec![[2, 1, 0]]);
    }

    #[test]
    fn unknown_build_reference_rejected() {
        let xml = MINIMAL.replace("<item objectid=\"3\"/>", "<item objectid=\"9\"/>");
        let err = parse_model(&xml).unwrap_err();

        assert!(matches!(err, PackageError::InvalidContent { .. }));
    }

    #[test]
    fn dangling_index_rejected() {
        let xml = MINIMAL.replace("v1=\"2\"", "v1=\"7\"");
        let err = parse_model(&xml).unwrap_err();

        assert!(err.to_string().contains("references a vertex"));
    }

    #[test]
    fn malformed_number_rejected() {
        let xml = MINIMAL.replace("x=\"1\"", "x=\"one\"");
        assert!(matches!(
            parse_model(&xml),
            Err(PackageError::InvalidContent { .. })
        ));
    }
}
