//! 3MF serialization.
//!
//! The archive holds the three parts every consumer expects:
//! `[Content_Types].xml`, `_rels/.rels` and `3D/3dmodel.model`. The model
//! declares one `basematerials` group with a `base` entry per object, so
//! each object carries its display color through `pid`/`pindex`.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tempfile::NamedTempFile;
use tracing::info;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{PackageError, PackageResult};
use crate::object::BuildObject;
use crate::package::ModelPackage;

/// 3MF core namespace URI.
pub(crate) const NAMESPACE_3MF: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Path of the model part inside the archive.
pub(crate) const MODEL_PATH: &str = "3D/3dmodel.model";

/// Resource id of the material group. Objects are numbered after it.
pub(crate) const MATERIAL_GROUP_ID: u32 = 1;

/// Content types XML for 3MF.
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

/// Relationships XML for 3MF.
const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

/// Save `package` to `path` through a temporary file in the same directory.
pub(crate) fn write_package(package: &ModelPackage, path: &Path) -> PackageResult<()> {
    if package.is_empty() {
        return Err(PackageError::EmptyPackage);
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PackageError::io(dir, e))?;

    let model_xml = generate_model_xml(package)?;

    let mut zip = ZipWriter::new(tmp.as_file_mut());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", RELS_XML.as_bytes()),
        (MODEL_PATH, model_xml.as_slice()),
    ] {
        zip.start_file(name, options).map_err(PackageError::zip)?;
        zip.write_all(content).map_err(|e| PackageError::io(path, e))?;
    }
    zip.finish().map_err(PackageError::zip)?;

    tmp.as_file().sync_all().map_err(|e| PackageError::io(path, e))?;
    tmp.persist(path).map_err(|e| PackageError::io(path, e.error))?;

    info!(
        path = %path.display(),
        objects = package.len(),
        bytes = model_xml.len(),
        "saved 3MF package"
    );
    Ok(())
}

/// Generate the `3D/3dmodel.model` document.
pub(crate) fn generate_model_xml(package: &ModelPackage) -> PackageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(PackageError::xml)?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("xmlns", NAMESPACE_3MF));
    model.push_attribute(("unit", "millimeter"));
    model.push_attribute(("xml:lang", "en-US"));
    writer
        .write_event(Event::Start(model))
        .map_err(PackageError::xml)?;

    if let Some(title) = package.title() {
        let mut metadata = BytesStart::new("metadata");
        metadata.push_attribute(("name", "Title"));
        writer
            .write_event(Event::Start(metadata))
            .map_err(PackageError::xml)?;
        writer
            .write_event(Event::Text(BytesText::new(title)))
            .map_err(PackageError::xml)?;
        writer
            .write_event(Event::End(BytesEnd::new("metadata")))
            .map_err(PackageError::xml)?;
    }

    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(PackageError::xml)?;

    write_materials(&mut writer, package)?;
    for (index, object) in package.objects().iter().enumerate() {
        write_object(&mut writer, index, object)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(PackageError::xml)?;
    for index in 0..package.len() {
        let mut item = BytesStart::new("item");
        item.push_attribute(("objectid", object_id(index).to_string().as_str()));
        writer
            .write_event(Event::Empty(item))
            .map_err(PackageError::xml)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(PackageError::xml)?;

    Ok(buffer)
}

type XmlWriter<'a> = Writer<Cursor<&'a mut Vec<u8>>>;

fn write_materials(writer: &mut XmlWriter<'_>, package: &ModelPackage) -> PackageResult<()> {
    let mut group = BytesStart::new("basematerials");
    group.push_attribute(("id", MATERIAL_GROUP_ID.to_string().as_str()));
    writer
        .write_event(Event::Start(group))
        .map_err(PackageError::xml)?;

    for object in package.objects() {
        let mut base = BytesStart::new("base");
        base.push_attribute(("name", object.name()));
        base.push_attribute(("displaycolor", object.color().to_hex().as_str()));
        writer
            .write_event(Event::Empty(base))
            .map_err(PackageError::xml)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("basematerials")))
        .map_err(PackageError::xml)?;
    Ok(())
}

fn write_object(
    writer: &mut XmlWriter<'_>,
    index: usize,
    object: &BuildObject,
) -> PackageResult<()> {
    let mut element = BytesStart::new("object");
    element.push_attribute(("id", object_id(index).to_string().as_str()));
    element.push_attribute(("type", "model"));
    element.push_attribute(("name", object.name()));
    element.push_attribute(("pid", MATERIAL_GROUP_ID.to_string().as_str()));
    element.push_attribute(("pindex", index.to_string().as_str()));
    writer
        .write_event(Event::Start(element))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(PackageError::xml)?;
    for v in &object.mesh().vertices {
        let mut vertex = BytesStart::new("vertex");
        vertex.push_attribute(("x", format!("{:.6}", v.position.x).as_str()));
        vertex.push_attribute(("y", format!("{:.6}", v.position.y).as_str()));
        vertex.push_attribute(("z", format!("{:.6}", v.position.z).as_str()));
        writer
            .write_event(Event::Empty(vertex))
            .map_err(PackageError::xml)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(PackageError::xml)?;
    for &[v1, v2, v3] in &object.mesh().faces {
        let mut triangle = BytesStart::new("triangle");
        triangle.push_attribute(("v1", v1.to_string().as_str()));
        triangle.push_attribute(("v2", v2.to_string().as_str()));
        triangle.push_attribute(("v3", v3.to_string().as_str()));
        writer
            .write_event(Event::Empty(triangle))
            .map_err(PackageError::xml)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(PackageError::xml)?;

    writer
        .write_event(Event::End(BytesEnd::new("mesh")))
        .map_err(PackageError::xml)?;
    writer
        .write_event(Event::End(BytesEnd::new("object")))
        .map_err(PackageError::xml)?;
    Ok(())
}

/// Resource id of the object at `index`.
#[inline]
const fn object_id(index: usize) -> usize {
    index + MATERIAL_GROUP_ID as usize + 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Placement;
    use mesh_types::{Rgb, unit_cube};

    fn two_object_package() -> ModelPackage {
        let mut package = ModelPackage::new();
        package
            .add_object(unit_cube(), "cohesion layer", Placement::default())
            .unwrap();
        package
            .add_colored_object(unit_cube(), "tips & caps", Placement::default(), Rgb::new(1, 2, 3))
            .unwrap();
        package
    }

    #[test]
    fn model_declares_units_and_namespace() {
        let xml = String::from_utf8(generate_model_xml(&two_object_package()).unwrap()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(NAMESPACE_3MF));
        assert!(xml.contains("unit=\"millimeter\""));
    }

    #[test]
    fn objects_reference_material_group() {
        let xml = String::from_utf8(generate_model_xml(&two_object_package()).unwrap()).unwrap();

        assert!(xml.contains("<basematerials id=\"1\">"));
        assert!(xml.contains("<base name=\"cohesion layer\" displaycolor=\"#808080\"/>"));
        assert!(xml.contains("displaycolor=\"#010203\""));
        assert!(xml.contains(
            "<object id=\"2\" type=\"model\" name=\"cohesion layer\" pid=\"1\" pindex=\"0\">"
        ));
        assert!(
            xml.contains("id=\"3\" type=\"model\" name=\"tips &amp; caps\" pid=\"1\" pindex=\"1\"")
        );
    }

    #[test]
    fn build_items_have_no_transform() {
        let xml = String::from_utf8(generate_model_xml(&two_object_package()).unwrap()).unwrap();

        assert!(xml.contains("<item objectid=\"2\"/>"));
        assert!(xml.contains("<item objectid=\"3\"/>"));
        assert!(!xml.contains("transform="));
    }

    #[test]
    fn title_metadata_is_optional() {
        let mut package = two_object_package();
        let xml = String::from_utf8(generate_model_xml(&package).unwrap()).unwrap();
        assert!(!xml.contains("<metadata"));

        package.set_title("cat <mosaic>");
        let xml = String::from_utf8(generate_model_xml(&package).unwrap()).unwrap();
        assert!(xml.contains("<metadata name=\"Title\">cat &lt;mosaic&gt;</metadata>"));
    }
}
