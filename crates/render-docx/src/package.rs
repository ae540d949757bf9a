//! Zips the document parts into an OPC package.

use crate::error::DocxError;
use crate::model::{Paragraph, RunContent};
use crate::typography::DocxTypography;
use crate::xml;
use quire_traits::SharedResourceData;
use std::collections::HashSet;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A binary part stored under `word/media/`.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub rel_id: String,
    pub file_name: String,
    pub extension: &'static str,
    pub content_type: &'static str,
    pub data: SharedResourceData,
}

/// Fixed timestamps and permissions keep the archive byte-for-byte stable.
fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

fn check_media_references(paragraphs: &[Paragraph], media: &[MediaPart]) -> Result<(), DocxError> {
    let known: HashSet<&str> = media.iter().map(|m| m.rel_id.as_str()).collect();
    for run in paragraphs.iter().flat_map(|p| p.runs.iter()) {
        if let RunContent::Image(image) = &run.content {
            if !known.contains(image.rel_id.as_str()) {
                return Err(DocxError::Invalid(format!(
                    "image '{}' refers to unknown relationship {}",
                    image.name, image.rel_id
                )));
            }
        }
    }
    Ok(())
}

/// Writes a complete `.docx` package into `writer`.
pub fn write_package<W: Write + Seek>(
    paragraphs: &[Paragraph],
    media: &[MediaPart],
    typography: &DocxTypography,
    writer: W,
) -> Result<W, DocxError> {
    check_media_references(paragraphs, media)?;

    let mut zip = ZipWriter::new(writer);
    let options = file_options();

    let parts: [(&str, Vec<u8>); 5] = [
        ("[Content_Types].xml", xml::content_types_xml(media)?),
        ("_rels/.rels", xml::package_rels_xml()?),
        ("word/document.xml", xml::document_xml(paragraphs, typography)?),
        ("word/styles.xml", xml::styles_xml(typography)?),
        ("word/_rels/document.xml.rels", xml::document_rels_xml(media)?),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    for part in media {
        zip.start_file(format!("word/media/{}", part.file_name), options)?;
        zip.write_all(&part.data)?;
    }

    log::debug!(
        "Packaged docx with {} paragraphs and {} media parts",
        paragraphs.len(),
        media.len()
    );
    Ok(zip.finish()?)
}
