//! WordprocessingML parts written with `quick-xml`.

use crate::model::{Border, Paragraph, Run, RunContent};
use crate::package::MediaPart;
use crate::typography::DocxTypography;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Relationship id of `word/styles.xml`; media ids start after it.
pub const STYLES_REL_ID: &str = "rId1";

type XmlWriter = Writer<Vec<u8>>;

fn declaration(w: &mut XmlWriter) -> io::Result<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
    w.write_event(Event::Start(
        BytesStart::new(name).with_attributes(attrs.iter().copied()),
    ))
}

fn end(w: &mut XmlWriter, name: &str) -> io::Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
    w.write_event(Event::Empty(
        BytesStart::new(name).with_attributes(attrs.iter().copied()),
    ))
}

fn val(w: &mut XmlWriter, name: &str, value: &str) -> io::Result<()> {
    empty(w, name, &[("w:val", value)])
}

/// Drops characters XML 1.0 cannot carry and expands tabs.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            '\n' => Some('\n'),
            c if (c as u32) < 0x20 => None,
            '\u{FFFE}' | '\u{FFFF}' => None,
            c => Some(c),
        })
        .collect()
}

pub fn document_xml(paragraphs: &[Paragraph], typography: &DocxTypography) -> io::Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    start(
        &mut w,
        "w:document",
        &[
            ("xmlns:w", NS_W),
            ("xmlns:r", NS_R),
            ("xmlns:wp", NS_WP),
            ("xmlns:a", NS_A),
            ("xmlns:pic", NS_PIC),
        ],
    )?;
    start(&mut w, "w:body", &[])?;
    for paragraph in paragraphs {
        write_paragraph(&mut w, paragraph)?;
    }
    write_section(&mut w, typography)?;
    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;
    Ok(w.into_inner())
}

fn write_section(w: &mut XmlWriter, t: &DocxTypography) -> io::Result<()> {
    let (width, height, margin) = (
        t.page_width.to_string(),
        t.page_height.to_string(),
        t.page_margin.to_string(),
    );
    start(w, "w:sectPr", &[])?;
    empty(w, "w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    empty(
        w,
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    end(w, "w:sectPr")
}

fn write_border(w: &mut XmlWriter, side: &str, border: &Border) -> io::Result<()> {
    let (size, space, color) = (
        border.size.to_string(),
        border.space.to_string(),
        border.color.to_hex(),
    );
    empty(
        w,
        side,
        &[
            ("w:val", "single"),
            ("w:sz", size.as_str()),
            ("w:space", space.as_str()),
            ("w:color", color.as_str()),
        ],
    )
}

fn write_paragraph(w: &mut XmlWriter, p: &Paragraph) -> io::Result<()> {
    start(w, "w:p", &[])?;
    if p.has_properties() {
        start(w, "w:pPr", &[])?;
        if let Some(style) = &p.style {
            val(w, "w:pStyle", style)?;
        }
        if !p.borders.is_empty() {
            start(w, "w:pBdr", &[])?;
            if let Some(b) = &p.borders.top {
                write_border(w, "w:top", b)?;
            }
            if let Some(b) = &p.borders.left {
                write_border(w, "w:left", b)?;
            }
            if let Some(b) = &p.borders.bottom {
                write_border(w, "w:bottom", b)?;
            }
            end(w, "w:pBdr")?;
        }
        if let Some(fill) = p.shading {
            let fill = fill.to_hex();
            empty(
                w,
                "w:shd",
                &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill.as_str())],
            )?;
        }
        if !p.spacing.is_empty() {
            let before = p.spacing.before.map(|v| v.to_string());
            let after = p.spacing.after.map(|v| v.to_string());
            let line = p.spacing.line.map(|v| v.to_string());
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(v) = &before {
                attrs.push(("w:before", v.as_str()));
            }
            if let Some(v) = &after {
                attrs.push(("w:after", v.as_str()));
            }
            if let Some(v) = &line {
                attrs.push(("w:line", v.as_str()));
                attrs.push(("w:lineRule", "auto"));
            }
            empty(w, "w:spacing", &attrs)?;
        }
        if let Some(left) = p.indent_left {
            let left = left.to_string();
            empty(w, "w:ind", &[("w:left", left.as_str())])?;
        }
        if let Some(alignment) = p.alignment {
            val(w, "w:jc", alignment.as_str())?;
        }
        end(w, "w:pPr")?;
    }
    for run in &p.runs {
        write_run(w, run)?;
    }
    end(w, "w:p")
}

fn write_run_properties(w: &mut XmlWriter, run: &Run) -> io::Result<()> {
    start(w, "w:rPr", &[])?;
    if let Some(font) = &run.font {
        empty(
            w,
            "w:rFonts",
            &[
                ("w:ascii", font.as_str()),
                ("w:hAnsi", font.as_str()),
                ("w:cs", font.as_str()),
            ],
        )?;
    }
    if run.bold {
        empty(w, "w:b", &[])?;
    }
    if run.italic {
        empty(w, "w:i", &[])?;
    }
    if let Some(color) = run.color {
        val(w, "w:color", &color.to_hex())?;
    }
    if let Some(size) = run.size {
        let size = size.to_string();
        val(w, "w:sz", &size)?;
        val(w, "w:szCs", &size)?;
    }
    end(w, "w:rPr")
}

fn write_run(w: &mut XmlWriter, run: &Run) -> io::Result<()> {
    start(w, "w:r", &[])?;
    if run.has_properties() {
        write_run_properties(w, run)?;
    }
    match &run.content {
        RunContent::Text(text) => {
            let text = clean_text(text);
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    empty(w, "w:br", &[])?;
                }
                if !line.is_empty() {
                    start(w, "w:t", &[("xml:space", "preserve")])?;
                    w.write_event(Event::Text(BytesText::new(line)))?;
                    end(w, "w:t")?;
                }
            }
        }
        RunContent::PageBreak => empty(w, "w:br", &[("w:type", "page")])?,
        RunContent::Image(image) => {
            let (cx, cy, id) = (
                image.width_emu.to_string(),
                image.height_emu.to_string(),
                image.id.to_string(),
            );
            start(w, "w:drawing", &[])?;
            start(
                w,
                "wp:inline",
                &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
            )?;
            empty(w, "wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
            empty(w, "wp:docPr", &[("id", id.as_str()), ("name", image.name.as_str())])?;
            start(w, "a:graphic", &[])?;
            start(w, "a:graphicData", &[("uri", NS_PIC)])?;
            start(w, "pic:pic", &[])?;
            start(w, "pic:nvPicPr", &[])?;
            empty(w, "pic:cNvPr", &[("id", id.as_str()), ("name", image.name.as_str())])?;
            empty(w, "pic:cNvPicPr", &[])?;
            end(w, "pic:nvPicPr")?;
            start(w, "pic:blipFill", &[])?;
            empty(w, "a:blip", &[("r:embed", image.rel_id.as_str())])?;
            start(w, "a:stretch", &[])?;
            empty(w, "a:fillRect", &[])?;
            end(w, "a:stretch")?;
            end(w, "pic:blipFill")?;
            start(w, "pic:spPr", &[])?;
            start(w, "a:xfrm", &[])?;
            empty(w, "a:off", &[("x", "0"), ("y", "0")])?;
            empty(w, "a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
            end(w, "a:xfrm")?;
            start(w, "a:prstGeom", &[("prst", "rect")])?;
            empty(w, "a:avLst", &[])?;
            end(w, "a:prstGeom")?;
            end(w, "pic:spPr")?;
            end(w, "pic:pic")?;
            end(w, "a:graphicData")?;
            end(w, "a:graphic")?;
            end(w, "wp:inline")?;
            end(w, "w:drawing")?;
        }
    }
    end(w, "w:r")
}

fn write_style(
    w: &mut XmlWriter,
    id: &str,
    name: &str,
    paragraph: impl FnOnce(&mut XmlWriter) -> io::Result<()>,
    run: impl FnOnce(&mut XmlWriter) -> io::Result<()>,
) -> io::Result<()> {
    start(w, "w:style", &[("w:type", "paragraph"), ("w:styleId", id)])?;
    val(w, "w:name", name)?;
    if id != "Normal" {
        val(w, "w:basedOn", "Normal")?;
        val(w, "w:next", "Normal")?;
    }
    empty(w, "w:qFormat", &[])?;
    start(w, "w:pPr", &[])?;
    paragraph(w)?;
    end(w, "w:pPr")?;
    start(w, "w:rPr", &[])?;
    run(w)?;
    end(w, "w:rPr")?;
    end(w, "w:style")
}

pub fn styles_xml(t: &DocxTypography) -> io::Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    start(&mut w, "w:styles", &[("xmlns:w", NS_W)])?;

    let body_size = t.body_size.to_string();
    start(&mut w, "w:docDefaults", &[])?;
    start(&mut w, "w:rPrDefault", &[])?;
    start(&mut w, "w:rPr", &[])?;
    empty(
        &mut w,
        "w:rFonts",
        &[
            ("w:ascii", t.body_font.as_str()),
            ("w:hAnsi", t.body_font.as_str()),
            ("w:cs", t.body_font.as_str()),
        ],
    )?;
    val(&mut w, "w:sz", &body_size)?;
    val(&mut w, "w:szCs", &body_size)?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:rPrDefault")?;
    end(&mut w, "w:docDefaults")?;

    write_style(
        &mut w,
        "Normal",
        "Normal",
        |w| empty(w, "w:spacing", &[("w:after", "0")]),
        |_| Ok(()),
    )?;

    for level in 1..=3u8 {
        let id = DocxTypography::heading_style(level);
        let name = format!("heading {}", level);
        let size = t.heading_size(level).to_string();
        let outline = (level - 1).to_string();
        let color = t.title_color.to_hex();
        write_style(
            &mut w,
            &id,
            &name,
            |w| {
                empty(w, "w:keepNext", &[])?;
                val(w, "w:outlineLvl", &outline)
            },
            |w| {
                empty(w, "w:b", &[])?;
                val(w, "w:color", &color)?;
                val(w, "w:sz", &size)?;
                val(w, "w:szCs", &size)
            },
        )?;
    }

    end(&mut w, "w:styles")?;
    Ok(w.into_inner())
}

pub fn content_types_xml(media: &[MediaPart]) -> io::Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    start(&mut w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    empty(
        &mut w,
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    empty(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let mut seen: Vec<&str> = Vec::new();
    for part in media {
        if seen.contains(&part.extension) {
            continue;
        }
        seen.push(part.extension);
        empty(
            &mut w,
            "Default",
            &[("Extension", part.extension), ("ContentType", part.content_type)],
        )?;
    }

    empty(
        &mut w,
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;
    empty(
        &mut w,
        "Override",
        &[
            ("PartName", "/word/styles.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
            ),
        ],
    )?;
    end(&mut w, "Types")?;
    Ok(w.into_inner())
}

pub fn package_rels_xml() -> io::Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    start(&mut w, "Relationships", &[("xmlns", NS_PKG_RELS)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_OFFICE_DOCUMENT),
            ("Target", "word/document.xml"),
        ],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

pub fn document_rels_xml(media: &[MediaPart]) -> io::Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    start(&mut w, "Relationships", &[("xmlns", NS_PKG_RELS)])?;
    empty(
        &mut w,
        "Relationship",
        &[("Id", STYLES_REL_ID), ("Type", REL_STYLES), ("Target", "styles.xml")],
    )?;
    for part in media {
        let target = format!("media/{}", part.file_name);
        empty(
            &mut w,
            "Relationship",
            &[
                ("Id", part.rel_id.as_str()),
                ("Type", REL_IMAGE),
                ("Target", target.as_str()),
            ],
        )?;
    }
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}
