//! PPT Report Generator Module
//! Generates PowerPoint presentations: a title slide, one slide per chart
//! image and a bulleted insights slide.
//!
//! Uses direct ZIP/XML generation to embed images and text boxes.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use zip::write::FileOptions;
use zip::ZipWriter;

#[derive(Error, Debug)]
pub enum PptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// Standard 4:3 slide dimensions (in EMU)
const SLIDE_WIDTH: i64 = 9144000; // 10 inches
const SLIDE_HEIGHT: i64 = 6858000; // 7.5 inches

// Chart placement
const IMAGE_LEFT: i64 = EMU_PER_INCH;
const IMAGE_TOP: i64 = EMU_PER_INCH * 16 / 10;
const IMAGE_HEIGHT: i64 = EMU_PER_INCH * 45 / 10;

// Font sizes in hundredths of a point
const TITLE_SIZE: u32 = 4000;
const HEADING_SIZE: u32 = 3200;
const BODY_SIZE: u32 = 1800;

/// Content of one slide.
#[derive(Debug, Clone)]
pub enum Slide {
    Title { title: String, subtitle: String },
    Image { title: String, image_path: PathBuf },
    Bullets { title: String, items: Vec<String> },
}

/// What ended up in the written deck.
#[derive(Debug, Clone, Default)]
pub struct DeckSummary {
    pub slide_count: usize,
    pub images_embedded: usize,
    /// Placeholder texts used where an image could not be inserted.
    pub placeholders: Vec<String>,
}

/// A positioned rectangle in EMU.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

/// One paragraph inside a text box.
struct Paragraph<'a> {
    text: &'a str,
    size: u32,
    bold: bool,
    bullet: bool,
}

/// A slide ready to serialize, with its embedded image if any.
struct RenderedSlide {
    xml: String,
    image: Option<(usize, Vec<u8>)>,
}

/// PPT generator for creating chart reports
pub struct PptGenerator;

impl PptGenerator {
    /// Write the deck to `output_path`.
    ///
    /// An image that cannot be read is replaced by a text box naming the
    /// failure; the deck is still written.
    pub fn generate_report(
        slides: &[Slide],
        output_path: &Path,
        title: &str,
    ) -> Result<DeckSummary, PptError> {
        let mut summary = DeckSummary {
            slide_count: slides.len(),
            ..Default::default()
        };

        let mut rendered = Vec::with_capacity(slides.len());
        for slide in slides {
            let next_image = summary.images_embedded + 1;
            let slide = match Self::render_slide(slide, next_image) {
                Ok(r) => {
                    if r.image.is_some() {
                        summary.images_embedded += 1;
                    }
                    r
                }
                Err(placeholder) => {
                    let r = Self::placeholder_slide(slide_title(slide), &placeholder);
                    summary.placeholders.push(placeholder);
                    r
                }
            };
            rendered.push(slide);
        }

        let file = File::create(output_path)?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();
        let slide_count = rendered.len();

        // 1. [Content_Types].xml
        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types_xml(slide_count).as_bytes())?;

        // 2. _rels/.rels
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(Self::rels_xml().as_bytes())?;

        // 3. ppt/_rels/presentation.xml.rels
        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
        zip.write_all(Self::presentation_rels_xml(slide_count).as_bytes())?;

        // 4. ppt/presentation.xml
        zip.start_file("ppt/presentation.xml", options)?;
        zip.write_all(Self::presentation_xml(slide_count).as_bytes())?;

        // 5. Slides, their relationships and media
        for (idx, slide) in rendered.iter().enumerate() {
            let slide_num = idx + 1;

            zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", slide_num), options)?;
            zip.write_all(Self::slide_rels_xml(slide.image.as_ref().map(|(id, _)| *id)).as_bytes())?;

            zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
            zip.write_all(slide.xml.as_bytes())?;

            if let Some((image_id, bytes)) = &slide.image {
                zip.start_file(format!("ppt/media/image{}.png", image_id), options)?;
                zip.write_all(bytes)?;
            }
        }

        // 6. Slide layouts
        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(Self::slide_layout_xml().as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(Self::layout_rels_xml().as_bytes())?;

        // 7. Slide master
        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        zip.write_all(Self::slide_master_xml().as_bytes())?;
        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        zip.write_all(Self::master_rels_xml().as_bytes())?;

        // 8. Theme
        zip.start_file("ppt/theme/theme1.xml", options)?;
        zip.write_all(Self::theme_xml().as_bytes())?;

        // 9. docProps
        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(Self::core_props_xml(title).as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(Self::app_props_xml(slide_count).as_bytes())?;

        zip.finish()?;

        info!(
            "PowerPoint saved to: {} ({} slides, {} images)",
            output_path.display(),
            summary.slide_count,
            summary.images_embedded
        );
        Ok(summary)
    }

    /// Render a slide. An image slide whose picture cannot be loaded comes back
    /// as `Err(placeholder)`.
    fn render_slide(slide: &Slide, image_id: usize) -> Result<RenderedSlide, String> {
        match slide {
            Slide::Title { title, subtitle } => {
                let title_box = Self::text_box_xml(
                    2,
                    "Title",
                    Frame {
                        x: EMU_PER_INCH / 2,
                        y: EMU_PER_INCH * 2,
                        w: SLIDE_WIDTH - EMU_PER_INCH,
                        h: EMU_PER_INCH * 3 / 2,
                    },
                    &[Paragraph {
                        text: title,
                        size: TITLE_SIZE,
                        bold: true,
                        bullet: false,
                    }],
                    true,
                );
                let lines: Vec<Paragraph> = subtitle
                    .lines()
                    .map(|text| Paragraph {
                        text,
                        size: BODY_SIZE + 400,
                        bold: false,
                        bullet: false,
                    })
                    .collect();
                let subtitle_box = Self::text_box_xml(
                    3,
                    "Subtitle",
                    Frame {
                        x: EMU_PER_INCH,
                        y: EMU_PER_INCH * 4,
                        w: SLIDE_WIDTH - 2 * EMU_PER_INCH,
                        h: EMU_PER_INCH * 3 / 2,
                    },
                    &lines,
                    true,
                );
                Ok(RenderedSlide {
                    xml: Self::slide_xml(&[title_box, subtitle_box]),
                    image: None,
                })
            }
            Slide::Image { title, image_path } => {
                let heading = Self::heading_xml(title);
                match Self::load_image(image_path) {
                    Ok((bytes, width)) => {
                        let picture = Self::picture_xml(
                            3,
                            Frame {
                                x: IMAGE_LEFT,
                                y: IMAGE_TOP,
                                w: width,
                                h: IMAGE_HEIGHT,
                            },
                        );
                        Ok(RenderedSlide {
                            xml: Self::slide_xml(&[heading, picture]),
                            image: Some((image_id, bytes)),
                        })
                    }
                    Err(e) => {
                        let placeholder = format!("Could not insert image: {}", e);
                        warn!("{} ({})", placeholder, image_path.display());
                        Err(placeholder)
                    }
                }
            }
            Slide::Bullets { title, items } => {
                let numbered: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("{}. {}", i + 1, s))
                    .collect();
                let paragraphs: Vec<Paragraph> = numbered
                    .iter()
                    .map(|text| Paragraph {
                        text: text.as_str(),
                        size: BODY_SIZE,
                        bold: false,
                        bullet: true,
                    })
                    .collect();
                let body = Self::text_box_xml(
                    3,
                    "Content",
                    Frame {
                        x: EMU_PER_INCH / 2,
                        y: EMU_PER_INCH * 3 / 2,
                        w: SLIDE_WIDTH - EMU_PER_INCH,
                        h: SLIDE_HEIGHT - EMU_PER_INCH * 2,
                    },
                    &paragraphs,
                    false,
                );
                Ok(RenderedSlide {
                    xml: Self::slide_xml(&[Self::heading_xml(title), body]),
                    image: None,
                })
            }
        }
    }

    /// Image slide carrying a text box in place of the picture.
    fn placeholder_slide(title: &str, placeholder: &str) -> RenderedSlide {
        let text = Self::text_box_xml(
            3,
            "Placeholder",
            Frame {
                x: IMAGE_LEFT,
                y: IMAGE_TOP,
                w: EMU_PER_INCH * 8,
                h: EMU_PER_INCH * 2,
            },
            &[Paragraph {
                text: placeholder,
                size: BODY_SIZE,
                bold: false,
                bullet: false,
            }],
            false,
        );
        RenderedSlide {
            xml: Self::slide_xml(&[Self::heading_xml(title), text]),
            image: None,
        }
    }

    /// Read a PNG and compute its width (EMU) at the fixed slide height.
    fn load_image(path: &Path) -> Result<(Vec<u8>, i64), String> {
        let (w, h) = image::image_dimensions(path).map_err(|e| e.to_string())?;
        if w == 0 || h == 0 {
            return Err(format!("{} has no pixels", path.display()));
        }
        let bytes = fs::read(path).map_err(|e| e.to_string())?;
        let width = IMAGE_HEIGHT * w as i64 / h as i64;
        Ok((bytes, width))
    }

    fn heading_xml(title: &str) -> String {
        Self::text_box_xml(
            2,
            "Title",
            Frame {
                x: EMU_PER_INCH / 2,
                y: EMU_PER_INCH / 3,
                w: SLIDE_WIDTH - EMU_PER_INCH,
                h: EMU_PER_INCH,
            },
            &[Paragraph {
                text: title,
                size: HEADING_SIZE,
                bold: true,
                bullet: false,
            }],
            true,
        )
    }

    fn content_types_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#.to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Types>");
        xml
    }

    fn rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    }

    fn presentation_rels_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#.to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2, i
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn presentation_xml(slide_count: usize) -> String {
        let slide_ids: String = (1..=slide_count)
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i + 2))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="{}" cy="{}" type="screen4x3"/>
<p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            slide_ids, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn slide_rels_xml(image_id: Option<usize>) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
"#.to_string();

        if let Some(id) = image_id {
            xml.push_str(&format!(
                r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>"#,
                id
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn slide_xml(shapes: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            shapes.join("\n")
        )
    }

    /// Picture shape referencing relationship rId2.
    fn picture_xml(shape_id: usize, frame: Frame) -> String {
        format!(
            r#"<p:pic>
<p:nvPicPr>
<p:cNvPr id="{id}" name="Picture {id}"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId2"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>"#,
            id = shape_id,
            x = frame.x,
            y = frame.y,
            w = frame.w,
            h = frame.h
        )
    }

    fn text_box_xml(
        shape_id: usize,
        name: &str,
        frame: Frame,
        paragraphs: &[Paragraph],
        centered: bool,
    ) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| {
                let mut ppr = String::new();
                if p.bullet {
                    ppr.push_str(r#"<a:pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>"#);
                } else if centered {
                    ppr.push_str(r#"<a:pPr algn="ctr"/>"#);
                }
                format!(
                    r#"<a:p>{}<a:r><a:rPr lang="en-US" sz="{}" b="{}" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
                    ppr,
                    p.size,
                    if p.bold { 1 } else { 0 },
                    escape_xml(p.text)
                )
            })
            .collect();

        format!(
            r#"<p:sp>
<p:nvSpPr><p:cNvPr id="{id}" name="{name} {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>
<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody>
</p:sp>"#,
            id = shape_id,
            name = name,
            x = frame.x,
            y = frame.y,
            w = frame.w,
            h = frame.h,
            body = body
        )
    }

    fn slide_layout_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
    }

    fn layout_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
    }

    fn slide_master_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#
    }

    fn master_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
    }

    fn theme_xml() -> String {
        let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
        let line = |w: u32| {
            format!(
                r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr">{}<a:prstDash val="solid"/></a:ln>"#,
                w, solid
            )
        };
        let no_effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Report Theme">
<a:themeElements>
<a:clrScheme name="Report"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F3A5F"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4C72B0"/></a:accent1><a:accent2><a:srgbClr val="DD8452"/></a:accent2><a:accent3><a:srgbClr val="55A868"/></a:accent3><a:accent4><a:srgbClr val="C44E52"/></a:accent4><a:accent5><a:srgbClr val="8172B3"/></a:accent5><a:accent6><a:srgbClr val="937860"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Report"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Report"><a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst><a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst><a:effectStyleLst>{fx}{fx}{fx}</a:effectStyleLst><a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#,
            solid = solid,
            l1 = line(6350),
            l2 = line(12700),
            l3 = line(19050),
            fx = no_effect
        )
    }

    fn core_props_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>Sales Report</dc:creator>
<cp:lastModifiedBy>Sales Report</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            escape_xml(title)
        )
    }

    fn app_props_xml(slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<TotalTime>0</TotalTime>
<Application>Sales Report</Application>
<PresentationFormat>On-screen Show (4:3)</PresentationFormat>
<Slides>{}</Slides>
<Notes>0</Notes>
<HiddenSlides>0</HiddenSlides>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            slide_count
        )
    }
}

fn slide_title(slide: &Slide) -> &str {
    match slide {
        Slide::Title { title, .. } | Slide::Image { title, .. } | Slide::Bullets { title, .. } => {
            title
        }
    }
}

/// Escape text for use inside XML element content or attributes.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Charts & <Insights>"), "Charts &amp; &lt;Insights&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_generate_report_embeds_images_and_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("chart.png");
        image::RgbImage::new(40, 20).save(&png).unwrap();
        let deck = dir.path().join("deck.pptx");

        let slides = vec![
            Slide::Title {
                title: "Sales & Trends".to_string(),
                subtitle: "Line one\nLine two".to_string(),
            },
            Slide::Image {
                title: "Weekly Sales Trend".to_string(),
                image_path: png,
            },
            Slide::Image {
                title: "Missing".to_string(),
                image_path: dir.path().join("absent.png"),
            },
            Slide::Bullets {
                title: "Key Insights & Recommendations".to_string(),
                items: vec!["First".to_string(), "Second".to_string()],
            },
        ];

        let summary = PptGenerator::generate_report(&slides, &deck, "Sales").unwrap();

        assert_eq!(summary.slide_count, 4);
        assert_eq!(summary.images_embedded, 1);
        assert_eq!(summary.placeholders.len(), 1);
        assert!(summary.placeholders[0].starts_with("Could not insert image:"));

        let archive = zip::ZipArchive::new(File::open(&deck).unwrap()).unwrap();
        assert!(archive.file_names().any(|n| n == "ppt/media/image1.png"));
        assert!(!archive.file_names().any(|n| n == "ppt/media/image2.png"));

        let title = read_entry(&deck, "ppt/slides/slide1.xml");
        assert!(title.contains("Sales &amp; Trends"));
        assert!(title.contains("Line two"));

        // 4.5in tall, twice as wide as tall.
        let chart = read_entry(&deck, "ppt/slides/slide2.xml");
        assert!(chart.contains(r#"<a:ext cx="8229600" cy="4114800"/>"#));
        assert!(read_entry(&deck, "ppt/slides/_rels/slide2.xml.rels").contains("media/image1.png"));

        let missing = read_entry(&deck, "ppt/slides/slide3.xml");
        assert!(missing.contains("Could not insert image:"));
        assert!(!read_entry(&deck, "ppt/slides/_rels/slide3.xml.rels").contains("image"));

        let insights = read_entry(&deck, "ppt/slides/slide4.xml");
        assert!(insights.contains("1. First"));
        assert!(insights.contains("2. Second"));
        assert!(insights.contains("buChar"));

        let presentation = read_entry(&deck, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 4);
    }
}
