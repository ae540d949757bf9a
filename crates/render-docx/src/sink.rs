use crate::model::{Alignment, Border, Paragraph, Run};
use crate::typography::DocxTypography;
use quire_render_core::{BlockSink, ListKind, ListMarker, RenderError};
use quire_types::RenderedRun;

/// Appends one [`Paragraph`] per block to a chapter's paragraph list.
pub struct DocxSink<'a> {
    paragraphs: &'a mut Vec<Paragraph>,
    typography: &'a DocxTypography,
}

impl<'a> DocxSink<'a> {
    pub fn new(paragraphs: &'a mut Vec<Paragraph>, typography: &'a DocxTypography) -> Self {
        Self {
            paragraphs,
            typography,
        }
    }

    /// Body runs; inline code switches to the code font.
    fn runs(&self, runs: &[RenderedRun]) -> Vec<Run> {
        let t = self.typography;
        runs.iter()
            .map(|run| {
                let base = Run::text(run.text.as_str())
                    .bold(run.bold)
                    .italic(run.italic);
                if run.code {
                    base.font(&t.code_font).size(t.code_size)
                } else {
                    base.font(&t.body_font).size(t.body_size)
                }
            })
            .collect()
    }

    fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }
}

impl BlockSink for DocxSink<'_> {
    fn heading(&mut self, level: u8, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let size = t.heading_size(level);
        let runs = runs.iter().map(|run| {
            Run::text(run.text.as_str())
                .bold(true)
                .italic(run.italic)
                .font(if run.code { &t.code_font } else { &t.heading_font })
                .size(size)
        });
        let paragraph = Paragraph::new()
            .style(DocxTypography::heading_style(level))
            .spacing(Some(t.heading_before), Some(t.heading_after))
            .runs(runs.collect::<Vec<_>>());
        self.push(paragraph);
        Ok(())
    }

    fn paragraph(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let paragraph = Paragraph::new()
            .spacing(Some(t.paragraph_spacing), Some(t.paragraph_spacing))
            .line_spacing(t.line_spacing)
            .align(Alignment::Left)
            .runs(self.runs(runs));
        self.push(paragraph);
        Ok(())
    }

    fn list_item(
        &mut self,
        marker: ListMarker,
        depth: usize,
        runs: &[RenderedRun],
    ) -> Result<(), RenderError> {
        let t = self.typography;
        let indent = t.list_indent * (depth as u32 + 1);
        let mut paragraph = Paragraph::new()
            .spacing(Some(t.list_item_spacing), Some(t.list_item_spacing))
            .indent(indent);

        let label = marker.label();
        if !label.is_empty() {
            paragraph = paragraph.run(
                Run::text(format!("{} ", label))
                    .font(&t.body_font)
                    .size(t.body_size),
            );
        }
        let runs = self.runs(runs);
        self.push(paragraph.runs(runs));
        Ok(())
    }

    fn quote(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let runs: Vec<Run> = self
            .runs(runs)
            .into_iter()
            .map(|run| run.italic(true).color(t.quote_color))
            .collect();
        let paragraph = Paragraph::new()
            .border_left(Border {
                color: t.accent_color,
                size: 24,
                space: 1,
            })
            .spacing(Some(t.paragraph_spacing), Some(t.paragraph_spacing))
            .indent(t.quote_indent)
            .align(Alignment::Justified)
            .runs(runs);
        self.push(paragraph);
        Ok(())
    }

    fn code(&mut self, content: &str, _info: Option<&str>) -> Result<(), RenderError> {
        let t = self.typography;
        let text = content.trim_end_matches(['\n', '\r']);
        let paragraph = Paragraph::new()
            .shading(t.code_shading)
            .spacing(Some(t.paragraph_spacing), Some(t.paragraph_spacing))
            .run(
                Run::text(text)
                    .font(&t.code_font)
                    .size(t.code_size)
                    .color(t.code_color),
            );
        self.push(paragraph);
        Ok(())
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        let t = self.typography;
        let paragraph = Paragraph::new()
            .border_top(Border {
                color: t.rule_color,
                size: 6,
                space: 1,
            })
            .spacing(Some(t.paragraph_spacing), Some(t.paragraph_spacing));
        self.push(paragraph);
        Ok(())
    }

    fn begin_list(&mut self, _kind: ListKind, _depth: usize) -> Result<(), RenderError> {
        Ok(())
    }

    fn end_list(&mut self, _kind: ListKind, depth: usize) -> Result<(), RenderError> {
        if depth == 0 {
            let spacer = Paragraph::new().spacing(None, Some(self.typography.list_end_spacing));
            self.push(spacer);
        }
        Ok(())
    }
}
