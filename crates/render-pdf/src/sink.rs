use crate::canvas::PdfCanvas;
use crate::flow::{Line, Span, TextStyle, break_lines, wrap_preformatted};
use crate::typography::PdfTypography;
use quire_render_core::{BlockSink, ListKind, ListMarker, RenderError};
use quire_types::RenderedRun;

/// Draws blocks straight onto a [`PdfCanvas`] as they arrive.
pub struct PdfSink<'a> {
    canvas: &'a mut PdfCanvas,
    typography: &'a PdfTypography,
}

impl<'a> PdfSink<'a> {
    pub fn new(canvas: &'a mut PdfCanvas, typography: &'a PdfTypography) -> Self {
        Self { canvas, typography }
    }

    fn body_style(&self) -> TextStyle {
        let t = self.typography;
        TextStyle::new(t.body_font, t.body_size, t.text_color)
    }

    /// Maps runs onto `base`, adding bold and italic where the run asks for it.
    fn spans(&self, runs: &[RenderedRun], base: TextStyle) -> Vec<Span> {
        runs.iter()
            .map(|run| {
                let font = if run.code {
                    self.typography.code_font
                } else {
                    base.font
                        .with_bold(base.font.bold || run.bold)
                        .with_italic(base.font.italic || run.italic)
                };
                Span::new(run.text.as_str(), TextStyle { font, ..base })
            })
            .collect()
    }

    fn line_height(&self, line: &Line, fallback: f32) -> f32 {
        let size = match line.max_size() {
            s if s > 0.0 => s,
            _ => fallback,
        };
        self.typography.line_height_for(size)
    }

    fn baseline(top: f32, line_height: f32, size: f32) -> f32 {
        top + (line_height - size) / 2.0 + size * 0.8
    }

    /// Flows `spans` into the column starting at `x`, one line at a time.
    fn flow(&mut self, spans: &[Span], x: f32, width: f32) {
        let fallback = spans.first().map_or(self.typography.body_size, |s| s.style.size);
        for line in break_lines(spans, width) {
            let lh = self.line_height(&line, fallback);
            self.canvas.ensure_space(lh);
            let baseline = Self::baseline(self.canvas.cursor_y(), lh, line.max_size());
            self.canvas.show_text(baseline, &[(x, &line.spans[..])]);
            self.canvas.advance(lh);
        }
    }

    /// Draws `text` centred within the content width, wrapping as needed.
    pub fn centered(&mut self, text: &str, style: TextStyle) {
        let t = self.typography;
        let spans = [Span::new(text, style)];
        for line in break_lines(&spans, t.content_width()) {
            let lh = t.line_height_for(style.size);
            self.canvas.ensure_space(lh);
            let x = t.margin + (t.content_width() - line.width) / 2.0;
            let baseline = Self::baseline(self.canvas.cursor_y(), lh, style.size);
            self.canvas.show_text(baseline, &[(x, &line.spans[..])]);
            self.canvas.advance(lh);
        }
    }

    pub fn gap(&mut self, dy: f32) {
        self.canvas.gap(dy);
    }
}

impl BlockSink for PdfSink<'_> {
    fn heading(&mut self, level: u8, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let base = TextStyle::new(t.heading_font, t.heading_size(level), t.heading_color);
        let spans = self.spans(runs, base);
        self.canvas.gap(t.heading_gap_before);
        // Keep the heading together with at least one body line.
        self.canvas
            .ensure_space(t.line_height_for(base.size) + t.line_height_for(t.body_size));
        self.flow(&spans, t.margin, t.content_width());
        self.canvas.gap(t.heading_gap_after);
        Ok(())
    }

    fn paragraph(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let spans = self.spans(runs, self.body_style());
        self.flow(&spans, t.margin, t.content_width());
        self.canvas.gap(t.paragraph_gap);
        Ok(())
    }

    fn list_item(
        &mut self,
        marker: ListMarker,
        depth: usize,
        runs: &[RenderedRun],
    ) -> Result<(), RenderError> {
        let t = self.typography;
        let base = self.body_style();
        let marker_x = t.margin + t.list_indent * depth as f32;
        let text_x = marker_x + t.list_indent;
        let width = t.content_width() - (text_x - t.margin);

        let label = marker.label();
        let marker_span = (!label.is_empty()).then(|| Span::new(format!("{} ", label), base));
        let spans = self.spans(runs, base);
        let mut lines = break_lines(&spans, width);
        if lines.is_empty() && marker_span.is_some() {
            lines.push(Line::default());
        }

        for (i, line) in lines.iter().enumerate() {
            let lh = self.line_height(line, base.size);
            self.canvas.ensure_space(lh);
            let size = line.max_size().max(base.size);
            let baseline = Self::baseline(self.canvas.cursor_y(), lh, size);
            match (&marker_span, i) {
                (Some(m), 0) => self.canvas.show_text(
                    baseline,
                    &[(marker_x, std::slice::from_ref(m)), (text_x, &line.spans[..])],
                ),
                _ => self.canvas.show_text(baseline, &[(text_x, &line.spans[..])]),
            }
            self.canvas.advance(lh);
        }
        self.canvas.gap(t.list_item_gap);
        Ok(())
    }

    fn quote(&mut self, runs: &[RenderedRun]) -> Result<(), RenderError> {
        let t = self.typography;
        let base = TextStyle::new(t.body_font.with_italic(true), t.body_size, t.quote_color);
        let spans = self.spans(runs, base);
        let text_x = t.margin + t.quote_indent;
        let width = t.content_width() - t.quote_indent;

        for line in break_lines(&spans, width) {
            let lh = self.line_height(&line, base.size);
            self.canvas.ensure_space(lh);
            let top = self.canvas.cursor_y();
            self.canvas
                .fill_rect(t.margin + 4.0, top, t.quote_bar_width, lh, t.accent_color);
            let baseline = Self::baseline(top, lh, line.max_size());
            self.canvas.show_text(baseline, &[(text_x, &line.spans[..])]);
            self.canvas.advance(lh);
        }
        self.canvas.gap(t.paragraph_gap);
        Ok(())
    }

    fn code(&mut self, content: &str, _info: Option<&str>) -> Result<(), RenderError> {
        let t = self.typography;
        let style = TextStyle::new(t.code_font, t.code_size, t.text_color);
        let pad = t.code_padding;
        let lh = t.line_height_for(t.code_size);
        let lines = wrap_preformatted(content, style, t.content_width() - 2.0 * pad);

        self.canvas.gap(pad);
        self.canvas.ensure_space(lh + pad);
        let top = self.canvas.cursor_y();
        self.canvas
            .fill_rect(t.margin, top, t.content_width(), pad, t.code_background);
        self.canvas.advance(pad);

        for text in lines {
            self.canvas.ensure_space(lh);
            let top = self.canvas.cursor_y();
            self.canvas
                .fill_rect(t.margin, top, t.content_width(), lh, t.code_background);
            if !text.trim().is_empty() {
                let span = [Span::new(text, style)];
                let baseline = Self::baseline(top, lh, style.size);
                self.canvas.show_text(baseline, &[(t.margin + pad, &span[..])]);
            }
            self.canvas.advance(lh);
        }

        let bottom = self.canvas.cursor_y();
        self.canvas
            .fill_rect(t.margin, bottom, t.content_width(), pad, t.code_background);
        self.canvas.advance(pad);
        self.canvas.gap(t.paragraph_gap);
        Ok(())
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        let t = self.typography;
        self.canvas.gap(t.rule_gap);
        self.canvas.ensure_space(1.0);
        let y = self.canvas.cursor_y();
        self.canvas.stroke_line(
            (t.margin, y),
            (t.margin + t.content_width(), y),
            1.0,
            t.rule_color,
        );
        self.canvas.advance(1.0);
        self.canvas.gap(t.rule_gap);
        Ok(())
    }

    fn begin_list(&mut self, _kind: ListKind, depth: usize) -> Result<(), RenderError> {
        if depth == 0 {
            self.canvas.gap(self.typography.list_gap);
        }
        Ok(())
    }

    fn end_list(&mut self, _kind: ListKind, depth: usize) -> Result<(), RenderError> {
        if depth == 0 {
            self.canvas.gap(self.typography.paragraph_gap);
        }
        Ok(())
    }
}
