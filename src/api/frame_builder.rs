use crate::core::{Axis, PlotRect, Series, SeriesStyle, TickLevel};
use crate::error::GraphResult;
use crate::render::{
    DrawLayer, LinePrimitive, PolylinePrimitive, Primitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TextVAlign,
};

use super::graph::Graph;
use super::graph_config::RenderSettings;

impl<R: Renderer> Graph<R> {
    /// Materializes the scene for the current viewport and axis layout.
    ///
    /// Paint order: minor grid, major grid, tick marks, tick labels, series,
    /// plot border.
    pub fn build_render_frame(&self) -> GraphResult<RenderFrame> {
        let plot = PlotRect::inside(self.viewport, self.settings.margins)?;
        let mut frame = RenderFrame::new(self.viewport);

        if self.settings.grid_visible {
            push_grid(&mut frame, &self.settings, plot, &self.x_axis, &self.y_axis);
        }
        push_tick_marks(&mut frame, &self.settings, plot, &self.x_axis, &self.y_axis);
        push_tick_labels(&mut frame, &self.settings, plot, &self.x_axis, &self.y_axis);

        let defaults = self.settings.default_series_style();
        for series in self.series.values() {
            push_series(&mut frame, series, defaults, &self.x_axis, &self.y_axis);
        }

        frame.push(
            DrawLayer::Border,
            Primitive::Rect(RectPrimitive::outline(
                plot.x0,
                plot.y0,
                plot.width(),
                plot.height(),
                self.settings.axis_width,
                self.settings.axis_color,
            )),
        );
        Ok(frame)
    }
}

fn grid_layer(level: TickLevel) -> DrawLayer {
    match level {
        TickLevel::Major => DrawLayer::MajorGrid,
        TickLevel::Minor => DrawLayer::MinorGrid,
    }
}

fn push_grid(
    frame: &mut RenderFrame,
    settings: &RenderSettings,
    plot: PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    for level in TickLevel::PAINT_ORDER {
        let color = *settings.grid_color.get(level);
        let width = *settings.grid_width.get(level);
        let layer = grid_layer(level);

        for &tick in x_axis.ticks(level) {
            let x = x_axis.project(tick);
            frame.push_line(layer, LinePrimitive::new(x, plot.y0, x, plot.y1, width, color));
        }
        for &tick in y_axis.ticks(level) {
            let y = y_axis.project(tick);
            frame.push_line(layer, LinePrimitive::new(plot.x0, y, plot.x1, y, width, color));
        }
    }
}

/// Tick marks point inward from all four plot edges.
fn push_tick_marks(
    frame: &mut RenderFrame,
    settings: &RenderSettings,
    plot: PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    let color = settings.tick_color;
    let width = settings.tick_width;

    for level in TickLevel::PAINT_ORDER {
        let length = *settings.tick_length.get(level);
        if length <= 0.0 {
            continue;
        }

        for &tick in x_axis.ticks(level) {
            let x = x_axis.project(tick);
            frame.push_line(
                DrawLayer::TickMarks,
                LinePrimitive::new(x, plot.y0, x, plot.y0 + length, width, color),
            );
            frame.push_line(
                DrawLayer::TickMarks,
                LinePrimitive::new(x, plot.y1, x, plot.y1 - length, width, color),
            );
        }
        for &tick in y_axis.ticks(level) {
            let y = y_axis.project(tick);
            frame.push_line(
                DrawLayer::TickMarks,
                LinePrimitive::new(plot.x0, y, plot.x0 + length, y, width, color),
            );
            frame.push_line(
                DrawLayer::TickMarks,
                LinePrimitive::new(plot.x1, y, plot.x1 - length, y, width, color),
            );
        }
    }
}

fn push_tick_labels(
    frame: &mut RenderFrame,
    settings: &RenderSettings,
    plot: PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    let offset = settings.tick_label_offset;

    for &tick in x_axis.ticks(TickLevel::Major) {
        push_label(
            frame,
            settings,
            x_axis.tick_text(tick),
            (x_axis.project(tick), plot.y1 + offset),
            (TextHAlign::Center, TextVAlign::Top),
        );
    }
    for &tick in y_axis.ticks(TickLevel::Major) {
        push_label(
            frame,
            settings,
            y_axis.tick_text(tick),
            (plot.x0 - offset, y_axis.project(tick)),
            (TextHAlign::Right, TextVAlign::Middle),
        );
    }
}

fn push_label(
    frame: &mut RenderFrame,
    settings: &RenderSettings,
    text: String,
    (x, y): (f64, f64),
    (h_align, v_align): (TextHAlign, TextVAlign),
) {
    // Formatters may legitimately return "" to hide a label.
    if text.is_empty() {
        return;
    }
    frame.push_text(
        DrawLayer::TickLabels,
        TextPrimitive::new(
            text,
            x,
            y,
            settings.tick_font.clone(),
            settings.tick_text_color,
            h_align,
            v_align,
        ),
    );
}

/// Pushes one polyline per run of projectable samples.
fn push_series(
    frame: &mut RenderFrame,
    series: &Series,
    defaults: SeriesStyle,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    let style = series.style();
    let color = style.color.or(defaults.color);
    let width = style.line_width.or(defaults.line_width);
    let (Some(color), Some(width)) = (color, width) else {
        return;
    };

    let mut run: Vec<(f64, f64)> = Vec::new();
    for (x, y) in series.points() {
        if x_axis.can_project(x) && y_axis.can_project(y) {
            run.push((x_axis.project(x), y_axis.project(y)));
        } else if !run.is_empty() {
            frame.push(
                DrawLayer::Series,
                Primitive::Polyline(PolylinePrimitive::new(std::mem::take(&mut run), width, color)),
            );
        }
    }
    if !run.is_empty() {
        frame.push(
            DrawLayer::Series,
            Primitive::Polyline(PolylinePrimitive::new(run, width, color)),
        );
    }
}
