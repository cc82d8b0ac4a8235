use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};
use crate::render::{
    Color, LinePrimitive, PolylinePrimitive, Primitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`, which
///   recreates the surface whenever the frame viewport changes size
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GraphResult<Self> {
        Ok(Self {
            surface: create_surface(width, height)?,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> GraphResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn ensure_surface_size(&mut self, viewport: Viewport) -> GraphResult<()> {
        let width = surface_dimension(viewport.width)?;
        let height = surface_dimension(viewport.height)?;
        if self.surface.width() != width || self.surface.height() != height {
            self.surface = create_surface(width, height)?;
        }
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for command in frame.commands() {
            match &command.primitive {
                Primitive::Line(line) => {
                    stroke_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                Primitive::Polyline(polyline) => {
                    stroke_polyline(context, polyline)?;
                    stats.polylines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    draw_rect(context, rect)?;
                    stats.rects_drawn += 1;
                }
                Primitive::Text(text) => {
                    show_text(context, text);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        self.ensure_surface_size(frame.viewport)?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()> {
        self.render_with_context(context, frame)
    }
}

fn create_surface(width: i32, height: i32) -> GraphResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(GraphError::Backend(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn surface_dimension(value: u32) -> GraphResult<i32> {
    i32::try_from(value)
        .map_err(|_| GraphError::Backend(format!("surface dimension {value} exceeds i32")))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> GraphResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn stroke_polyline(context: &Context, polyline: &PolylinePrimitive) -> GraphResult<()> {
    let Some((&(first_x, first_y), rest)) = polyline.points.split_first() else {
        return Ok(());
    };
    apply_color(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context.move_to(first_x, first_y);
    for &(x, y) in rest {
        context.line_to(x, y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke polyline", err))
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> GraphResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    if let Some(fill) = rect.fill_color {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
    }
    if rect.border_width > 0.0 {
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
    } else {
        context.new_path();
    }
    Ok(())
}

fn show_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::new();
    font_description.set_family(&text.font.family);
    font_description.set_absolute_size(text.font.size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = match text.v_align {
        TextVAlign::Top => text.y,
        TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
        TextVAlign::Bottom => text.y - f64::from(text_height),
    };

    apply_color(context, text.color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GraphError {
    GraphError::Backend(format!("{prefix}: {err}"))
}
