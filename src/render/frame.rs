use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};
use crate::render::{LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive};

/// Paint layer a command belongs to, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    MinorGrid,
    MajorGrid,
    TickMarks,
    TickLabels,
    Series,
    Border,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> GraphResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    pub primitive: Primitive,
}

/// Backend-agnostic scene for one draw pass.
///
/// Commands are kept in paint order; backends must draw them front to back
/// exactly as listed. The surface is cleared to `viewport` before the first
/// command.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: DrawLayer, primitive: Primitive) {
        self.commands.push(DrawCommand { layer, primitive });
    }

    pub fn push_line(&mut self, layer: DrawLayer, line: LinePrimitive) {
        self.push(layer, Primitive::Line(line));
    }

    pub fn push_text(&mut self, layer: DrawLayer, text: TextPrimitive) {
        self.push(layer, Primitive::Text(text));
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands of one layer, in paint order.
    pub fn layer(&self, layer: DrawLayer) -> impl Iterator<Item = &Primitive> + '_ {
        self.commands
            .iter()
            .filter(move |command| command.layer == layer)
            .map(|command| &command.primitive)
    }

    #[must_use]
    pub fn layer_len(&self, layer: DrawLayer) -> usize {
        self.layer(layer).count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.commands.iter().filter_map(|command| match &command.primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match &command.primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylinePrimitive> + '_ {
        self.commands.iter().filter_map(|command| match &command.primitive {
            Primitive::Polyline(polyline) => Some(polyline),
            _ => None,
        })
    }

    /// True when no command of a higher layer precedes one of a lower layer.
    #[must_use]
    pub fn is_layer_ordered(&self) -> bool {
        self.commands
            .windows(2)
            .all(|pair| pair[0].layer <= pair[1].layer)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if !self.viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            command.primitive.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
