use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Axis, AxisConfig, AxisKind, PlotRect, Series, TickLabelFormatterFn, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::render::{RenderFrame, Renderer};

use super::container::{ContainerHost, ContainerSize, ResizeSubscription};
use super::graph_config::{GraphConfig, RenderSettings};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// A line chart bound to one drawing surface and one host container.
///
/// The graph owns its series, both axes and the renderer. Data-space state
/// (axis ranges) is derived when the series are set; resizing only moves the
/// axes onto new pixel spans and redraws.
pub struct Graph<R: Renderer> {
    pub(super) renderer: R,
    pub(super) subscription: ResizeSubscription,
    pub(super) series: IndexMap<String, Series>,
    pub(super) settings: RenderSettings,
    pub(super) x_axis: Axis,
    pub(super) y_axis: Axis,
    pub(super) viewport: Viewport,
}

impl<R: Renderer> Graph<R> {
    /// Builds the graph, subscribes to `container` and performs the first
    /// resize-and-draw pass.
    pub fn new(
        renderer: R,
        container: &ContainerHost,
        series: Vec<Series>,
        config: GraphConfig,
    ) -> GraphResult<Self> {
        config.validate()?;
        let GraphConfig {
            settings,
            x_axis,
            y_axis,
        } = config;

        let viewport = surface_viewport(container.size(), settings.aspect_ratio)?;
        let plot = PlotRect::inside(viewport, settings.margins)?;
        let series = index_series(series)?;
        let (x_axis, y_axis) = build_axes(&series, x_axis, y_axis, plot)?;

        debug!(
            series = series.len(),
            x_range = ?x_axis.data_range(),
            y_range = ?y_axis.data_range(),
            "graph constructed"
        );

        let mut graph = Self {
            renderer,
            subscription: container.subscribe(),
            series,
            settings,
            x_axis,
            y_axis,
            viewport,
        };
        graph.resize()?;
        Ok(graph)
    }

    /// Re-reads the container size, derives the surface size and redraws.
    pub fn resize(&mut self) -> GraphResult<()> {
        let size = self.subscription.container_size()?;
        let viewport = surface_viewport(size, self.settings.aspect_ratio)?;
        debug!(
            container_width = size.width,
            container_height = size.height,
            surface_width = viewport.width,
            surface_height = viewport.height,
            "graph resized"
        );
        self.viewport = viewport;
        self.draw()
    }

    /// Runs one [`Graph::resize`] per notification queued since the last
    /// call and returns how many were handled.
    pub fn process_resize_notifications(&mut self) -> GraphResult<usize> {
        let pending = self.subscription.take_pending()?;
        for _ in 0..pending {
            self.resize()?;
        }
        Ok(pending)
    }

    /// Lays the axes out on the current surface and renders one frame.
    pub fn draw(&mut self) -> GraphResult<()> {
        let frame = self.layout_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the current frame into an external cairo context, as done
    /// from GTK draw callbacks.
    #[cfg(feature = "cairo-backend")]
    pub fn draw_on_cairo_context(&mut self, context: &cairo::Context) -> GraphResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.layout_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    fn layout_frame(&mut self) -> GraphResult<RenderFrame> {
        let plot = PlotRect::inside(self.viewport, self.settings.margins)?;
        self.x_axis.set_pixel_range(plot.x0, plot.x1)?;
        self.y_axis.set_pixel_range(plot.y1, plot.y0)?;
        self.build_render_frame()
    }

    /// Replaces every series and rebuilds both axes from the new data.
    ///
    /// Custom tick formatters survive the rebuild. On error the previous
    /// data and axes are kept.
    pub fn set_series(&mut self, series: Vec<Series>) -> GraphResult<()> {
        let plot = PlotRect::inside(self.viewport, self.settings.margins)?;
        let series = index_series(series)?;
        let (mut x_axis, mut y_axis) =
            build_axes(&series, self.x_axis.config(), self.y_axis.config(), plot)?;

        if let Some(formatter) = self.x_axis.tick_formatter() {
            x_axis.set_tick_formatter(formatter);
        }
        if let Some(formatter) = self.y_axis.tick_formatter() {
            y_axis.set_tick_formatter(formatter);
        }

        debug!(
            series = series.len(),
            x_range = ?x_axis.data_range(),
            y_range = ?y_axis.data_range(),
            "graph series replaced"
        );
        self.series = series;
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self.draw()
    }

    pub fn set_tick_formatter(&mut self, axis: AxisKind, formatter: TickLabelFormatterFn) {
        self.axis_mut(axis).set_tick_formatter(formatter);
    }

    pub fn clear_tick_formatter(&mut self, axis: AxisKind) {
        self.axis_mut(axis).clear_tick_formatter();
    }

    fn axis_mut(&mut self, axis: AxisKind) -> &mut Axis {
        match axis {
            AxisKind::X => &mut self.x_axis,
            AxisKind::Y => &mut self.y_axis,
        }
    }

    #[must_use]
    pub fn axis(&self, axis: AxisKind) -> &Axis {
        match axis {
            AxisKind::X => &self.x_axis,
            AxisKind::Y => &self.y_axis,
        }
    }

    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn series_iter(&self) -> impl Iterator<Item = &Series> + '_ {
        self.series.values()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Surface size used by the last resize.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Releases the resize subscription and hands back the renderer.
    #[must_use]
    pub fn dispose(mut self) -> R {
        self.subscription.release();
        self.renderer
    }
}

/// Surface size for a container: full width, and either `width * ratio` or
/// the container height.
pub(super) fn surface_viewport(
    size: ContainerSize,
    aspect_ratio: Option<f64>,
) -> GraphResult<Viewport> {
    let height = match aspect_ratio {
        Some(ratio) => size.width * ratio,
        None => size.height,
    };
    let width = pixel_dimension(size.width);
    let height = pixel_dimension(height);
    match (width, height) {
        (Some(width), Some(height)) => Ok(Viewport::new(width, height)),
        _ => Err(GraphError::InvalidViewport {
            width: width.unwrap_or(0),
            height: height.unwrap_or(0),
        }),
    }
}

fn pixel_dimension(value: f64) -> Option<u32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= 1.0 && rounded <= f64::from(u32::MAX) {
        Some(rounded as u32)
    } else {
        None
    }
}

fn index_series(series: Vec<Series>) -> GraphResult<IndexMap<String, Series>> {
    let mut indexed = IndexMap::with_capacity(series.len());
    for entry in series {
        entry.validate()?;
        let name = entry.name().to_owned();
        if indexed.contains_key(&name) {
            return Err(GraphError::InvalidData(format!(
                "duplicate series name `{name}`"
            )));
        }
        indexed.insert(name, entry);
    }
    Ok(indexed)
}

fn build_axes(
    series: &IndexMap<String, Series>,
    x_config: AxisConfig,
    y_config: AxisConfig,
    plot: PlotRect,
) -> GraphResult<(Axis, Axis)> {
    let x_samples = series.values().flat_map(|s| s.x().iter().copied());
    let y_samples = series.values().flat_map(|s| s.y().iter().copied());
    let x_axis = Axis::from_samples(AxisKind::X, x_config, x_samples, plot.x0, plot.x1)?;
    let y_axis = Axis::from_samples(AxisKind::Y, y_config, y_samples, plot.y1, plot.y0)?;
    Ok((x_axis, y_axis))
}
