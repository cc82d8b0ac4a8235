//! GTK4 embedding: a `DrawingArea` that hosts one [`Graph`].
//!
//! GTK resize signals are forwarded into the graph's [`ContainerHost`] and
//! handled immediately; the area's draw callback paints through the Cairo
//! backend.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{ContainerHost, ContainerSize, Graph};
use crate::render::{CairoContextRenderer, Renderer};

pub struct GtkGraphAdapter<R: Renderer> {
    area: gtk::DrawingArea,
    container: ContainerHost,
    graph: Rc<RefCell<Graph<R>>>,
}

impl<R> GtkGraphAdapter<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    /// Wraps a graph built against `container` in a new drawing area.
    #[must_use]
    pub fn new(graph: Graph<R>, container: ContainerHost) -> Self {
        let area = gtk::DrawingArea::new();
        let graph = Rc::new(RefCell::new(graph));
        sync_content_height(&area, &graph.borrow());

        let draw_graph = Rc::clone(&graph);
        area.set_draw_func(move |_, context, _, _| {
            if let Err(err) = draw_graph.borrow_mut().draw_on_cairo_context(context) {
                warn!(error = %err, "graph draw failed");
            }
        });

        let resize_graph = Rc::clone(&graph);
        let resize_container = container.clone();
        area.connect_resize(move |area, width, height| {
            resize_container.resize(ContainerSize::new(f64::from(width), f64::from(height)));
            let mut graph = resize_graph.borrow_mut();
            if let Err(err) = graph.process_resize_notifications() {
                warn!(error = %err, width, height, "graph resize failed");
                return;
            }
            sync_content_height(area, &graph);
            area.queue_draw();
        });

        Self {
            area,
            container,
            graph,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn container(&self) -> &ContainerHost {
        &self.container
    }

    #[must_use]
    pub fn graph(&self) -> Rc<RefCell<Graph<R>>> {
        Rc::clone(&self.graph)
    }
}

/// With an aspect ratio the surface height follows the width.
fn sync_content_height<R: Renderer>(area: &gtk::DrawingArea, graph: &Graph<R>) {
    if graph.settings().aspect_ratio.is_none() {
        return;
    }
    let height = i32::try_from(graph.viewport().height).unwrap_or(i32::MAX);
    if area.content_height() != height {
        area.set_content_height(height);
    }
}
