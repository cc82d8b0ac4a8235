use std::sync::Arc;

use meteor_graph::api::{ContainerHost, ContainerSize, Graph, GraphConfig, RenderSettings};
use meteor_graph::core::{AxisConfig, AxisKind, Series, SeriesStyle, TickLevel, Viewport};
use meteor_graph::render::{
    Color, DrawLayer, NullRenderer, Primitive, RenderFrame, Renderer, TextHAlign, TextVAlign,
};
use meteor_graph::{GraphError, GraphResult};

fn container() -> ContainerHost {
    ContainerHost::new(ContainerSize::new(800.0, 400.0))
}

fn sample_series() -> Vec<Series> {
    vec![
        Series::from_points("rise", [(3.0, 1.0), (12.0, 4.0), (27.0, 9.0)]).expect("series"),
        Series::from_points("fall", [(5.0, 8.0), (20.0, 2.0)]).expect("series"),
    ]
}

fn graph() -> Graph<NullRenderer> {
    Graph::new(
        NullRenderer::default(),
        &container(),
        sample_series(),
        GraphConfig::default(),
    )
    .expect("graph init")
}

fn tick_count(graph: &Graph<NullRenderer>, level: TickLevel) -> usize {
    graph.x_axis().ticks(level).len() + graph.y_axis().ticks(level).len()
}

#[test]
fn construction_draws_one_frame_at_container_width() {
    let graph = graph();
    let renderer = graph.renderer();

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_viewport, Some(Viewport::new(800, 400)));
    assert_eq!(graph.viewport(), Viewport::new(800, 400));
    assert_eq!(graph.series_count(), 2);
    assert!(graph.series("fall").is_some());
}

#[test]
fn frame_layers_follow_paint_order() {
    let frame = graph().build_render_frame().expect("frame");

    assert!(frame.is_layer_ordered());
    assert!(matches!(
        frame.commands().first().map(|command| command.layer),
        Some(DrawLayer::MinorGrid)
    ));
    assert!(matches!(
        frame.commands().last().map(|command| command.layer),
        Some(DrawLayer::Border)
    ));
    assert_eq!(frame.layer_len(DrawLayer::Border), 1);
}

#[test]
fn grid_and_tick_marks_cover_both_levels() {
    let graph = graph();
    let frame = graph.build_render_frame().expect("frame");

    assert_eq!(
        frame.layer_len(DrawLayer::MinorGrid),
        tick_count(&graph, TickLevel::Minor)
    );
    assert_eq!(
        frame.layer_len(DrawLayer::MajorGrid),
        tick_count(&graph, TickLevel::Major)
    );
    // One mark per tick on each of the two edges facing the axis.
    assert_eq!(
        frame.layer_len(DrawLayer::TickMarks),
        2 * (tick_count(&graph, TickLevel::Major) + tick_count(&graph, TickLevel::Minor))
    );
}

#[test]
fn hidden_grid_emits_no_grid_lines() {
    let config = GraphConfig {
        settings: RenderSettings {
            grid_visible: false,
            ..RenderSettings::default()
        },
        ..GraphConfig::default()
    };
    let graph = Graph::new(NullRenderer::default(), &container(), sample_series(), config)
        .expect("graph init");
    let frame = graph.build_render_frame().expect("frame");

    assert_eq!(frame.layer_len(DrawLayer::MinorGrid), 0);
    assert_eq!(frame.layer_len(DrawLayer::MajorGrid), 0);
    assert!(frame.layer_len(DrawLayer::TickMarks) > 0);
}

#[test]
fn labels_sit_outside_the_plot_for_major_ticks_only() {
    let graph = graph();
    let frame = graph.build_render_frame().expect("frame");
    let texts: Vec<_> = frame.texts().collect();

    assert_eq!(texts.len(), tick_count(&graph, TickLevel::Major));

    let x_labels: Vec<_> = texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .collect();
    assert_eq!(x_labels.len(), graph.x_axis().ticks(TickLevel::Major).len());
    assert!(
        x_labels
            .iter()
            .all(|text| text.y == 348.0 && text.v_align == TextVAlign::Top)
    );

    let y_labels: Vec<_> = texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Right)
        .collect();
    assert_eq!(y_labels.len(), graph.y_axis().ticks(TickLevel::Major).len());
    assert!(
        y_labels
            .iter()
            .all(|text| text.x == 52.0 && text.v_align == TextVAlign::Middle)
    );
    assert!(y_labels.iter().any(|text| text.text == "4"));
}

#[test]
fn border_matches_plot_rectangle() {
    let frame = graph().build_render_frame().expect("frame");
    let border = frame.layer(DrawLayer::Border).next().expect("border");
    let Primitive::Rect(rect) = border else {
        panic!("border must be a rectangle");
    };

    assert_eq!((rect.x, rect.y), (60.0, 20.0));
    assert_eq!((rect.width, rect.height), (720.0, 320.0));
    assert_eq!(rect.fill_color, None);
}

#[test]
fn series_style_overrides_defaults() {
    let blue = Color::rgb(0.0, 0.0, 1.0);
    let styled = Series::from_points("styled", [(0.0, 0.0), (10.0, 10.0)])
        .expect("series")
        .with_style(SeriesStyle::default().with_color(blue))
        .expect("style");
    let plain = Series::from_points("plain", [(0.0, 5.0), (10.0, 5.0)]).expect("series");

    let graph = Graph::new(
        NullRenderer::default(),
        &container(),
        vec![styled, plain],
        GraphConfig::default(),
    )
    .expect("graph init");
    let frame = graph.build_render_frame().expect("frame");
    let polylines: Vec<_> = frame.polylines().collect();

    assert_eq!(polylines.len(), 2);
    assert_eq!(polylines[0].color, blue);
    assert_eq!(polylines[0].stroke_width, 2.0);
    assert_eq!(polylines[1].color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(polylines[1].points.len(), 2);
}

#[test]
fn unprojectable_samples_split_the_polyline() {
    let series = Series::new(
        "decades",
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec![1.0, 10.0, 0.0, 100.0, 1000.0],
    )
    .expect("series");
    let config = GraphConfig {
        y_axis: AxisConfig::logarithmic(),
        ..GraphConfig::default()
    };
    let graph = Graph::new(NullRenderer::default(), &container(), vec![series], config)
        .expect("graph init");

    assert!(graph.y_axis().is_logarithmic());
    assert_eq!(graph.y_axis().data_range(), (1.0, 1000.0));

    let frame = graph.build_render_frame().expect("frame");
    let runs: Vec<usize> = frame.polylines().map(|polyline| polyline.points.len()).collect();
    assert_eq!(runs, vec![2, 2]);
}

#[test]
fn duplicate_series_names_are_rejected() {
    let series = vec![
        Series::from_points("same", [(0.0, 0.0)]).expect("series"),
        Series::from_points("same", [(1.0, 1.0)]).expect("series"),
    ];
    let err = Graph::new(
        NullRenderer::default(),
        &container(),
        series,
        GraphConfig::default(),
    )
    .err()
    .expect("duplicate names must fail");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn graph_without_samples_declines_to_render() {
    let err = Graph::new(
        NullRenderer::default(),
        &container(),
        Vec::new(),
        GraphConfig::default(),
    )
    .err()
    .expect("empty data must fail");
    assert!(matches!(err, GraphError::EmptyData { axis: AxisKind::X }));
}

#[test]
fn set_series_rebuilds_axes_and_keeps_formatters() {
    let mut graph = graph();
    graph.set_tick_formatter(AxisKind::X, Arc::new(|value: f64| format!("{value}s")));

    graph
        .set_series(vec![
            Series::from_points("late", [(100.0, 1.0), (870.0, 2.0)]).expect("series"),
        ])
        .expect("replace series");

    assert_eq!(graph.x_axis().data_range(), (100.0, 870.0));
    assert_eq!(graph.x_axis().range(), (100.0, 900.0));
    assert_eq!(graph.series_count(), 1);
    assert_eq!(graph.renderer().frames_rendered, 2);

    let frame = graph.build_render_frame().expect("frame");
    assert!(
        frame
            .texts()
            .filter(|text| text.h_align == TextHAlign::Center)
            .all(|text| text.text.ends_with('s'))
    );
}

#[derive(Debug, Default)]
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _frame: &RenderFrame) -> GraphResult<()> {
        Err(GraphError::Backend("surface lost".to_owned()))
    }
}

#[test]
fn renderer_failures_surface_to_the_caller() {
    let err = Graph::new(
        FailingRenderer,
        &container(),
        sample_series(),
        GraphConfig::default(),
    )
    .err()
    .expect("backend failure must propagate");
    assert!(matches!(err, GraphError::Backend(_)));
}
