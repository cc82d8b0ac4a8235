use std::sync::Arc;

use approx::assert_relative_eq;
use meteor_graph::GraphError;
use meteor_graph::core::{Axis, AxisConfig, AxisKind, DataExtent, TickLevel};

fn linear_axis(samples: &[f64], pixel_end: f64) -> Axis {
    Axis::from_samples(
        AxisKind::X,
        AxisConfig::default(),
        samples.iter().copied(),
        0.0,
        pixel_end,
    )
    .expect("linear axis")
}

fn log_axis(samples: &[f64], pixel_end: f64) -> Axis {
    Axis::from_samples(
        AxisKind::X,
        AxisConfig::logarithmic(),
        samples.iter().copied(),
        0.0,
        pixel_end,
    )
    .expect("log axis")
}

#[test]
fn auto_range_rounds_to_data_order_of_magnitude() {
    let axis = linear_axis(&[3.0, 27.0], 300.0);

    assert_eq!(axis.data_range(), (3.0, 27.0));
    assert_eq!(axis.range(), (0.0, 30.0));
    assert_eq!(axis.ticks(TickLevel::Major), &[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(
        axis.ticks(TickLevel::Minor),
        &[0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]
    );
}

#[test]
fn auto_range_handles_negative_and_fractional_data() {
    let axis = linear_axis(&[-0.37, 0.82], 400.0);
    let (min, max) = axis.range();
    assert_relative_eq!(min, -1.0, epsilon = 1e-12);
    assert_relative_eq!(max, 1.0, epsilon = 1e-12);

    let axis = linear_axis(&[0.12, 0.47], 400.0);
    let (min, max) = axis.range();
    assert_relative_eq!(min, 0.1, epsilon = 1e-12);
    assert_relative_eq!(max, 0.5, epsilon = 1e-12);
}

#[test]
fn ticks_max_caps_both_levels() {
    let config = AxisConfig {
        ticks_max: 5,
        ..AxisConfig::default()
    };
    let axis = Axis::from_samples(AxisKind::X, config, [0.0, 1000.0], 0.0, 2000.0)
        .expect("capped axis");

    assert_eq!(axis.range(), (0.0, 1000.0));
    let majors = axis.ticks(TickLevel::Major);
    assert!(!majors.is_empty());
    assert!(majors.len() <= 5, "majors: {majors:?}");
    assert!(axis.ticks(TickLevel::Minor).len() <= 5);
}

#[test]
fn minor_ticks_land_on_every_major_tick() {
    let axis = linear_axis(&[-12.0, 87.0], 640.0);
    let minors = axis.ticks(TickLevel::Minor);
    assert!(!minors.is_empty());
    for &major in axis.ticks(TickLevel::Major) {
        let target = axis.project(major);
        assert!(
            minors
                .iter()
                .any(|&minor| (axis.project(minor) - target).abs() < 1.0),
            "major {major} has no aligned minor tick"
        );
    }
}

#[test]
fn log_axis_snaps_to_decades() {
    let axis = log_axis(&[1.0, 1000.0], 300.0);

    assert!(axis.is_logarithmic());
    assert_eq!(axis.range(), (1.0, 1000.0));

    let majors = axis.ticks(TickLevel::Major);
    let expected = [1.0, 10.0, 100.0, 1000.0];
    assert_eq!(majors.len(), expected.len());
    for (actual, expected) in majors.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, max_relative = 1e-12);
    }

    // Dense 1..9 mantissas per decade plus the closing 1000.
    assert_eq!(axis.ticks(TickLevel::Minor).len(), 28);
}

#[test]
fn dense_log_minors_are_rejected_when_far_over_target() {
    let axis = log_axis(&[1.0, 1e6], 300.0);
    assert_eq!(axis.range(), (1.0, 1e6));

    let majors = axis.ticks(TickLevel::Major);
    let expected = [1.0, 1e2, 1e4, 1e6];
    assert_eq!(majors.len(), expected.len());
    for (actual, expected) in majors.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, max_relative = 1e-12);
    }

    // 55 dense ticks exceed three times the 11-tick target; one per decade remains.
    let minors = axis.ticks(TickLevel::Minor);
    assert_eq!(minors.len(), 7);
    for (index, actual) in minors.iter().enumerate() {
        assert_relative_eq!(*actual, 10_f64.powi(index as i32), max_relative = 1e-12);
    }
}

#[test]
fn base_two_log_axis_ticks_whole_powers_of_two() {
    let config = AxisConfig {
        log_base: 2,
        ..AxisConfig::logarithmic()
    };
    let axis = Axis::from_samples(AxisKind::X, config, [1.0, 1024.0], 0.0, 740.0)
        .expect("base-2 log axis");

    assert!(axis.is_logarithmic());
    assert_eq!(axis.range(), (1.0, 1024.0));

    let majors = axis.ticks(TickLevel::Major);
    let expected = [1.0, 4.0, 16.0, 64.0, 256.0, 1024.0];
    assert_eq!(majors.len(), expected.len());
    for (actual, expected) in majors.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, max_relative = 1e-12);
    }

    let minors = axis.ticks(TickLevel::Minor);
    assert_eq!(minors.len(), 11);
    for &tick in majors.iter().chain(minors) {
        let exponent = tick.log2();
        assert_relative_eq!(exponent, exponent.round(), epsilon = 1e-9);
    }
}

#[test]
fn log_auto_range_falls_back_to_powers_of_base() {
    let axis = log_axis(&[3.0, 470.0], 300.0);
    assert_eq!(axis.range(), (1.0, 1000.0));
    assert!(axis.is_logarithmic());
}

#[test]
fn log_axis_with_small_ratio_is_drawn_linearly() {
    let axis = log_axis(&[2.0, 5.0], 300.0);

    assert_eq!(axis.range(), (2.0, 5.0));
    assert!(!axis.is_logarithmic());
    assert!(!axis.ticks(TickLevel::Major).is_empty());
    assert_relative_eq!(axis.project(3.5), 150.0, epsilon = 1e-9);
}

#[test]
fn log_axis_excludes_non_positive_samples() {
    let axis = log_axis(&[-5.0, 0.0, 2.0, 200.0], 300.0);
    assert_eq!(axis.data_range(), (2.0, 200.0));
}

#[test]
fn overflowing_data_span_is_invalid_data() {
    let err = Axis::from_samples(
        AxisKind::X,
        AxisConfig::default(),
        [-1e308, 1e308],
        0.0,
        300.0,
    )
    .expect_err("span overflows");
    assert!(matches!(err, GraphError::InvalidData(_)), "{err}");
}

#[test]
fn axis_without_usable_samples_is_empty_data() {
    let err = Axis::from_samples(
        AxisKind::Y,
        AxisConfig::logarithmic(),
        [-1.0, 0.0, f64::NAN],
        0.0,
        300.0,
    )
    .expect_err("no positive samples");
    assert!(matches!(err, GraphError::EmptyData { axis: AxisKind::Y }));

    let err = Axis::from_samples(
        AxisKind::X,
        AxisConfig::default(),
        std::iter::empty::<f64>(),
        0.0,
        300.0,
    )
    .expect_err("no samples");
    assert!(matches!(err, GraphError::EmptyData { axis: AxisKind::X }));
}

#[test]
fn degenerate_extent_is_widened() {
    let axis = linear_axis(&[5.0, 5.0], 300.0);
    assert_eq!(axis.data_range(), (5.0, 6.0));
    assert_eq!(axis.range(), (5.0, 6.0));

    let axis = log_axis(&[5.0], 300.0);
    assert_eq!(axis.data_range(), (5.0, 50.0));
    assert_eq!(axis.range(), (1.0, 100.0));
}

#[test]
fn projection_maps_bounds_onto_pixel_span() {
    let axis = linear_axis(&[3.0, 27.0], 300.0);
    assert_relative_eq!(axis.project(0.0), 0.0);
    assert_relative_eq!(axis.project(30.0), 300.0);
    assert_relative_eq!(axis.project(15.0), 150.0);

    let inverted = Axis::from_samples(AxisKind::Y, AxisConfig::default(), [3.0, 27.0], 300.0, 0.0)
        .expect("inverted axis");
    assert_relative_eq!(inverted.project(0.0), 300.0);
    assert_relative_eq!(inverted.project(30.0), 0.0);
}

#[test]
fn log_projection_rejects_non_positive_values() {
    let axis = log_axis(&[1.0, 1000.0], 300.0);
    assert_relative_eq!(axis.project(10.0), 100.0, epsilon = 1e-9);
    assert!(axis.project(0.0).is_nan() || axis.project(0.0).is_infinite());
    assert!(!axis.can_project(-1.0));
    assert!(matches!(
        axis.try_project(-1.0).expect_err("negative on log axis"),
        GraphError::InvalidData(_)
    ));
    assert_relative_eq!(axis.try_project(100.0).expect("positive"), 200.0, epsilon = 1e-9);
}

#[test]
fn pixel_range_change_keeps_data_range() {
    let mut axis = linear_axis(&[3.0, 27.0], 300.0);
    let before = axis.ticks(TickLevel::Major).len();

    axis.set_pixel_range(0.0, 3000.0).expect("wider span");

    assert_eq!(axis.range(), (0.0, 30.0));
    assert_eq!(axis.data_range(), (3.0, 27.0));
    assert!(axis.ticks(TickLevel::Major).len() > before);
    assert_eq!(axis.pixel_range(), (0.0, 3000.0));
}

#[test]
fn tick_text_uses_custom_formatter_when_set() {
    let mut axis = linear_axis(&[3.0, 27.0], 300.0);
    assert_eq!(axis.tick_text(10.0), "10");

    axis.set_tick_formatter(Arc::new(|value: f64| format!("{value}%")));
    assert_eq!(axis.tick_text(10.0), "10%");

    axis.clear_tick_formatter();
    assert_eq!(axis.tick_text(0.1 + 0.2), "0.3");
}

#[test]
fn invalid_axis_inputs_are_rejected() {
    let config = AxisConfig {
        log_base: 1,
        ..AxisConfig::default()
    };
    assert!(matches!(
        Axis::new(AxisKind::X, config, DataExtent::new(0.0, 1.0), 0.0, 100.0)
            .expect_err("base 1"),
        GraphError::InvalidConfig(_)
    ));

    let config = AxisConfig {
        ticks_min: 10,
        ticks_max: 5,
        ..AxisConfig::default()
    };
    assert!(config.validate().is_err());

    assert!(matches!(
        Axis::new(
            AxisKind::X,
            AxisConfig::default(),
            DataExtent::new(0.0, 1.0),
            50.0,
            50.0
        )
        .expect_err("empty pixel span"),
        GraphError::InvalidData(_)
    ));
}
