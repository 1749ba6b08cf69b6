use std::net::TcpListener;

use approx::assert_relative_eq;
use blackbox_components::{
    client::{ClientConfig, MeasurementClient},
    interpolation::interpolate,
    pipeline::{PipelineError, Settings, analyzer},
    sampler::sample,
};
use blackbox_core::{Component, Domain};
use blackbox_dev::Builtin;
use integration_tests::serve_and_connect;

#[test]
fn identity_end_to_end() {
    let (_, client) = serve_and_connect(Builtin::Identity.into_fn());
    let domain = Domain::new(-10.0, 10.0).unwrap();

    let sparse = sample(&client, &domain, 100).unwrap();
    assert_eq!(sparse.len(), 100);
    assert_eq!(sparse.x(), sparse.y());

    let dense = interpolate(&sparse, &domain, 500).unwrap();
    assert_eq!(dense.len(), 500);
    for [x, y] in dense.points() {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }

    let approximation = analyzer(&client, Settings::default()).call(domain).unwrap();
    assert_eq!(approximation.curve, dense);
    for (exponent, coefficient) in approximation.polynomial.terms() {
        let expected = if exponent == 1 { 1.0 } else { 0.0 };
        assert_eq!(coefficient.round(), expected, "x^{exponent}");
    }
    assert_eq!(approximation.formula, "y = 1x^1");
}

#[test]
fn cubic_end_to_end() {
    let (_, client) = serve_and_connect(Builtin::Cubic.into_fn());
    let domain = Domain::new(-3.0, 3.0).unwrap();

    let approximation = analyzer(&client, Settings::default()).call(domain).unwrap();

    assert_eq!(approximation.formula, "y = 2x^3 + -5x^1 + 1");
}

#[test]
fn silent_service_fails_with_empty_sample() {
    let (_, client) = serve_and_connect(Builtin::Silent.into_fn());
    let domain = Domain::new(-10.0, 10.0).unwrap();

    let err = analyzer(&client, Settings::default())
        .call(domain)
        .unwrap_err();

    assert!(matches!(err, PipelineError::EmptySample), "got {err:?}");
}

#[test]
fn half_defined_black_box_is_clamped_below_its_support() {
    let (_, client) = serve_and_connect(Builtin::Sqrt.into_fn());
    let domain = Domain::new(-10.0, 10.0).unwrap();

    let approximation = analyzer(&client, Settings::default()).call(domain).unwrap();
    let curve = &approximation.curve;

    // Everything left of the first positive probe takes its value.
    let first_probe: f64 = 10.0 / 99.0;
    let first_value = first_probe.sqrt();
    let clamped: Vec<f64> = curve
        .points()
        .filter(|[x, _]| *x < first_probe)
        .map(|[_, y]| y)
        .collect();
    assert_eq!(clamped.len(), 253);
    for y in clamped {
        assert_relative_eq!(y, first_value, epsilon = 1e-9);
    }
    assert_relative_eq!(curve.y()[499], 10.0_f64.sqrt(), epsilon = 1e-9);
}

#[test]
fn transport_failure_aborts_the_run() {
    let unreachable = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ClientConfig::new("127.0.0.1", unreachable);
    let client = MeasurementClient::new(&config).unwrap();
    let domain = Domain::new(-1.0, 1.0).unwrap();

    let err = analyzer(client, Settings::default())
        .call(domain)
        .unwrap_err();

    assert!(matches!(err, PipelineError::Transport(_)), "got {err:?}");
}
