extern crate dsp_sift;

use dsp_sift::{Error,ExtractionOptions,ExternalKeypoint,DescriptorMode};
use dsp_sift::pyramid::{EngineThresholds,ScaleSpaceEngine,sift_scale_space::SiftScaleSpace};

#[test]
fn missing_fields_take_defaults() {
    let options = ExtractionOptions::from_yaml_str("levels: 4\nedge_threshold: 5.0\n").unwrap();

    assert_eq!(options.levels, 4);
    assert_eq!(options.edge_threshold, Some(5.0));
    assert_eq!(options.octave_count, None);
    assert_eq!(options.first_octave, 0);
    assert_eq!(options.descriptor_mode, DescriptorMode::Quantized);
    assert!(options.external_keypoints.is_none());
    assert!(!options.force_orientations);
}

#[test]
fn yaml_round_trip_keeps_every_field() {
    let options = ExtractionOptions {
        octave_count: Some(3),
        first_octave: -1,
        peak_threshold: Some(0.01),
        force_orientations: true,
        verbose: 2,
        ..ExtractionOptions::default()
            .with_descriptor_mode(DescriptorMode::Float)
            .with_external_keypoints(vec![ExternalKeypoint::new(10.0, 12.0, 2.0, 0.5)])
    };

    let yaml = options.to_yaml_string().unwrap();
    let parsed = ExtractionOptions::from_yaml_str(&yaml).unwrap();

    assert_eq!(parsed, options);
}

#[test]
fn descriptor_mode_is_read_by_name() {
    let options = ExtractionOptions::from_yaml_str("descriptor_mode: Float\n").unwrap();
    assert_eq!(options.descriptor_mode, DescriptorMode::Float);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(ExtractionOptions::from_yaml_str("levels: 0\n"), Err(Error::InvalidOptions(_))));
    assert!(matches!(ExtractionOptions::from_yaml_str("octave_count: 0\n"), Err(Error::InvalidOptions(_))));
    assert!(matches!(ExtractionOptions::from_yaml_str("first_octave: -4\n"), Err(Error::InvalidOptions(_))));
    assert!(matches!(ExtractionOptions::from_yaml_str("external_keypoints:\n  - {x: 1.0, y: 1.0, scale: .nan, angle: 0.0}\n"), Err(Error::InvalidOptions(_))));
    assert!(matches!(ExtractionOptions::from_yaml_str("levels: [1, 2]\n"), Err(Error::Config(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = ExtractionOptions::load(std::path::Path::new("does/not/exist.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn negative_thresholds_keep_engine_defaults() {
    let mut engine = SiftScaleSpace::new(64, 64, None, 3, 0);
    engine.configure(&EngineThresholds{edge_threshold: Some(-1.0), peak_threshold: Some(0.5), ..EngineThresholds::default()});

    let settings = engine.settings();
    assert_eq!(settings.edge_threshold, 10.0);
    assert_eq!(settings.peak_threshold, 0.5);
    assert_eq!(settings.magnification, 3.0);
    assert_eq!(settings.window_size, 2.0);
    assert_eq!(settings.octave_count, 3);
}

#[test]
fn display_names_the_configuration() {
    let options = ExtractionOptions{edge_threshold: Some(5.0), norm_threshold: Some(-1.0), ..ExtractionOptions::default()};
    assert_eq!(options.to_string(), "o_auto_s_3_o_min_0_Quantized_e_5");

    let options = ExtractionOptions{octave_count: Some(2), force_orientations: true, ..ExtractionOptions::default()};
    assert_eq!(options.to_string(), "o_2_s_3_o_min_0_Quantized_forced");
}

#[test]
fn first_octave_upsamples_at_most_three_times() {
    assert_eq!(dsp_sift::extraction::options::MIN_FIRST_OCTAVE, -3);
    let options = ExtractionOptions::from_yaml_str("first_octave: -3\n").unwrap();
    assert_eq!(options.first_octave, -3);
}
