use approx::assert_relative_eq;
use tenvolve_core::{ConvolveEngine, Volume, VolumeError};
use tenvolve_model::{ConvolveLayer, DeepModel};

fn patterned_volume(depth: usize, width: usize, height: usize) -> Volume {
    let data: Vec<f32> = (0..depth * width * height)
        .map(|i| ((i as f32) * 0.13).sin())
        .collect();
    Volume::from_vec(data, depth, width, height).unwrap()
}

#[test]
fn test_usps_stack_assembly() {
    // The classic USPS digit stack: 16x16 single-plane input, ten
    // 1x4x4 neurons, 10x12x12 top layer.
    let mut model = DeepModel::new();
    model.add_data_layer(1, 16, 16).unwrap();
    model.add_convolve_layer(10, 1, 4, 4).unwrap();
    model.add_data_layer(10, 12, 12).unwrap();

    assert!(model.is_complete());
    assert_eq!(model.num_data_layers(), 2);
    assert_eq!(model.num_convolve_layers(), 1);
    assert_eq!(model.output().unwrap().depth(), 10);
}

#[test]
fn test_stack_alternation_is_enforced() {
    let mut model = DeepModel::new();

    // convolve before any data layer
    let err = model.add_convolve_layer(4, 1, 3, 3).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));

    model.add_data_layer(1, 8, 8).unwrap();

    // two data layers in a row
    let err = model.add_data_layer(1, 8, 8).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));

    model.add_convolve_layer(4, 1, 3, 3).unwrap();

    // two convolve layers in a row
    let err = model.add_convolve_layer(4, 4, 3, 3).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));
}

#[test]
fn test_top_layer_shape_is_validated() {
    let mut model = DeepModel::new();
    model.add_data_layer(1, 16, 16).unwrap();
    model.add_convolve_layer(10, 1, 4, 4).unwrap();

    // depth must equal the neuron count
    let err = model.add_data_layer(9, 12, 12).unwrap_err();
    assert!(matches!(err, VolumeError::ShapeMismatch { .. }));

    // spatial extent capped at bottom - filter + 1 = 13
    let err = model.add_data_layer(10, 14, 14).unwrap_err();
    assert!(matches!(err, VolumeError::ShapeMismatch { .. }));

    // the full valid-mode extent is fine
    model.add_data_layer(10, 13, 13).unwrap();
    assert!(model.is_complete());
}

#[test]
fn test_convolve_layer_must_fit_its_bottom() {
    let mut model = DeepModel::new();
    model.add_data_layer(2, 8, 8).unwrap();

    // filter depth 3 against a depth-2 data layer
    let err = model.add_convolve_layer(4, 3, 3, 3).unwrap_err();
    assert!(matches!(err, VolumeError::ShapeMismatch { .. }));

    // filter wider than the data layer
    let err = model.add_convolve_layer(4, 2, 9, 3).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));

    model.add_convolve_layer(4, 2, 3, 3).unwrap();
}

#[test]
fn test_pass_up_requires_complete_stack() {
    let mut model = DeepModel::new();
    let input = patterned_volume(1, 8, 8);

    let err = model.pass_up(&input).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));

    model.add_data_layer(1, 8, 8).unwrap();
    model.add_convolve_layer(4, 1, 3, 3).unwrap();

    // stack ends on a convolve layer
    let err = model.pass_up(&input).unwrap_err();
    assert!(matches!(err, VolumeError::InvalidShape { .. }));
}

#[test]
fn test_pass_up_rejects_wrong_input_shape() {
    let mut model = DeepModel::new();
    model.add_data_layer(1, 8, 8).unwrap();
    model.add_convolve_layer(4, 1, 3, 3).unwrap();
    model.add_data_layer(4, 6, 6).unwrap();

    let err = model.pass_up(&patterned_volume(1, 7, 7)).unwrap_err();
    assert!(matches!(err, VolumeError::ShapeMismatch { .. }));
}

#[test]
fn test_model_pass_up_matches_direct_engine_call() {
    let weights: Vec<f32> = (0..2 * 9).map(|i| ((i as f32) * 0.29).sin()).collect();

    let mut model = DeepModel::new();
    model.add_data_layer(1, 6, 6).unwrap();
    model.add_convolve_layer(2, 1, 3, 3).unwrap();
    model.add_data_layer(2, 4, 4).unwrap();
    model
        .convolve_layer_mut(0)
        .unwrap()
        .engine_mut()
        .filters_mut()
        .set_weights(&weights)
        .unwrap();

    let input = patterned_volume(1, 6, 6);
    model.pass_up(&input).unwrap();

    let mut engine = ConvolveEngine::new(2, 1, 3, 3).unwrap();
    engine.filters_mut().set_weights(&weights).unwrap();
    let mut expected = Volume::new(2, 4, 4).unwrap();
    engine.pass_up(&input, &mut expected).unwrap();

    assert_eq!(model.output().unwrap().as_slice(), expected.as_slice());
}

#[test]
fn test_pass_down_reconstructs_into_input_layer() {
    // Single 1x1x1 filter of weight 2: pass_up doubles, pass_down of
    // that top doubles again, so the reconstruction is 4x the input.
    let mut model = DeepModel::new();
    model.add_data_layer(1, 4, 4).unwrap();
    model.add_convolve_layer(1, 1, 1, 1).unwrap();
    model.add_data_layer(1, 4, 4).unwrap();
    model
        .convolve_layer_mut(0)
        .unwrap()
        .engine_mut()
        .filters_mut()
        .set(0, 0, 0, 0, 2.0)
        .unwrap();

    let input = patterned_volume(1, 4, 4);
    model.pass_up(&input).unwrap();

    let top = model.output().unwrap().clone();
    model.pass_down(&top).unwrap();

    let reconstruction = model.input().unwrap();
    for (got, want) in reconstruction.as_slice().iter().zip(input.as_slice()) {
        assert_relative_eq!(*got, 4.0 * want, epsilon = 1e-6);
    }
}

#[test]
fn test_gaussian_init_populates_weights() {
    let layer = ConvolveLayer::new_gaussian(10, 1, 4, 4).unwrap();
    let weights = layer.engine().filters().as_slice();

    assert!(weights.iter().all(|w| w.is_finite()));
    assert!(weights.iter().any(|&w| w != 0.0));

    // std = sqrt(2/16) = 0.354; the mean of 160 draws stays well
    // inside +-0.2
    let mean = weights.iter().sum::<f32>() / weights.len() as f32;
    assert!(mean.abs() < 0.2, "suspicious weight mean {mean}");
}

#[cfg(feature = "serialize")]
#[test]
fn test_checkpoint_round_trip() {
    use tenvolve_model::checkpoint::{load_filters, save_filters};

    let layer = ConvolveLayer::new_gaussian(3, 2, 2, 2).unwrap();
    let bank = layer.engine().filters();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filters.json");

    save_filters(bank, &path).unwrap();
    let restored = load_filters(&path).unwrap();

    assert_eq!(restored.neuron_count(), bank.neuron_count());
    assert_eq!(restored.neuron_shape(), bank.neuron_shape());
    assert_eq!(restored.as_slice(), bank.as_slice());
}
