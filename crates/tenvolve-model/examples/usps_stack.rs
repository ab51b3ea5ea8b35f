//! Build the USPS digit stack and run one inference/reconstruction
//! round trip on a synthetic sample.

use tenvolve_core::Volume;
use tenvolve_model::DeepModel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 16x16 single-plane input, ten 1x4x4 neurons, 10x12x12 top layer
    let mut model = DeepModel::new();
    model.add_data_layer(1, 16, 16)?;
    model.add_convolve_layer(10, 1, 4, 4)?;
    model.add_data_layer(10, 12, 12)?;

    if let Some(conv) = model.convolve_layer_mut(0) {
        conv.randomize_weights();
    }

    // synthetic sample: a soft diagonal stripe
    let data: Vec<f32> = (0..256)
        .map(|i| {
            let (w, h) = (i / 16, i % 16);
            (-((w as f32 - h as f32) / 4.0).powi(2)).exp()
        })
        .collect();
    let sample = Volume::from_vec(data, 1, 16, 16)?;

    model.pass_up(&sample)?;
    let top = model.output().expect("complete model has a top layer").clone();
    let top_energy: f32 = top.as_slice().iter().map(|v| v * v).sum();
    println!("top activations: shape {}, energy {top_energy:.4}", top.shape());

    model.pass_down(&top)?;
    let reconstruction = model.input().expect("complete model has an input layer");
    let error: f32 = reconstruction
        .as_slice()
        .iter()
        .zip(sample.as_slice())
        .map(|(r, s)| (r - s).powi(2))
        .sum::<f32>()
        / sample.len() as f32;
    println!(
        "reconstruction: shape {}, mean squared error {error:.4}",
        reconstruction.shape()
    );

    Ok(())
}
