use rand::Rng;
use serde::{Deserialize, Serialize};

/// The logistic activation: maps any real input into (0, 1).
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Sigmoid derivative computed from the already-activated value, using
/// d/dz σ(z) = σ(z)·(1 − σ(z)).
fn sigmoid_derivative(activated: f64) -> f64 {
    activated * (1.0 - activated)
}

/// One unit: a weight per input of its layer plus a scalar bias.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
}

impl Neuron {
    #[must_use]
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn process(&self, inputs: &[f64]) -> f64 {
        debug_assert_eq!(inputs.len(), self.weights.len());
        let sum: f64 = inputs
            .iter()
            .zip(&self.weights)
            .map(|(input, weight)| input * weight)
            .sum();
        sigmoid(sum + self.bias)
    }
}

/// An ordered group of neurons sharing one input vector.
///
/// The layer caches the inputs of its most recent forward pass; the
/// backward pass reuses them instead of recomputing activations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Layer {
    neurons: Vec<Neuron>,
    #[serde(skip)]
    last_inputs: Option<Vec<f64>>,
}

impl Layer {
    /// # Panics
    ///
    /// Panics unless every neuron expects the same input width.
    #[must_use]
    pub fn new(neurons: Vec<Neuron>) -> Self {
        assert!(
            neurons
                .windows(2)
                .all(|pair| pair[0].weights.len() == pair[1].weights.len()),
            "all neurons of a layer share the input width"
        );
        Self {
            neurons,
            last_inputs: None,
        }
    }

    /// A fresh layer with small non-zero weights and zero biases.
    #[must_use]
    pub fn random<R>(rng: &mut R, inputs: usize, neurons: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let neurons = (0..neurons)
            .map(|_| {
                let weights = (0..inputs).map(|_| rng.random_range(0.0..=0.1)).collect();
                Neuron::new(weights, 0.0)
            })
            .collect();
        Self {
            neurons,
            last_inputs: None,
        }
    }

    #[must_use]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Input width this layer expects.
    #[must_use]
    pub fn input_width(&self) -> usize {
        self.neurons.first().map_or(0, |n| n.weights.len())
    }

    fn process(&mut self, inputs: Vec<f64>) -> Vec<f64> {
        let outputs = self.neurons.iter().map(|n| n.process(&inputs)).collect();
        self.last_inputs = Some(inputs);
        outputs
    }
}

fn default_learning_rate() -> f64 {
    1.0
}

/// A feed-forward network trained by online backpropagation.
///
/// Persisting a network stores layers, weights, and biases only; the cached
/// activations and the learning rates are transient. The cached "last
/// inputs/outputs" are single-slot, so a `process` + `update` pair must
/// complete before the next forward pass on the same instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
    /// Step size for weight updates. Lowering it avoids overcorrecting,
    /// which could make the network forget what it already learnt.
    #[serde(skip, default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Step size for bias updates.
    #[serde(skip, default = "default_learning_rate")]
    pub bias_learning_rate: f64,
    #[serde(skip)]
    last_outputs: Option<Vec<f64>>,
}

impl NeuralNetwork {
    /// # Panics
    ///
    /// Panics unless each layer's neuron count matches the input width of
    /// the next layer.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        assert!(
            layers
                .windows(2)
                .all(|pair| pair[0].neurons.len() == pair[1].input_width()),
            "layer widths chain"
        );
        Self {
            layers,
            learning_rate: default_learning_rate(),
            bias_learning_rate: default_learning_rate(),
            last_outputs: None,
        }
    }

    /// A randomly initialized network taking `input_width` inputs, with one
    /// layer per entry of `layer_sizes` (the last entry is the output
    /// width).
    #[must_use]
    pub fn random<R>(rng: &mut R, input_width: usize, layer_sizes: &[usize]) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut inputs = input_width;
        for &neurons in layer_sizes {
            layers.push(Layer::random(rng, inputs, neurons));
            inputs = neurons;
        }
        Self::new(layers)
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Width of the input vector this network consumes.
    #[must_use]
    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_width)
    }

    /// Width of the output vector this network produces.
    #[must_use]
    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.neurons.len())
    }

    /// Output vector of the most recent forward pass.
    #[must_use]
    pub fn last_outputs(&self) -> Option<&[f64]> {
        self.last_outputs.as_deref()
    }

    /// Runs a forward pass, caching each layer's inputs and the final
    /// outputs for a following [`update`](Self::update).
    pub fn process(&mut self, inputs: &[f64]) -> Vec<f64> {
        let outputs = self
            .layers
            .iter_mut()
            .fold(inputs.to_vec(), |inputs, layer| layer.process(inputs));
        self.last_outputs = Some(outputs.clone());
        outputs
    }

    /// One online backpropagation step toward `goals`, consuming the caches
    /// of the most recent [`process`](Self::process) call.
    ///
    /// # Panics
    ///
    /// Panics when no forward pass preceded this call, or when `goals` does
    /// not match the output width; both are caller programming errors.
    pub fn update(&mut self, goals: &[f64]) {
        let last_outputs = self
            .last_outputs
            .as_ref()
            .expect("can't update network without previous data");
        assert_eq!(
            last_outputs.len(),
            goals.len(),
            "output and goal counts don't match"
        );

        // How wrong each output unit was.
        let mut last_deltas: Vec<f64> = last_outputs
            .iter()
            .zip(goals)
            .map(|(&output, &goal)| sigmoid_derivative(output) * (output - goal))
            .collect();
        let mut layer_deltas = vec![last_deltas.clone()];

        // Walk the layers backwards, attributing each layer's error to the
        // inputs that produced it.
        for layer in self.layers.iter().rev() {
            let inputs = layer
                .last_inputs
                .as_ref()
                .expect("can't update network without previous data");
            let mut new_deltas = Vec::with_capacity(inputs.len());
            for (index, &input) in inputs.iter().enumerate() {
                let dot: f64 = last_deltas
                    .iter()
                    .zip(&layer.neurons)
                    .map(|(delta, neuron)| delta * neuron.weights[index])
                    .sum();
                new_deltas.push(sigmoid_derivative(input) * dot);
            }
            layer_deltas.push(new_deltas.clone());
            last_deltas = new_deltas;
        }

        // Apply the corrections, last layer first. The bias is treated as
        // having a constant input of 1.
        for (deltas, layer) in layer_deltas.iter().zip(self.layers.iter_mut().rev()) {
            let Layer {
                neurons,
                last_inputs,
            } = layer;
            let inputs = last_inputs
                .as_ref()
                .expect("can't update network without previous data");
            for (delta, neuron) in deltas.iter().zip(neurons.iter_mut()) {
                neuron.bias -= delta * self.bias_learning_rate;
                for (index, input) in inputs.iter().enumerate() {
                    neuron.weights[index] -= delta * input * self.learning_rate;
                }
            }
        }
    }

    /// Drops every cached activation without touching weights or biases.
    /// Call once training finishes and the network becomes inference-only.
    pub fn clear_cached_activations(&mut self) {
        self.last_outputs = None;
        for layer in &mut self.layers {
            layer.last_inputs = None;
        }
    }
}
