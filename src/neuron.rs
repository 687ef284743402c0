//! The atomic computational unit.
//!
//! A `Neuron` owns its incoming weights and bias and caches everything the
//! backward pass needs: the last pre-activation sum, the last activated
//! output, and the error signals computed during backpropagation. All state
//! is mutated in place; the same neurons live for the network's lifetime.

use rand::Rng;

use crate::{Activation, Layer};

#[derive(Debug, Clone)]
pub struct Neuron {
    /// One weight per neuron in the previous layer; empty on the input layer.
    weights: Vec<f64>,
    bias: f64,
    /// Last activated output.
    output: f64,
    /// Last pre-activation weighted sum plus bias.
    raw_sum: f64,
    /// Backpropagated learning signal, scaled by the activation derivative.
    error_gradient: f64,
    /// Raw `target - output`; meaningful only on output-layer neurons.
    error_delta: f64,
    learning_rate: f64,
    activation: Activation,
}

impl Neuron {
    /// Create a neuron with `num_inputs` incoming weights.
    ///
    /// Weights and bias are drawn uniformly from `[-1, 1]` using the shared
    /// construction RNG, so a fixed seed reproduces the whole network.
    pub fn new_with_rng<R: Rng + ?Sized>(
        num_inputs: usize,
        learning_rate: f64,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let mut weights = Vec::with_capacity(num_inputs);
        for _ in 0..num_inputs {
            weights.push(rng.random_range(-1.0..=1.0));
        }
        let bias = rng.random_range(-1.0..=1.0);

        Self {
            weights,
            bias,
            output: 0.0,
            raw_sum: 0.0,
            error_gradient: 0.0,
            error_delta: 0.0,
            learning_rate,
            activation,
        }
    }

    /// Weighted-sum forward step: `raw_sum = inputs · weights + bias`,
    /// `output = activate(raw_sum)`.
    ///
    /// Shape contract: `inputs.len() == self.weights.len()` (checked at the
    /// network boundary, debug-asserted here).
    #[inline]
    pub fn feed_forward(&mut self, inputs: &[f64]) {
        debug_assert_eq!(inputs.len(), self.weights.len());

        let mut sum = self.bias;
        for (&w, &x) in self.weights.iter().zip(inputs) {
            sum = w.mul_add(x, sum);
        }
        self.raw_sum = sum;
        self.output = self.activation.activate(sum);
    }

    /// Output-layer error: `error_delta = target - output`, scaled by the
    /// activation derivative into `error_gradient`.
    #[inline]
    pub fn calculate_output_gradient(&mut self, target: f64) {
        self.error_delta = target - self.output;
        self.error_gradient = self.error_delta * self.activation.derivative_from_output(self.output);
    }

    /// Hidden-layer error: chain-rule sum over every downstream neuron's
    /// weighted contribution. `own_index` selects the weight connecting this
    /// neuron to each neuron in `next_layer`.
    ///
    /// Must run only after the entire next layer's gradients are finalized.
    #[inline]
    pub fn calculate_hidden_gradient(&mut self, next_layer: &Layer, own_index: usize) {
        let mut sum = 0.0;
        for neuron in next_layer.neurons() {
            sum = neuron.weights[own_index].mul_add(neuron.error_gradient, sum);
        }
        self.error_gradient = sum * self.activation.derivative_from_output(self.output);
    }

    /// Gradient-descent step on the incoming weights.
    ///
    /// Output-layer neurons update with the raw `error_delta` rather than the
    /// derivative-scaled `error_gradient`. That skips the activation
    /// derivative for the output layer only; it is the established learning
    /// rule of this network and changing it changes trained results.
    #[inline]
    pub fn update_weights(&mut self, prev_outputs: &[f64], is_output_layer: bool) {
        debug_assert_eq!(prev_outputs.len(), self.weights.len());

        let term = if is_output_layer {
            self.error_delta
        } else {
            self.error_gradient
        };

        for (w, &input) in self.weights.iter_mut().zip(prev_outputs) {
            *w += self.learning_rate * input * term;
        }
    }

    /// Gradient-descent step on the bias. Always uses `error_gradient`, on
    /// every layer.
    #[inline]
    pub fn update_bias(&mut self) {
        self.bias += self.learning_rate * self.error_gradient;
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Write the output directly, bypassing activation. Input-layer neurons
    /// are storage buffers, not computed units.
    #[inline]
    pub(crate) fn set_output(&mut self, value: f64) {
        self.output = value;
    }

    #[inline]
    pub fn raw_sum(&self) -> f64 {
        self.raw_sum
    }

    #[inline]
    pub fn error_gradient(&self) -> f64 {
        self.error_gradient
    }

    #[inline]
    pub fn error_delta(&self) -> f64 {
        self.error_delta
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn bias_mut(&mut self) -> &mut f64 {
        &mut self.bias
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }
}
