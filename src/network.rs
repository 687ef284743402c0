//! The propagation/training orchestrator.
//!
//! A `Network` owns an ordered sequence of layers and is the only component
//! that sequences traversals: forward passes walk the layers in strictly
//! increasing order, backward passes in strictly decreasing order. Layers and
//! neurons are passive with respect to ordering.
//!
//! Shape contract: mismatched vector lengths on the hot path are programmer
//! error and panic via `assert!`; only construction and the
//! batteries-included `fit` driver return `Result`.

use crate::Layer;

#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    /// Scratch buffer holding the previous layer's outputs during traversals.
    prev_outputs: Vec<f64>,
}

impl Network {
    /// Called by `Topology::build_with_rng`; `layers` is already validated
    /// (length >= 2, every layer non-empty).
    pub(crate) fn from_layers(layers: Vec<Layer>) -> Self {
        let max_width = layers.iter().map(Layer::len).max().unwrap_or(0);
        Self {
            layers,
            prev_outputs: Vec::with_capacity(max_width),
        }
    }

    #[inline]
    pub fn input_len(&self) -> usize {
        self.layers
            .first()
            .expect("network must have at least two layers")
            .len()
    }

    #[inline]
    pub fn output_len(&self) -> usize {
        self.layers
            .last()
            .expect("network must have at least two layers")
            .len()
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Process `input` through the network, input layer to output layer.
    ///
    /// The input values are copied straight into the input layer's outputs
    /// (no activation applied); every later layer feeds on the finished
    /// outputs of the layer below it. Returns the output layer's activations.
    pub fn forward_propagate(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_len(),
            "input len {} does not match network input size {}",
            input.len(),
            self.input_len()
        );

        for (neuron, &value) in self.layers[0].neurons_mut().iter_mut().zip(input) {
            neuron.set_output(value);
        }

        let mut prev_outputs = std::mem::take(&mut self.prev_outputs);
        self.layers[0].copy_outputs_into(&mut prev_outputs);

        for layer in self.layers[1..].iter_mut() {
            for neuron in layer.neurons_mut() {
                neuron.feed_forward(&prev_outputs);
            }
            layer.copy_outputs_into(&mut prev_outputs);
        }

        // prev_outputs now holds the output layer's activations.
        let output = prev_outputs.clone();
        self.prev_outputs = prev_outputs;
        output
    }

    /// Backpropagate the error for the most recent forward pass and update
    /// every weight and bias in place. Returns the mean squared error over
    /// the output layer, computed before any update.
    ///
    /// `input` must be the vector used in the most recent
    /// [`forward_propagate`](Self::forward_propagate) call.
    pub fn back_propagate(&mut self, input: &[f64], target_output: &[f64]) -> f64 {
        assert_eq!(
            input.len(),
            self.input_len(),
            "input len {} does not match network input size {}",
            input.len(),
            self.input_len()
        );
        assert_eq!(
            target_output.len(),
            self.output_len(),
            "target len {} does not match network output size {}",
            target_output.len(),
            self.output_len()
        );

        // MSE over the full output layer, then the output gradients. Every
        // output neuron gets a gradient.
        let output_layer = self
            .layers
            .last_mut()
            .expect("network must have at least two layers");
        let mut error_sum = 0.0;
        for (neuron, &target) in output_layer.neurons_mut().iter_mut().zip(target_output) {
            let delta = target - neuron.output();
            error_sum += delta * delta;
            neuron.calculate_output_gradient(target);
        }
        let mean_squared_error = error_sum / target_output.len() as f64;

        // Hidden gradients, last hidden layer down to the first. Each layer
        // reads the finished gradients of the layer above it, so the order is
        // load-bearing.
        for i in (1..self.layers.len() - 1).rev() {
            let (left, right) = self.layers.split_at_mut(i + 1);
            let layer = &mut left[i];
            let next_layer = &right[0];
            for k in 0..layer.len() {
                layer.neurons_mut()[k].calculate_hidden_gradient(next_layer, k);
            }
        }

        // All gradients are final; update weights and biases, output layer
        // down to the first hidden layer, against the previous layer's
        // current outputs.
        let last = self.layers.len() - 1;
        let mut prev_outputs = std::mem::take(&mut self.prev_outputs);
        for i in (1..self.layers.len()).rev() {
            let (left, right) = self.layers.split_at_mut(i);
            left[i - 1].copy_outputs_into(&mut prev_outputs);

            let is_output_layer = i == last;
            for neuron in right[0].neurons_mut() {
                neuron.update_weights(&prev_outputs, is_output_layer);
                neuron.update_bias();
            }
        }
        self.prev_outputs = prev_outputs;

        mean_squared_error
    }

    /// Online stochastic gradient descent over a batch: for each sample, one
    /// forward pass followed by one backward pass, one weight update per
    /// sample, never averaged across the batch.
    ///
    /// Returns the MSE of the last sample processed; callers wanting an
    /// epoch-level error track their own aggregate (or use
    /// [`fit`](Self::fit)).
    pub fn train(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> f64 {
        assert_eq!(
            inputs.len(),
            targets.len(),
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        );

        let mut mse = 0.0;
        for (input, target) in inputs.iter().zip(targets) {
            self.forward_propagate(input);
            mse = self.back_propagate(input, target);
        }
        mse
    }

    /// Inference-only forward pass. Semantically identical to
    /// [`forward_propagate`](Self::forward_propagate); exists to signal
    /// intent to callers.
    #[inline]
    pub fn predict(&mut self, input: &[f64]) -> Vec<f64> {
        self.forward_propagate(input)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Activation, LayerSpec, Topology};

    fn spec(neurons: usize, activation: Activation) -> LayerSpec {
        LayerSpec::new(neurons, 0.1, activation).unwrap()
    }

    #[test]
    fn weight_counts_match_previous_layer_sizes() {
        let net = Topology::new(3, spec(2, Activation::Sigmoid))
            .unwrap()
            .add_hidden_layer(spec(5, Activation::Tanh))
            .add_hidden_layer(spec(4, Activation::Tanh))
            .build_with_seed(0)
            .unwrap();

        let sizes: Vec<usize> = net.layers().iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![3, 5, 4, 2]);

        for neuron in net.layers()[0].neurons() {
            assert!(neuron.weights().is_empty());
        }
        for window in [(1usize, 3usize), (2, 5), (3, 4)] {
            let (layer_idx, expected) = window;
            for neuron in net.layers()[layer_idx].neurons() {
                assert_eq!(neuron.weights().len(), expected);
            }
        }
    }

    #[test]
    fn same_seed_same_network() {
        let topology = || {
            Topology::new(2, spec(1, Activation::Sigmoid))
                .unwrap()
                .add_hidden_layer(spec(8, Activation::Tanh))
        };
        let mut a = topology().build_with_seed(42).unwrap();
        let mut b = topology().build_with_seed(42).unwrap();

        let input = [0.3, -0.7];
        assert_eq!(a.forward_propagate(&input), b.forward_propagate(&input));
    }

    #[test]
    fn forward_is_deterministic_without_backprop() {
        let mut net = Topology::new(2, spec(3, Activation::Sigmoid))
            .unwrap()
            .add_hidden_layer(spec(4, Activation::Tanh))
            .build_with_seed(7)
            .unwrap();

        let input = [0.25, 0.75];
        let first = net.forward_propagate(&input);
        let second = net.forward_propagate(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn input_layer_stores_values_verbatim() {
        let mut net = Topology::new(2, spec(1, Activation::Sigmoid))
            .unwrap()
            .build_with_seed(0)
            .unwrap();

        net.forward_propagate(&[-3.5, 12.0]);
        let inputs: Vec<f64> = net.layers()[0].neurons().iter().map(|n| n.output()).collect();
        assert_eq!(inputs, vec![-3.5, 12.0]);
    }

    #[test]
    fn pinned_two_input_network_reports_quarter_mse() {
        // 2 -> 1, sigmoid, weights [0.5, 0.5], bias 0: input [0, 0] produces
        // activate(0) = 0.5, and target 1.0 gives MSE (1 - 0.5)^2 = 0.25.
        let mut net = Topology::new(2, spec(1, Activation::Sigmoid))
            .unwrap()
            .build_with_seed(0)
            .unwrap();
        {
            let neuron = &mut net.layers_mut()[1].neurons_mut()[0];
            neuron.weights_mut().copy_from_slice(&[0.5, 0.5]);
            *neuron.bias_mut() = 0.0;
        }

        let output = net.forward_propagate(&[0.0, 0.0]);
        assert_eq!(output, vec![0.5]);

        let mse = net.back_propagate(&[0.0, 0.0], &[1.0]);
        assert!((mse - 0.25).abs() < 1e-12);
    }

    #[test]
    fn train_returns_last_sample_mse() {
        let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

        let build = || {
            Topology::new(2, spec(1, Activation::Sigmoid))
                .unwrap()
                .add_hidden_layer(spec(4, Activation::Tanh))
                .build_with_seed(11)
                .unwrap()
        };

        // Replay the same schedule by hand; the batch MSE must be exactly the
        // last sample's backprop MSE.
        let mut by_hand = build();
        let mut last = 0.0;
        for (input, target) in inputs.iter().zip(&targets) {
            by_hand.forward_propagate(input);
            last = by_hand.back_propagate(input, target);
        }

        let mut via_train = build();
        let batch_mse = via_train.train(&inputs, &targets);
        assert_eq!(batch_mse, last);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut net = Topology::new(2, spec(1, Activation::Sigmoid))
            .unwrap()
            .build_with_seed(0)
            .unwrap();
        assert_eq!(net.train(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic]
    fn forward_panics_on_input_length_mismatch() {
        let mut net = Topology::new(2, spec(1, Activation::Sigmoid))
            .unwrap()
            .build_with_seed(0)
            .unwrap();
        net.forward_propagate(&[0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn backprop_panics_on_target_length_mismatch() {
        let mut net = Topology::new(2, spec(1, Activation::Sigmoid))
            .unwrap()
            .build_with_seed(0)
            .unwrap();
        net.forward_propagate(&[0.0, 0.0]);
        net.back_propagate(&[0.0, 0.0], &[1.0, 1.0]);
    }

    #[test]
    fn backprop_moves_every_output_gradient() {
        // Regression guard: every output neuron must receive a gradient, not
        // just the first len - 1 of them.
        let mut net = Topology::new(2, spec(3, Activation::Sigmoid))
            .unwrap()
            .add_hidden_layer(spec(4, Activation::Tanh))
            .build_with_seed(3)
            .unwrap();

        net.forward_propagate(&[0.4, 0.6]);
        net.back_propagate(&[0.4, 0.6], &[1.0, 1.0, 1.0]);

        let last = net.num_layers() - 1;
        for neuron in net.layers()[last].neurons() {
            // Sigmoid output is in (0, 1), so target 1.0 forces a non-zero
            // delta and gradient on each neuron.
            assert!(neuron.error_delta() != 0.0);
            assert!(neuron.error_gradient() != 0.0);
        }
    }
}
