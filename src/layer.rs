//! An ordered collection of neurons sharing a learning rate and activation.

use rand::Rng;

use crate::topology::LayerSpec;
use crate::{Activation, Neuron};

#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
    learning_rate: f64,
    activation: Activation,
}

impl Layer {
    /// Build a layer from its spec and the previous layer's neuron count
    /// (0 for the input layer, which carries no weights).
    ///
    /// Every neuron is independently initialized from the shared RNG, all
    /// copying the spec's learning rate and activation.
    pub fn new_with_rng<R: Rng + ?Sized>(spec: &LayerSpec, num_inputs: usize, rng: &mut R) -> Self {
        let mut neurons = Vec::with_capacity(spec.neurons());
        for _ in 0..spec.neurons() {
            neurons.push(Neuron::new_with_rng(
                num_inputs,
                spec.learning_rate(),
                spec.activation(),
                rng,
            ));
        }

        Self {
            neurons,
            learning_rate: spec.learning_rate(),
            activation: spec.activation(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    #[inline]
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Copy the current neuron outputs into `buf`, reusing its storage.
    #[inline]
    pub(crate) fn copy_outputs_into(&self, buf: &mut Vec<f64>) {
        buf.clear();
        buf.extend(self.neurons.iter().map(|n| n.output()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn layer_sizes_weights_against_previous_layer() {
        let spec = LayerSpec::new(4, 0.1, Activation::Tanh).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new_with_rng(&spec, 3, &mut rng);

        assert_eq!(layer.len(), 4);
        for neuron in layer.neurons() {
            assert_eq!(neuron.weights().len(), 3);
            assert_eq!(neuron.activation(), Activation::Tanh);
            assert_eq!(neuron.learning_rate(), 0.1);
        }
    }

    #[test]
    fn input_layer_neurons_carry_no_weights() {
        let spec = LayerSpec::new(5, 0.1, Activation::Sigmoid).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new_with_rng(&spec, 0, &mut rng);

        for neuron in layer.neurons() {
            assert!(neuron.weights().is_empty());
        }
    }
}
