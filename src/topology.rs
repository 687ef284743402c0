//! Declarative network topology.
//!
//! A `Topology` is an ordered list of per-layer specs (neuron count, learning
//! rate, activation) consumed once at construction time. The first element
//! describes the input layer, the last the output layer; hidden layers are
//! inserted between them, always ahead of the output element, preserving
//! insertion order.
//!
//! Example:
//!
//! ```rust
//! use backprop_net::{Activation, LayerSpec, Topology};
//!
//! # fn main() -> backprop_net::Result<()> {
//! let net = Topology::new(2, LayerSpec::new(1, 0.1, Activation::Sigmoid)?)?
//!     .add_hidden_layer(LayerSpec::new(8, 0.1, Activation::Tanh)?)
//!     .build_with_seed(0)?;
//! assert_eq!(net.input_len(), 2);
//! assert_eq!(net.output_len(), 1);
//! # Ok(())
//! # }
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Activation, Error, Layer, Network, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
/// Configuration for a single layer.
pub struct LayerSpec {
    neurons: usize,
    learning_rate: f64,
    activation: Activation,
}

impl LayerSpec {
    /// Create a validated layer spec.
    pub fn new(neurons: usize, learning_rate: f64, activation: Activation) -> Result<Self> {
        let spec = Self {
            neurons,
            learning_rate,
            activation,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Spec for the input layer. The input layer performs no computation, so
    /// its learning rate and activation are placeholders that are never read.
    fn input(neurons: usize) -> Self {
        Self {
            neurons,
            learning_rate: 0.0,
            activation: Activation::Sigmoid,
        }
    }

    /// Validate spec parameters.
    pub fn validate(&self) -> Result<()> {
        if self.neurons == 0 {
            return Err(Error::InvalidConfig("layer must have > 0 neurons".to_owned()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn neurons(&self) -> usize {
        self.neurons
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

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
/// Ordered layer specs, input layer first, output layer last.
pub struct Topology {
    layers: Vec<LayerSpec>,
}

impl Topology {
    /// Start a topology from the input size and the output layer spec.
    pub fn new(num_inputs: usize, output: LayerSpec) -> Result<Self> {
        if num_inputs == 0 {
            return Err(Error::InvalidConfig("input layer must have > 0 neurons".to_owned()));
        }
        Ok(Self {
            layers: vec![LayerSpec::input(num_inputs), output],
        })
    }

    /// Insert a hidden layer right before the output layer.
    ///
    /// Repeated calls stack hidden layers in insertion order, closest to the
    /// input first.
    #[must_use]
    pub fn add_hidden_layer(mut self, spec: LayerSpec) -> Self {
        let output_idx = self.layers.len() - 1;
        self.layers.insert(output_idx, spec);
        self
    }

    /// Convenience constructor: `num_hidden_layers` identical hidden layers,
    /// one learning rate and activation for the whole network.
    pub fn uniform(
        num_inputs: usize,
        num_outputs: usize,
        num_hidden_layers: usize,
        neurons_per_hidden: usize,
        learning_rate: f64,
        activation: Activation,
    ) -> Result<Self> {
        let mut topology = Self::new(num_inputs, LayerSpec::new(num_outputs, learning_rate, activation)?)?;
        for _ in 0..num_hidden_layers {
            topology =
                topology.add_hidden_layer(LayerSpec::new(neurons_per_hidden, learning_rate, activation)?);
        }
        Ok(topology)
    }

    #[inline]
    pub fn layer_specs(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    ///
    /// A single RNG is shared across every neuron, so one seed reproduces the
    /// entire initial weight/bias state.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        if self.layers.len() < 2 {
            return Err(Error::InvalidConfig(
                "topology must have at least an input and an output layer".to_owned(),
            ));
        }
        if self.layers[0].neurons == 0 {
            return Err(Error::InvalidConfig("input layer must have > 0 neurons".to_owned()));
        }
        // Re-validate compute layers; a topology may arrive from a config file.
        for spec in &self.layers[1..] {
            spec.validate()?;
        }

        let mut layers = Vec::with_capacity(self.layers.len());
        let mut num_inputs = 0;
        for spec in &self.layers {
            layers.push(Layer::new_with_rng(spec, num_inputs, rng));
            num_inputs = spec.neurons;
        }

        Ok(Network::from_layers(layers))
    }
}
