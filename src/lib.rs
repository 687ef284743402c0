//! A from-scratch multilayer perceptron.
//!
//! `backprop-net` builds a network of layers of neurons from a declarative
//! topology, runs forward inference, and trains weights and biases through
//! per-sample backpropagation with per-layer learning rates and selectable
//! activation functions. It targets small educational and experimental
//! workloads (XOR, digit classification), not production ML.
//!
//! # Design
//!
//! - Every neuron is a real object: weights, bias, cached output, gradient
//!   state. Training mutates the same neurons in place for the network's
//!   whole lifetime; there is no separate compiled state.
//! - Topology is immutable after construction. A single injected RNG is
//!   shared by all neurons, so a fixed seed reproduces the entire initial
//!   state.
//! - Updates are online stochastic gradient descent: one weight update per
//!   sample, never averaged across a batch.
//!
//! # Panics vs `Result`
//!
//! Two layers of API:
//!
//! - Hot path (panics on misuse): [`Network::forward_propagate`],
//!   [`Network::back_propagate`], [`Network::train`], [`Network::predict`].
//!   Shape mismatches are programmer error and abort via `assert!`.
//! - Shape-checked (returns [`Result`]): topology construction and the
//!   [`Network::fit`] / [`Network::evaluate_mse`] drivers.
//!
//! # Quick start
//!
//! ```rust
//! use backprop_net::{Activation, FitConfig, LayerSpec, Topology};
//!
//! # fn main() -> backprop_net::Result<()> {
//! let inputs = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//!     vec![1.0, 1.0],
//! ];
//! let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
//!
//! let mut net = Topology::new(2, LayerSpec::new(1, 0.1, Activation::Sigmoid)?)?
//!     .add_hidden_layer(LayerSpec::new(8, 0.1, Activation::Tanh)?)
//!     .build_with_seed(0)?;
//!
//! let report = net.fit(&inputs, &targets, FitConfig { epochs: 2_000 })?;
//! let prediction = net.predict(&inputs[0]);
//! # let _ = (report, prediction);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Fully synchronous and single-threaded. Every call mutates neuron state in
//! place, so concurrent use of one network requires external serialization
//! (one network per worker, or a lock owned by the caller).

pub mod activation;
pub mod error;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod topology;
pub mod train;

pub use activation::Activation;
pub use error::{Error, Result};
pub use layer::Layer;
pub use network::Network;
pub use neuron::Neuron;
pub use topology::{LayerSpec, Topology};
pub use train::{FitConfig, FitReport};
