//! Activation functions.
//!
//! A neuron computes a pre-activation value `raw_sum = w · x + b` and then
//! applies an activation function: `output = activation(raw_sum)`.
//!
//! Each neuron caches its *post-activation* output, and the backward pass
//! computes derivatives from that cached output alone. For ReLU this works
//! because ReLU is the identity on its active region, so the sign of the
//! output matches the sign of the pre-activation sum.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Per-layer activation function.
pub enum Activation {
    Sigmoid,
    ReLU,
    Tanh,
}

impl Activation {
    #[inline]
    pub fn activate(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::ReLU => x.max(0.0),
            Activation::Tanh => x.tanh(),
        }
    }

    /// Derivative of the activation with respect to its input, expressed in
    /// terms of the cached post-activation output `y`.
    #[inline]
    pub fn derivative_from_output(self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - y * y,
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
