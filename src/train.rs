//! Batteries-included training driver.
//!
//! [`Network::train`] is the one-epoch primitive: one forward/backward pair
//! per sample, returning only the last sample's MSE. `fit` wraps it in a
//! validated epoch loop for callers that just want a trained network.

use crate::{Error, Network, Result};

#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub epochs: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { epochs: 1000 }
    }
}

#[derive(Debug, Clone)]
pub struct FitReport {
    /// MSE of the last sample of the last epoch.
    pub final_mse: f64,
}

impl Network {
    /// Train for `cfg.epochs` passes over the whole sample set.
    ///
    /// Unlike the hot-path calls, this validates shapes up front and returns
    /// `Result` instead of panicking.
    pub fn fit(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>], cfg: FitConfig) -> Result<FitReport> {
        self.check_dataset(inputs, targets)?;
        if cfg.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }

        let mut final_mse = 0.0;
        for _ in 0..cfg.epochs {
            final_mse = self.train(inputs, targets);
        }

        Ok(FitReport { final_mse })
    }

    /// Forward-only mean MSE over a sample set. Never updates weights.
    pub fn evaluate_mse(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        self.check_dataset(inputs, targets)?;

        let mut total = 0.0;
        for (input, target) in inputs.iter().zip(targets) {
            let output = self.forward_propagate(input);
            let sum_sq: f64 = output
                .iter()
                .zip(target)
                .map(|(&o, &t)| (t - o) * (t - o))
                .sum();
            total += sum_sq / target.len() as f64;
        }
        Ok(total / inputs.len() as f64)
    }

    fn check_dataset(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::InvalidData("sample set must not be empty".to_owned()));
        }
        if inputs.len() != targets.len() {
            return Err(Error::InvalidData(format!(
                "{} inputs but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        for (i, input) in inputs.iter().enumerate() {
            if input.len() != self.input_len() {
                return Err(Error::InvalidData(format!(
                    "input {i} has len {}, expected {}",
                    input.len(),
                    self.input_len()
                )));
            }
        }
        for (i, target) in targets.iter().enumerate() {
            if target.len() != self.output_len() {
                return Err(Error::InvalidData(format!(
                    "target {i} has len {}, expected {}",
                    target.len(),
                    self.output_len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, LayerSpec, Topology};

    fn small_net() -> Network {
        Topology::new(2, LayerSpec::new(1, 0.1, Activation::Sigmoid).unwrap())
            .unwrap()
            .add_hidden_layer(LayerSpec::new(4, 0.1, Activation::Tanh).unwrap())
            .build_with_seed(5)
            .unwrap()
    }

    #[test]
    fn fit_rejects_bad_datasets() {
        let mut net = small_net();
        let cfg = FitConfig { epochs: 1 };

        assert!(net.fit(&[], &[], cfg).is_err());
        assert!(net.fit(&[vec![0.0, 1.0]], &[], cfg).is_err());
        assert!(net.fit(&[vec![0.0]], &[vec![1.0]], cfg).is_err());
        assert!(net.fit(&[vec![0.0, 1.0]], &[vec![1.0, 0.0]], cfg).is_err());
        assert!(net
            .fit(&[vec![0.0, 1.0]], &[vec![1.0]], FitConfig { epochs: 0 })
            .is_err());
    }

    #[test]
    fn fit_matches_repeated_train_calls() {
        let inputs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let targets = vec![vec![0.0], vec![1.0]];

        let mut a = small_net();
        let report = a.fit(&inputs, &targets, FitConfig { epochs: 3 }).unwrap();

        let mut b = small_net();
        let mut last = 0.0;
        for _ in 0..3 {
            last = b.train(&inputs, &targets);
        }
        assert_eq!(report.final_mse, last);
    }

    #[test]
    fn evaluate_does_not_update_weights() {
        let inputs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let targets = vec![vec![0.0], vec![1.0]];

        let mut net = small_net();
        let before: Vec<f64> = net.layers()[1].neurons()[0].weights().to_vec();

        let _ = net.evaluate_mse(&inputs, &targets).unwrap();
        let after: Vec<f64> = net.layers()[1].neurons()[0].weights().to_vec();
        assert_eq!(before, after);
    }
}
