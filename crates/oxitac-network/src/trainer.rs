//! Online training loop with mean-squared-error reporting.
//!
//! Training is per-sample stochastic gradient descent: each sample runs one
//! `process` + `update` pair as a unit. There is no batching and no
//! momentum; the only knobs are the network's learning rates and the epoch
//! count.

use crate::network::NeuralNetwork;

/// One `(inputs, goals)` training pair.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub inputs: Vec<f64>,
    pub goals: Vec<f64>,
}

impl TrainingSample {
    #[must_use]
    pub fn new(inputs: Vec<f64>, goals: Vec<f64>) -> Self {
        Self { inputs, goals }
    }
}

/// Error measurement taken after an epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch the measurement was taken after.
    pub epoch: usize,
    pub mean_squared_error: f64,
}

/// Runs epochs of online backpropagation over a fixed sample set.
#[derive(Debug, Clone, Copy)]
pub struct OnlineTrainer {
    /// Number of passes over the sample set.
    pub epochs: usize,
    /// An [`EpochReport`] is taken every this many epochs (and after the
    /// final one).
    pub report_interval: usize,
}

impl OnlineTrainer {
    /// Trains `network` in place and returns the error measurements.
    ///
    /// # Panics
    ///
    /// Panics on an empty sample set or a zero report interval.
    pub fn run(
        &self,
        network: &mut NeuralNetwork,
        samples: &[TrainingSample],
    ) -> Vec<EpochReport> {
        assert!(!samples.is_empty(), "training needs at least one sample");
        assert!(self.report_interval > 0, "report interval must be positive");
        let mut reports = Vec::new();
        for epoch in 1..=self.epochs {
            for sample in samples {
                network.process(&sample.inputs);
                network.update(&sample.goals);
            }
            if epoch % self.report_interval == 0 || epoch == self.epochs {
                reports.push(EpochReport {
                    epoch,
                    mean_squared_error: mean_squared_error(network, samples),
                });
            }
        }
        reports
    }
}

/// Mean squared error of the network's outputs against the sample goals,
/// averaged over every output unit of every sample.
#[expect(clippy::cast_precision_loss)]
pub fn mean_squared_error(network: &mut NeuralNetwork, samples: &[TrainingSample]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for sample in samples {
        let outputs = network.process(&sample.inputs);
        for (output, goal) in outputs.iter().zip(&sample.goals) {
            total += (output - goal).powi(2);
            count += 1;
        }
    }
    total / count as f64
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    /// The one-hot 3→3 identity mapping: linearly separable, so online
    /// gradient descent must keep improving on it.
    fn one_hot_samples() -> Vec<TrainingSample> {
        (0..3)
            .map(|i| {
                let mut v = vec![0.0; 3];
                v[i] = 1.0;
                TrainingSample::new(v.clone(), v)
            })
            .collect()
    }

    #[test]
    fn test_error_strictly_decreases_during_training() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let mut network = NeuralNetwork::random(&mut rng, 3, &[4, 3]);
        network.learning_rate = 0.5;
        network.bias_learning_rate = 0.5;

        let samples = one_hot_samples();
        let trainer = OnlineTrainer {
            epochs: 250,
            report_interval: 50,
        };
        let reports = trainer.run(&mut network, &samples);
        assert_eq!(reports.len(), 5);
        for pair in reports.windows(2) {
            assert!(
                pair[1].mean_squared_error < pair[0].mean_squared_error,
                "error did not decrease: {pair:?}"
            );
        }
    }

    #[test]
    fn test_trained_network_learns_the_mapping() {
        let mut rng = Pcg64Mcg::seed_from_u64(6);
        let mut network = NeuralNetwork::random(&mut rng, 3, &[4, 3]);
        network.learning_rate = 0.5;
        network.bias_learning_rate = 0.5;

        let samples = one_hot_samples();
        let trainer = OnlineTrainer {
            epochs: 2000,
            report_interval: 500,
        };
        trainer.run(&mut network, &samples);
        for (i, sample) in samples.iter().enumerate() {
            let outputs = network.process(&sample.inputs);
            let best = outputs
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(index, _)| index)
                .unwrap();
            assert_eq!(best, i);
        }
    }

    #[test]
    fn test_report_cadence() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let mut network = NeuralNetwork::random(&mut rng, 3, &[3]);
        let trainer = OnlineTrainer {
            epochs: 7,
            report_interval: 3,
        };
        let reports = trainer.run(&mut network, &one_hot_samples());
        let epochs: Vec<usize> = reports.iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![3, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn test_empty_sample_set_is_rejected() {
        let mut rng = Pcg64Mcg::seed_from_u64(8);
        let mut network = NeuralNetwork::random(&mut rng, 3, &[3]);
        let trainer = OnlineTrainer {
            epochs: 1,
            report_interval: 1,
        };
        trainer.run(&mut network, &[]);
    }
}
