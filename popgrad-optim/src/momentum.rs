// popgrad-optim/src/momentum.rs

use log::debug;
use popgrad_core::{Parameter, PopGradError};

use crate::Optimizer;

/// Gradient descent with a velocity term.
///
/// Per element `j` of each parameter:
///
/// ```text
/// v[j] = beta * v[j] - lr * grad[j]
/// data[j] += v[j]
/// ```
///
/// Velocities start at zero and persist across `step` calls. `zero_grad`
/// never clears them.
#[derive(Debug, Clone)]
pub struct Momentum {
    params: Vec<Parameter>,
    lr: f64,
    beta: f64,
    velocities: Vec<Vec<f64>>,
}

impl Momentum {
    pub const DEFAULT_BETA: f64 = 0.9;

    pub fn new(params: Vec<Parameter>, lr: f64, beta: f64) -> Self {
        let velocities = params.iter().map(|p| vec![0.0; p.numel()]).collect();
        Momentum {
            params,
            lr,
            beta,
            velocities,
        }
    }

    /// Same as [`Momentum::new`] with `beta = 0.9`.
    pub fn with_default_beta(params: Vec<Parameter>, lr: f64) -> Self {
        Momentum::new(params, lr, Self::DEFAULT_BETA)
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// One velocity buffer per parameter, in parameter order.
    pub fn velocities(&self) -> &[Vec<f64>] {
        &self.velocities
    }
}

impl Optimizer for Momentum {
    fn step(&mut self) -> Result<(), PopGradError> {
        debug!(
            "Momentum step over {} parameters, lr={}, beta={}",
            self.params.len(),
            self.lr,
            self.beta
        );
        let (lr, beta) = (self.lr, self.beta);
        for (param, velocity) in self.params.iter().zip(self.velocities.iter_mut()) {
            param.update_data(|data, grad| {
                if grad.len() != data.len() || velocity.len() != data.len() {
                    return Err(PopGradError::ShapeMismatch {
                        expected: data.len(),
                        actual: if grad.len() != data.len() {
                            grad.len()
                        } else {
                            velocity.len()
                        },
                        operation: "Momentum::step".to_string(),
                    });
                }
                for ((d, g), v) in data.iter_mut().zip(grad).zip(velocity.iter_mut()) {
                    *v = beta * *v - lr * g;
                    *d += *v;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        debug!("Momentum zero_grad over {} parameters", self.params.len());
        for param in &self.params {
            param.zero_grad();
        }
    }

    fn params(&self) -> &[Parameter] {
        &self.params
    }
}
