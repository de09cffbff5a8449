// popgrad-optim/src/gd.rs

use log::debug;
use popgrad_core::{Parameter, PopGradError};

use crate::Optimizer;

/// Plain gradient descent.
///
/// Updates each parameter `p` according to `p = p - lr * grad(p)`.
#[derive(Debug, Clone)]
pub struct GD {
    params: Vec<Parameter>,
    lr: f64,
}

impl GD {
    /// Creates a new GD optimizer over `params`.
    pub fn new(params: Vec<Parameter>, lr: f64) -> Self {
        GD { params, lr }
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }
}

impl Optimizer for GD {
    fn step(&mut self) -> Result<(), PopGradError> {
        debug!("GD step over {} parameters, lr={}", self.params.len(), self.lr);
        for param in &self.params {
            param.step(self.lr)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        debug!("GD zero_grad over {} parameters", self.params.len());
        for param in &self.params {
            param.zero_grad();
        }
    }

    fn params(&self) -> &[Parameter] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use popgrad_core::{mul, sum_pop};

    #[test]
    fn test_gd_step() -> Result<(), PopGradError> {
        let p1 = Parameter::new([1.0, 2.0])?;
        let p2 = Parameter::new([5.0])?;
        p1.set_grad(vec![10.0, -20.0])?;
        p2.set_grad(vec![0.5])?;

        let mut optim = GD::new(vec![p1.clone(), p2.clone()], 0.1);
        optim.step()?;

        assert_relative_eq!(p1.data()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p1.data()[1], 4.0, epsilon = 1e-12);
        assert_relative_eq!(p2.data()[0], 4.95, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_gd_zero_grad_only_touches_params() -> Result<(), PopGradError> {
        let w = Parameter::new([2.0, 3.0])?;
        let h = mul(&w, 2.0)?;
        let loss = sum_pop(&h)?;
        loss.backward()?;

        let mut optim = GD::new(vec![w.clone()], 0.1);
        optim.zero_grad();
        assert_eq!(w.grad(), vec![0.0, 0.0]);
        assert_eq!(h.grad(), vec![1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_gd_training_loop_decreases_loss() -> Result<(), PopGradError> {
        // loss = sum((w - target)^2)
        let w = Parameter::new([0.0, 0.0])?;
        let target = [1.0, -2.0];
        let mut optim = GD::new(vec![w.clone()], 0.1);

        let loss_value = |w: &Parameter| -> Result<f64, PopGradError> {
            let diff = (&**w - target)?;
            sum_pop(mul(&diff, &diff)?)?.item()
        };

        let initial = loss_value(&w)?;
        for _ in 0..50 {
            let diff = (&*w - target)?;
            let loss = sum_pop(mul(&diff, &diff)?)?;
            optim.zero_grad();
            loss.backward()?;
            optim.step()?;
        }
        assert!(loss_value(&w)? < initial * 1e-3);
        assert_relative_eq!(w.data()[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(w.data()[1], -2.0, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_lr_accessors() {
        let mut optim = GD::new(Vec::new(), 0.5);
        assert_eq!(optim.lr(), 0.5);
        optim.set_lr(0.01);
        assert_eq!(optim.lr(), 0.01);
        assert!(optim.params().is_empty());
    }
}
