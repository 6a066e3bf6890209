//! Closed-form functions plotted by the demos, with analytic derivatives.

/// A scalar function with a closed-form derivative.
pub trait ClosedForm {
    fn eval(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;

    /// Evaluate the function on every point of `xs`, returning `[x, f(x)]` pairs.
    fn sample_grid(&self, xs: &[f64]) -> Vec<[f64; 2]> {
        xs.iter().map(|&x| [x, self.eval(x)]).collect()
    }
}

/// Heaviside-style threshold unit: `1` when `x + bias >= 0`, else `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepThreshold {
    pub bias: f64,
}

impl ClosedForm for StepThreshold {
    fn eval(&self, x: f64) -> f64 {
        if x + self.bias >= 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Zero everywhere except at the jump, where it is undefined; reported as 0.
    fn derivative(&self, _x: f64) -> f64 {
        0.0
    }
}

/// `f(x) = (x / 100)^2 * sin(x / 5)`, the hidden function of the gradient-guess demo.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WavyQuadratic;

impl ClosedForm for WavyQuadratic {
    fn eval(&self, x: f64) -> f64 {
        let s = x / 100.0;
        s * s * (x / 5.0).sin()
    }

    fn derivative(&self, x: f64) -> f64 {
        let s = x / 100.0;
        2.0 * x / 10_000.0 * (x / 5.0).sin() + 0.2 * s * s * (x / 5.0).cos()
    }
}

/// `n` evenly spaced points over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_endpoints() {
        let xs = linspace(-10.0, 10.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[999], 10.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn step_is_inclusive_at_threshold() {
        let f = StepThreshold { bias: 1.5 };
        assert_eq!(f.eval(-1.5), 1.0);
        assert_eq!(f.eval(-1.6), 0.0);
        assert_eq!(f.eval(3.0), 1.0);
    }

    #[test]
    fn wavy_quadratic_derivative_matches_central_difference() {
        let f = WavyQuadratic;
        let h = 1e-5;
        for &x in &[0.0, 12.5, 37.0, 50.0, 81.3, 100.0] {
            let numeric = (f.eval(x + h) - f.eval(x - h)) / (2.0 * h);
            assert_relative_eq!(f.derivative(x), numeric, epsilon = 1e-8);
        }
    }

    #[test]
    fn wavy_quadratic_known_value() {
        // (50/100)^2 * sin(10)
        assert_relative_eq!(WavyQuadratic.eval(50.0), 0.25 * 10f64.sin(), epsilon = 1e-15);
    }
}
