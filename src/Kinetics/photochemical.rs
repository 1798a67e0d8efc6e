//! # Photochemical Module
//!
//! ## Purpose
//! Photolysis rate: absorption cross-section of a species integrated against the actinic flux.
//!
//! ## Key Logic
//! The cross-section is tabulated on its own wavelength grid. When a flux is supplied on another
//! grid, the cross-section is first resampled onto the flux grid by averaging the piecewise-linear
//! cross-section over every flux bin `[lambda[i], lambda[i+1]]` (zero outside the tabulated range),
//! so the integral of the cross-section over each bin is preserved. The rate is then
//! `k = sum_i sigma[i] * irradiance[i] * (lambda[i+1] - lambda[i])` over all bins but the last point.
//!
//! The rate does not depend on temperature: it is cached when the flux or the table changes and
//! `dk/dT = 0`.
use crate::Kinetics::kinetics_api::{KineticsError, KineticsModel, RateCoefficients, RateLaw};
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::scalar::KinScalar;
use log::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct PhotochemicalRate {
    lambda_grid: Vec<f64>,
    cross_section: Vec<f64>,
    // flux grid and irradiance of the last set_flux call
    flux: Option<(Vec<f64>, Vec<f64>)>,
    k: f64,
}

fn check_grid(lambda: &[f64], values: &[f64], what: &str) -> Result<(), KineticsError> {
    if lambda.len() != values.len() {
        return Err(KineticsError::WavelengthGrid(format!(
            "{} has {} values on {} wavelengths",
            what,
            values.len(),
            lambda.len()
        )));
    }
    if lambda.len() < 2 {
        return Err(KineticsError::WavelengthGrid(format!(
            "{} needs at least 2 wavelengths, got {}",
            what,
            lambda.len()
        )));
    }
    if lambda.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(KineticsError::WavelengthGrid(format!(
            "{} wavelengths must be strictly increasing",
            what
        )));
    }
    Ok(())
}

/// Average of the piecewise-linear function (x, y) over every bin of `target`.
/// The returned vector has the length of `target`; its last entry closes the grid and is 0.
pub fn bin_average_on_grid(x: &[f64], y: &[f64], target: &[f64]) -> Vec<f64> {
    let mut averaged = vec![0.0; target.len()];
    for (i, bin) in target.windows(2).enumerate() {
        let (a, b) = (bin[0], bin[1]);
        let mut integral = 0.0;
        for (seg_x, seg_y) in x.windows(2).zip(y.windows(2)) {
            let lo = a.max(seg_x[0]);
            let hi = b.min(seg_x[1]);
            if lo >= hi {
                continue;
            }
            let slope = (seg_y[1] - seg_y[0]) / (seg_x[1] - seg_x[0]);
            let y_lo = seg_y[0] + slope * (lo - seg_x[0]);
            let y_hi = seg_y[0] + slope * (hi - seg_x[0]);
            integral += 0.5 * (y_lo + y_hi) * (hi - lo);
        }
        averaged[i] = integral / (b - a);
    }
    averaged
}

impl PhotochemicalRate {
    /// cross-section table; the rate stays 0 until a flux is set
    pub fn new(lambda_grid: Vec<f64>, cross_section: Vec<f64>) -> Result<Self, KineticsError> {
        check_grid(&lambda_grid, &cross_section, "cross-section")?;
        Ok(Self {
            lambda_grid,
            cross_section,
            flux: None,
            k: 0.0,
        })
    }

    /// from `[lambda..., sigma...]`
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        KineticsModel::Photochemical.check_arity(coefficients.len())?;
        let (lambda, sigma) = coefficients.split_at(coefficients.len() / 2);
        Self::new(lambda.to_vec(), sigma.to_vec())
    }

    pub fn n_wavelengths(&self) -> usize {
        self.lambda_grid.len()
    }
    pub fn lambda_grid(&self) -> &[f64] {
        &self.lambda_grid
    }
    pub fn cross_section(&self) -> &[f64] {
        &self.cross_section
    }
    /// cached rate, 0 before the first flux
    pub fn k(&self) -> f64 {
        self.k
    }

    /// supply the actinic flux and recompute the cached rate
    pub fn set_flux(&mut self, lambda_flux: Vec<f64>, irradiance: Vec<f64>) -> Result<(), KineticsError> {
        check_grid(&lambda_flux, &irradiance, "flux")?;
        self.flux = Some((lambda_flux, irradiance));
        self.update_rate();
        info!(
            "photolysis rate updated: k = {:e} on {} flux points",
            self.k,
            self.flux.as_ref().map_or(0, |(l, _)| l.len())
        );
        Ok(())
    }

    fn update_rate(&mut self) {
        self.k = match &self.flux {
            Some((lambda_flux, irradiance)) => {
                let sigma = bin_average_on_grid(&self.lambda_grid, &self.cross_section, lambda_flux);
                lambda_flux
                    .windows(2)
                    .enumerate()
                    .map(|(i, w)| sigma[i] * irradiance[i] * (w[1] - w[0]))
                    .sum()
            }
            None => 0.0,
        };
    }
}

impl RateLaw for PhotochemicalRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        conditions.T().zero_clone() + S::from_f64(self.k)
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        conditions.T().zero_clone()
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        (self.rate(conditions), self.derivative(conditions))
    }
}

impl RateCoefficients for PhotochemicalRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::Photochemical
    }
    fn coefficients(&self) -> Vec<f64> {
        let mut coefs = self.lambda_grid.clone();
        coefs.extend_from_slice(&self.cross_section);
        coefs
    }
    /// replace the cross-section table; a flux already set is kept and the rate recomputed
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::Photochemical.check_arity(coefficients.len())?;
        let (lambda, sigma) = coefficients.split_at(coefficients.len() / 2);
        check_grid(lambda, sigma, "cross-section")?;
        self.lambda_grid = lambda.to_vec();
        self.cross_section = sigma.to_vec();
        self.update_rate();
        debug!(
            "photochemical cross-section reset on {} wavelengths",
            self.lambda_grid.len()
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bin_average_is_conservative() {
        // sigma = x on [0, 10]
        let avg = bin_average_on_grid(&[0.0, 10.0], &[0.0, 10.0], &[0.0, 5.0, 10.0]);
        assert_relative_eq!(avg[0], 2.5, max_relative = 1e-14);
        assert_relative_eq!(avg[1], 7.5, max_relative = 1e-14);
        assert_eq!(avg[2], 0.0);

        // table narrower than the target grid: zero outside, integral preserved
        let avg = bin_average_on_grid(&[120.0, 180.0], &[1.0, 1.0], &[100.0, 150.0, 200.0]);
        assert_relative_eq!(avg[0], 0.6, max_relative = 1e-14);
        assert_relative_eq!(avg[1], 0.6, max_relative = 1e-14);
        let integral: f64 = avg[0] * 50.0 + avg[1] * 50.0;
        assert_relative_eq!(integral, 60.0, max_relative = 1e-14);

        // target fully outside the table
        let avg = bin_average_on_grid(&[1.0, 2.0], &[5.0, 5.0], &[3.0, 4.0]);
        assert_eq!(avg, vec![0.0, 0.0]);
    }

    #[test]
    fn test_rate_from_flux() {
        let mut photo = PhotochemicalRate::new(vec![100.0, 200.0], vec![2.0, 2.0]).unwrap();
        assert_eq!(photo.rate_at(500.0_f64), 0.0);
        photo
            .set_flux(vec![100.0, 150.0, 200.0], vec![1.0, 3.0, 5.0])
            .unwrap();
        // 2*1*50 + 2*3*50, the last irradiance closes the grid
        assert_relative_eq!(photo.k(), 400.0, max_relative = 1e-14);
        let (k, dk) = photo.rate_and_derivative_at(1234.0_f64);
        assert_relative_eq!(k, 400.0, max_relative = 1e-14);
        assert_eq!(dk, 0.0);
        assert_eq!(photo.rate_at(300.0_f64), photo.rate_at(3000.0_f64));
    }

    #[test]
    fn test_reset_keeps_flux() {
        let mut photo = PhotochemicalRate::from_coefs(&[100.0, 200.0, 2.0, 2.0]).unwrap();
        photo
            .set_flux(vec![100.0, 150.0, 200.0], vec![1.0, 3.0, 5.0])
            .unwrap();
        photo.reset_coefs(&[100.0, 200.0, 1.0, 1.0]).unwrap();
        assert_relative_eq!(photo.k(), 200.0, max_relative = 1e-14);
        assert_eq!(photo.coefficients(), vec![100.0, 200.0, 1.0, 1.0]);
        assert_eq!(photo.n_wavelengths(), 2);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(PhotochemicalRate::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(PhotochemicalRate::new(vec![1.0], vec![1.0]).is_err());
        assert!(PhotochemicalRate::new(vec![2.0, 1.0], vec![1.0, 1.0]).is_err());
        assert!(PhotochemicalRate::from_coefs(&[1.0, 2.0, 3.0]).is_err());
        let mut photo = PhotochemicalRate::new(vec![1.0, 2.0], vec![1.0, 1.0]).unwrap();
        assert!(photo.set_flux(vec![1.0, 1.0], vec![1.0, 1.0]).is_err());
        assert!(photo.reset_coefs(&[2.0, 1.0, 1.0, 1.0]).is_err());
    }
}
