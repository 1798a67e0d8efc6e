#![allow(non_snake_case)]
//! # Falloff Module
//!
//! ## Purpose
//! Pressure-blending functions F(T, Pr) of falloff reactions, with their exact partial
//! derivatives with respect to temperature (at fixed reduced pressure) and reduced pressure.
//!
//! ## Key Logic
//! - Lindemann: F = 1.
//! - Troe: Fcent = (1 - alpha) exp(-T/T3) + alpha exp(-T/T1) [+ exp(-T2/T)],
//!   c = -0.4 - 0.67 log10 Fcent, n = 0.75 - 1.27 log10 Fcent, d = 0.14,
//!   log10 F = log10 Fcent / (1 + ((log10 Pr + c) / (n - d (log10 Pr + c)))^2).
//!
//! The reduced pressure is clamped into the positive finite range before its logarithm is taken,
//! so a vanishing third-body concentration or a vanishing high-pressure rate gives a limit of
//! the blending function, not NaN.
use crate::Kinetics::kinetics_api::KineticsError;
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::scalar::KinScalar;
use std::f64::consts::LN_10;
use std::fmt;

/// broadening constants of the Troe form
const TROE_C1: f64 = -0.4;
const TROE_C2: f64 = -0.67;
const TROE_N1: f64 = 0.75;
const TROE_N2: f64 = -1.27;
const TROE_D: f64 = 0.14;

#[derive(Debug, Clone, PartialEq)]
pub struct TroeFalloff {
    alpha: f64,
    T3: f64,
    T1: f64,
    T2: Option<f64>,
}

impl TroeFalloff {
    pub fn new(alpha: f64, T3: f64, T1: f64, T2: Option<f64>) -> Self {
        Self { alpha, T3, T1, T2 }
    }
    /// [alpha, T3, T1] or [alpha, T3, T1, T2]
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut troe = Self::new(0.0, 1.0, 1.0, None);
        troe.reset_coefs(coefficients)?;
        Ok(troe)
    }
    pub fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        match coefficients {
            [alpha, T3, T1] => {
                *self = Self::new(*alpha, *T3, *T1, None);
            }
            [alpha, T3, T1, T2] => {
                *self = Self::new(*alpha, *T3, *T1, Some(*T2));
            }
            _ => return Err(KineticsError::TroeCoefficientCount(coefficients.len())),
        }
        Ok(())
    }
    pub fn coefficients(&self) -> Vec<f64> {
        let mut coefs = vec![self.alpha, self.T3, self.T1];
        if let Some(T2) = self.T2 {
            coefs.push(T2);
        }
        coefs
    }

    /// center of the falloff curve
    pub fn Fcent<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.Fcent_and_derivative(conditions).0
    }

    /// (Fcent, dFcent/dT)
    pub fn Fcent_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let T = conditions.T();
        let e3 = (-(T.clone() / S::from_f64(self.T3))).exp();
        let e1 = (-(T.clone() / S::from_f64(self.T1))).exp();
        let mut Fc = e3.scale(1.0 - self.alpha) + e1.scale(self.alpha);
        let mut dFc = -(e3.scale((1.0 - self.alpha) / self.T3) + e1.scale(self.alpha / self.T1));
        if let Some(T2) = self.T2 {
            let e2 = (-conditions.inv_T().scale(T2)).exp();
            dFc = dFc + e2.clone() * conditions.inv_T().square().scale(T2);
            Fc = Fc + e2;
        }
        (Fc, dFc)
    }

    pub fn F<S: KinScalar>(&self, conditions: &KineticsConditions<S>, Pr: &S) -> S {
        let Fc = self.Fcent(conditions);
        let log_Fc = Fc.log10();
        let c = S::from_f64(TROE_C1) + log_Fc.scale(TROE_C2);
        let n = S::from_f64(TROE_N1) + log_Fc.scale(TROE_N2);
        let x = Pr.clamp_positive_finite().log10() + c;
        let f1 = x.clone() / (n - x.scale(TROE_D));
        (log_Fc / (S::from_f64(1.0) + f1.square())).exp10()
    }

    /// (F, dF/dT at fixed Pr, dF/dPr)
    pub fn F_and_derivatives<S: KinScalar>(
        &self,
        conditions: &KineticsConditions<S>,
        Pr: &S,
    ) -> (S, S, S) {
        let one = S::from_f64(1.0);
        let (Fc, dFc) = self.Fcent_and_derivative(conditions);
        let Pr = Pr.clamp_positive_finite();

        let L = Fc.log10();
        let dL = dFc / Fc.scale(LN_10);
        let c = S::from_f64(TROE_C1) + L.scale(TROE_C2);
        let n = S::from_f64(TROE_N1) + L.scale(TROE_N2);
        let x = Pr.log10() + c;
        let denom = n.clone() - x.scale(TROE_D);
        let denom2 = denom.square();
        let f1 = x.clone() / denom.clone();
        let g = one + f1.square();
        let g2 = g.square();

        let F = (L.clone() / g.clone()).exp10();

        // f1 depends on T through c and n
        let dc = dL.scale(TROE_C2);
        let dn = dL.scale(TROE_N2);
        let df1_dT = (dc.clone() * denom - x * (dn - dc.scale(TROE_D))) / denom2.clone();
        let dlogF_dT = dL / g - (L.clone() * f1.clone() * df1_dT).scale(2.0) / g2.clone();
        // at fixed n, df1/dx = n/denom^2 and dx/dPr = 1/(Pr ln10)
        let df1_dPr = n / (denom2 * Pr.scale(LN_10));
        let dlogF_dPr = -(L * f1 * df1_dPr).scale(2.0) / g2;

        let dF_dT = F.clone() * dlogF_dT.scale(LN_10);
        let dF_dPr = F.clone() * dlogF_dPr.scale(LN_10);
        (F, dF_dT, dF_dPr)
    }
}

/// how the low- and high-pressure limits of a falloff reaction are blended
#[derive(Debug, Clone, PartialEq)]
pub enum FalloffBlending {
    Lindemann,
    Troe(TroeFalloff),
}

impl FalloffBlending {
    pub fn F<S: KinScalar>(&self, conditions: &KineticsConditions<S>, Pr: &S) -> S {
        match self {
            FalloffBlending::Lindemann => Pr.zero_clone() + S::from_f64(1.0),
            FalloffBlending::Troe(troe) => troe.F(conditions, Pr),
        }
    }
    /// (F, dF/dT at fixed Pr, dF/dPr)
    pub fn F_and_derivatives<S: KinScalar>(
        &self,
        conditions: &KineticsConditions<S>,
        Pr: &S,
    ) -> (S, S, S) {
        match self {
            FalloffBlending::Lindemann => {
                let zero = Pr.zero_clone();
                (zero.clone() + S::from_f64(1.0), zero.clone(), zero)
            }
            FalloffBlending::Troe(troe) => troe.F_and_derivatives(conditions, Pr),
        }
    }
    pub fn coefficients(&self) -> Vec<f64> {
        match self {
            FalloffBlending::Lindemann => Vec::new(),
            FalloffBlending::Troe(troe) => troe.coefficients(),
        }
    }
}

impl fmt::Display for FalloffBlending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FalloffBlending::Lindemann => write!(f, "Lindemann"),
            FalloffBlending::Troe(troe) => write!(f, "Troe {:?}", troe.coefficients()),
        }
    }
}
