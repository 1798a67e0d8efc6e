#![allow(non_snake_case)]
//! Analytic temperature-dependent rate laws.
//!
//! | model | k(T) | reset_coefs |
//! |---|---|---|
//! | Constant | Cf | [Cf] |
//! | Hercourt-Essen | Cf (T/Tref)^eta | [Cf, eta, (Tref)] |
//! | Berthelot | Cf exp(D T) | [Cf, D] |
//! | Arrhenius | Cf exp(-Ea/(R T)) | [Cf, Ea, (rscale)] |
//! | Berthelot-Hercourt-Essen | Cf (T/Tref)^eta exp(D T) | [Cf, eta, D, (Tref)] |
//! | Kooij | Cf (T/Tref)^eta exp(-Ea/(R T)) | [Cf, eta, Ea, (Tref, (rscale))] |
//! | Van't Hoff | Cf (T/Tref)^eta exp(-Ea/(R T) + D T) | [Cf, eta, Ea, D, (Tref, (rscale))] |
//!
//! `R` is `rscale`, the universal gas constant unless reset. Every law keeps the raw
//! coefficients plus the combinations the formula actually needs (Cf/Tref^eta, Ea/rscale), so
//! T^eta is evaluated as exp(eta ln T) with the cached ln T of the conditions.
use crate::Kinetics::constants::R_universal;
use crate::Kinetics::kinetics_api::{KineticsError, KineticsModel, RateCoefficients, RateLaw};
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::scalar::KinScalar;
use log::debug;

/////////////////////////CONSTANT///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRate {
    Cf: f64,
}

impl ConstantRate {
    pub fn new(Cf: f64) -> Self {
        Self { Cf }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
    }
}

impl RateLaw for ConstantRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        conditions.T().zero_clone() + S::from_f64(self.Cf)
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        conditions.T().zero_clone()
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        (self.rate(conditions), self.derivative(conditions))
    }
}

impl RateCoefficients for ConstantRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::Constant
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::Constant.check_arity(coefficients.len())?;
        self.Cf = coefficients[0];
        Ok(())
    }
}

/////////////////////////HERCOURT-ESSEN (POWER LAW)///////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct HercourtEssenRate {
    Cf: f64,
    eta: f64,
    Tref: f64,
    // Cf / Tref^eta
    Cf_scaled: f64,
}

impl HercourtEssenRate {
    /// Cf * T^eta (Tref = 1)
    pub fn new(Cf: f64, eta: f64) -> Self {
        Self {
            Cf,
            eta,
            Tref: 1.0,
            Cf_scaled: Cf,
        }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    fn update_cache(&mut self) {
        self.Cf_scaled = self.Cf * self.Tref.powf(-self.eta);
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn eta(&self) -> f64 {
        self.eta
    }
    pub fn Tref(&self) -> f64 {
        self.Tref
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
        self.update_cache();
    }
    pub fn set_eta(&mut self, eta: f64) {
        self.eta = eta;
        self.update_cache();
    }
    pub fn set_Tref(&mut self, Tref: f64) {
        self.Tref = Tref;
        self.update_cache();
    }
}

impl RateLaw for HercourtEssenRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        S::from_f64(self.Cf_scaled) * conditions.ln_T().scale(self.eta).exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate(conditions) * conditions.inv_T().scale(self.eta)
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        let dk = k.clone() * conditions.inv_T().scale(self.eta);
        (k, dk)
    }
}

impl RateCoefficients for HercourtEssenRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::HercourtEssen
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.eta, self.Tref]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::HercourtEssen.check_arity(coefficients.len())?;
        if coefficients.len() == 3 {
            self.Tref = coefficients[2];
        }
        self.Cf = coefficients[0];
        self.eta = coefficients[1];
        self.update_cache();
        debug!("Hercourt-Essen coefficients reset to {:?}", self.coefficients());
        Ok(())
    }
}

/////////////////////////BERTHELOT///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct BerthelotRate {
    Cf: f64,
    D: f64,
}

impl BerthelotRate {
    pub fn new(Cf: f64, D: f64) -> Self {
        Self { Cf, D }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn D(&self) -> f64 {
        self.D
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
    }
    pub fn set_D(&mut self, D: f64) {
        self.D = D;
    }
}

impl RateLaw for BerthelotRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        S::from_f64(self.Cf) * conditions.T().scale(self.D).exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate(conditions).scale(self.D)
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        let dk = k.scale(self.D);
        (k, dk)
    }
}

impl RateCoefficients for BerthelotRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::Berthelot
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.D]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::Berthelot.check_arity(coefficients.len())?;
        self.Cf = coefficients[0];
        self.D = coefficients[1];
        Ok(())
    }
}

/////////////////////////ARRHENIUS///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct ArrheniusRate {
    Cf: f64,
    Ea: f64,
    rscale: f64,
    // Ea / rscale, K
    Ea_scaled: f64,
}

impl ArrheniusRate {
    /// Ea in J/mol, rscale = R
    pub fn new(Cf: f64, Ea: f64) -> Self {
        Self {
            Cf,
            Ea,
            rscale: R_universal,
            Ea_scaled: Ea / R_universal,
        }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    fn update_cache(&mut self) {
        self.Ea_scaled = self.Ea / self.rscale;
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn Ea(&self) -> f64 {
        self.Ea
    }
    pub fn rscale(&self) -> f64 {
        self.rscale
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
    }
    pub fn set_Ea(&mut self, Ea: f64) {
        self.Ea = Ea;
        self.update_cache();
    }
    pub fn set_rscale(&mut self, rscale: f64) {
        self.rscale = rscale;
        self.update_cache();
    }
}

impl RateLaw for ArrheniusRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        S::from_f64(self.Cf) * (-conditions.inv_T().scale(self.Ea_scaled)).exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate_and_derivative(conditions).1
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        let dk = k.clone() * conditions.inv_T().square().scale(self.Ea_scaled);
        (k, dk)
    }
}

impl RateCoefficients for ArrheniusRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::Arrhenius
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.Ea, self.rscale]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::Arrhenius.check_arity(coefficients.len())?;
        if coefficients.len() == 3 {
            self.rscale = coefficients[2];
        }
        self.Cf = coefficients[0];
        self.Ea = coefficients[1];
        self.update_cache();
        debug!("Arrhenius coefficients reset to {:?}", self.coefficients());
        Ok(())
    }
}

/////////////////////////BERTHELOT-HERCOURT-ESSEN////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct BerthelotHercourtEssenRate {
    Cf: f64,
    eta: f64,
    D: f64,
    Tref: f64,
    Cf_scaled: f64,
}

impl BerthelotHercourtEssenRate {
    /// Cf * T^eta * exp(D*T) (Tref = 1)
    pub fn new(Cf: f64, eta: f64, D: f64) -> Self {
        Self {
            Cf,
            eta,
            D,
            Tref: 1.0,
            Cf_scaled: Cf,
        }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    fn update_cache(&mut self) {
        self.Cf_scaled = self.Cf * self.Tref.powf(-self.eta);
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn eta(&self) -> f64 {
        self.eta
    }
    pub fn D(&self) -> f64 {
        self.D
    }
    pub fn Tref(&self) -> f64 {
        self.Tref
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
        self.update_cache();
    }
    pub fn set_eta(&mut self, eta: f64) {
        self.eta = eta;
        self.update_cache();
    }
    pub fn set_D(&mut self, D: f64) {
        self.D = D;
    }
    pub fn set_Tref(&mut self, Tref: f64) {
        self.Tref = Tref;
        self.update_cache();
    }
}

impl RateLaw for BerthelotHercourtEssenRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        let exponent = conditions.ln_T().scale(self.eta) + conditions.T().scale(self.D);
        S::from_f64(self.Cf_scaled) * exponent.exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate_and_derivative(conditions).1
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        // dk/dT = k * (D + eta/T)
        let dk = k.clone() * (S::from_f64(self.D) + conditions.inv_T().scale(self.eta));
        (k, dk)
    }
}

impl RateCoefficients for BerthelotHercourtEssenRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::BerthelotHercourtEssen
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.eta, self.D, self.Tref]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::BerthelotHercourtEssen.check_arity(coefficients.len())?;
        if coefficients.len() == 4 {
            self.Tref = coefficients[3];
        }
        self.Cf = coefficients[0];
        self.eta = coefficients[1];
        self.D = coefficients[2];
        self.update_cache();
        debug!(
            "Berthelot-Hercourt-Essen coefficients reset to {:?}",
            self.coefficients()
        );
        Ok(())
    }
}

/////////////////////////KOOIJ (MODIFIED ARRHENIUS)///////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct KooijRate {
    Cf: f64,
    eta: f64,
    Ea: f64,
    Tref: f64,
    rscale: f64,
    Cf_scaled: f64,
    Ea_scaled: f64,
}

impl KooijRate {
    /// Cf * T^eta * exp(-Ea/(R*T)), Ea in J/mol (Tref = 1, rscale = R)
    pub fn new(Cf: f64, eta: f64, Ea: f64) -> Self {
        Self {
            Cf,
            eta,
            Ea,
            Tref: 1.0,
            rscale: R_universal,
            Cf_scaled: Cf,
            Ea_scaled: Ea / R_universal,
        }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    fn update_cache(&mut self) {
        self.Cf_scaled = self.Cf * self.Tref.powf(-self.eta);
        self.Ea_scaled = self.Ea / self.rscale;
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn eta(&self) -> f64 {
        self.eta
    }
    pub fn Ea(&self) -> f64 {
        self.Ea
    }
    pub fn Tref(&self) -> f64 {
        self.Tref
    }
    pub fn rscale(&self) -> f64 {
        self.rscale
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
        self.update_cache();
    }
    pub fn set_eta(&mut self, eta: f64) {
        self.eta = eta;
        self.update_cache();
    }
    pub fn set_Ea(&mut self, Ea: f64) {
        self.Ea = Ea;
        self.update_cache();
    }
    pub fn set_Tref(&mut self, Tref: f64) {
        self.Tref = Tref;
        self.update_cache();
    }
    pub fn set_rscale(&mut self, rscale: f64) {
        self.rscale = rscale;
        self.update_cache();
    }
}

impl RateLaw for KooijRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        let exponent =
            conditions.ln_T().scale(self.eta) - conditions.inv_T().scale(self.Ea_scaled);
        S::from_f64(self.Cf_scaled) * exponent.exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate_and_derivative(conditions).1
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        // dk/dT = k * (eta + Ea/(R T)) / T
        let dk = k.clone()
            * (S::from_f64(self.eta) + conditions.inv_T().scale(self.Ea_scaled))
            * conditions.inv_T().clone();
        (k, dk)
    }
}

impl RateCoefficients for KooijRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::Kooij
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.eta, self.Ea, self.Tref, self.rscale]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::Kooij.check_arity(coefficients.len())?;
        if coefficients.len() >= 4 {
            self.Tref = coefficients[3];
        }
        if coefficients.len() == 5 {
            self.rscale = coefficients[4];
        }
        self.Cf = coefficients[0];
        self.eta = coefficients[1];
        self.Ea = coefficients[2];
        self.update_cache();
        debug!("Kooij coefficients reset to {:?}", self.coefficients());
        Ok(())
    }
}

/////////////////////////VAN'T HOFF///////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct VantHoffRate {
    Cf: f64,
    eta: f64,
    Ea: f64,
    D: f64,
    Tref: f64,
    rscale: f64,
    Cf_scaled: f64,
    Ea_scaled: f64,
}

impl VantHoffRate {
    pub fn new(Cf: f64, eta: f64, Ea: f64, D: f64) -> Self {
        Self {
            Cf,
            eta,
            Ea,
            D,
            Tref: 1.0,
            rscale: R_universal,
            Cf_scaled: Cf,
            Ea_scaled: Ea / R_universal,
        }
    }
    pub fn from_coefs(coefficients: &[f64]) -> Result<Self, KineticsError> {
        let mut rate = Self::new(0.0, 0.0, 0.0, 0.0);
        rate.reset_coefs(coefficients)?;
        Ok(rate)
    }
    fn update_cache(&mut self) {
        self.Cf_scaled = self.Cf * self.Tref.powf(-self.eta);
        self.Ea_scaled = self.Ea / self.rscale;
    }
    pub fn Cf(&self) -> f64 {
        self.Cf
    }
    pub fn eta(&self) -> f64 {
        self.eta
    }
    pub fn Ea(&self) -> f64 {
        self.Ea
    }
    pub fn D(&self) -> f64 {
        self.D
    }
    pub fn Tref(&self) -> f64 {
        self.Tref
    }
    pub fn rscale(&self) -> f64 {
        self.rscale
    }
    pub fn set_Cf(&mut self, Cf: f64) {
        self.Cf = Cf;
        self.update_cache();
    }
    pub fn set_eta(&mut self, eta: f64) {
        self.eta = eta;
        self.update_cache();
    }
    pub fn set_Ea(&mut self, Ea: f64) {
        self.Ea = Ea;
        self.update_cache();
    }
    pub fn set_D(&mut self, D: f64) {
        self.D = D;
    }
    pub fn set_Tref(&mut self, Tref: f64) {
        self.Tref = Tref;
        self.update_cache();
    }
    pub fn set_rscale(&mut self, rscale: f64) {
        self.rscale = rscale;
        self.update_cache();
    }
}

impl RateLaw for VantHoffRate {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        let exponent = conditions.ln_T().scale(self.eta)
            - conditions.inv_T().scale(self.Ea_scaled)
            + conditions.T().scale(self.D);
        S::from_f64(self.Cf_scaled) * exponent.exp()
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        self.rate_and_derivative(conditions).1
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let k = self.rate(conditions);
        // dk/dT = k * (D + (eta + Ea/(R T)) / T)
        let dk = k.clone()
            * (S::from_f64(self.D)
                + (S::from_f64(self.eta) + conditions.inv_T().scale(self.Ea_scaled))
                    * conditions.inv_T().clone());
        (k, dk)
    }
}

impl RateCoefficients for VantHoffRate {
    fn kinetics_model(&self) -> KineticsModel {
        KineticsModel::VantHoff
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.Cf, self.eta, self.Ea, self.D, self.Tref, self.rscale]
    }
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        KineticsModel::VantHoff.check_arity(coefficients.len())?;
        if coefficients.len() >= 5 {
            self.Tref = coefficients[4];
        }
        if coefficients.len() == 6 {
            self.rscale = coefficients[5];
        }
        self.Cf = coefficients[0];
        self.eta = coefficients[1];
        self.Ea = coefficients[2];
        self.D = coefficients[3];
        self.update_cache();
        debug!("Van't Hoff coefficients reset to {:?}", self.coefficients());
        Ok(())
    }
}
