//! # Kinetics API Module
//!
//! ## Purpose
//! Common surface of every rate law ("kinetics model"): the closed sum type `KineticsType`,
//! the model tag `KineticsModel`, the coefficient configuration trait and the crate error type.
//!
//! ## Key Logic
//! - `RateLaw` is the generic evaluation contract: rate, dk/dT, and both in one pass, for any
//!   `KinScalar` representation of the temperature.
//! - `RateCoefficients` is the configuration contract. Coefficients are replaced wholesale by
//!   `reset_coefs`, whose vector length selects the optional coefficients (Tref, rscale...).
//!   Unknown lengths are rejected with `KineticsError::CoefficientCount`.
//! - `KineticsType` dispatches configuration through `enum_dispatch` and evaluation through an
//!   exhaustive match, so adding a model is a compile error everywhere it is not handled.
//!
//! ## Usage Pattern
//! ```rust
//! use KiRates::Kinetics::kinetics_api::{KineticsModel, KineticsType, RateCoefficients, RateLaw};
//! use KiRates::Kinetics::kinetics_conditions::KineticsConditions;
//! let mut rate = KineticsType::from_coefficients(KineticsModel::Kooij, &[1e10, 0.5, 8e4]).unwrap();
//! let cond = KineticsConditions::new(1200.0_f64);
//! let (k, dk_dT) = rate.rate_and_derivative(&cond);
//! assert!(k > 0.0 && dk_dT > 0.0);
//! rate.reset_coefs(&[2e10, 0.5, 8e4, 300.0]).unwrap();
//! ```
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::kinetics_models::{
    ArrheniusRate, BerthelotHercourtEssenRate, BerthelotRate, ConstantRate, HercourtEssenRate,
    KooijRate, VantHoffRate,
};
use crate::Kinetics::photochemical::PhotochemicalRate;
use crate::Kinetics::reaction::ReactionType;
use crate::Kinetics::scalar::KinScalar;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// configuration errors: detected at construction or reset time, recoverable by the caller
#[derive(Debug, Error)]
pub enum KineticsError {
    #[error("{model} rate accepts {expected} coefficients, got {got}")]
    CoefficientCount {
        model: KineticsModel,
        expected: String,
        got: usize,
    },
    #[error("{reaction_type} reaction '{equation}' needs {expected} rate constant(s), got {got}")]
    BranchCount {
        reaction_type: ReactionType,
        equation: String,
        expected: String,
        got: usize,
    },
    #[error("duplicate reaction '{equation}' mixes {first} and {other} kinetics")]
    MixedDuplicateKinetics {
        equation: String,
        first: KineticsModel,
        other: KineticsModel,
    },
    #[error("{model} kinetics cannot be used in {reaction_type} reaction '{equation}'")]
    UnsupportedKinetics {
        reaction_type: ReactionType,
        model: KineticsModel,
        equation: String,
    },
    #[error("reaction '{equation}' has {n_branches} rate constant(s), no index {index}")]
    BranchIndexOutOfRange {
        equation: String,
        index: usize,
        n_branches: usize,
    },
    #[error("third-body efficiencies given for {reaction_type} reaction '{equation}'")]
    UnexpectedEfficiencies {
        reaction_type: ReactionType,
        equation: String,
    },
    #[error("falloff blending of '{equation}': {details}")]
    FalloffBlending { equation: String, details: String },
    #[error("Troe falloff accepts 3 or 4 coefficients [alpha, T3, T1, (T2)], got {0}")]
    TroeCoefficientCount(usize),
    #[error("species index {index} out of range for {n_species} species")]
    SpeciesIndexOutOfRange { index: usize, n_species: usize },
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("reaction '{equation}' is built for {got} species, mechanism has {expected}")]
    SpeciesCountMismatch {
        equation: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid wavelength grid: {0}")]
    WavelengthGrid(String),
    #[error("failed to decode reaction description: {0}")]
    Serde(#[from] serde_json::Error),
}

/// kinetics model tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KineticsModel {
    Constant,
    /// power law Cf*(T/Tref)^eta
    HercourtEssen,
    Berthelot,
    Arrhenius,
    BerthelotHercourtEssen,
    /// modified Arrhenius
    Kooij,
    VantHoff,
    Photochemical,
}

impl KineticsModel {
    /// coefficient vector lengths accepted by reset_coefs
    pub fn accepted_arities(&self) -> &'static [usize] {
        match self {
            KineticsModel::Constant => &[1],
            KineticsModel::HercourtEssen => &[2, 3],
            KineticsModel::Berthelot => &[2],
            KineticsModel::Arrhenius => &[2, 3],
            KineticsModel::BerthelotHercourtEssen => &[3, 4],
            KineticsModel::Kooij => &[3, 4, 5],
            KineticsModel::VantHoff => &[4, 5, 6],
            // [lambda..., sigma...], checked separately
            KineticsModel::Photochemical => &[],
        }
    }

    pub fn check_arity(&self, got: usize) -> Result<(), KineticsError> {
        let ok = match self {
            KineticsModel::Photochemical => got >= 4 && got % 2 == 0,
            _ => self.accepted_arities().contains(&got),
        };
        if ok {
            Ok(())
        } else {
            let expected = match self {
                KineticsModel::Photochemical => "an even number (>= 4) of".to_owned(),
                _ => self
                    .accepted_arities()
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(" or "),
            };
            Err(KineticsError::CoefficientCount {
                model: *self,
                expected,
                got,
            })
        }
    }
}

impl fmt::Display for KineticsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KineticsModel::Constant => "Constant",
            KineticsModel::HercourtEssen => "Hercourt-Essen",
            KineticsModel::Berthelot => "Berthelot",
            KineticsModel::Arrhenius => "Arrhenius",
            KineticsModel::BerthelotHercourtEssen => "Berthelot-Hercourt-Essen",
            KineticsModel::Kooij => "Kooij",
            KineticsModel::VantHoff => "Van't Hoff",
            KineticsModel::Photochemical => "Photochemical",
        };
        write!(f, "{}", name)
    }
}

/// evaluation contract shared by all rate laws
#[allow(non_snake_case)]
pub trait RateLaw {
    /// k(T)
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S;
    /// dk/dT
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S;
    /// (k, dk/dT) with shared sub-expressions built once
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S);

    /// k at a bare temperature
    fn rate_at<S: KinScalar>(&self, T: S) -> S {
        self.rate(&KineticsConditions::new(T))
    }
    fn derivative_at<S: KinScalar>(&self, T: S) -> S {
        self.derivative(&KineticsConditions::new(T))
    }
    fn rate_and_derivative_at<S: KinScalar>(&self, T: S) -> (S, S) {
        self.rate_and_derivative(&KineticsConditions::new(T))
    }
}

/// coefficient configuration of a rate law
#[enum_dispatch]
pub trait RateCoefficients {
    fn kinetics_model(&self) -> KineticsModel;
    /// full ordered coefficient vector (longest accepted arity)
    fn coefficients(&self) -> Vec<f64>;
    /// replace the coefficients; the vector length selects which optional ones are present,
    /// optional coefficients not present keep their current value
    fn reset_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError>;
}

/// closed set of rate laws
#[enum_dispatch(RateCoefficients)]
#[derive(Debug, Clone, PartialEq)]
pub enum KineticsType {
    Constant(ConstantRate),
    HercourtEssen(HercourtEssenRate),
    Berthelot(BerthelotRate),
    Arrhenius(ArrheniusRate),
    BerthelotHercourtEssen(BerthelotHercourtEssenRate),
    Kooij(KooijRate),
    VantHoff(VantHoffRate),
    Photochemical(PhotochemicalRate),
}

macro_rules! dispatch_rate_law {
    ($self:ident, $rate:ident => $body:expr) => {
        match $self {
            KineticsType::Constant($rate) => $body,
            KineticsType::HercourtEssen($rate) => $body,
            KineticsType::Berthelot($rate) => $body,
            KineticsType::Arrhenius($rate) => $body,
            KineticsType::BerthelotHercourtEssen($rate) => $body,
            KineticsType::Kooij($rate) => $body,
            KineticsType::VantHoff($rate) => $body,
            KineticsType::Photochemical($rate) => $body,
        }
    };
}

impl RateLaw for KineticsType {
    fn rate<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        let k = dispatch_rate_law!(self, r => r.rate(conditions));
        debug_assert!(!k.has_nan(), "NaN rate from {} kinetics", self.kinetics_model());
        k
    }
    fn derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> S {
        let dk = dispatch_rate_law!(self, r => r.derivative(conditions));
        debug_assert!(!dk.has_nan(), "NaN dk/dT from {} kinetics", self.kinetics_model());
        dk
    }
    fn rate_and_derivative<S: KinScalar>(&self, conditions: &KineticsConditions<S>) -> (S, S) {
        let (k, dk) = dispatch_rate_law!(self, r => r.rate_and_derivative(conditions));
        debug_assert!(
            !k.has_nan() && !dk.has_nan(),
            "NaN from {} kinetics",
            self.kinetics_model()
        );
        (k, dk)
    }
}

impl KineticsType {
    /// build a rate law of the given model from an ordered coefficient vector
    pub fn from_coefficients(
        model: KineticsModel,
        coefficients: &[f64],
    ) -> Result<KineticsType, KineticsError> {
        let rate: KineticsType = match model {
            KineticsModel::Constant => ConstantRate::from_coefs(coefficients)?.into(),
            KineticsModel::HercourtEssen => HercourtEssenRate::from_coefs(coefficients)?.into(),
            KineticsModel::Berthelot => BerthelotRate::from_coefs(coefficients)?.into(),
            KineticsModel::Arrhenius => ArrheniusRate::from_coefs(coefficients)?.into(),
            KineticsModel::BerthelotHercourtEssen => {
                BerthelotHercourtEssenRate::from_coefs(coefficients)?.into()
            }
            KineticsModel::Kooij => KooijRate::from_coefs(coefficients)?.into(),
            KineticsModel::VantHoff => VantHoffRate::from_coefs(coefficients)?.into(),
            KineticsModel::Photochemical => PhotochemicalRate::from_coefs(coefficients)?.into(),
        };
        Ok(rate)
    }
}

impl fmt::Display for KineticsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KineticsType::Photochemical(p) => write!(
                f,
                "{} ({} wavelength points)",
                self.kinetics_model(),
                p.n_wavelengths()
            ),
            _ => write!(f, "{} {:?}", self.kinetics_model(), self.coefficients()),
        }
    }
}
