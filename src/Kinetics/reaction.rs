#![allow(non_snake_case)]
//! # Reaction Module
//!
//! ## Purpose
//! A chemical reaction as seen by the rate engine: stoichiometry, reaction type and the rate
//! laws ("branches") the reaction owns, plus the forward rate coefficient and its derivatives
//! with respect to temperature and to every species concentration.
//!
//! ## Key Logic
//! - Elementary: k = k(T), no composition dependence.
//! - Duplicate: k = sum of the branches, no composition dependence.
//! - ThreeBody: k = k(T) * [M], [M] = sum_s eff_s c_s, dk/dc_s = k(T) eff_s.
//! - Falloff (Lindemann, Troe): k = k0 / (1/[M] + k0/kinf) * F(T, Pr), Pr = [M] k0 / kinf,
//!   with the full chain rule through k0, kinf, [M] and the blending function.
//!
//! Efficiencies are stored densely (one per species, default 1).
//!
//! ## Usage Pattern
//! Reactions are assembled with `ReactionBuilder`, whose `build()` checks that the branches match
//! the reaction type. Evaluation comes in an allocation-free form writing dk/dc into a caller
//! buffer and a form returning an owned vector.
use crate::Kinetics::falloff::{FalloffBlending, TroeFalloff};
use crate::Kinetics::kinetics_api::{KineticsError, KineticsModel, KineticsType, RateCoefficients, RateLaw};
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::scalar::KinScalar;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// reaction type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Elementary,
    Duplicate,
    #[serde(rename = "three-body")]
    ThreeBody,
    #[serde(rename = "lindemann")]
    LindemannFalloff,
    #[serde(rename = "troe")]
    TroeFalloff,
}

impl<'de> Deserialize<'de> for ReactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "elementary" | "elem" => Ok(ReactionType::Elementary),
            "duplicate" | "dup" => Ok(ReactionType::Duplicate),
            "three-body" | "threebody" => Ok(ReactionType::ThreeBody),
            "lindemann" | "falloff" => Ok(ReactionType::LindemannFalloff),
            "troe" => Ok(ReactionType::TroeFalloff),
            _ => Err(serde::de::Error::custom(format!(
                "Unknown reaction type: {}",
                s
            ))),
        }
    }
}

impl ReactionType {
    pub fn is_falloff(&self) -> bool {
        matches!(self, ReactionType::LindemannFalloff | ReactionType::TroeFalloff)
    }
    /// does the rate depend on a third-body concentration
    pub fn has_third_body(&self) -> bool {
        matches!(self, ReactionType::ThreeBody) || self.is_falloff()
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReactionType::Elementary => "elementary",
            ReactionType::Duplicate => "duplicate",
            ReactionType::ThreeBody => "three-body",
            ReactionType::LindemannFalloff => "Lindemann falloff",
            ReactionType::TroeFalloff => "Troe falloff",
        };
        write!(f, "{}", name)
    }
}

/// species taking part in a reaction
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub index: usize,
    pub stoich: f64,
}

/// rate laws of a reaction, shaped by the reaction type
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionKinetics {
    Elementary(KineticsType),
    Duplicate(Vec<KineticsType>),
    ThreeBody {
        rate: KineticsType,
        efficiencies: Vec<f64>,
    },
    /// rates = [k0, kinf]
    Falloff {
        rates: [KineticsType; 2],
        efficiencies: Vec<f64>,
        blending: FalloffBlending,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    id: String,
    equation: String,
    n_species: usize,
    reversible: bool,
    reactants: Vec<Participant>,
    products: Vec<Participant>,
    kinetics: ReactionKinetics,
}

fn third_body_concentration<S: KinScalar>(
    efficiencies: &[f64],
    molar_densities: &[S],
    zero: S,
) -> S {
    efficiencies
        .iter()
        .zip(molar_densities.iter())
        .fold(zero, |M, (eff, c)| M + c.scale(*eff))
}

fn fill_zeros<S: KinScalar>(dkfwd_dX: &mut [S], zero: &S) {
    for d in dkfwd_dX.iter_mut() {
        *d = zero.clone();
    }
}

impl Reaction {
    pub fn reaction_type(&self) -> ReactionType {
        match &self.kinetics {
            ReactionKinetics::Elementary(_) => ReactionType::Elementary,
            ReactionKinetics::Duplicate(_) => ReactionType::Duplicate,
            ReactionKinetics::ThreeBody { .. } => ReactionType::ThreeBody,
            ReactionKinetics::Falloff {
                blending: FalloffBlending::Lindemann,
                ..
            } => ReactionType::LindemannFalloff,
            ReactionKinetics::Falloff {
                blending: FalloffBlending::Troe(_),
                ..
            } => ReactionType::TroeFalloff,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn equation(&self) -> &str {
        &self.equation
    }
    pub fn n_species(&self) -> usize {
        self.n_species
    }
    pub fn reversible(&self) -> bool {
        self.reversible
    }
    pub fn reactants(&self) -> &[Participant] {
        &self.reactants
    }
    pub fn products(&self) -> &[Participant] {
        &self.products
    }
    pub fn kinetics(&self) -> &ReactionKinetics {
        &self.kinetics
    }
    /// change in the number of moles: sum of product minus reactant coefficients
    pub fn gamma(&self) -> f64 {
        self.products.iter().map(|p| p.stoich).sum::<f64>()
            - self.reactants.iter().map(|r| r.stoich).sum::<f64>()
    }

    pub fn forward_rates(&self) -> &[KineticsType] {
        match &self.kinetics {
            ReactionKinetics::Elementary(rate) => std::slice::from_ref(rate),
            ReactionKinetics::Duplicate(rates) => rates,
            ReactionKinetics::ThreeBody { rate, .. } => std::slice::from_ref(rate),
            ReactionKinetics::Falloff { rates, .. } => rates,
        }
    }
    fn forward_rates_mut(&mut self) -> &mut [KineticsType] {
        match &mut self.kinetics {
            ReactionKinetics::Elementary(rate) => std::slice::from_mut(rate),
            ReactionKinetics::Duplicate(rates) => rates,
            ReactionKinetics::ThreeBody { rate, .. } => std::slice::from_mut(rate),
            ReactionKinetics::Falloff { rates, .. } => rates,
        }
    }
    pub fn n_rate_constants(&self) -> usize {
        self.forward_rates().len()
    }
    /// i-th branch; for falloff reactions 0 is the low- and 1 the high-pressure limit
    pub fn forward_rate(&self, i: usize) -> Option<&KineticsType> {
        self.forward_rates().get(i)
    }
    fn branch_mut(&mut self, i: usize) -> Result<&mut KineticsType, KineticsError> {
        let n = self.n_rate_constants();
        let equation = self.equation.clone();
        self.forward_rates_mut()
            .get_mut(i)
            .ok_or(KineticsError::BranchIndexOutOfRange {
                equation,
                index: i,
                n_branches: n,
            })
    }
    /// refit the coefficients of the i-th branch; the rate law kind stays the same
    pub fn reset_forward_rate_coefs(&mut self, i: usize, coefficients: &[f64]) -> Result<(), KineticsError> {
        self.branch_mut(i)?.reset_coefs(coefficients)?;
        debug!("rate constant {} of '{}' refitted to {:?}", i, self.equation, coefficients);
        Ok(())
    }
    /// new actinic flux for a photochemical branch
    pub fn set_flux(
        &mut self,
        i: usize,
        lambda_grid: Vec<f64>,
        irradiance: Vec<f64>,
    ) -> Result<(), KineticsError> {
        let reaction_type = self.reaction_type();
        let equation = self.equation.clone();
        match self.branch_mut(i)? {
            KineticsType::Photochemical(photo) => photo.set_flux(lambda_grid, irradiance),
            other => Err(KineticsError::UnsupportedKinetics {
                reaction_type,
                model: other.kinetics_model(),
                equation,
            }),
        }
    }

    fn check_molar_densities<S>(&self, molar_densities: &[S]) {
        assert_eq!(
            molar_densities.len(),
            self.n_species,
            "molar densities of '{}' must hold one entry per species",
            self.equation
        );
    }

    pub fn efficiencies(&self) -> Option<&[f64]> {
        match &self.kinetics {
            ReactionKinetics::ThreeBody { efficiencies, .. }
            | ReactionKinetics::Falloff { efficiencies, .. } => Some(efficiencies),
            _ => None,
        }
    }
    pub fn set_efficiency(&mut self, species: usize, efficiency: f64) -> Result<(), KineticsError> {
        let n_species = self.n_species;
        let reaction_type = self.reaction_type();
        match &mut self.kinetics {
            ReactionKinetics::ThreeBody { efficiencies, .. }
            | ReactionKinetics::Falloff { efficiencies, .. } => {
                let slot = efficiencies
                    .get_mut(species)
                    .ok_or(KineticsError::SpeciesIndexOutOfRange {
                        index: species,
                        n_species,
                    })?;
                *slot = efficiency;
                debug!(
                    "efficiency of species {} in '{}' set to {}",
                    species, self.equation, efficiency
                );
                Ok(())
            }
            _ => Err(KineticsError::UnexpectedEfficiencies {
                reaction_type,
                equation: self.equation.clone(),
            }),
        }
    }

    pub fn blending(&self) -> Option<&FalloffBlending> {
        match &self.kinetics {
            ReactionKinetics::Falloff { blending, .. } => Some(blending),
            _ => None,
        }
    }
    /// refit the Troe parameters of a Troe falloff reaction
    pub fn reset_troe_coefs(&mut self, coefficients: &[f64]) -> Result<(), KineticsError> {
        match &mut self.kinetics {
            ReactionKinetics::Falloff {
                blending: FalloffBlending::Troe(troe),
                ..
            } => troe.reset_coefs(coefficients),
            _ => Err(KineticsError::FalloffBlending {
                equation: self.equation.clone(),
                details: "reaction has no Troe parameters".to_owned(),
            }),
        }
    }

    ////////////////////////////////EVALUATION//////////////////////////////////////////////////
    /// forward rate coefficient at the given state
    pub fn compute_forward_rate_coefficient<S: KinScalar>(
        &self,
        molar_densities: &[S],
        conditions: &KineticsConditions<S>,
    ) -> S {
        let k = match &self.kinetics {
            ReactionKinetics::Elementary(rate) => rate.rate(conditions),
            ReactionKinetics::Duplicate(rates) => rates
                .iter()
                .fold(conditions.T().zero_clone(), |k, rate| k + rate.rate(conditions)),
            ReactionKinetics::ThreeBody { rate, efficiencies } => {
                self.check_molar_densities(molar_densities);
                let M = third_body_concentration(
                    efficiencies,
                    molar_densities,
                    conditions.T().zero_clone(),
                );
                rate.rate(conditions) * M
            }
            ReactionKinetics::Falloff {
                rates,
                efficiencies,
                blending,
            } => {
                self.check_molar_densities(molar_densities);
                let M = third_body_concentration(
                    efficiencies,
                    molar_densities,
                    conditions.T().zero_clone(),
                );
                let k0 = rates[0].rate(conditions);
                let kinf = rates[1].rate(conditions);
                let Pr = (M.clone() * k0.clone() / kinf.clone()).clamp_positive_finite();
                let kL = k0.clone() / (S::from_f64(1.0) / M + k0 / kinf);
                kL * blending.F(conditions, &Pr)
            }
        };
        debug_assert!(!k.has_nan(), "NaN forward rate of '{}'", self.equation);
        k
    }

    /// (k, dk/dT); dk/dc_s is written into `dkfwd_dX`, which must hold one entry per species
    pub fn compute_forward_rate_coefficient_and_derivatives<S: KinScalar>(
        &self,
        molar_densities: &[S],
        conditions: &KineticsConditions<S>,
        dkfwd_dX: &mut [S],
    ) -> (S, S) {
        assert_eq!(
            dkfwd_dX.len(),
            self.n_species,
            "derivative buffer of '{}' must hold one entry per species",
            self.equation
        );
        let zero = conditions.T().zero_clone();
        let (k, dk_dT) = match &self.kinetics {
            ReactionKinetics::Elementary(rate) => {
                fill_zeros(dkfwd_dX, &zero);
                rate.rate_and_derivative(conditions)
            }
            ReactionKinetics::Duplicate(rates) => {
                fill_zeros(dkfwd_dX, &zero);
                rates
                    .iter()
                    .fold((zero.clone(), zero.clone()), |(k, dk), rate| {
                        let (k_i, dk_i) = rate.rate_and_derivative(conditions);
                        (k + k_i, dk + dk_i)
                    })
            }
            ReactionKinetics::ThreeBody { rate, efficiencies } => {
                self.check_molar_densities(molar_densities);
                let M = third_body_concentration(efficiencies, molar_densities, zero.clone());
                let (kT, dkT) = rate.rate_and_derivative(conditions);
                for (d, eff) in dkfwd_dX.iter_mut().zip(efficiencies.iter()) {
                    *d = kT.scale(*eff);
                }
                (kT * M.clone(), dkT * M)
            }
            ReactionKinetics::Falloff {
                rates,
                efficiencies,
                blending,
            } => {
                self.check_molar_densities(molar_densities);
                let one = S::from_f64(1.0);
                let M = third_body_concentration(efficiencies, molar_densities, zero.clone());
                let (k0, dk0) = rates[0].rate_and_derivative(conditions);
                let (kinf, dkinf) = rates[1].rate_and_derivative(conditions);
                // Pr is infinite when kinf underflows; the blending sees it clamped
                let Pr = (M.clone() * k0.clone() / kinf.clone()).clamp_positive_finite();
                let kL = k0.clone() / (one / M.clone() + k0.clone() / kinf.clone());
                let (F, dF_dT, dF_dPr) = blending.F_and_derivatives(conditions, &Pr);

                // kL = M k0 kinf / D with D = kinf + M k0; no term divides by kinf or M
                let D = kinf.clone() + M.clone() * k0.clone();
                let D2 = D.square();
                let dkL_dT = M.clone()
                    * (dk0.clone() * kinf.square() + M.clone() * k0.square() * dkinf.clone())
                    / D2.clone();
                let dkL_dM = k0.clone() * kinf.square() / D2;
                // kL dPr/dT = Pr M (kinf dk0 - k0 dkinf) / D,  kL dPr/dM = M k0^2 / D
                let kL_dPr_dT = Pr.clone() * (M.clone() * (kinf * dk0 - k0.clone() * dkinf) / D.clone());
                let kL_dPr_dM = M * k0.square() / D;

                let k = kL.clone() * F.clone();
                let dk_dT = dkL_dT * F.clone() + kL * dF_dT + dF_dPr.clone() * kL_dPr_dT;
                let dk_dM = dkL_dM * F + dF_dPr * kL_dPr_dM;
                for (d, eff) in dkfwd_dX.iter_mut().zip(efficiencies.iter()) {
                    *d = dk_dM.scale(*eff);
                }
                (k, dk_dT)
            }
        };
        debug_assert!(
            !k.has_nan() && !dk_dT.has_nan() && !dkfwd_dX.iter().any(|d| d.has_nan()),
            "NaN forward rate derivatives of '{}'",
            self.equation
        );
        (k, dk_dT)
    }

    /// (k, dk/dT, dk/dc) with an owned derivative vector
    pub fn forward_rate_coefficient_and_derivatives<S: KinScalar>(
        &self,
        molar_densities: &[S],
        conditions: &KineticsConditions<S>,
    ) -> (S, S, Vec<S>) {
        let mut dkfwd_dX = vec![conditions.T().zero_clone(); self.n_species];
        let (k, dk_dT) =
            self.compute_forward_rate_coefficient_and_derivatives(molar_densities, conditions, &mut dkfwd_dX);
        (k, dk_dT, dkfwd_dX)
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.equation, self.reaction_type())?;
        if let Some(blending) = self.blending() {
            write!(f, ", {}", blending)?;
        }
        for (i, rate) in self.forward_rates().iter().enumerate() {
            write!(f, "\n  k{}: {}", i, rate)?;
        }
        Ok(())
    }
}

/////////////////////////////////BUILDER////////////////////////////////////////////////////////
/// Assembles a `Reaction` and validates it in `build()`.
#[derive(Debug, Clone)]
pub struct ReactionBuilder {
    n_species: usize,
    equation: String,
    reaction_type: ReactionType,
    id: Option<String>,
    reversible: bool,
    reactants: Vec<Participant>,
    products: Vec<Participant>,
    rates: Vec<KineticsType>,
    efficiencies: Vec<(usize, f64)>,
    troe: Option<Vec<f64>>,
}

impl ReactionBuilder {
    pub fn new(n_species: usize, equation: &str, reaction_type: ReactionType) -> Self {
        Self {
            n_species,
            equation: equation.to_owned(),
            reaction_type,
            id: None,
            reversible: true,
            reactants: Vec::new(),
            products: Vec::new(),
            rates: Vec::new(),
            efficiencies: Vec::new(),
            troe: None,
        }
    }
    /// identifier, defaults to the equation
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }
    pub fn reversible(mut self, reversible: bool) -> Self {
        self.reversible = reversible;
        self
    }
    pub fn reactant(mut self, name: &str, index: usize, stoich: f64) -> Self {
        self.reactants.push(Participant {
            name: name.to_owned(),
            index,
            stoich,
        });
        self
    }
    pub fn product(mut self, name: &str, index: usize, stoich: f64) -> Self {
        self.products.push(Participant {
            name: name.to_owned(),
            index,
            stoich,
        });
        self
    }
    /// append a branch; falloff reactions take k0 first, then kinf
    pub fn rate(mut self, rate: KineticsType) -> Self {
        self.rates.push(rate);
        self
    }
    pub fn rates(mut self, rates: Vec<KineticsType>) -> Self {
        self.rates.extend(rates);
        self
    }
    /// third-body efficiency override, species without one get 1
    pub fn efficiency(mut self, species: usize, efficiency: f64) -> Self {
        self.efficiencies.push((species, efficiency));
        self
    }
    /// [alpha, T3, T1] or [alpha, T3, T1, T2]
    pub fn troe(mut self, coefficients: &[f64]) -> Self {
        self.troe = Some(coefficients.to_vec());
        self
    }

    fn branch_count_error(&self, expected: &str) -> KineticsError {
        KineticsError::BranchCount {
            reaction_type: self.reaction_type,
            equation: self.equation.clone(),
            expected: expected.to_owned(),
            got: self.rates.len(),
        }
    }

    fn check_species_index(&self, index: usize) -> Result<(), KineticsError> {
        if index < self.n_species {
            Ok(())
        } else {
            Err(KineticsError::SpeciesIndexOutOfRange {
                index,
                n_species: self.n_species,
            })
        }
    }

    fn dense_efficiencies(&self) -> Result<Vec<f64>, KineticsError> {
        let mut efficiencies = vec![1.0; self.n_species];
        for (species, efficiency) in self.efficiencies.iter() {
            self.check_species_index(*species)?;
            efficiencies[*species] = *efficiency;
        }
        Ok(efficiencies)
    }

    pub fn build(self) -> Result<Reaction, KineticsError> {
        let reaction_type = self.reaction_type;
        for participant in self.reactants.iter().chain(self.products.iter()) {
            self.check_species_index(participant.index)?;
        }
        if !reaction_type.has_third_body() && !self.efficiencies.is_empty() {
            return Err(KineticsError::UnexpectedEfficiencies {
                reaction_type,
                equation: self.equation.clone(),
            });
        }
        match (reaction_type, &self.troe) {
            (ReactionType::TroeFalloff, None) => {
                return Err(KineticsError::FalloffBlending {
                    equation: self.equation.clone(),
                    details: "Troe parameters are missing".to_owned(),
                });
            }
            (ReactionType::TroeFalloff, Some(_)) | (_, None) => {}
            (_, Some(_)) => {
                return Err(KineticsError::FalloffBlending {
                    equation: self.equation.clone(),
                    details: format!("Troe parameters given for a {} reaction", reaction_type),
                });
            }
        }
        // photolysis has no pressure dependence and no parallel channels
        if reaction_type != ReactionType::Elementary {
            if let Some(photo) = self
                .rates
                .iter()
                .find(|r| r.kinetics_model() == KineticsModel::Photochemical)
            {
                return Err(KineticsError::UnsupportedKinetics {
                    reaction_type,
                    model: photo.kinetics_model(),
                    equation: self.equation.clone(),
                });
            }
        }

        let kinetics = match reaction_type {
            ReactionType::Elementary | ReactionType::ThreeBody => {
                if self.rates.len() != 1 {
                    return Err(self.branch_count_error("1"));
                }
                let efficiencies = self.dense_efficiencies()?;
                let mut rates = self.rates.clone();
                let rate = rates.remove(0);
                if reaction_type == ReactionType::Elementary {
                    ReactionKinetics::Elementary(rate)
                } else {
                    ReactionKinetics::ThreeBody { rate, efficiencies }
                }
            }
            ReactionType::Duplicate => {
                if self.rates.is_empty() {
                    return Err(self.branch_count_error("at least 1"));
                }
                let first = self.rates[0].kinetics_model();
                if let Some(other) = self
                    .rates
                    .iter()
                    .map(|r| r.kinetics_model())
                    .find(|m| *m != first)
                {
                    return Err(KineticsError::MixedDuplicateKinetics {
                        equation: self.equation.clone(),
                        first,
                        other,
                    });
                }
                ReactionKinetics::Duplicate(self.rates.clone())
            }
            ReactionType::LindemannFalloff | ReactionType::TroeFalloff => {
                let [k0, kinf]: [KineticsType; 2] = self
                    .rates
                    .clone()
                    .try_into()
                    .map_err(|_| self.branch_count_error("2 (low- and high-pressure)"))?;
                let blending = match &self.troe {
                    Some(coefs) => FalloffBlending::Troe(TroeFalloff::from_coefs(coefs)?),
                    None => FalloffBlending::Lindemann,
                };
                ReactionKinetics::Falloff {
                    rates: [k0, kinf],
                    efficiencies: self.dense_efficiencies()?,
                    blending,
                }
            }
        };

        let reaction = Reaction {
            id: self.id.unwrap_or_else(|| self.equation.clone()),
            equation: self.equation,
            n_species: self.n_species,
            reversible: self.reversible,
            reactants: self.reactants,
            products: self.products,
            kinetics,
        };
        info!(
            "built {} reaction '{}' with {} rate constant(s)",
            reaction_type,
            reaction.equation,
            reaction.n_rate_constants()
        );
        Ok(reaction)
    }
}
