//! Serializable description of a reaction, the hand-off format between a mechanism reader and the
//! rate engine. Species are referred to by name and resolved against the mechanism species list
//! in `into_reaction`; rate laws are given as a model tag plus the ordered coefficient vector
//! accepted by `reset_coefs`.
//!
//! ```json
//! {"eq": "H+O2(+M)=HO2(+M)", "type": "troe",
//!  "react": {"H": 1.0, "O2": 1.0}, "prod": {"HO2": 1.0},
//!  "rates": [{"model": "kooij", "coefs": [6.366e8, -1.72, 2195.7]},
//!            {"model": "kooij", "coefs": [1.475e6, 0.6, 0.0]}],
//!  "eff": {"H2O": 14.0}, "troe": [0.8, 1e-30, 1e30]}
//! ```
use crate::Kinetics::kinetics_api::{KineticsError, KineticsModel, KineticsType, RateCoefficients};
use crate::Kinetics::reaction::{Participant, Reaction, ReactionBuilder, ReactionKinetics, ReactionType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// rate law as model tag + coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDescription {
    pub model: KineticsModel,
    pub coefs: Vec<f64>,
}

impl RateDescription {
    pub fn to_rate(&self) -> Result<KineticsType, KineticsError> {
        KineticsType::from_coefficients(self.model, &self.coefs)
    }
    pub fn from_rate(rate: &KineticsType) -> Self {
        Self {
            model: rate.kinetics_model(),
            coefs: rate.coefficients(),
        }
    }
}

fn default_reversible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub eq: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    #[serde(default = "default_reversible")]
    pub reversible: bool,
    #[serde(default)]
    pub react: HashMap<String, f64>,
    #[serde(default)]
    pub prod: HashMap<String, f64>,
    pub rates: Vec<RateDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eff: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troe: Option<Vec<f64>>,
}

fn species_index(species: &[String], name: &str) -> Result<usize, KineticsError> {
    species
        .iter()
        .position(|s| s == name)
        .ok_or_else(|| KineticsError::UnknownSpecies(name.to_owned()))
}

/// participants ordered by species index
fn resolve(
    participants: &HashMap<String, f64>,
    species: &[String],
) -> Result<Vec<(String, usize, f64)>, KineticsError> {
    let mut resolved = participants
        .iter()
        .map(|(name, stoich)| Ok((name.clone(), species_index(species, name)?, *stoich)))
        .collect::<Result<Vec<_>, KineticsError>>()?;
    resolved.sort_by_key(|(_, index, _)| *index);
    Ok(resolved)
}

impl ReactionDescription {
    pub fn from_json_value(value: Value) -> Result<Self, KineticsError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_value(&self) -> Result<Value, KineticsError> {
        Ok(serde_json::to_value(self)?)
    }

    /// build the reaction against the mechanism species list
    pub fn into_reaction(&self, species: &[String]) -> Result<Reaction, KineticsError> {
        let mut builder = ReactionBuilder::new(species.len(), &self.eq, self.reaction_type)
            .reversible(self.reversible);
        if let Some(id) = &self.id {
            builder = builder.id(id);
        }
        for (name, index, stoich) in resolve(&self.react, species)? {
            builder = builder.reactant(&name, index, stoich);
        }
        for (name, index, stoich) in resolve(&self.prod, species)? {
            builder = builder.product(&name, index, stoich);
        }
        for rate in self.rates.iter() {
            builder = builder.rate(rate.to_rate()?);
        }
        if let Some(eff) = &self.eff {
            for (_, index, efficiency) in resolve(eff, species)? {
                builder = builder.efficiency(index, efficiency);
            }
        }
        if let Some(troe) = &self.troe {
            builder = builder.troe(troe);
        }
        builder.build()
    }

    /// inverse of `into_reaction`; efficiencies equal to 1 are left out
    pub fn from_reaction(reaction: &Reaction, species: &[String]) -> Self {
        let to_map = |participants: &[Participant]| {
            participants
                .iter()
                .map(|p| (p.name.clone(), p.stoich))
                .collect::<HashMap<String, f64>>()
        };
        let (eff, troe) = match reaction.kinetics() {
            ReactionKinetics::ThreeBody { efficiencies, .. } => (Some(efficiencies), None),
            ReactionKinetics::Falloff {
                efficiencies,
                blending,
                ..
            } => {
                let troe = blending.coefficients();
                (Some(efficiencies), (!troe.is_empty()).then_some(troe))
            }
            _ => (None, None),
        };
        let eff = eff.map(|efficiencies| {
            efficiencies
                .iter()
                .enumerate()
                .filter(|(_, e)| **e != 1.0)
                .filter_map(|(i, e)| species.get(i).map(|name| (name.clone(), *e)))
                .collect::<HashMap<String, f64>>()
        });
        Self {
            id: Some(reaction.id().to_owned()),
            eq: reaction.equation().to_owned(),
            reaction_type: reaction.reaction_type(),
            reversible: reaction.reversible(),
            react: to_map(reaction.reactants()),
            prod: to_map(reaction.products()),
            rates: reaction
                .forward_rates()
                .iter()
                .map(RateDescription::from_rate)
                .collect(),
            eff,
            troe,
        }
    }
}
