#![allow(non_snake_case)]
//! # Mechanism Module
//!
//! ## Purpose
//! Ordered set of reactions sharing one species list. Evaluates the forward rate coefficients of
//! all reactions at a state (generic over the scalar type), their derivatives as nalgebra
//! vectors/matrices, sweeps over a temperature range and prints a report table.
//!
//! ## Usage Pattern
//! ```rust
//! use KiRates::Kinetics::mechanism::Mechanism;
//! use KiRates::Kinetics::kinetics_conditions::KineticsConditions;
//! use serde_json::json;
//! let species = vec!["H".to_string(), "O2".to_string(), "HO2".to_string()];
//! let reactions = json!([
//!     {"eq": "H+O2=HO2", "type": "elementary", "react": {"H": 1.0, "O2": 1.0}, "prod": {"HO2": 1.0},
//!      "rates": [{"model": "kooij", "coefs": [1e7, 0.6, 0.0]}]}
//! ]);
//! let mech = Mechanism::from_json(species, reactions).unwrap();
//! let k = mech.forward_rate_coefficients(&[1.0, 1.0, 0.0], &KineticsConditions::new(1000.0_f64));
//! assert_eq!(k.len(), 1);
//! ```
use crate::Kinetics::kinetics_api::KineticsError;
use crate::Kinetics::kinetics_conditions::KineticsConditions;
use crate::Kinetics::reaction::Reaction;
use crate::Kinetics::reaction_description::ReactionDescription;
use crate::Kinetics::scalar::KinScalar;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    species: Vec<String>,
    reactions: Vec<Reaction>,
}

impl Mechanism {
    pub fn new(species: Vec<String>) -> Self {
        Self {
            species,
            reactions: Vec::new(),
        }
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }
    pub fn reaction(&self, i: usize) -> Option<&Reaction> {
        self.reactions.get(i)
    }
    pub fn reaction_mut(&mut self, i: usize) -> Option<&mut Reaction> {
        self.reactions.get_mut(i)
    }
    pub fn n_species(&self) -> usize {
        self.species.len()
    }
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), KineticsError> {
        if reaction.n_species() != self.species.len() {
            return Err(KineticsError::SpeciesCountMismatch {
                equation: reaction.equation().to_owned(),
                expected: self.species.len(),
                got: reaction.n_species(),
            });
        }
        if self.reactions.iter().any(|r| r.id() == reaction.id()) {
            warn!("reaction id '{}' is used more than once", reaction.id());
        }
        self.reactions.push(reaction);
        Ok(())
    }

    pub fn from_descriptions(
        species: Vec<String>,
        descriptions: &[ReactionDescription],
    ) -> Result<Self, KineticsError> {
        let mut mechanism = Self::new(species);
        for description in descriptions {
            let reaction = description.into_reaction(&mechanism.species)?;
            mechanism.add_reaction(reaction)?;
        }
        info!(
            "mechanism assembled: {} species, {} reactions",
            mechanism.n_species(),
            mechanism.n_reactions()
        );
        Ok(mechanism)
    }

    /// `reactions` is a JSON array of reaction descriptions
    pub fn from_json(species: Vec<String>, reactions: Value) -> Result<Self, KineticsError> {
        let descriptions: Vec<ReactionDescription> = serde_json::from_value(reactions)?;
        Self::from_descriptions(species, &descriptions)
    }

    pub fn descriptions(&self) -> Vec<ReactionDescription> {
        self.reactions
            .iter()
            .map(|r| ReactionDescription::from_reaction(r, &self.species))
            .collect()
    }

    /// forward rate coefficient of every reaction, in reaction order
    pub fn forward_rate_coefficients<S: KinScalar>(
        &self,
        molar_densities: &[S],
        conditions: &KineticsConditions<S>,
    ) -> Vec<S> {
        self.reactions
            .iter()
            .map(|r| r.compute_forward_rate_coefficient(molar_densities, conditions))
            .collect()
    }

    /// (k, dk/dT, dk/dc) at temperature T; row i of dk/dc belongs to reaction i
    pub fn forward_rate_coefficients_and_derivatives(
        &self,
        molar_densities: &DVector<f64>,
        T: f64,
    ) -> (DVector<f64>, DVector<f64>, DMatrix<f64>) {
        let conditions = KineticsConditions::new(T);
        let n = self.reactions.len();
        let mut k = DVector::zeros(n);
        let mut dk_dT = DVector::zeros(n);
        let mut dk_dX = DMatrix::zeros(n, self.species.len());
        let mut row = vec![0.0; self.species.len()];
        for (i, reaction) in self.reactions.iter().enumerate() {
            let (k_i, dk_i) = reaction.compute_forward_rate_coefficient_and_derivatives(
                molar_densities.as_slice(),
                &conditions,
                &mut row,
            );
            k[i] = k_i;
            dk_dT[i] = dk_i;
            for (s, d) in row.iter().enumerate() {
                dk_dX[(i, s)] = *d;
            }
        }
        (k, dk_dT, dk_dX)
    }

    /// rate coefficients on n temperatures T0 + i (Tend - T0)/n; row j belongs to the j-th temperature
    pub fn forward_rate_coefficients_for_T_range(
        &self,
        molar_densities: &[f64],
        T0: f64,
        Tend: f64,
        n: usize,
    ) -> (Vec<f64>, DMatrix<f64>) {
        let T: Vec<f64> = (0..n)
            .map(|i| T0 + i as f64 * (Tend - T0) / n as f64)
            .collect();
        let mut k = DMatrix::zeros(n, self.reactions.len());
        for (j, Tj) in T.iter().enumerate() {
            let k_j = self.forward_rate_coefficients(molar_densities, &KineticsConditions::new(*Tj));
            for (i, k_ij) in k_j.into_iter().enumerate() {
                k[(j, i)] = k_ij;
            }
        }
        (T, k)
    }

    /// one row per reaction: id, equation, type, k and dk/dT at the state
    pub fn rates_table(&self, molar_densities: &[f64], T: f64) -> Table {
        let conditions = KineticsConditions::new(T);
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("id"),
            Cell::new("equation"),
            Cell::new("type"),
            Cell::new(&format!("k({} K)", T)),
            Cell::new("dk/dT"),
        ]));
        for reaction in self.reactions.iter() {
            let (k, dk_dT, _) =
                reaction.forward_rate_coefficient_and_derivatives(molar_densities, &conditions);
            table.add_row(Row::new(vec![
                Cell::new(reaction.id()),
                Cell::new(reaction.equation()),
                Cell::new(&reaction.reaction_type().to_string()),
                Cell::new(&format!("{:.6e}", k)),
                Cell::new(&format!("{:.6e}", dk_dT)),
            ]));
        }
        table
    }

    pub fn pretty_print_rates(&self, molar_densities: &[f64], T: f64) {
        self.rates_table(molar_densities, T).printstd();
    }
}
