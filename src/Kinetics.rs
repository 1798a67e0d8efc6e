/// numeric capability set shared by every formula: plain floats, batched states (nalgebra
/// `SVector` lanes) and RustedSciThe symbolic expressions
pub mod scalar;
/// universal gas constant and unit factors (cal -> J, cm^3 -> m^3, cm^6 -> m^6)
pub mod constants;
/// state at which rate coefficients are evaluated: T with cached 1/T and ln(T)
pub mod kinetics_conditions;
/// The module defines the common surface of the rate laws:
/// 1) `KineticsModel` - tag of a rate law with the accepted coefficient vector lengths
/// 2) `KineticsType` - closed sum type over all rate laws
/// 3) `RateLaw` - k(T), dk/dT and both at once, generic over the scalar type
/// 4) `RateCoefficients` - coefficient access and reset from an ordered vector
/// 5) `KineticsError` - configuration errors of the whole crate
/// # Examples
/// ```
/// use KiRates::Kinetics::kinetics_api::{KineticsModel, KineticsType, RateLaw};
/// let rate = KineticsType::from_coefficients(KineticsModel::Arrhenius, &[1e10, 8e4]).unwrap();
/// let k: f64 = rate.rate_at(1000.0);
/// assert!(k > 0.0);
/// ```
pub mod kinetics_api;
/// analytic rate laws: constant, Hercourt-Essen, Berthelot, Arrhenius, Berthelot-Hercourt-Essen,
/// Kooij and Van't Hoff, each with its exact dk/dT
pub mod kinetics_models;
/// photolysis rate from a cross-section table and an actinic flux on arbitrary wavelength grids
pub mod photochemical;
/// pressure blending of falloff reactions (Lindemann, Troe) with derivatives wrt T and Pr
pub mod falloff;
/// The module takes the rate laws of a reaction and its type and produces:
/// 1) the forward rate coefficient at given T and molar densities
/// 2) its derivative with respect to temperature
/// 3) its derivative with respect to every molar density (zeros for pressure independent reactions)
///
/// Supported reaction types: elementary, duplicate (sum of branches), three-body (k*[M]),
/// falloff with Lindemann or Troe blending.
/// # Examples
/// ```
/// use KiRates::Kinetics::kinetics_conditions::KineticsConditions;
/// use KiRates::Kinetics::kinetics_models::KooijRate;
/// use KiRates::Kinetics::reaction::{ReactionBuilder, ReactionType};
/// let reaction = ReactionBuilder::new(2, "A+M=B+M", ReactionType::ThreeBody)
///     .rate(KooijRate::new(1e6, -1.0, 0.0).into())
///     .efficiency(1, 2.0)
///     .build()
///     .unwrap();
/// let (k, dk_dT, dk_dX) = reaction
///     .forward_rate_coefficient_and_derivatives(&[1.0, 1.0], &KineticsConditions::<f64>::new(1000.0));
/// assert_eq!(dk_dX.len(), 2);
/// assert!((dk_dX[1] - 2.0 * dk_dX[0]).abs() < 1e-12 * dk_dX[1]);
/// assert!(k > 0.0 && dk_dT < 0.0);
/// ```
pub mod reaction;
mod reaction_tests;
/// serde description of a reaction with species referred to by name
pub mod reaction_description;
/// ordered reactions over one species list, batch evaluation and report table
pub mod mechanism;
