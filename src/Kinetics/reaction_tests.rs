/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use crate::Kinetics::constants::{CAL_TO_J, CM3_TO_M3, CM6_TO_M6};
    use crate::Kinetics::kinetics_api::{
        KineticsError, KineticsModel, KineticsType, RateCoefficients, RateLaw,
    };
    use crate::Kinetics::kinetics_conditions::KineticsConditions;
    use crate::Kinetics::kinetics_models::{ArrheniusRate, KooijRate};
    use crate::Kinetics::photochemical::PhotochemicalRate;
    use crate::Kinetics::reaction::{Reaction, ReactionBuilder, ReactionType};
    use crate::Kinetics::scalar::Batch;
    use RustedSciThe::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;

    fn kooij(Cf: f64, eta: f64, Ea: f64) -> KineticsType {
        KooijRate::new(Cf, eta, Ea).into()
    }

    fn falloff(reaction_type: ReactionType) -> Reaction {
        let mut builder = ReactionBuilder::new(3, "H+O2(+M)=HO2(+M)", reaction_type)
            .reactant("H", 0, 1.0)
            .reactant("O2", 1, 1.0)
            .product("HO2", 2, 1.0)
            .rate(kooij(6.366e20 * CM6_TO_M6, -1.72, 524.8 * CAL_TO_J))
            .rate(kooij(1.475e12 * CM3_TO_M3, 0.6, 0.0))
            .efficiency(1, 2.5)
            .efficiency(2, 0.5);
        if reaction_type == ReactionType::TroeFalloff {
            builder = builder.troe(&[0.5, 100.0, 2000.0, 5000.0]);
        }
        builder.build().unwrap()
    }

    fn three_body() -> Reaction {
        ReactionBuilder::new(3, "H+O+M=OH+M", ReactionType::ThreeBody)
            .reactant("H", 0, 1.0)
            .reactant("O", 1, 1.0)
            .product("OH", 2, 1.0)
            .rate(kooij(4.714e18 * CM6_TO_M6, -1.0, 0.0))
            .efficiency(0, 2.0)
            .efficiency(2, 12.0)
            .build()
            .unwrap()
    }

    /// central differences of k in T and in every concentration
    fn finite_differences(reaction: &Reaction, c: &[f64], T: f64) -> (f64, Vec<f64>) {
        let k_at = |c: &[f64], T: f64| {
            reaction.compute_forward_rate_coefficient(c, &KineticsConditions::new(T))
        };
        let hT = T * 1e-6;
        let dk_dT = (k_at(c, T + hT) - k_at(c, T - hT)) / (2.0 * hT);
        let dk_dc = (0..c.len())
            .map(|s| {
                let h = c[s] * 1e-6;
                let mut up = c.to_vec();
                let mut down = c.to_vec();
                up[s] += h;
                down[s] -= h;
                (k_at(&up, T) - k_at(&down, T)) / (2.0 * h)
            })
            .collect();
        (dk_dT, dk_dc)
    }

    #[test]
    fn test_elementary_has_no_composition_dependence() {
        let rate = kooij(3.547e15 * CM3_TO_M3, -0.406, 1.6599e4 * CAL_TO_J);
        let reaction = ReactionBuilder::new(4, "H+O2=O+OH", ReactionType::Elementary)
            .rate(rate.clone())
            .build()
            .unwrap();
        let cond = KineticsConditions::new(1500.0_f64);
        let c = [1.0, 2.0, 3.0, 4.0];
        let mut dX = vec![7.0; 4];
        let (k, dk) = reaction.compute_forward_rate_coefficient_and_derivatives(&c, &cond, &mut dX);
        assert_eq!(k, rate.rate(&cond));
        assert_eq!(dk, rate.derivative(&cond));
        assert_eq!(dX, vec![0.0; 4]);
        assert_eq!(reaction.compute_forward_rate_coefficient(&c, &cond), k);
        assert_eq!(reaction.id(), "H+O2=O+OH");
        assert!(reaction.efficiencies().is_none());
    }

    #[test]
    fn test_duplicate_sums_branches() {
        let branches = vec![
            kooij(1e9, 0.5, 3e4),
            kooij(2e11, -0.8, 9e4),
            kooij(5e6, 1.9, 1e3),
        ];
        let reaction = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate)
            .rates(branches.clone())
            .build()
            .unwrap();
        assert_eq!(reaction.n_rate_constants(), 3);
        let cond = KineticsConditions::new(1100.0_f64);
        let expected_k: f64 = branches.iter().map(|b| b.rate(&cond)).sum();
        let expected_dk: f64 = branches.iter().map(|b| b.derivative(&cond)).sum();
        let (k, dk, dX) = reaction.forward_rate_coefficient_and_derivatives(&[0.3, 0.4], &cond);
        assert_relative_eq!(k, expected_k, max_relative = 1e-14);
        assert_relative_eq!(dk, expected_dk, max_relative = 1e-14);
        assert_eq!(dX, vec![0.0, 0.0]);
        assert_relative_eq!(
            reaction.compute_forward_rate_coefficient(&[0.3, 0.4], &cond),
            expected_k,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_duplicate_configuration_errors() {
        let mixed = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate)
            .rate(kooij(1e9, 0.5, 3e4))
            .rate(ArrheniusRate::new(1e9, 3e4).into())
            .build();
        assert!(matches!(
            mixed,
            Err(KineticsError::MixedDuplicateKinetics {
                first: KineticsModel::Kooij,
                other: KineticsModel::Arrhenius,
                ..
            })
        ));
        let empty = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate).build();
        assert!(matches!(empty, Err(KineticsError::BranchCount { got: 0, .. })));
    }

    #[test]
    fn test_single_branch_duplicate_is_its_branch() {
        let rate = kooij(1e9, 0.5, 3e4);
        let single = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate)
            .rate(rate.clone())
            .build()
            .unwrap();
        assert_eq!(single.reaction_type(), ReactionType::Duplicate);
        let cond = KineticsConditions::new(1300.0_f64);
        let (k, dk, dX) = single.forward_rate_coefficient_and_derivatives(&[0.1, 0.2], &cond);
        assert_eq!(k, rate.rate(&cond));
        assert_eq!(dk, rate.derivative(&cond));
        assert_eq!(dX, vec![0.0, 0.0]);
    }

    #[test]
    fn test_refit_keeps_the_rate_law_kind() {
        let mut dup = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate)
            .rate(kooij(1e9, 0.5, 3e4))
            .rate(kooij(2e11, -0.8, 9e4))
            .build()
            .unwrap();
        // two coefficients are an Arrhenius set, not a Kooij one
        assert!(matches!(
            dup.reset_forward_rate_coefs(1, &[1e9, 3e4]),
            Err(KineticsError::CoefficientCount {
                model: KineticsModel::Kooij,
                got: 2,
                ..
            })
        ));
        dup.reset_forward_rate_coefs(1, &[4e11, -0.5, 8e4]).unwrap();
        assert_eq!(dup.forward_rate(1).unwrap().coefficients()[0], 4e11);
        assert!(
            dup.forward_rates()
                .iter()
                .all(|r| r.kinetics_model() == KineticsModel::Kooij)
        );
        assert!(matches!(
            dup.reset_forward_rate_coefs(2, &[1e9, 0.0, 3e4]),
            Err(KineticsError::BranchIndexOutOfRange {
                index: 2,
                n_branches: 2,
                ..
            })
        ));

        let mut tb = three_body();
        let photo_coefs = [100.0, 200.0, 300.0, 1.0, 2.0, 1.0];
        assert!(tb.reset_forward_rate_coefs(0, &photo_coefs).is_err());
        assert_eq!(tb.forward_rate(0).unwrap().kinetics_model(), KineticsModel::Kooij);
        assert!(matches!(
            tb.set_flux(0, vec![100.0, 200.0], vec![1.0, 1.0]),
            Err(KineticsError::UnsupportedKinetics {
                model: KineticsModel::Kooij,
                ..
            })
        ));
    }

    #[test]
    fn test_photolysis_flux_update() {
        let photo = PhotochemicalRate::new(vec![100.0, 200.0, 300.0], vec![1.0, 2.0, 1.0]).unwrap();
        let mut photolysis = ReactionBuilder::new(2, "A=B", ReactionType::Elementary)
            .rate(photo.into())
            .build()
            .unwrap();
        let cond = KineticsConditions::new(300.0_f64);
        assert_eq!(photolysis.compute_forward_rate_coefficient(&[1.0, 1.0], &cond), 0.0);
        photolysis
            .set_flux(0, vec![100.0, 200.0, 300.0], vec![1.0, 1.0, 1.0])
            .unwrap();
        let k = photolysis.compute_forward_rate_coefficient(&[1.0, 1.0], &cond);
        assert!(k > 0.0);
        assert!(photolysis.set_flux(0, vec![300.0, 100.0], vec![1.0, 1.0]).is_err());
        assert!(matches!(
            photolysis.set_flux(1, vec![100.0, 200.0], vec![1.0, 1.0]),
            Err(KineticsError::BranchIndexOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_three_body() {
        let reaction = three_body();
        let c = [0.2, 0.7, 0.05];
        let T = 1800.0_f64;
        let cond = KineticsConditions::new(T);
        let rate = reaction.forward_rate(0).unwrap().clone();
        let M = 2.0 * 0.2 + 0.7 + 12.0 * 0.05;
        let (k, dk_dT, dX) = reaction.forward_rate_coefficient_and_derivatives(&c, &cond);
        assert_relative_eq!(k, rate.rate(&cond) * M, max_relative = 1e-14);
        assert_relative_eq!(dk_dT, rate.derivative(&cond) * M, max_relative = 1e-14);
        for (s, eff) in [2.0, 1.0, 12.0].iter().enumerate() {
            assert_relative_eq!(dX[s], rate.rate(&cond) * eff, max_relative = 1e-14);
        }
        let (fd_T, fd_c) = finite_differences(&reaction, &c, T);
        assert_relative_eq!(dk_dT, fd_T, max_relative = 1e-6);
        for s in 0..3 {
            assert_relative_eq!(dX[s], fd_c[s], max_relative = 1e-6);
        }
    }

    #[test]
    fn test_falloff_derivatives_finite_differences() {
        for reaction_type in [ReactionType::LindemannFalloff, ReactionType::TroeFalloff] {
            let reaction = falloff(reaction_type);
            assert_eq!(reaction.reaction_type(), reaction_type);
            // Pr from well below to well above 1
            for c in [[1e2, 2e2, 5e1], [1e4, 2e4, 5e3], [1e5, 2e5, 5e4]] {
                for T in [600.0_f64, 1400.0] {
                    let cond = KineticsConditions::new(T);
                    let (k, dk_dT, dX) = reaction.forward_rate_coefficient_and_derivatives(&c, &cond);
                    assert_relative_eq!(
                        k,
                        reaction.compute_forward_rate_coefficient(&c, &cond),
                        max_relative = 1e-14
                    );
                    let (fd_T, fd_c) = finite_differences(&reaction, &c, T);
                    assert_relative_eq!(dk_dT, fd_T, max_relative = 1e-5);
                    for s in 0..3 {
                        assert_relative_eq!(dX[s], fd_c[s], max_relative = 1e-5);
                    }
                    // dk/dc_s is proportional to the efficiency
                    assert_relative_eq!(dX[1], 2.5 * dX[0], max_relative = 1e-14);
                    assert_relative_eq!(dX[2], 0.5 * dX[0], max_relative = 1e-14);
                }
            }
        }
    }

    #[test]
    fn test_concentration_derivative_depends_only_on_M() {
        let reaction = falloff(ReactionType::TroeFalloff);
        // efficiencies [1, 2.5, 0.5]: both compositions give [M] = 62500
        let c_a = [1e4, 2e4, 5e3];
        let c_b = [2.25e4, 1.5e4, 5e3];
        let cond = KineticsConditions::new(1300.0_f64);
        let (k_a, _, dX_a) = reaction.forward_rate_coefficient_and_derivatives(&c_a, &cond);
        let (k_b, _, dX_b) = reaction.forward_rate_coefficient_and_derivatives(&c_b, &cond);
        assert_relative_eq!(k_a, k_b, max_relative = 1e-14);
        for s in 0..3 {
            assert_relative_eq!(dX_a[s], dX_b[s], max_relative = 1e-14);
        }
    }

    #[test]
    fn test_lindemann_closed_form() {
        let reaction = falloff(ReactionType::LindemannFalloff);
        let c = [1e4, 2e4, 5e3];
        let T = 900.0_f64;
        let cond = KineticsConditions::new(T);
        let k0 = reaction.forward_rate(0).unwrap().rate(&cond);
        let kinf = reaction.forward_rate(1).unwrap().rate(&cond);
        let M = 1e4 + 2.5 * 2e4 + 0.5 * 5e3;
        let expected = k0 * M * kinf / (kinf + k0 * M);
        assert_relative_eq!(
            reaction.compute_forward_rate_coefficient(&c, &cond),
            expected,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_falloff_symbolic_derivatives() {
        let reaction = falloff(ReactionType::TroeFalloff);
        let c = [1e4, 2e4, 5e3];
        let T0 = 1250.0_f64;
        let (_, dk_dT, dX) =
            reaction.forward_rate_coefficient_and_derivatives(&c, &KineticsConditions::new(T0));

        let c_sym: Vec<Expr> = c.iter().map(|x| Expr::Const(*x)).collect();
        let k_of_T = reaction
            .compute_forward_rate_coefficient(&c_sym, &KineticsConditions::new(Expr::Var("T".to_owned())));
        let dk_dT_sym = k_of_T.diff("T");
        let dk_dT_fn = dk_dT_sym.lambdify1D();
        assert_relative_eq!(dk_dT_fn(T0), dk_dT, max_relative = 1e-8);

        let c_sym = vec![Expr::Const(c[0]), Expr::Var("c1".to_owned()), Expr::Const(c[2])];
        let k_of_c1 =
            reaction.compute_forward_rate_coefficient(&c_sym, &KineticsConditions::new(Expr::Const(T0)));
        let dk_dc1_sym = k_of_c1.diff("c1");
        let dk_dc1_fn = dk_dc1_sym.lambdify1D();
        assert_relative_eq!(dk_dc1_fn(c[1]), dX[1], max_relative = 1e-8);
    }

    #[test]
    fn test_falloff_without_third_body_is_finite() {
        let reaction = falloff(ReactionType::TroeFalloff);
        let cond = KineticsConditions::new(1000.0_f64);
        let (k, dk_dT, dX) = reaction.forward_rate_coefficient_and_derivatives(&[0.0; 3], &cond);
        assert_eq!(k, 0.0);
        assert!(dk_dT.is_finite());
        assert!(dX.iter().all(|d| d.is_finite() && *d >= 0.0));
    }

    #[test]
    fn test_vanishing_high_pressure_rate_is_finite() {
        for reaction_type in [ReactionType::LindemannFalloff, ReactionType::TroeFalloff] {
            let mut reaction = falloff(reaction_type);
            reaction
                .reset_forward_rate_coefs(1, &[0.0, 0.6, 0.0])
                .unwrap();
            let cond = KineticsConditions::new(1000.0_f64);
            let c = [1e4, 2e4, 5e3];
            assert_eq!(reaction.compute_forward_rate_coefficient(&c, &cond), 0.0);
            let (k, dk_dT, dX) = reaction.forward_rate_coefficient_and_derivatives(&c, &cond);
            assert_eq!(k, 0.0);
            assert!(dk_dT.is_finite(), "{}: dk/dT = {}", reaction_type, dk_dT);
            assert!(dX.iter().all(|d| d.is_finite()));
        }
    }

    #[test]
    fn test_batched_falloff_matches_scalar() {
        let reaction = falloff(ReactionType::TroeFalloff);
        let temps = [500.0, 1000.0, 2000.0];
        let c_lanes = [[1e3, 2e4, 1e6], [2e3, 4e4, 2e6], [5e2, 1e4, 5e5]];
        let c: Vec<Batch<3>> = c_lanes.iter().map(|l| Batch::from_array(*l)).collect();
        let cond = KineticsConditions::new(Batch::from_array(temps));
        let (k, dk_dT, dX) = reaction.forward_rate_coefficient_and_derivatives(&c, &cond);
        for (lane, T) in temps.iter().enumerate() {
            let c_scalar: Vec<f64> = c_lanes.iter().map(|l| l[lane]).collect();
            let (k_s, dk_s, dX_s) = reaction
                .forward_rate_coefficient_and_derivatives(&c_scalar, &KineticsConditions::new(*T));
            assert_relative_eq!(k.lane(lane), k_s, max_relative = 1e-14);
            assert_relative_eq!(dk_dT.lane(lane), dk_s, max_relative = 1e-14);
            for s in 0..3 {
                assert_relative_eq!(dX[s].lane(lane), dX_s[s], max_relative = 1e-14);
            }
        }
    }

    #[test]
    fn test_single_precision_three_body() {
        let reaction = three_body();
        let (k64, dk64, _) =
            reaction.forward_rate_coefficient_and_derivatives(&[0.2, 0.7, 0.05], &KineticsConditions::new(1800.0));
        let (k32, dk32, dX32) = reaction.forward_rate_coefficient_and_derivatives(
            &[0.2_f32, 0.7, 0.05],
            &KineticsConditions::new(1800.0_f32),
        );
        assert_relative_eq!(k32 as f64, k64, max_relative = 1e-5);
        assert_relative_eq!(dk32 as f64, dk64, max_relative = 1e-5);
        assert_eq!(dX32.len(), 3);
    }

    #[test]
    fn test_refit_and_efficiency_update() {
        let mut reaction = three_body();
        let cond = KineticsConditions::new(1000.0_f64);
        let c = [1.0, 1.0, 1.0];
        let before = reaction.compute_forward_rate_coefficient(&c, &cond);
        reaction.set_efficiency(1, 3.0).unwrap();
        let after = reaction.compute_forward_rate_coefficient(&c, &cond);
        assert_relative_eq!(after / before, (2.0 + 3.0 + 12.0) / (2.0 + 1.0 + 12.0), max_relative = 1e-14);
        assert!(matches!(
            reaction.set_efficiency(3, 1.0),
            Err(KineticsError::SpeciesIndexOutOfRange { index: 3, n_species: 3 })
        ));

        let coefs = reaction.forward_rate(0).unwrap().coefficients();
        let mut doubled = coefs.clone();
        doubled[0] *= 2.0;
        reaction.reset_forward_rate_coefs(0, &doubled).unwrap();
        assert_relative_eq!(
            reaction.compute_forward_rate_coefficient(&c, &cond),
            2.0 * after,
            max_relative = 1e-14
        );
        assert!(reaction.forward_rate(1).is_none());

        let mut troe = falloff(ReactionType::TroeFalloff);
        troe.reset_troe_coefs(&[0.8, 1e-30, 1e30]).unwrap();
        assert_eq!(troe.blending().unwrap().coefficients(), vec![0.8, 1e-30, 1e30]);
        assert!(three_body().reset_troe_coefs(&[0.8, 1e-30, 1e30]).is_err());
    }

    #[test]
    fn test_builder_validation() {
        let troe_missing = ReactionBuilder::new(2, "A(+M)=B(+M)", ReactionType::TroeFalloff)
            .rate(kooij(1.0, 0.0, 0.0))
            .rate(kooij(1.0, 0.0, 0.0))
            .build();
        assert!(matches!(troe_missing, Err(KineticsError::FalloffBlending { .. })));

        let troe_on_lindemann = ReactionBuilder::new(2, "A(+M)=B(+M)", ReactionType::LindemannFalloff)
            .rate(kooij(1.0, 0.0, 0.0))
            .rate(kooij(1.0, 0.0, 0.0))
            .troe(&[0.5, 1.0, 2.0])
            .build();
        assert!(matches!(troe_on_lindemann, Err(KineticsError::FalloffBlending { .. })));

        let bad_troe = ReactionBuilder::new(2, "A(+M)=B(+M)", ReactionType::TroeFalloff)
            .rate(kooij(1.0, 0.0, 0.0))
            .rate(kooij(1.0, 0.0, 0.0))
            .troe(&[0.5, 1.0])
            .build();
        assert!(matches!(bad_troe, Err(KineticsError::TroeCoefficientCount(2))));

        let one_limit = ReactionBuilder::new(2, "A(+M)=B(+M)", ReactionType::LindemannFalloff)
            .rate(kooij(1.0, 0.0, 0.0))
            .build();
        assert!(matches!(one_limit, Err(KineticsError::BranchCount { got: 1, .. })));

        let eff_on_elementary = ReactionBuilder::new(2, "A=B", ReactionType::Elementary)
            .rate(kooij(1.0, 0.0, 0.0))
            .efficiency(0, 2.0)
            .build();
        assert!(matches!(
            eff_on_elementary,
            Err(KineticsError::UnexpectedEfficiencies { .. })
        ));

        let eff_out_of_range = ReactionBuilder::new(2, "A+M=B+M", ReactionType::ThreeBody)
            .rate(kooij(1.0, 0.0, 0.0))
            .efficiency(5, 2.0)
            .build();
        assert!(matches!(
            eff_out_of_range,
            Err(KineticsError::SpeciesIndexOutOfRange { index: 5, .. })
        ));

        let photo = PhotochemicalRate::new(vec![100.0, 200.0], vec![1.0, 1.0]).unwrap();
        let photo_duplicate = ReactionBuilder::new(2, "A=B", ReactionType::Duplicate)
            .rate(photo.clone().into())
            .rate(photo.clone().into())
            .build();
        assert!(matches!(
            photo_duplicate,
            Err(KineticsError::UnsupportedKinetics {
                model: KineticsModel::Photochemical,
                ..
            })
        ));
        let photolysis = ReactionBuilder::new(2, "A=B", ReactionType::Elementary)
            .rate(photo.into())
            .reversible(false)
            .build()
            .unwrap();
        assert!(!photolysis.reversible());

        let no_rate = ReactionBuilder::new(2, "A=B", ReactionType::Elementary).build();
        assert!(matches!(no_rate, Err(KineticsError::BranchCount { got: 0, .. })));
    }

    #[test]
    #[should_panic]
    fn test_derivative_buffer_must_match_species_count() {
        let reaction = three_body();
        let mut dX = vec![0.0; 2];
        reaction.compute_forward_rate_coefficient_and_derivatives(
            &[1.0, 1.0, 1.0],
            &KineticsConditions::new(1000.0),
            &mut dX,
        );
    }

    #[test]
    #[should_panic]
    fn test_molar_densities_must_match_species_count() {
        let reaction = falloff(ReactionType::LindemannFalloff);
        reaction.compute_forward_rate_coefficient(&[1.0, 1.0], &KineticsConditions::new(1000.0));
    }

    #[test]
    fn test_stoichiometry_and_display() {
        let reaction = falloff(ReactionType::TroeFalloff);
        assert_eq!(reaction.gamma(), -1.0);
        assert_eq!(reaction.reactants().len(), 2);
        assert_eq!(reaction.products()[0].name, "HO2");
        assert_eq!(reaction.efficiencies().unwrap(), &[1.0, 2.5, 0.5]);
        let shown = reaction.to_string();
        assert!(shown.starts_with("H+O2(+M)=HO2(+M) (Troe falloff)"));
        assert!(shown.contains("k1: Kooij"));
    }

    #[test]
    fn test_reaction_type_serde() {
        let t: ReactionType = serde_json::from_str("\"threebody\"").unwrap();
        assert_eq!(t, ReactionType::ThreeBody);
        let t: ReactionType = serde_json::from_str("\"elem\"").unwrap();
        assert_eq!(t, ReactionType::Elementary);
        let t: ReactionType = serde_json::from_str("\"falloff\"").unwrap();
        assert_eq!(t, ReactionType::LindemannFalloff);
        assert_eq!(
            serde_json::to_string(&ReactionType::TroeFalloff).unwrap(),
            "\"troe\""
        );
        assert!(serde_json::from_str::<ReactionType>("\"pres\"").is_err());
    }
}
