#![allow(non_snake_case)]
use crate::Kinetics::constants::{CAL_TO_J, CM3_TO_M3, CM6_TO_M6};
use crate::Kinetics::kinetics_api::{KineticsModel, KineticsType, RateLaw};
use crate::Kinetics::kinetics_conditions::KineticsConditions;

pub fn kin_examples(kintask: usize) {
    //
    match kintask {
        0 => {
            // rate laws and their temperature derivatives
            let rates = vec![
                KineticsType::from_coefficients(KineticsModel::Arrhenius, &[1e10, 8e4]),
                KineticsType::from_coefficients(KineticsModel::Kooij, &[1e10, 0.5, 8e4]),
                KineticsType::from_coefficients(
                    KineticsModel::BerthelotHercourtEssen,
                    &[1e-7, 0.6, 1e-3, 298.0],
                ),
                KineticsType::from_coefficients(KineticsModel::VantHoff, &[1e10, 0.5, 8e4, -1e-4]),
            ];
            for rate in rates {
                match rate {
                    Ok(rate) => {
                        println!("{}", rate);
                        for T in [500.0_f64, 1000.0, 1500.0, 2000.0] {
                            let (k, dk_dT) = rate.rate_and_derivative_at(T);
                            println!("  T = {} K, k = {:e}, dk/dT = {:e}", T, k, dk_dT);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
        1 => {
            // the same rate law on f32, f64 and on 4 states at once
            use crate::Kinetics::kinetics_models::KooijRate;
            use crate::Kinetics::scalar::Batch;
            let rate = KooijRate::new(3.547e15 * CM3_TO_M3, -0.406, 1.6599e4 * CAL_TO_J);
            let k32: f32 = rate.rate_at(1500.0_f32);
            let k64: f64 = rate.rate_at(1500.0_f64);
            println!("f32: {:e}, f64: {:e}", k32, k64);
            let T = Batch::from_array([500.0, 1000.0, 1500.0, 2000.0]);
            let (k, dk_dT) = rate.rate_and_derivative(&KineticsConditions::new(T));
            for i in 0..4 {
                println!(
                    "lane {}: T = {}, k = {:e}, dk/dT = {:e}",
                    i,
                    T.lane(i),
                    k.lane(i),
                    dk_dT.lane(i)
                );
            }
        }
        2 => {
            // symbolic rate expression and its derivative
            use crate::Kinetics::kinetics_models::BerthelotHercourtEssenRate;
            use RustedSciThe::symbolic::symbolic_engine::Expr;
            let rate = BerthelotHercourtEssenRate::new(1e-7, 0.6, 1e-3);
            let k_sym = rate.rate(&KineticsConditions::new(Expr::Var("T".to_string())));
            let dk_sym = k_sym.diff("T");
            println!("k(T) = {}", k_sym);
            println!("dk/dT = {}", dk_sym);
            let dk_fn = dk_sym.lambdify1D();
            println!(
                "symbolic dk/dT(1000) = {:e}, analytic = {:e}",
                dk_fn(1000.0),
                rate.derivative_at(1000.0_f64)
            );
        }
        3 => {
            // H2-O2 subset: forward rate coefficients and derivatives
            use crate::Kinetics::mechanism::Mechanism;
            use nalgebra::DVector;
            use serde_json::json;
            let species: Vec<String> = ["O2", "OH", "H2", "H2O", "HO2", "O", "H"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let reactions = json!([
                {"eq": "H+O2=O+OH", "type": "elementary",
                 "react": {"H": 1.0, "O2": 1.0}, "prod": {"O": 1.0, "OH": 1.0},
                 "rates": [{"model": "kooij", "coefs": [3.547e15 * CM3_TO_M3, -0.406, 1.6599e4 * CAL_TO_J]}]},
                {"eq": "O+H2=H+OH", "type": "duplicate",
                 "react": {"O": 1.0, "H2": 1.0}, "prod": {"H": 1.0, "OH": 1.0},
                 "rates": [
                    {"model": "kooij", "coefs": [3.82e12 * CM3_TO_M3, 0.0, 7.948e3 * CAL_TO_J]},
                    {"model": "kooij", "coefs": [8.79e14 * CM3_TO_M3, 0.0, 1.917e4 * CAL_TO_J]}
                 ]},
                {"eq": "H2+M=H+H+M", "type": "three-body",
                 "react": {"H2": 1.0}, "prod": {"H": 2.0},
                 "rates": [{"model": "kooij", "coefs": [4.577e19 * CM3_TO_M3, -1.40, 1.0438e5 * CAL_TO_J]}],
                 "eff": {"H2": 2.5, "H2O": 12.0}},
                {"eq": "H+O2(+M)=HO2(+M)", "type": "troe",
                 "react": {"H": 1.0, "O2": 1.0}, "prod": {"HO2": 1.0},
                 "rates": [
                    {"model": "kooij", "coefs": [6.366e20 * CM6_TO_M6, -1.72, 5.248e2 * CAL_TO_J]},
                    {"model": "kooij", "coefs": [1.475e12 * CM3_TO_M3, 0.60, 0.0]}
                 ],
                 "eff": {"H2": 2.0, "H2O": 11.0, "O2": 0.78},
                 "troe": [0.8, 1e-30, 1e30]}
            ]);
            match Mechanism::from_json(species, reactions) {
                Ok(mech) => {
                    let c = vec![5e-4; mech.n_species()];
                    mech.pretty_print_rates(&c, 2000.0);
                    let (_, _, dk_dX) =
                        mech.forward_rate_coefficients_and_derivatives(&DVector::from_vec(c.clone()), 2000.0);
                    println!("dk/dc: {}", dk_dX);
                    let (T, k) = mech.forward_rate_coefficients_for_T_range(&c, 1000.0, 2500.0, 6);
                    println!("T: {:?}\nk: {}", T, k);
                }
                Err(e) => println!("{}", e),
            }
        }
        4 => {
            // photolysis rate from a cross-section table and a flux on another grid
            use crate::Kinetics::photochemical::PhotochemicalRate;
            let lambda: Vec<f64> = (0..11).map(|i| 200.0 + 10.0 * i as f64).collect();
            let sigma: Vec<f64> = lambda.iter().map(|l| 1e-21 * (-(l - 250.0).powi(2) / 800.0).exp()).collect();
            let flux_lambda: Vec<f64> = (0..6).map(|i| 195.0 + 25.0 * i as f64).collect();
            let irradiance = vec![1e13; flux_lambda.len()];
            match PhotochemicalRate::new(lambda, sigma) {
                Ok(mut photo) => {
                    if let Err(e) = photo.set_flux(flux_lambda, irradiance) {
                        println!("{}", e);
                    }
                    println!("photolysis rate: {:e} 1/s", photo.rate_at(300.0_f64));
                }
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("Wrong task number");
        }
    }
}
