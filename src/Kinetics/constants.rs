//! physical constants and unit factors shared by rate laws and callers
#![allow(non_upper_case_globals)]

/// universal gas constant, J/(mol·K)
pub const R_universal: f64 = 8.3144621;
/// thermochemical calorie
pub const CAL_TO_J: f64 = 4.184;
/// cm^3 -> m^3
pub const CM3_TO_M3: f64 = 1e-6;
/// cm^6 -> m^6
pub const CM6_TO_M6: f64 = 1e-12;
