use crate::Kinetics::scalar::KinScalar;

/// Snapshot of the independent variables of one evaluation call.
/// ln(T) and 1/T are computed once here and shared by every rate law consulted
/// at this state. T > 0 is a precondition and is not checked.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct KineticsConditions<S: KinScalar> {
    T: S,
    inv_T: S,
    ln_T: S,
}

#[allow(non_snake_case)]
impl<S: KinScalar> KineticsConditions<S> {
    pub fn new(T: S) -> Self {
        let inv_T = S::from_f64(1.0) / T.clone();
        let ln_T = T.ln();
        Self { T, inv_T, ln_T }
    }
    pub fn T(&self) -> &S {
        &self.T
    }
    /// 1/T
    pub fn inv_T(&self) -> &S {
        &self.inv_T
    }
    /// ln(T)
    pub fn ln_T(&self) -> &S {
        &self.ln_T
    }
}

#[allow(non_snake_case)]
impl<S: KinScalar> From<S> for KineticsConditions<S> {
    fn from(T: S) -> Self {
        KineticsConditions::new(T)
    }
}
