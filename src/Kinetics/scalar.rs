//! # Scalar Module
//!
//! ## Purpose
//! Minimal numeric capability set that every rate law, blending function and reaction is written
//! against. The same formula code runs unchanged over plain floats, over batches of independent
//! states and over symbolic expressions that can be differentiated afterwards.
//!
//! ## Implementations
//! - `f32`, `f64`: plain scalars
//! - `Batch<N>`: `N` independent states evaluated lane by lane (nalgebra `SVector` storage)
//! - `Expr`: RustedSciThe symbolic expression, carries its own derivative information via `diff`
//!
//! ## Capability set
//! arithmetic (by value), `exp`, `ln`, `log10`, a clamp into the positive finite range,
//! "zero of the same shape" and a NaN check used by debug assertions.
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::SVector;
use std::f64::consts::{LN_10, LOG10_E};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub trait KinScalar:
    Clone
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// broadcast a coefficient into this representation
    fn from_f64(x: f64) -> Self;
    /// zero with the same shape as self
    fn zero_clone(&self) -> Self;
    fn exp(&self) -> Self;
    fn ln(&self) -> Self;
    /// self clamped to [smallest positive normal, largest finite] of the underlying float
    fn clamp_positive_finite(&self) -> Self;
    /// true if any lane is NaN
    fn has_nan(&self) -> bool;

    fn log10(&self) -> Self {
        self.ln() * Self::from_f64(LOG10_E)
    }
    /// 10^self
    fn exp10(&self) -> Self {
        (self.clone() * Self::from_f64(LN_10)).exp()
    }
    fn square(&self) -> Self {
        self.clone() * self.clone()
    }
    fn scale(&self, c: f64) -> Self {
        self.clone() * Self::from_f64(c)
    }
}

macro_rules! impl_kin_scalar_for_float {
    ($t:ty) => {
        impl KinScalar for $t {
            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
            #[inline]
            fn zero_clone(&self) -> Self {
                0.0
            }
            #[inline]
            fn exp(&self) -> Self {
                <$t>::exp(*self)
            }
            #[inline]
            fn ln(&self) -> Self {
                <$t>::ln(*self)
            }
            #[inline]
            fn log10(&self) -> Self {
                <$t>::log10(*self)
            }
            #[inline]
            fn clamp_positive_finite(&self) -> Self {
                <$t>::max(*self, <$t>::MIN_POSITIVE).min(<$t>::MAX)
            }
            #[inline]
            fn has_nan(&self) -> bool {
                self.is_nan()
            }
        }
    };
}

impl_kin_scalar_for_float!(f32);
impl_kin_scalar_for_float!(f64);

/////////////////////////////////BATCHED STATES///////////////////////////////////////////////
/// N independent simulation states packed together. Every operation acts lane by lane
/// (products and quotients are component-wise, not matrix products).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<const N: usize>(pub SVector<f64, N>);

impl<const N: usize> Batch<N> {
    pub fn from_array(lanes: [f64; N]) -> Self {
        Batch(SVector::<f64, N>::from_column_slice(&lanes))
    }
    pub fn lane(&self, i: usize) -> f64 {
        self.0[i]
    }
}

impl<const N: usize> Add for Batch<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Batch(self.0 + rhs.0)
    }
}
impl<const N: usize> Sub for Batch<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Batch(self.0 - rhs.0)
    }
}
impl<const N: usize> Mul for Batch<N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Batch(self.0.component_mul(&rhs.0))
    }
}
impl<const N: usize> Div for Batch<N> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Batch(self.0.component_div(&rhs.0))
    }
}
impl<const N: usize> Neg for Batch<N> {
    type Output = Self;
    fn neg(self) -> Self {
        Batch(-self.0)
    }
}

impl<const N: usize> KinScalar for Batch<N> {
    fn from_f64(x: f64) -> Self {
        Batch(SVector::<f64, N>::from_element(x))
    }
    fn zero_clone(&self) -> Self {
        Batch(SVector::<f64, N>::zeros())
    }
    fn exp(&self) -> Self {
        Batch(self.0.map(f64::exp))
    }
    fn ln(&self) -> Self {
        Batch(self.0.map(f64::ln))
    }
    fn log10(&self) -> Self {
        Batch(self.0.map(f64::log10))
    }
    fn clamp_positive_finite(&self) -> Self {
        Batch(self.0.map(|x| x.max(f64::MIN_POSITIVE).min(f64::MAX)))
    }
    fn has_nan(&self) -> bool {
        self.0.iter().any(|x| x.is_nan())
    }
}

/////////////////////////////////SYMBOLIC///////////////////////////////////////////////////
// Symbolic expressions are assumed to live inside the physical domain (T > 0, Pr > 0),
// so the clamp is the identity and nothing is NaN until lambdified.
impl KinScalar for Expr {
    fn from_f64(x: f64) -> Self {
        Expr::Const(x)
    }
    fn zero_clone(&self) -> Self {
        Expr::Const(0.0)
    }
    fn exp(&self) -> Self {
        Expr::exp(self.clone())
    }
    fn ln(&self) -> Self {
        Expr::ln(self.clone())
    }
    fn clamp_positive_finite(&self) -> Self {
        self.clone()
    }
    fn has_nan(&self) -> bool {
        false
    }
}
