//! Real-or-complex scalar used by every computation in the crate.
//!
//! Pure reals take a scalar fast path; a value only becomes a complex pair
//! once an operand is complex, and it then stays complex even when its
//! imaginary part is zero.

use crate::error::{ComputeError, Result};
use num_complex::Complex;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Real(f64),
    Complex(Complex<f64>),
}

impl Number {
    pub fn real(value: f64) -> Self {
        Number::Real(value)
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Number::Complex(Complex::new(re, im))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Number::Complex(_))
    }

    pub fn re(&self) -> f64 {
        match self {
            Number::Real(x) => *x,
            Number::Complex(z) => z.re,
        }
    }

    pub fn im(&self) -> f64 {
        match self {
            Number::Real(_) => 0.0,
            Number::Complex(z) => z.im,
        }
    }

    pub fn to_complex(self) -> Complex<f64> {
        match self {
            Number::Real(x) => Complex::new(x, 0.0),
            Number::Complex(z) => z,
        }
    }

    pub fn conj(self) -> Self {
        match self {
            Number::Real(x) => Number::Real(x),
            Number::Complex(z) => Number::Complex(z.conj()),
        }
    }

    pub fn abs_squared(&self) -> f64 {
        match self {
            Number::Real(x) => x * x,
            Number::Complex(z) => z.re * z.re + z.im * z.im,
        }
    }

    pub fn abs(&self) -> f64 {
        match self {
            Number::Real(x) => x.abs(),
            Number::Complex(_) => self.abs_squared().sqrt(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Real(x) => x.is_finite(),
            Number::Complex(z) => z.re.is_finite() && z.im.is_finite(),
        }
    }

    /// Divides `self` by `rhs`.
    ///
    /// A complex divisor is rationalized through its conjugate. A divisor of
    /// zero magnitude or with a non-finite part is a domain error.
    pub fn divide(self, rhs: Number) -> Result<Number> {
        if !rhs.is_finite() {
            return Err(ComputeError::domain(format!("division by non-finite {rhs}")));
        }
        match (self, rhs) {
            (_, Number::Real(r)) if r == 0.0 => Err(ComputeError::domain("division by zero")),
            (Number::Real(l), Number::Real(r)) => Ok(Number::Real(l / r)),
            (Number::Complex(l), Number::Real(r)) => {
                Ok(Number::Complex(Complex::new(l.re / r, l.im / r)))
            }
            (_, Number::Complex(_)) => {
                let denom = rhs.abs_squared();
                if denom == 0.0 {
                    return Err(ComputeError::domain(
                        "division by a complex number of zero magnitude",
                    ));
                }
                let numer = (self * rhs.conj()).to_complex();
                Ok(Number::Complex(Complex::new(numer.re / denom, numer.im / denom)))
            }
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Real(0.0)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Real(value)
    }
}

impl From<Complex<f64>> for Number {
    fn from(value: Complex<f64>) -> Self {
        Number::Complex(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Real(x) => write!(f, "{x}"),
            Number::Complex(z) if z.im < 0.0 => write!(f, "{}-{}i", z.re, -z.im),
            Number::Complex(z) => write!(f, "{}+{}i", z.re, z.im),
        }
    }
}

impl Neg for Number {
    type Output = Self;
    fn neg(self) -> Self {
        match self {
            Number::Real(x) => Number::Real(-x),
            Number::Complex(z) => Number::Complex(Complex::new(-z.re, -z.im)),
        }
    }
}

impl Add for Number {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Real(l), Number::Real(r)) => Number::Real(l + r),
            (Number::Real(l), Number::Complex(r)) => Number::complex(l + r.re, r.im),
            (Number::Complex(l), Number::Real(r)) => Number::complex(l.re + r, l.im),
            (Number::Complex(l), Number::Complex(r)) => Number::complex(l.re + r.re, l.im + r.im),
        }
    }
}

impl Sub for Number {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Real(l), Number::Real(r)) => Number::Real(l - r),
            (Number::Real(l), Number::Complex(r)) => Number::complex(l - r.re, -r.im),
            (Number::Complex(l), Number::Real(r)) => Number::complex(l.re - r, l.im),
            (Number::Complex(l), Number::Complex(r)) => Number::complex(l.re - r.re, l.im - r.im),
        }
    }
}

impl Mul for Number {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Real(l), Number::Real(r)) => Number::Real(l * r),
            (Number::Real(l), Number::Complex(r)) => Number::complex(l * r.re, l * r.im),
            (Number::Complex(l), Number::Real(r)) => Number::complex(l.re * r, l.im * r),
            (Number::Complex(l), Number::Complex(r)) => Number::complex(
                l.re * r.re - l.im * r.im,
                l.re * r.im + l.im * r.re,
            ),
        }
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Number::Real(0.0)
    }
    fn is_zero(&self) -> bool {
        self.abs_squared() == 0.0
    }
}
