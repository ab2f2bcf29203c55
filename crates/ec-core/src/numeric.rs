use crate::EcError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, EcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EcError::NonFinite { what, value: v })
    }
}

/// Check `lo <= v <= hi` (after the finite check).
pub fn ensure_in_range(v: Real, lo: Real, hi: Real, what: &'static str) -> Result<Real, EcError> {
    let v = ensure_finite(v, what)?;
    if v < lo || v > hi {
        return Err(EcError::InvalidArg { what, value: v });
    }
    Ok(v)
}

/// True when `a` and `b` have strictly opposite signs (product below zero).
#[inline]
pub fn opposite_signs(a: Real, b: Real) -> bool {
    a * b < 0.0
}

/// Residual of `value` relative to `scale`.
///
/// Falls back to the absolute residual when `|scale| < floor`, so a scale at
/// or near zero never divides.
#[inline]
pub fn relative_residual(value: Real, scale: Real, floor: Real) -> Real {
    if scale.abs() < floor {
        value.abs()
    } else {
        (value / scale).abs()
    }
}
