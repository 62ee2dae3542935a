//! Core math functions for the pitch model.
//! If the `libm` feature is enabled, this just exports the required function.
//! If the `std` feature is enabled, this converts the syntax from the std
//! variety: `f.powf(g)` into the `libm` equiv. `pow(f, g)`.

#[cfg(feature = "libm")]
pub(crate) use libm::pow;

#[cfg(feature = "std")]
pub(crate) fn pow(f1: f64, f2: f64) -> f64 {
    f1.powf(f2)
}
