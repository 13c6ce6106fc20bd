//! Numerical solvers for the marksman targeting engine.
//!
//! Closed-form polynomial root finders over complex numbers and the
//! ballistic intercept solver built on them. Everything here is pure and
//! stateless.

pub mod ballistics;
pub mod complex;
pub mod roots;

pub use ballistics::{predict, solve_intercept};
pub use complex::Complex;
