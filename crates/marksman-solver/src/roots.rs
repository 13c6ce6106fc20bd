//! Closed-form polynomial root finders.
//!
//! Monic forms take the coefficients below the leading one, highest degree
//! first: `solve_quartic(a, b, c, d)` solves `x^4 + a x^3 + b x^2 + c x + d = 0`.
//! Roots are returned as complex numbers; callers filter for the real ones.

use crate::complex::Complex;

/// Roots of `x^2 + b x + c = 0`.
pub fn solve_quadratic(b: Complex, c: Complex) -> [Complex; 2] {
    let disc = (b * b - c * 4.0).sqrt();
    // Pick the sign that avoids cancellation, then recover the other root from the product.
    let q = if b.re * disc.re + b.im * disc.im >= 0.0 {
        -(b + disc) / 2.0
    } else {
        -(b - disc) / 2.0
    };
    if q == Complex::ZERO {
        return [Complex::ZERO, Complex::ZERO];
    }
    [q, c / q]
}

/// Roots of `x^3 + a x^2 + b x + c = 0` (Cardano).
pub fn solve_cubic(a: Complex, b: Complex, c: Complex) -> [Complex; 3] {
    let shift = a / 3.0;
    // Depressed form u^3 + p u + q with x = u - a/3.
    let p = b - a * a / 3.0;
    let q = a * a * a * (2.0 / 27.0) - a * b / 3.0 + c;

    let half_q = q / 2.0;
    let s = (half_q * half_q + p * p * p / 27.0).sqrt();
    let plus = -half_q + s;
    let minus = -half_q - s;
    let w3 = if plus.norm() >= minus.norm() { plus } else { minus };

    if w3.norm() == 0.0 {
        // p = q = 0: triple root.
        return [-shift, -shift, -shift];
    }

    w3.cbrts().map(|w| w - p / (w * 3.0) - shift)
}

/// Roots of `x^4 + a x^3 + b x^2 + c x + d = 0` (Ferrari via the resolvent cubic).
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64) -> [Complex; 4] {
    let shift = a / 4.0;
    let a2 = a * a;
    // Depressed form y^4 + p y^2 + q y + r with x = y - a/4.
    let p = b - 3.0 * a2 / 8.0;
    let q = c - a * b / 2.0 + a2 * a / 8.0;
    let r = d - a * c / 4.0 + a2 * b / 16.0 - 3.0 * a2 * a2 / 256.0;

    let unshift = |roots: [Complex; 4]| roots.map(|y| y - Complex::real(shift));

    if q == 0.0 {
        return unshift(solve_biquadratic(p, r));
    }

    // Resolvent: m^3 + p m^2 + (p^2/4 - r) m - q^2/8 = 0. Any non-zero root works;
    // the largest keeps q / (2 sqrt(2m)) well conditioned.
    let resolvent = solve_cubic(
        Complex::real(p),
        Complex::real(p * p / 4.0 - r),
        Complex::real(-q * q / 8.0),
    );
    let m = resolvent
        .into_iter()
        .fold(Complex::ZERO, |best, m| if m.norm() > best.norm() { m } else { best });

    if m.norm() <= f64::EPSILON * p.abs().max(1.0) {
        return unshift(solve_biquadratic(p, r));
    }

    let s = (m * 2.0).sqrt();
    let base = Complex::real(p / 2.0) + m;
    let tilt = Complex::real(q) / (s * 2.0);

    // y^2 - s y + (p/2 + m + q/(2s)) = 0 and y^2 + s y + (p/2 + m - q/(2s)) = 0.
    let [y0, y1] = solve_quadratic(-s, base + tilt);
    let [y2, y3] = solve_quadratic(s, base - tilt);
    unshift([y0, y1, y2, y3])
}

/// Roots of `y^4 + p y^2 + r = 0`.
fn solve_biquadratic(p: f64, r: f64) -> [Complex; 4] {
    let [z0, z1] = solve_quadratic(Complex::real(p), Complex::real(r));
    let (s0, s1) = (z0.sqrt(), z1.sqrt());
    [s0, -s0, s1, -s1]
}

/// Real roots of `a x^2 + b x + c = 0`, degrading to the linear case when `a` vanishes.
pub fn real_quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale == 0.0 {
        return Vec::new();
    }
    if a.abs() <= f64::EPSILON * scale {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    let q = -0.5 * (b + disc.sqrt().copysign(b));
    if q == 0.0 {
        return vec![0.0];
    }
    vec![q / a, c / q]
}

/// Evaluate a real polynomial (highest degree first) at `x`.
pub fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &k| acc * x + k)
}

/// Value and first derivative of a real polynomial at `x`.
fn eval_with_derivative(coeffs: &[f64], x: f64) -> (f64, f64) {
    coeffs.iter().fold((0.0, 0.0), |(value, slope), &k| {
        (value * x + k, slope * x + value)
    })
}

/// Refine an approximate real root with a few Newton steps.
pub fn polish(coeffs: &[f64], mut x: f64, iterations: usize) -> f64 {
    for _ in 0..iterations {
        let (value, slope) = eval_with_derivative(coeffs, x);
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        let next = x - value / slope;
        if !next.is_finite() {
            break;
        }
        x = next;
    }
    x
}
