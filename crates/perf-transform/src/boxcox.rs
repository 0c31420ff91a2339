//! Box-Cox power transformation with a maximum-likelihood λ.
//!
//! λ maximises the profile log-likelihood
//! `(λ - 1) Σ ln x - n/2 ln(var(y))`, located with Brent's method after
//! bracketing outward from `(-2, 2)`.

use tracing::debug;

use crate::error::TransformError;

const BRACKET_START: (f64, f64) = (-2.0, 2.0);
const GOLDEN_RATIO: f64 = 1.618_034;
const GROWTH_LIMIT: f64 = 110.0;
const TINY: f64 = 1e-21;
const MAX_BRACKET_ITERATIONS: usize = 1000;

const BRENT_TOLERANCE: f64 = 1.48e-8;
const BRENT_MIN_TOLERANCE: f64 = 1.0e-11;
const BRENT_GOLDEN_SECTION: f64 = 0.381_966_0;
const MAX_BRENT_ITERATIONS: usize = 500;

/// A fitted Box-Cox transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCoxFit {
    pub lambda: f64,
    pub transformed: Vec<f64>,
}

/// Box-Cox transform of one strictly positive value.
pub fn boxcox_transform(x: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Profile log-likelihood of `lambda` for strictly positive `data`.
///
/// Returns negative infinity when the transformed variance is zero or
/// overflows.
pub fn boxcox_llf(lambda: f64, data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let log_sum: f64 = data.iter().map(|x| x.ln()).sum();
    let transformed: Vec<f64> = data.iter().map(|&x| boxcox_transform(x, lambda)).collect();
    let mean = transformed.iter().sum::<f64>() / n;
    let variance = transformed.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n;
    if !variance.is_finite() || variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    (lambda - 1.0) * log_sum - n / 2.0 * variance.ln()
}

/// Fits λ by maximum likelihood and transforms `data`.
///
/// # Errors
///
/// Returns [`TransformError::DegenerateInput`] if the sample is empty,
/// contains a non-positive or non-finite value, is constant, or the
/// likelihood cannot be maximised.
pub fn boxcox(data: &[f64]) -> Result<BoxCoxFit, TransformError> {
    if data.is_empty() {
        return Err(TransformError::DegenerateInput(
            "Box-Cox requires a non-empty sample".to_string(),
        ));
    }
    if data.iter().any(|x| !x.is_finite() || *x <= 0.0) {
        return Err(TransformError::DegenerateInput(
            "Box-Cox requires strictly positive values".to_string(),
        ));
    }
    let first = data[0];
    if data.iter().all(|x| *x == first) {
        return Err(TransformError::DegenerateInput(
            "Box-Cox requires a non-constant sample".to_string(),
        ));
    }

    let objective = |lambda: f64| -boxcox_llf(lambda, data);
    let (a, b, c) = bracket(objective, BRACKET_START.0, BRACKET_START.1).ok_or_else(|| {
        TransformError::DegenerateInput("Box-Cox likelihood has no interior maximum".to_string())
    })?;
    let lambda = brent(objective, a, b, c);
    if !lambda.is_finite() {
        return Err(TransformError::DegenerateInput(
            "Box-Cox lambda did not converge".to_string(),
        ));
    }
    debug!(lambda, n = data.len(), "fitted box-cox lambda");

    Ok(BoxCoxFit {
        lambda,
        transformed: data.iter().map(|&x| boxcox_transform(x, lambda)).collect(),
    })
}

/// Expands `(xa, xb)` downhill until it brackets a minimum of `f`.
///
/// Returns `(a, b, c)` with `f(b) < f(a)` and `f(b) <= f(c)`.
fn bracket<F>(f: F, xa: f64, xb: f64) -> Option<(f64, f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let (mut xa, mut xb) = (xa, xb);
    let mut fa = f(xa);
    let mut fb = f(xb);
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLDEN_RATIO * (xb - xa);
    let mut fc = f(xc);

    let mut iterations = 0;
    while fc < fb {
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < TINY {
            2.0 * TINY
        } else {
            2.0 * val
        };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROWTH_LIMIT * (xc - xb);
        iterations += 1;
        if iterations > MAX_BRACKET_ITERATIONS {
            return None;
        }

        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                xa = xb;
                xb = w;
                fa = fb;
                fb = fw;
                break;
            } else if fw > fb {
                xc = w;
                break;
            }
            w = xc + GOLDEN_RATIO * (xc - xb);
            fw = f(w);
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            w = wlim;
            fw = f(w);
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLDEN_RATIO * (xc - xb);
                fb = fc;
                fc = fw;
                fw = f(w);
            }
        } else {
            w = xc + GOLDEN_RATIO * (xc - xb);
            fw = f(w);
        }
        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    let finite = [xa, xb, xc, fb].iter().all(|v| v.is_finite());
    (finite && fb < fa).then_some((xa, xb, xc))
}

/// Brent's parabolic-interpolation minimiser over a bracketing triple.
fn brent<F>(f: F, xa: f64, xb: f64, xc: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = if xa < xc { (xa, xc) } else { (xc, xa) };
    let mut x = xb;
    let mut w = xb;
    let mut v = xb;
    let mut fx = f(x);
    let mut fw = fx;
    let mut fv = fx;
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..MAX_BRENT_ITERATIONS {
        let tol1 = BRENT_TOLERANCE * x.abs() + BRENT_MIN_TOLERANCE;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);
        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            break;
        }

        let golden_step = |x: f64| if x >= xmid { a - x } else { b - x };
        if e.abs() <= tol1 {
            e = golden_step(x);
            d = BRENT_GOLDEN_SECTION * e;
        } else {
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let previous = e;
            e = d;
            if p > tmp2 * (a - x) && p < tmp2 * (b - x) && p.abs() < (0.5 * tmp2 * previous).abs()
            {
                let mut step = p / tmp2;
                let u = x + step;
                if (u - a) < tol2 || (b - u) < tol2 {
                    step = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
                d = step;
            } else {
                e = golden_step(x);
                d = BRENT_GOLDEN_SECTION * e;
            }
        }

        let u = if d.abs() < tol1 {
            if d >= 0.0 { x + tol1 } else { x - tol1 }
        } else {
            x + d
        };
        let fu = f(u);
        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn transform_at_zero_lambda_is_log() {
        assert_eq!(boxcox_transform(std::f64::consts::E, 0.0), 1.0);
        assert!((boxcox_transform(4.0, 0.5) - 2.0).abs() < 1e-12);
        assert!((boxcox_transform(3.0, 1.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn brent_finds_parabola_minimum() {
        let f = |x: f64| (x - 0.7).powi(2) + 1.0;
        let (a, b, c) = bracket(f, -2.0, 2.0).expect("bracket");
        let x = brent(f, a, b, c);
        assert!((x - 0.7).abs() < 1e-6, "got {x}");
    }

    #[test]
    fn bracket_expands_past_start_interval() {
        let f = |x: f64| (x - 9.0).powi(2);
        let (a, b, c) = bracket(f, -2.0, 2.0).expect("bracket");
        assert!(f(b) < f(a) && f(b) <= f(c));
        let x = brent(f, a, b, c);
        assert!((x - 9.0).abs() < 1e-5, "got {x}");
    }

    proptest! {
        #[test]
        fn bracket_encloses_minimum_of_unimodal_functions(
            offset in 3.0f64..60.0,
            negative in any::<bool>(),
            power in prop::sample::select(vec![1.5f64, 2.0, 4.0]),
        ) {
            let minimum = if negative { -offset } else { offset };
            let f = |x: f64| (x - minimum).abs().powf(power);
            let (a, b, c) = bracket(f, -2.0, 2.0).expect("bracket");
            prop_assert!((b - a) * (c - b) > 0.0, "b outside ({a}, {c})");
            prop_assert!(f(b) < f(a));
            prop_assert!(f(b) <= f(c));
            prop_assert!((a.min(c)..=a.max(c)).contains(&minimum));
        }
    }

    #[test]
    fn fitted_lambda_maximises_likelihood() {
        let data = [1.0, 1.5, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0];
        let fit = boxcox(&data).expect("fit");
        let best = boxcox_llf(fit.lambda, &data);
        for delta in [-0.1, -0.01, 0.01, 0.1] {
            assert!(best >= boxcox_llf(fit.lambda + delta, &data) - 1e-9);
        }
        assert_eq!(fit.transformed.len(), data.len());
    }
}
