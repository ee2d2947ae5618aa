//! Legendre polynomial evaluation.
//!
//! Legendre polynomials P_n are orthogonal on [-1, 1] and satisfy the
//! three-term recurrence
//! (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x).
//! They are the backbone of the Gauss-Lobatto point computation: the
//! interior GLL points are the roots of P'_N.

/// Evaluate P_n(x) by the three-term recurrence.
pub fn legendre(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;

    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    p_curr
}

/// Evaluate P_n(x) together with P'_n(x).
///
/// The derivative uses P'_n(x) = n (x P_n - P_{n-1}) / (x² - 1) away from
/// the endpoints and the closed forms P'_n(±1) = (±1)^{n+1} n(n+1)/2 there.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;

    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    let dp = if (x - 1.0).abs() < 1e-14 {
        (n * (n + 1)) as f64 / 2.0
    } else if (x + 1.0).abs() < 1e-14 {
        let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
        sign * (n * (n + 1)) as f64 / 2.0
    } else {
        n as f64 * (x * p_curr - p_prev) / (x * x - 1.0)
    };

    (p_curr, dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_order_closed_forms() {
        let x = 0.3;
        assert!((legendre(0, x) - 1.0).abs() < 1e-14);
        assert!((legendre(1, x) - x).abs() < 1e-14);
        assert!((legendre(2, x) - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
        assert!((legendre(3, x) - (5.0 * x * x * x - 3.0 * x) / 2.0).abs() < 1e-14);
    }

    #[test]
    fn endpoint_values() {
        // P_n(1) = 1, P_n(-1) = (-1)^n
        for n in 0..=8 {
            assert!((legendre(n, 1.0) - 1.0).abs() < 1e-14);
            let expected = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!((legendre(n, -1.0) - expected).abs() < 1e-14);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for n in 1..=6 {
            for &x in &[-0.8, -0.4, 0.1, 0.6, 0.9] {
                let (_, dp) = legendre_and_derivative(n, x);
                let fd = (legendre(n, x + h) - legendre(n, x - h)) / (2.0 * h);
                assert!(
                    (dp - fd).abs() < 1e-7,
                    "n={}, x={}: dp={} fd={}",
                    n,
                    x,
                    dp,
                    fd
                );
            }
        }
    }

    #[test]
    fn derivative_at_endpoints() {
        // P'_n(±1) = (±1)^{n+1} n(n+1)/2
        for n in 1..=6 {
            let expected = (n * (n + 1)) as f64 / 2.0;
            let (_, dp) = legendre_and_derivative(n, 1.0);
            assert!((dp - expected).abs() < 1e-12);

            let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
            let (_, dp) = legendre_and_derivative(n, -1.0);
            assert!((dp - sign * expected).abs() < 1e-12);
        }
    }
}
