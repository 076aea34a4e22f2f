//! Iterative non-negative matrix factorization
//!
//! Approximates the term-document matrix A (m × n) as the product of a
//! basis matrix U (m × k) and a coefficient matrix V (k × n), both
//! non-negative, so each basis column reads as an additive topic.
//!
//! One call to [`NonnegativeFactorization::iterate`] performs exactly one
//! multiplicative Euclidean update of both factors. Stopping policy is
//! owned by the caller: the engine only reports its approximation error
//! and completed iteration count, which keeps it testable in isolation and
//! lets a controlled loop enforce an iteration or wall-clock budget
//! between calls.

use crate::factorize::tdmatrix::TermDocumentMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Guard against division by zero in multiplicative updates.
const EPS: f64 = 1e-9;

/// Iterative NMF state: basis and coefficient matrices plus progress
/// counters, mutated in place across iterations.
#[derive(Debug, Clone)]
pub struct NonnegativeFactorization {
    m: usize,
    n: usize,
    k: usize,
    /// Basis, m × k row-major
    u: Vec<f64>,
    /// Coefficients, k × n row-major
    v: Vec<f64>,
    error: f64,
    iterations: usize,
}

impl NonnegativeFactorization {
    /// Initialize factors with seeded pseudo-random values in (0, 1).
    ///
    /// Identical seed and input reproduce identical factorizations.
    pub fn new(matrix: &TermDocumentMatrix, k: usize, seed: u64) -> Self {
        let m = matrix.row_count();
        let n = matrix.docs;
        let mut rng = StdRng::seed_from_u64(seed);

        let u = (0..m * k).map(|_| rng.random::<f64>()).collect();
        let v = (0..k * n).map(|_| rng.random::<f64>()).collect();

        Self {
            m,
            n,
            k,
            u,
            v,
            error: -1.0,
            iterations: 0,
        }
    }

    /// Perform one multiplicative update step, mutating both factor
    /// matrices in place and refreshing the approximation error.
    ///
    /// Degenerate shapes (no terms, no documents, rank zero) complete
    /// trivially instead of failing.
    pub fn iterate(&mut self, matrix: &TermDocumentMatrix) {
        let (m, n, k) = (self.m, self.n, self.k);
        if m == 0 || n == 0 || k == 0 {
            self.error = 0.0;
            self.iterations += 1;
            return;
        }

        let a = &matrix.values;

        // V <- V .* (UᵀA) ./ (UᵀU V + eps)
        let mut uta = vec![0.0; k * n];
        for c in 0..k {
            for j in 0..n {
                let mut sum = 0.0;
                for i in 0..m {
                    sum += self.u[i * k + c] * a[i * n + j];
                }
                uta[c * n + j] = sum;
            }
        }
        let mut utu = vec![0.0; k * k];
        for c in 0..k {
            for d in 0..k {
                let mut sum = 0.0;
                for i in 0..m {
                    sum += self.u[i * k + c] * self.u[i * k + d];
                }
                utu[c * k + d] = sum;
            }
        }
        for c in 0..k {
            for j in 0..n {
                let mut denom = 0.0;
                for d in 0..k {
                    denom += utu[c * k + d] * self.v[d * n + j];
                }
                self.v[c * n + j] *= uta[c * n + j] / (denom + EPS);
            }
        }

        // U <- U .* (A Vᵀ) ./ (U V Vᵀ + eps)
        let mut avt = vec![0.0; m * k];
        for i in 0..m {
            for c in 0..k {
                let mut sum = 0.0;
                for j in 0..n {
                    sum += a[i * n + j] * self.v[c * n + j];
                }
                avt[i * k + c] = sum;
            }
        }
        let mut vvt = vec![0.0; k * k];
        for c in 0..k {
            for d in 0..k {
                let mut sum = 0.0;
                for j in 0..n {
                    sum += self.v[c * n + j] * self.v[d * n + j];
                }
                vvt[c * k + d] = sum;
            }
        }
        for i in 0..m {
            for c in 0..k {
                let mut denom = 0.0;
                for d in 0..k {
                    denom += self.u[i * k + d] * vvt[d * k + c];
                }
                self.u[i * k + c] *= avt[i * k + c] / (denom + EPS);
            }
        }

        self.error = self.frobenius_error(matrix);
        self.iterations += 1;
    }

    /// Approximation error after the last completed iteration, or −1 if no
    /// iteration has run yet.
    pub fn approximation_error(&self) -> f64 {
        self.error
    }

    /// Number of iterations completed so far.
    pub fn iterations_completed(&self) -> usize {
        self.iterations
    }

    /// Factorization rank
    pub fn rank(&self) -> usize {
        self.k
    }

    /// Basis weight of a term row in a cluster column
    pub fn basis_weight(&self, row: usize, cluster: usize) -> f64 {
        self.u[row * self.k + cluster]
    }

    /// Coefficient weight of a document in a cluster row
    pub fn coefficient(&self, cluster: usize, doc: usize) -> f64 {
        self.v[cluster * self.n + doc]
    }

    /// ‖A − UV‖ Frobenius
    fn frobenius_error(&self, matrix: &TermDocumentMatrix) -> f64 {
        let (m, n, k) = (self.m, self.n, self.k);
        let a = &matrix.values;
        let mut sum = 0.0;
        for i in 0..m {
            for j in 0..n {
                let mut approx = 0.0;
                for c in 0..k {
                    approx += self.u[i * k + c] * self.v[c * n + j];
                }
                let diff = a[i * n + j] - approx;
                sum += diff * diff;
            }
        }
        sum.sqrt()
    }
}
