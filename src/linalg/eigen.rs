//! Eigenvalue decomposition of real square matrices.
//!
//! Two paths are available:
//!
//! - **Symmetric**: Householder reduction to tridiagonal form, followed by
//!   implicit QR iteration with a Wilkinson shift. The Householder transform
//!   and the QR rotations are accumulated into the eigenvector matrix.
//! - **Asymmetric**: Householder reduction to upper Hessenberg form, followed
//!   by Francis double-shift QR iteration. Complex conjugate pairs converge to
//!   real 2×2 blocks and are reported as real and imaginary parts; eigenvectors
//!   are recovered by back substitution on the quasi-triangular Schur form.
//!
//! Eigenvalues are returned in descending order of their real part, each paired
//! with a unit-length eigenvector stored as a row. The sign of an eigenvector is
//! not fixed.
//!
//! # Example
//!
//! ```
//! use linstat::{EigenDecomposer, Matrix};
//!
//! let m: Matrix<f64> = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
//! let eig = EigenDecomposer::new(&m).unwrap();
//!
//! assert!((eig.eigenvalue(0) - 3.0).abs() < 1e-10);
//! assert!((eig.eigenvalue(1) - 1.0).abs() < 1e-10);
//! assert!(eig.converged());
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use super::matrix::Matrix;
use super::vector::Vector;
use crate::error::LinalgError;
use crate::real::Real;

/// Iteration limits for [`EigenDecomposer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenConfig {
    /// Maximum QR iterations spent on any single eigenvalue
    pub max_iterations: usize,
    /// Relative threshold below which a sub-diagonal entry is treated as zero
    pub tolerance: f64,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000, // Generous for Wilkinson/Francis shifts
            tolerance: 1e-10,
        }
    }
}

impl EigenConfig {
    /// Set the per-eigenvalue iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the deflation tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Which decomposition path to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixKind {
    /// Tridiagonalization + implicit QR
    Symmetric,
    /// Hessenberg reduction + double-shift QR
    Asymmetric,
    /// Detect symmetry from the input
    #[default]
    Unknown,
}

/// Eigenvalues and eigenvectors of a real square matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposer<T> {
    eigenvalues: Vector<T>,
    imaginary_parts: Vector<T>,
    /// One eigenvector per row
    eigenvectors: Matrix<T>,
    kind: MatrixKind,
    converged: bool,
    iterations: usize,
}

impl<T: Real> EigenDecomposer<T> {
    /// Decompose `m` with the default configuration, detecting symmetry.
    pub fn new(m: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_config(m, MatrixKind::Unknown, EigenConfig::default())
    }

    /// Decompose `m` along the path selected by `kind`.
    ///
    /// With [`MatrixKind::Unknown`] the symmetric path is taken when `m` is
    /// symmetric within `config.tolerance`. Forcing [`MatrixKind::Symmetric`]
    /// on an asymmetric matrix yields the decomposition of a symmetrised matrix
    /// and is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `Empty` for a 0×0 matrix and `NotSquare` for rectangular input.
    pub fn with_config(
        m: &Matrix<T>,
        kind: MatrixKind,
        config: EigenConfig,
    ) -> Result<Self, LinalgError> {
        if m.is_empty() {
            return Err(LinalgError::Empty);
        }
        if !m.is_square() {
            return Err(LinalgError::NotSquare {
                rows: m.nrows(),
                cols: m.ncols(),
            });
        }

        let kind = match kind {
            MatrixKind::Unknown => {
                if m.is_symmetric(T::from_f64(config.tolerance)) {
                    MatrixKind::Symmetric
                } else {
                    MatrixKind::Asymmetric
                }
            }
            forced => forced,
        };
        log::debug!("eigen decomposition of {}x{} matrix: {:?} path", m.nrows(), m.ncols(), kind);

        let result = match kind {
            MatrixKind::Asymmetric => Self::decompose_asymmetric(m, &config),
            _ => Self::decompose_symmetric(m, &config),
        };

        if !result.converged {
            log::warn!(
                "eigen decomposition did not converge within {} iterations per eigenvalue",
                config.max_iterations
            );
        }
        log::debug!("eigen decomposition finished after {} QR iterations", result.iterations);

        Ok(result)
    }

    /// Eigenvalues (real parts), sorted descending.
    pub fn eigenvalues(&self) -> &Vector<T> {
        &self.eigenvalues
    }

    /// The i-th eigenvalue (real part).
    pub fn eigenvalue(&self, i: usize) -> T {
        self.eigenvalues[i]
    }

    /// Imaginary parts paired by index with [`eigenvalues`](Self::eigenvalues).
    pub fn imaginary_parts(&self) -> &Vector<T> {
        &self.imaginary_parts
    }

    /// Eigenvectors, one unit-length row per eigenvalue.
    ///
    /// For a complex pair at indices `i` (positive imaginary part) and `i + 1`,
    /// rows `i` and `i + 1` hold the real and imaginary parts of the eigenvector
    /// belonging to eigenvalue `i`, scaled jointly to unit norm.
    pub fn eigenvectors(&self) -> &Matrix<T> {
        &self.eigenvectors
    }

    /// The eigenvector paired with eigenvalue `i`.
    pub fn eigenvector(&self, i: usize) -> Vector<T> {
        self.eigenvectors.row(i)
    }

    /// Returns true if every eigenvalue is real.
    pub fn is_real(&self) -> bool {
        self.imaginary_parts.iter().all(|&x| x == T::zero())
    }

    /// Returns false if any eigenvalue exhausted its iteration budget.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Total number of QR iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The path that was actually run.
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    fn decompose_symmetric(m: &Matrix<T>, config: &EigenConfig) -> Self {
        let n = m.nrows();
        let mut v = m.clone();
        let mut d = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];

        tridiagonalize(&mut v, &mut d, &mut e);
        let (converged, iterations) = tridiagonal_qr(&mut d, &mut e, &mut v, config);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| descending(d[a], d[b]));

        let mut eigenvalues = Vector::zeros(n);
        let mut eigenvectors = Matrix::zeros(n, n);
        for (row, &idx) in order.iter().enumerate() {
            eigenvalues[row] = d[idx];
            let mut vector = v.column(idx);
            vector.normalize();
            eigenvectors.set_row(row, &vector);
        }

        Self {
            eigenvalues,
            imaginary_parts: Vector::zeros(n),
            eigenvectors,
            kind: MatrixKind::Symmetric,
            converged,
            iterations,
        }
    }

    fn decompose_asymmetric(m: &Matrix<T>, config: &EigenConfig) -> Self {
        let n = m.nrows();
        let mut h = m.clone();
        let mut v = Matrix::identity(n);
        let mut d = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];

        hessenberg(&mut h, &mut v);
        let (converged, iterations) = hessenberg_qr(&mut h, &mut v, &mut d, &mut e, config);

        // Group conjugate pairs so that sorting keeps them adjacent
        let mut blocks: Vec<(usize, usize)> = Vec::with_capacity(n);
        let mut j = 0;
        while j < n {
            if e[j] > T::zero() && j + 1 < n {
                blocks.push((j, 2));
                j += 2;
            } else {
                blocks.push((j, 1));
                j += 1;
            }
        }
        blocks.sort_by(|a, b| descending(d[a.0], d[b.0]));

        let mut eigenvalues = Vector::zeros(n);
        let mut imaginary_parts = Vector::zeros(n);
        let mut eigenvectors = Matrix::zeros(n, n);
        let mut row = 0;
        for &(idx, width) in &blocks {
            if width == 1 {
                eigenvalues[row] = d[idx];
                let mut vector = v.column(idx);
                vector.normalize();
                eigenvectors.set_row(row, &vector);
            } else {
                let mut re = v.column(idx);
                let mut im = v.column(idx + 1);
                let norm = (re.squared_length() + im.squared_length()).sqrt();
                if norm > T::zero() {
                    re /= norm;
                    im /= norm;
                }
                eigenvalues[row] = d[idx];
                eigenvalues[row + 1] = d[idx + 1];
                imaginary_parts[row] = e[idx];
                imaginary_parts[row + 1] = e[idx + 1];
                eigenvectors.set_row(row, &re);
                eigenvectors.set_row(row + 1, &im);
            }
            row += width;
        }

        Self {
            eigenvalues,
            imaginary_parts,
            eigenvectors,
            kind: MatrixKind::Asymmetric,
            converged,
            iterations,
        }
    }
}

fn descending<T: Real>(a: T, b: T) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Householder reduction of a symmetric matrix to tridiagonal form.
///
/// On entry `v` holds the matrix. On exit `v` holds the orthogonal transform,
/// `d` the diagonal and `e[k]` the sub-diagonal entry `T(k+1, k)`.
fn tridiagonalize<T: Real>(v: &mut Matrix<T>, d: &mut [T], e: &mut [T]) {
    let n = d.len();
    for j in 0..n {
        d[j] = v[n - 1][j];
    }

    for i in (1..n).rev() {
        let mut scale = T::zero();
        let mut h = T::zero();
        for k in 0..i {
            scale += d[k].abs();
        }

        if scale == T::zero() {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[i - 1][j];
                v[i][j] = T::zero();
                v[j][i] = T::zero();
            }
        } else {
            for k in 0..i {
                d[k] /= scale;
                h += d[k] * d[k];
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > T::zero() {
                g = -g;
            }
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            for x in e.iter_mut().take(i) {
                *x = T::zero();
            }

            for j in 0..i {
                f = d[j];
                v[j][i] = f;
                g = e[j] + v[j][j] * f;
                for k in (j + 1)..i {
                    g += v[k][j] * d[k];
                    e[k] += v[k][j] * f;
                }
                e[j] = g;
            }

            f = T::zero();
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[k][j] -= f * e[k] + g * d[k];
                }
                d[j] = v[i - 1][j];
                v[i][j] = T::zero();
            }
        }
        d[i] = h;
    }

    // Accumulate transformations
    for i in 0..n - 1 {
        v[n - 1][i] = v[i][i];
        v[i][i] = T::one();
        let h = d[i + 1];
        if h != T::zero() {
            for k in 0..=i {
                d[k] = v[k][i + 1] / h;
            }
            for j in 0..=i {
                let mut g = T::zero();
                for k in 0..=i {
                    g += v[k][i + 1] * v[k][j];
                }
                for k in 0..=i {
                    v[k][j] -= g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[k][i + 1] = T::zero();
        }
    }
    for j in 0..n {
        d[j] = v[n - 1][j];
        v[n - 1][j] = T::zero();
    }
    v[n - 1][n - 1] = T::one();

    // Shift so that e[k] couples k and k + 1
    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = T::zero();
}

/// Implicit Wilkinson-shift QR on a symmetric tridiagonal matrix.
///
/// Rotations are applied to the columns of `v`. Returns whether every
/// eigenvalue converged and the total iteration count.
fn tridiagonal_qr<T: Real>(
    d: &mut [T],
    e: &mut [T],
    v: &mut Matrix<T>,
    config: &EigenConfig,
) -> (bool, usize) {
    let n = d.len();
    let tol = T::from_f64(config.tolerance);
    let mut norm = T::zero();
    for i in 0..n {
        norm = norm.max(d[i].abs() + e[i].abs());
    }
    let floor = T::epsilon() * norm;
    let negligible = |e: T, a: T, b: T| e.abs() <= (tol * (a.abs() + b.abs())).max(floor);

    let mut total = 0;
    let mut iter = 0;
    let mut hi = n - 1;

    while hi > 0 {
        if negligible(e[hi - 1], d[hi - 1], d[hi]) {
            e[hi - 1] = T::zero();
            hi -= 1;
            iter = 0;
            continue;
        }
        if iter >= config.max_iterations {
            return (false, total);
        }

        // Find the start of the unreduced block ending at hi
        let mut lo = hi - 1;
        while lo > 0 && !negligible(e[lo - 1], d[lo - 1], d[lo]) {
            lo -= 1;
        }
        if lo > 0 {
            e[lo - 1] = T::zero();
        }

        // Wilkinson shift from the trailing 2x2 block
        let b = e[hi - 1];
        let delta = (d[hi - 1] - d[hi]) / (T::one() + T::one());
        let sign = if delta >= T::zero() { T::one() } else { -T::one() };
        let mu = d[hi] - b * b / (delta + sign * delta.hypot(b));

        let mut x = d[lo] - mu;
        let mut z = e[lo];
        for k in lo..hi {
            let r = x.hypot(z);
            let (c, s) = if r == T::zero() {
                (T::one(), T::zero())
            } else {
                (x / r, z / r)
            };
            if k > lo {
                e[k - 1] = r;
            }

            let a = d[k];
            let b = e[k];
            let cc = d[k + 1];
            let two = T::one() + T::one();
            d[k] = c * c * a + two * c * s * b + s * s * cc;
            d[k + 1] = s * s * a - two * c * s * b + c * c * cc;
            e[k] = c * s * (cc - a) + (c * c - s * s) * b;

            if k + 1 < hi {
                z = s * e[k + 1];
                e[k + 1] *= c;
            }
            x = e[k];

            for i in 0..n {
                let vk = v[i][k];
                let vk1 = v[i][k + 1];
                v[i][k] = c * vk + s * vk1;
                v[i][k + 1] = c * vk1 - s * vk;
            }
        }

        iter += 1;
        total += 1;
    }

    (true, total)
}

/// Householder reduction to upper Hessenberg form, accumulating the
/// orthogonal transform into `v` (which must start as the identity).
fn hessenberg<T: Real>(h: &mut Matrix<T>, v: &mut Matrix<T>) {
    let n = h.nrows();
    let high = n - 1;
    let mut ort = vec![T::zero(); n];

    for m in 1..n.saturating_sub(1) {
        let mut scale = T::zero();
        for i in m..=high {
            scale += h[i][m - 1].abs();
        }
        if scale == T::zero() {
            continue;
        }

        let mut hh = T::zero();
        for i in (m..=high).rev() {
            ort[i] = h[i][m - 1] / scale;
            hh += ort[i] * ort[i];
        }
        let mut g = hh.sqrt();
        if ort[m] > T::zero() {
            g = -g;
        }
        hh -= ort[m] * g;
        ort[m] -= g;

        for j in m..n {
            let mut f = T::zero();
            for i in (m..=high).rev() {
                f += ort[i] * h[i][j];
            }
            f /= hh;
            for i in m..=high {
                h[i][j] -= f * ort[i];
            }
        }

        for i in 0..=high {
            let mut f = T::zero();
            for j in (m..=high).rev() {
                f += ort[j] * h[i][j];
            }
            f /= hh;
            for j in m..=high {
                h[i][j] -= f * ort[j];
            }
        }

        ort[m] *= scale;
        h[m][m - 1] = scale * g;
    }

    for m in (1..n.saturating_sub(1)).rev() {
        if h[m][m - 1] == T::zero() {
            continue;
        }
        for i in (m + 1)..=high {
            ort[i] = h[i][m - 1];
        }
        for j in m..=high {
            let mut g = T::zero();
            for i in m..=high {
                g += ort[i] * v[i][j];
            }
            // Two divisions avoid underflow
            g = (g / ort[m]) / h[m][m - 1];
            for i in m..=high {
                v[i][j] += g * ort[i];
            }
        }
    }
}

/// Complex division `(xr + i·xi) / (yr + i·yi)`.
fn cdiv<T: Real>(xr: T, xi: T, yr: T, yi: T) -> (T, T) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Francis double-shift QR on an upper Hessenberg matrix, followed by back
/// substitution for the eigenvectors.
///
/// On exit `d` and `e` hold the real and imaginary parts of the eigenvalues and
/// the columns of `v` the eigenvectors (real and imaginary parts in adjacent
/// columns for a complex pair). Returns whether every eigenvalue converged and
/// the total iteration count.
fn hessenberg_qr<T: Real>(
    h: &mut Matrix<T>,
    v: &mut Matrix<T>,
    d: &mut [T],
    e: &mut [T],
    config: &EigenConfig,
) -> (bool, usize) {
    let size = h.nrows();
    let zero = T::zero();
    let two = T::one() + T::one();
    let eps = T::epsilon();
    let tol = T::from_f64(config.tolerance).max(eps);

    let mut exshift = zero;
    let (mut p, mut q, mut r, mut s, mut z) = (zero, zero, zero, zero, zero);
    let (mut w, mut x, mut y) = (zero, zero, zero);

    let mut norm = zero;
    for i in 0..size {
        for j in i.saturating_sub(1)..size {
            norm += h[i][j].abs();
        }
    }

    let mut converged = true;
    let mut total = 0;
    let mut iter = 0;
    let mut remaining = size;

    while remaining > 0 {
        let n = remaining - 1;

        // Look for a single small sub-diagonal element
        let mut l = n;
        while l > 0 {
            s = h[l - 1][l - 1].abs() + h[l][l].abs();
            if s == zero {
                s = norm;
            }
            if h[l][l - 1].abs() < tol * s {
                break;
            }
            l -= 1;
        }

        if l == n {
            // One root found
            h[n][n] += exshift;
            d[n] = h[n][n];
            e[n] = zero;
            remaining -= 1;
            iter = 0;
        } else if l + 1 == n {
            // Two roots found
            w = h[n][n - 1] * h[n - 1][n];
            p = (h[n - 1][n - 1] - h[n][n]) / two;
            q = p * p + w;
            z = q.abs().sqrt();
            h[n][n] += exshift;
            h[n - 1][n - 1] += exshift;
            x = h[n][n];

            if q >= zero {
                z = if p >= zero { p + z } else { p - z };
                d[n - 1] = x + z;
                d[n] = d[n - 1];
                if z != zero {
                    d[n] = x - w / z;
                }
                e[n - 1] = zero;
                e[n] = zero;

                x = h[n][n - 1];
                s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                r = (p * p + q * q).sqrt();
                p /= r;
                q /= r;

                for j in (n - 1)..size {
                    z = h[n - 1][j];
                    h[n - 1][j] = q * z + p * h[n][j];
                    h[n][j] = q * h[n][j] - p * z;
                }
                for i in 0..=n {
                    z = h[i][n - 1];
                    h[i][n - 1] = q * z + p * h[i][n];
                    h[i][n] = q * h[i][n] - p * z;
                }
                for i in 0..size {
                    z = v[i][n - 1];
                    v[i][n - 1] = q * z + p * v[i][n];
                    v[i][n] = q * v[i][n] - p * z;
                }
            } else {
                d[n - 1] = x + p;
                d[n] = x + p;
                e[n - 1] = z;
                e[n] = -z;
            }
            remaining -= 2;
            iter = 0;
        } else {
            if iter >= config.max_iterations {
                // Report the current diagonal as the best estimate
                for i in 0..=n {
                    d[i] = h[i][i] + exshift;
                    e[i] = zero;
                }
                converged = false;
                break;
            }

            // Form shift
            x = h[n][n];
            y = h[n - 1][n - 1];
            w = h[n][n - 1] * h[n - 1][n];

            // Exceptional shifts
            if iter == 10 {
                exshift += x;
                for i in 0..=n {
                    h[i][i] -= x;
                }
                s = h[n][n - 1].abs() + h[n - 1][n - 2].abs();
                x = T::from_f64(0.75) * s;
                y = x;
                w = T::from_f64(-0.4375) * s * s;
            }
            if iter == 30 {
                s = (y - x) / two;
                s = s * s + w;
                if s > zero {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / two + s);
                    for i in 0..=n {
                        h[i][i] -= s;
                    }
                    exshift += s;
                    x = T::from_f64(0.964);
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            total += 1;

            // Look for two consecutive small sub-diagonal elements
            let mut m = n - 2;
            loop {
                z = h[m][m];
                r = x - z;
                s = y - z;
                p = (r * s - w) / h[m + 1][m] + h[m][m + 1];
                q = h[m + 1][m + 1] - z - r - s;
                r = h[m + 2][m + 1];
                s = p.abs() + q.abs() + r.abs();
                p /= s;
                q /= s;
                r /= s;
                if m == l {
                    break;
                }
                let lhs = h[m][m - 1].abs() * (q.abs() + r.abs());
                let rhs = eps * (p.abs() * (h[m - 1][m - 1].abs() + z.abs() + h[m + 1][m + 1].abs()));
                if lhs < rhs {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=n {
                h[i][i - 2] = zero;
                if i > m + 2 {
                    h[i][i - 3] = zero;
                }
            }

            // Double QR step on rows l..=n and columns m..=n
            for k in m..n {
                let notlast = k + 1 != n;
                if k != m {
                    p = h[k][k - 1];
                    q = h[k + 1][k - 1];
                    r = if notlast { h[k + 2][k - 1] } else { zero };
                    x = p.abs() + q.abs() + r.abs();
                    if x == zero {
                        continue;
                    }
                    p /= x;
                    q /= x;
                    r /= x;
                }

                s = (p * p + q * q + r * r).sqrt();
                if p < zero {
                    s = -s;
                }
                if s == zero {
                    continue;
                }

                if k != m {
                    h[k][k - 1] = -s * x;
                } else if l != m {
                    h[k][k - 1] = -h[k][k - 1];
                }
                p += s;
                x = p / s;
                y = q / s;
                z = r / s;
                q /= p;
                r /= p;

                // Row modification
                for j in k..size {
                    p = h[k][j] + q * h[k + 1][j];
                    if notlast {
                        p += r * h[k + 2][j];
                        h[k + 2][j] = h[k + 2][j] - p * z;
                    }
                    h[k][j] = h[k][j] - p * x;
                    h[k + 1][j] = h[k + 1][j] - p * y;
                }

                // Column modification
                for i in 0..=n.min(k + 3) {
                    p = x * h[i][k] + y * h[i][k + 1];
                    if notlast {
                        p += z * h[i][k + 2];
                        h[i][k + 2] = h[i][k + 2] - p * r;
                    }
                    h[i][k] = h[i][k] - p;
                    h[i][k + 1] = h[i][k + 1] - p * q;
                }

                // Accumulate transformations
                for i in 0..size {
                    p = x * v[i][k] + y * v[i][k + 1];
                    if notlast {
                        p += z * v[i][k + 2];
                        v[i][k + 2] = v[i][k + 2] - p * r;
                    }
                    v[i][k] = v[i][k] - p;
                    v[i][k + 1] = v[i][k + 1] - p * q;
                }
            }
        }
    }

    if norm == zero {
        return (converged, total);
    }

    back_substitute(h, d, e, norm);

    // Back transformation to eigenvectors of the original matrix
    for j in (0..size).rev() {
        for i in 0..size {
            let mut acc = zero;
            for k in 0..=j {
                acc += v[i][k] * h[k][j];
            }
            v[i][j] = acc;
        }
    }

    (converged, total)
}

/// Solve for the eigenvectors of the quasi-triangular Schur form in place.
fn back_substitute<T: Real>(h: &mut Matrix<T>, d: &[T], e: &[T], norm: T) {
    let size = h.nrows();
    let zero = T::zero();
    let eps = T::epsilon();
    let two = T::one() + T::one();

    for n in (0..size).rev() {
        let p = d[n];
        let q = e[n];

        if q == zero {
            // Real vector
            let mut l = n;
            let (mut z, mut s) = (zero, zero);
            h[n][n] = T::one();
            for i in (0..n).rev() {
                let w = h[i][i] - p;
                let mut r = zero;
                for j in l..=n {
                    r += h[i][j] * h[j][n];
                }
                if e[i] < zero {
                    z = w;
                    s = r;
                    continue;
                }

                l = i;
                if e[i] == zero {
                    h[i][n] = if w != zero { -r / w } else { -r / (eps * norm) };
                } else {
                    // Solve real equations
                    let x = h[i][i + 1];
                    let y = h[i + 1][i];
                    let qq = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                    let t = (x * s - z * r) / qq;
                    h[i][n] = t;
                    h[i + 1][n] = if x.abs() > z.abs() {
                        (-r - w * t) / x
                    } else {
                        (-s - y * t) / z
                    };
                }

                // Overflow control
                let t = h[i][n].abs();
                if (eps * t) * t > T::one() {
                    for j in i..=n {
                        h[j][n] = h[j][n] / t;
                    }
                }
            }
        } else if q < zero {
            // Complex vector; the last component is chosen imaginary
            let mut l = n - 1;
            let (mut z, mut r, mut s) = (zero, zero, zero);

            if h[n][n - 1].abs() > h[n - 1][n].abs() {
                h[n - 1][n - 1] = q / h[n][n - 1];
                h[n - 1][n] = -(h[n][n] - p) / h[n][n - 1];
            } else {
                let (cr, ci) = cdiv(zero, -h[n - 1][n], h[n - 1][n - 1] - p, q);
                h[n - 1][n - 1] = cr;
                h[n - 1][n] = ci;
            }
            h[n][n - 1] = zero;
            h[n][n] = T::one();

            for i in (0..n - 1).rev() {
                let mut ra = zero;
                let mut sa = zero;
                for j in l..=n {
                    ra += h[i][j] * h[j][n - 1];
                    sa += h[i][j] * h[j][n];
                }
                let w = h[i][i] - p;

                if e[i] < zero {
                    z = w;
                    r = ra;
                    s = sa;
                    continue;
                }

                l = i;
                if e[i] == zero {
                    let (cr, ci) = cdiv(-ra, -sa, w, q);
                    h[i][n - 1] = cr;
                    h[i][n] = ci;
                } else {
                    // Solve complex equations
                    let x = h[i][i + 1];
                    let y = h[i + 1][i];
                    let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                    let vi = (d[i] - p) * two * q;
                    if vr == zero && vi == zero {
                        vr = eps * norm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                    }
                    let (cr, ci) = cdiv(x * r - z * ra + q * sa, x * s - z * sa - q * ra, vr, vi);
                    h[i][n - 1] = cr;
                    h[i][n] = ci;
                    if x.abs() > z.abs() + q.abs() {
                        h[i + 1][n - 1] = (-ra - w * h[i][n - 1] + q * h[i][n]) / x;
                        h[i + 1][n] = (-sa - w * h[i][n] - q * h[i][n - 1]) / x;
                    } else {
                        let (cr, ci) = cdiv(-r - y * h[i][n - 1], -s - y * h[i][n], z, q);
                        h[i + 1][n - 1] = cr;
                        h[i + 1][n] = ci;
                    }
                }

                // Overflow control
                let t = h[i][n - 1].abs().max(h[i][n].abs());
                if (eps * t) * t > T::one() {
                    for j in i..=n {
                        h[j][n - 1] = h[j][n - 1] / t;
                        h[j][n] = h[j][n] / t;
                    }
                }
            }
        }
    }
}
