//! Singular value decomposition of 3x3 matrices.
//!
//! Householder reduction to bidiagonal form followed by implicit-shift QR
//! sweeps on the bidiagonal, with every loop bound fixed at 3.

use spatia_math::{Mat3, Vec3};

use crate::error::{Result, SvdError};
use crate::settings::SvdSettings;

const N: usize = 3;

/// Result of [`Svd3Solver::decompose`]: `m = u * diag(w) * v^T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd3 {
    /// Left singular vectors, one per column.
    pub u: Mat3,
    /// Singular values, non-negative, in no particular order.
    pub w: Vec3,
    /// Right singular vectors, one per column.
    pub v: Mat3,
}

impl Svd3 {
    /// Rebuild the decomposed matrix.
    pub fn reconstruct(&self) -> Mat3 {
        self.u * Mat3::from_diagonal(&self.w) * self.v.transpose()
    }

    /// Index of the smallest singular value.
    pub fn smallest(&self) -> usize {
        self.w.imin()
    }
}

/// 3x3 SVD solver with reusable scratch buffers.
///
/// Calls take `&mut self`, so one solver serves one caller at a time. Create
/// a solver per thread for concurrent use.
#[derive(Debug, Clone, Default)]
pub struct Svd3Solver {
    rv1: [f64; N],
    w: [f64; N],
    v: [[f64; N]; N],
}

impl Svd3Solver {
    /// Solver with zeroed scratch state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose `m`, returning the factors by value.
    pub fn decompose(&mut self, m: &Mat3, settings: &SvdSettings) -> Result<Svd3> {
        settings.validate()?;
        let mut a = [0.0; 9];
        for r in 0..N {
            for c in 0..N {
                a[r * N + c] = m[(r, c)];
            }
        }
        let mut u = Mat3::zeros();
        let mut v = Mat3::zeros();
        let w = self.svd(&mut a, settings.max_iterations, &mut u, &mut v)?;
        Ok(Svd3 { u, w, v })
    }

    /// Decompose the row-major matrix in `a` in place.
    ///
    /// On success `a` holds U (row-major), `u` and `v` receive U and V, and
    /// the singular values are returned. Each singular value may take at
    /// most `max_iterations` QR sweeps; running out is an error and leaves
    /// the outputs unspecified.
    pub fn svd(
        &mut self,
        a: &mut [f64; 9],
        max_iterations: u32,
        u: &mut Mat3,
        v: &mut Mat3,
    ) -> Result<Vec3> {
        let mut m = [[0.0; N]; N];
        for r in 0..N {
            m[r].copy_from_slice(&a[r * N..r * N + N]);
        }

        let anorm = self.bidiagonalize(&mut m);
        self.accumulate_right(&m);
        accumulate_left(&mut m, &self.w);
        self.diagonalize(&mut m, anorm, max_iterations)?;

        for r in 0..N {
            a[r * N..r * N + N].copy_from_slice(&m[r]);
            for c in 0..N {
                u[(r, c)] = m[r][c];
                v[(r, c)] = self.v[r][c];
            }
        }
        Ok(Vec3::from(self.w))
    }

    /// Householder reduction; the diagonal lands in `w`, the superdiagonal
    /// in `rv1[1..]`. Returns the norm used for negligibility tests.
    fn bidiagonalize(&mut self, a: &mut [[f64; N]; N]) -> f64 {
        let (mut g, mut scale, mut anorm) = (0.0_f64, 0.0_f64, 0.0_f64);
        for i in 0..N {
            let l = i + 1;
            self.rv1[i] = scale * g;
            g = 0.0;
            scale = 0.0;

            // Column i below the diagonal.
            for row in &a[i..] {
                scale += row[i].abs();
            }
            if scale != 0.0 {
                let mut s = 0.0;
                for row in &mut a[i..] {
                    row[i] /= scale;
                    s += row[i] * row[i];
                }
                let f = a[i][i];
                g = -with_sign(s.sqrt(), f);
                let h = f * g - s;
                a[i][i] = f - g;
                for j in l..N {
                    let s: f64 = a[i..].iter().map(|row| row[i] * row[j]).sum();
                    let f = s / h;
                    for row in &mut a[i..] {
                        row[j] += f * row[i];
                    }
                }
                for row in &mut a[i..] {
                    row[i] *= scale;
                }
            }
            self.w[i] = scale * g;

            // Row i right of the superdiagonal.
            g = 0.0;
            scale = 0.0;
            if i != N - 1 {
                scale = a[i][l..].iter().map(|x| x.abs()).sum();
                if scale != 0.0 {
                    let mut s = 0.0;
                    for x in &mut a[i][l..] {
                        *x /= scale;
                        s += *x * *x;
                    }
                    let f = a[i][l];
                    g = -with_sign(s.sqrt(), f);
                    let h = f * g - s;
                    a[i][l] = f - g;
                    for k in l..N {
                        self.rv1[k] = a[i][k] / h;
                    }
                    for j in l..N {
                        let s: f64 = (l..N).map(|k| a[j][k] * a[i][k]).sum();
                        for k in l..N {
                            a[j][k] += s * self.rv1[k];
                        }
                    }
                    for x in &mut a[i][l..] {
                        *x *= scale;
                    }
                }
            }
            anorm = anorm.max(self.w[i].abs() + self.rv1[i].abs());
        }
        anorm
    }

    /// Build V from the stored row reflectors.
    fn accumulate_right(&mut self, a: &[[f64; N]; N]) {
        let v = &mut self.v;
        let mut g = 0.0;
        let mut l = N;
        for i in (0..N).rev() {
            if i < N - 1 {
                if g != 0.0 {
                    // Double division avoids possible underflow.
                    for j in l..N {
                        v[j][i] = (a[i][j] / a[i][l]) / g;
                    }
                    for j in l..N {
                        let s: f64 = (l..N).map(|k| a[i][k] * v[k][j]).sum();
                        for k in l..N {
                            v[k][j] += s * v[k][i];
                        }
                    }
                }
                for j in l..N {
                    v[i][j] = 0.0;
                    v[j][i] = 0.0;
                }
            }
            v[i][i] = 1.0;
            g = self.rv1[i];
            l = i;
        }
    }

    /// Implicit-shift QR on the bidiagonal until every superdiagonal entry
    /// is negligible.
    fn diagonalize(
        &mut self,
        a: &mut [[f64; N]; N],
        anorm: f64,
        max_iterations: u32,
    ) -> Result<()> {
        let negligible = |x: f64| x.abs() + anorm == anorm;

        for k in (0..N).rev() {
            let mut its = 0;
            loop {
                its += 1;

                // Find the start of the unreduced block ending at k. rv1[0]
                // is always zero, so the scan stops by l = 0.
                let mut l = k;
                let mut cancel = true;
                loop {
                    if l == 0 || negligible(self.rv1[l]) {
                        cancel = false;
                        break;
                    }
                    if negligible(self.w[l - 1]) {
                        break;
                    }
                    l -= 1;
                }

                if cancel {
                    // w[l - 1] is negligible: chase rv1[l] out with Givens
                    // rotations from the left.
                    let nm = l - 1;
                    let (mut c, mut s) = (0.0, 1.0);
                    for i in l..=k {
                        let f = s * self.rv1[i];
                        self.rv1[i] *= c;
                        if negligible(f) {
                            break;
                        }
                        let g = self.w[i];
                        let h = f.hypot(g);
                        self.w[i] = h;
                        c = g / h;
                        s = -f / h;
                        for row in a.iter_mut() {
                            let (y, z) = (row[nm], row[i]);
                            row[nm] = y * c + z * s;
                            row[i] = z * c - y * s;
                        }
                    }
                }

                let z = self.w[k];
                if l == k {
                    if z < 0.0 {
                        self.w[k] = -z;
                        for row in &mut self.v {
                            row[k] = -row[k];
                        }
                    }
                    break;
                }

                if its >= max_iterations {
                    tracing::warn!(max_iterations, index = k, "svd did not converge");
                    return Err(SvdError::NonConvergence { max_iterations });
                }

                self.qr_sweep(a, l, k);
            }
        }
        Ok(())
    }

    /// One implicit-shift QR step on the block `l..=k`, shifting by the
    /// eigenvalue of the trailing 2x2 minor closer to `w[k]`.
    fn qr_sweep(&mut self, a: &mut [[f64; N]; N], l: usize, k: usize) {
        let nm = k - 1;
        let mut x = self.w[l];
        let z = self.w[k];
        let y = self.w[nm];
        let g = self.rv1[nm];
        let h = self.rv1[k];
        let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (2.0 * h * y);
        let g = f.hypot(1.0);
        f = ((x - z) * (x + z) + h * ((y / (f + with_sign(g, f))) - h)) / x;

        let (mut c, mut s) = (1.0, 1.0);
        for j in l..=nm {
            let i = j + 1;
            let mut g = self.rv1[i];
            let mut y = self.w[i];
            let mut h = s * g;
            g *= c;
            let mut z = f.hypot(h);
            self.rv1[j] = z;
            c = f / z;
            s = h / z;
            f = x * c + g * s;
            g = g * c - x * s;
            h = y * s;
            y *= c;
            for row in &mut self.v {
                let (x, z) = (row[j], row[i]);
                row[j] = x * c + z * s;
                row[i] = z * c - x * s;
            }

            z = f.hypot(h);
            self.w[j] = z;
            // Rotation is arbitrary if z is zero.
            if z != 0.0 {
                c = f / z;
                s = h / z;
            }
            f = c * g + s * y;
            x = c * y - s * g;
            for row in a.iter_mut() {
                let (y, z) = (row[j], row[i]);
                row[j] = y * c + z * s;
                row[i] = z * c - y * s;
            }
        }
        self.rv1[l] = 0.0;
        self.rv1[k] = f;
        self.w[k] = x;
    }
}

/// Overwrite `a` with U from the stored column reflectors.
fn accumulate_left(a: &mut [[f64; N]; N], w: &[f64; N]) {
    for i in (0..N).rev() {
        let l = i + 1;
        let g = w[i];
        for x in &mut a[i][l..] {
            *x = 0.0;
        }
        if g != 0.0 {
            let g = 1.0 / g;
            for j in l..N {
                let s: f64 = a[l..].iter().map(|row| row[i] * row[j]).sum();
                let f = (s / a[i][i]) * g;
                for row in &mut a[i..] {
                    row[j] += f * row[i];
                }
            }
            for row in &mut a[i..] {
                row[i] *= g;
            }
        } else {
            for row in &mut a[i..] {
                row[i] = 0.0;
            }
        }
        a[i][i] += 1.0;
    }
}

/// `|a|` with the sign of `b`.
fn with_sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 {
        a.abs()
    } else {
        -a.abs()
    }
}
