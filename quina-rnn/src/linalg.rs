use anyhow::{bail, Result};
use faer::prelude::Solve;
use faer::{Mat, Side};
use ndarray::Array2;

fn to_faer(arr: &Array2<f64>) -> Mat<f64> {
    Mat::from_fn(arr.nrows(), arr.ncols(), |i, j| arr[[i, j]])
}

fn from_faer(mat: &Mat<f64>) -> Array2<f64> {
    Array2::from_shape_fn((mat.nrows(), mat.ncols()), |(i, j)| mat[(i, j)])
}

/// Resolve (M + lambda I) X = B por Cholesky, com M simétrica semidefinida.
/// O deslocamento lambda na diagonal é aplicado aqui.
fn solve_shifted(mut m: Array2<f64>, lambda: f64, b: &Array2<f64>) -> Result<Array2<f64>> {
    let n = m.nrows();
    for i in 0..n {
        m[[i, i]] += lambda;
    }
    let llt = match to_faer(&m).llt(Side::Lower) {
        Ok(factor) => factor,
        Err(_) => bail!("Cholesky: matriz não é definida positiva"),
    };
    Ok(from_faer(&llt.solve(&to_faer(b))))
}

/// Regressão ridge da leitura linear:
/// W = Y * H^T * (H * H^T + lambda * I)^{-1}
///
/// - `h`: [state_dim, T], uma coluna por janela
/// - `y`: [output_dim, T]
/// - retorna W: [output_dim, state_dim]
///
/// Quando T < state_dim a forma dual (T×T, identidade push-through) sai mais
/// barata que a primal (d×d); a escolha é automática.
pub fn ridge_regression(h: &Array2<f64>, y: &Array2<f64>, lambda: f64) -> Result<Array2<f64>> {
    let d = h.nrows();
    let t = h.ncols();

    if t < d {
        // Dual: resolve (H^T H + lambda I_T) Z = Y^T e volta com W = (H Z)^T
        let z = solve_shifted(h.t().dot(h), lambda, &y.t().to_owned())?;
        Ok(h.dot(&z).t().to_owned())
    } else {
        // Primal: resolve (H H^T + lambda I_d) W^T = H Y^T
        let w_t = solve_shifted(h.dot(&h.t()), lambda, &h.dot(&y.t()))?;
        Ok(w_t.t().to_owned())
    }
}
