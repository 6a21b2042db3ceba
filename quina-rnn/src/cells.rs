use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2};
use rand::distr::Uniform;
use rand::Rng;
use sprs::CsMat;

use crate::config::{CellKind, RnnConfig};

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Célula recorrente de pesos fixos. As portas usam projeções aleatórias
/// (densas na entrada, esparsas na recorrência, reescaladas para o raio
/// espectral alvo); só a leitura linear sobre o estado é treinada.
#[derive(Debug)]
pub struct GatedCell {
    pub kind: CellKind,
    /// Uma matriz densa [estado, entrada] por porta.
    pub w_in: Vec<Array2<f64>>,
    /// Uma matriz esparsa [estado, estado] por porta.
    pub w_rec: Vec<CsMat<f64>>,
    pub h: Array1<f64>,
    /// Memória de longo prazo, usada apenas pela LSTM.
    pub c: Array1<f64>,
    buf_in: Vec<Array1<f64>>,
    buf_rec: Vec<Array1<f64>>,
    pub leak_rate: f64,
    pub noise_amplitude: f64,
}

impl GatedCell {
    pub fn new(config: &RnnConfig, input_dim: usize, rng: &mut impl Rng) -> Self {
        let n = config.state_size;
        let gates = config.cell.gate_count();

        // W_in: densa, Uniform[-input_scaling, +input_scaling]
        let dist_in = Uniform::new(-config.input_scaling, config.input_scaling).unwrap();
        // W_rec: esparsa (fração `sparsity` de zeros), não-zeros Uniform[-1, 1]
        let dist_rec = Uniform::new(-1.0, 1.0).unwrap();

        let mut w_in = Vec::with_capacity(gates);
        let mut w_rec = Vec::with_capacity(gates);
        for _ in 0..gates {
            w_in.push(Array2::from_shape_fn((n, input_dim), |_| rng.sample(dist_in)));

            let mut dense = Array2::from_shape_fn((n, n), |_| {
                if rng.random::<f64>() < config.sparsity {
                    0.0
                } else {
                    rng.sample(dist_rec)
                }
            });

            // Reescala cada bloco recorrente para o raio espectral alvo
            let rho = power_iteration(&dense, rng);
            if rho > 1e-10 {
                dense.mapv_inplace(|x| x * config.spectral_radius / rho);
            }

            w_rec.push(csr_from_dense(&dense));
        }

        GatedCell {
            kind: config.cell,
            w_in,
            w_rec,
            h: Array1::zeros(n),
            c: Array1::zeros(n),
            buf_in: (0..gates).map(|_| Array1::zeros(n)).collect(),
            buf_rec: (0..gates).map(|_| Array1::zeros(n)).collect(),
            leak_rate: config.leak_rate,
            noise_amplitude: config.noise_amplitude,
        }
    }

    pub fn state_size(&self) -> usize {
        self.h.len()
    }

    /// Um passo da célula. Reutiliza os buffers pré-alocados por porta.
    pub fn step(&mut self, input: &Array1<f64>, rng: &mut impl Rng) {
        let gates = self.kind.gate_count();
        for g in 0..gates {
            general_mat_vec_mul(1.0, &self.w_in[g], input, 0.0, &mut self.buf_in[g]);
            self.buf_rec[g].fill(0.0);
            for (row, row_vec) in self.w_rec[g].outer_iterator().enumerate() {
                for (col, &val) in row_vec.iter() {
                    self.buf_rec[g][row] += val * self.h[col];
                }
            }
        }

        let a = self.leak_rate;
        match self.kind {
            CellKind::Lstm => {
                // portas: 0=entrada, 1=esquecimento, 2=candidato, 3=saída.
                // Viés fixo +1 na porta de esquecimento.
                for idx in 0..self.h.len() {
                    let i = sigmoid(self.buf_in[0][idx] + self.buf_rec[0][idx]);
                    let f = sigmoid(self.buf_in[1][idx] + self.buf_rec[1][idx] + 1.0);
                    let g = (self.buf_in[2][idx] + self.buf_rec[2][idx]).tanh();
                    let o = sigmoid(self.buf_in[3][idx] + self.buf_rec[3][idx]);
                    self.c[idx] = f * self.c[idx] + i * g;
                    let h_cell = o * self.c[idx].tanh();
                    self.h[idx] = self.h[idx] * (1.0 - a) + h_cell * a;
                }
            }
            CellKind::Gru => {
                // portas: 0=atualização, 1=reinício, 2=candidato.
                // O reinício modula só a parte recorrente do candidato.
                for idx in 0..self.h.len() {
                    let z = sigmoid(self.buf_in[0][idx] + self.buf_rec[0][idx]);
                    let r = sigmoid(self.buf_in[1][idx] + self.buf_rec[1][idx]);
                    let n = (self.buf_in[2][idx] + r * self.buf_rec[2][idx]).tanh();
                    let h_cell = (1.0 - z) * n + z * self.h[idx];
                    self.h[idx] = self.h[idx] * (1.0 - a) + h_cell * a;
                }
            }
        }

        if self.noise_amplitude > 0.0 {
            let noise = Uniform::new(-self.noise_amplitude, self.noise_amplitude).unwrap();
            for v in self.h.iter_mut() {
                *v += rng.sample(noise);
            }
        }
    }

    /// Roda a célula sobre uma janela inteira a partir do estado zerado e
    /// devolve o estado final.
    pub fn run_window(&mut self, inputs: &[Array1<f64>], rng: &mut impl Rng) -> Array1<f64> {
        self.reset_state();
        for input in inputs {
            self.step(input, rng);
        }
        self.h.clone()
    }

    pub fn reset_state(&mut self) {
        self.h.fill(0.0);
        self.c.fill(0.0);
    }
}

/// Converte um bloco denso já esparso em conteúdo para CSR.
fn csr_from_dense(dense: &Array2<f64>) -> CsMat<f64> {
    let mut tri = sprs::TriMat::new(dense.dim());
    for ((i, j), &v) in dense.indexed_iter() {
        if v != 0.0 {
            tri.add_triplet(i, j, v);
        }
    }
    tri.to_csr()
}

/// Estima o raio espectral de uma matriz por iteração de potência, partindo
/// de um vetor aleatório e iterando até a estimativa estabilizar.
pub fn power_iteration(w: &Array2<f64>, rng: &mut impl Rng) -> f64 {
    if w.nrows() == 0 {
        return 0.0;
    }

    let dist = Uniform::new(-1.0, 1.0).unwrap();
    let mut v: Array1<f64> = Array1::from_shape_fn(w.nrows(), |_| rng.sample(dist));
    let norm = v.dot(&v).sqrt();
    if norm < 1e-15 {
        return 0.0;
    }
    v /= norm;

    let mut estimate = 0.0;
    for _ in 0..200 {
        let wv: Array1<f64> = w.dot(&v);
        let wv_norm = wv.dot(&wv).sqrt();
        if wv_norm < 1e-15 {
            return 0.0;
        }
        v = wv / wv_norm;

        if (wv_norm - estimate).abs() < 1e-10 {
            return wv_norm;
        }
        estimate = wv_norm;
    }

    estimate
}

#[cfg(test)]
fn w_rec_dense(sparse: &CsMat<f64>) -> Array2<f64> {
    let (rows, cols) = sparse.shape();
    let mut dense = Array2::zeros((rows, cols));
    for (row, row_vec) in sparse.outer_iterator().enumerate() {
        for (col, &val) in row_vec.iter() {
            dense[[row, col]] = val;
        }
    }
    dense
}
