use std::ops::Range;
use std::time::Instant;

use anyhow::{bail, Result};
use ndarray::{s, Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quina_data::config::GameRules;
use quina_data::models::{Draw, DRAW_SIZE, UNIVERSE_SIZE, WINDOW_SIZE};

use crate::cells::{sigmoid, GatedCell};
use crate::config::{RnnConfig, TrainReport};
use crate::encoding::{encode_draw, encode_history, encode_target, INPUT_DIM};
use crate::linalg::ridge_regression;
use crate::metrics;

/// Mínimo de concursos para conseguir montar janelas de treino e validação.
pub const MIN_TRAIN_DRAWS: usize = WINDOW_SIZE + 10;

#[derive(Debug)]
pub struct TrainedModel {
    pub config: RnnConfig,
    pub cell: GatedCell,
    /// Leitura linear [80, state_size + entrada].
    pub w_out: Array2<f64>,
}

/// Divisão cronológica das janelas supervisionadas: 80% mais antigas para
/// treino, cauda recente para validação.
pub struct DataSplit {
    pub train: Range<usize>,
    pub val: Range<usize>,
}

impl DataSplit {
    pub fn new(n: usize) -> Result<Self> {
        if n < 10 {
            bail!("Necessário ao menos 10 janelas, há {n}");
        }
        let train_end = (n as f64 * 0.80) as usize;
        if train_end < 3 || train_end >= n {
            bail!("Divisão inviável para {n} janelas");
        }
        Ok(DataSplit {
            train: 0..train_end,
            val: train_end..n,
        })
    }
}

/// Treina a leitura linear da célula sobre janelas de WINDOW_SIZE concursos e
/// avalia a cauda de validação. O histórico vem em ordem cronológica (mais
/// antigo primeiro); a janela w tem como alvo o concurso w + WINDOW_SIZE.
pub fn train_and_evaluate(
    draws: &[Draw],
    config: &RnnConfig,
    rules: &GameRules,
) -> Result<(TrainedModel, TrainReport)> {
    let start = Instant::now();
    let n = draws.len();
    if n < MIN_TRAIN_DRAWS {
        bail!(
            "Histórico insuficiente: {} concursos, mínimo {} para treinar",
            n,
            MIN_TRAIN_DRAWS
        );
    }

    let n_windows = n - WINDOW_SIZE;
    let split = DataSplit::new(n_windows)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let state_dim = config.state_size + INPUT_DIM;

    let encoded = encode_history(draws, rules);
    let mut cell = GatedCell::new(config, INPUT_DIM, &mut rng);

    // H: [state_dim, T], colunas = concat(estado final da janela, última entrada)
    let t_train = split.train.len();
    let mut h_mat = Array2::zeros((state_dim, t_train));
    let mut y_mat = Array2::zeros((UNIVERSE_SIZE, t_train));

    for (col, w) in split.train.clone().enumerate() {
        let t = w + WINDOW_SIZE;
        let state = cell.run_window(&encoded[w..t], &mut rng);
        h_mat.slice_mut(s![..config.state_size, col]).assign(&state);
        h_mat
            .slice_mut(s![config.state_size.., col])
            .assign(&encoded[t - 1]);
        y_mat.column_mut(col).assign(&encode_target(&draws[t]));
    }

    let w_out = ridge_regression(&h_mat, &y_mat, config.ridge_lambda)?;

    let mut model = TrainedModel {
        config: config.clone(),
        cell,
        w_out,
    };

    let val_hit_rate = evaluate_windows(&mut model, draws, &encoded, &split.val);

    let report = TrainReport {
        config: config.clone(),
        train_windows: t_train,
        val_windows: split.val.len(),
        val_hit_rate,
        baseline_hit_rate: metrics::uniform_hit_rate(DRAW_SIZE),
        train_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok((model, report))
}

fn evaluate_windows(
    model: &mut TrainedModel,
    draws: &[Draw],
    encoded: &[Array1<f64>],
    range: &Range<usize>,
) -> f64 {
    let mut rng = StdRng::seed_from_u64(model.config.seed);
    let mut predictions = Vec::new();
    let mut actuals: Vec<&Draw> = Vec::new();

    for w in range.clone() {
        let t = w + WINDOW_SIZE;
        let scores = model.score_window(&encoded[w..t], &mut rng);
        predictions.push(scores);
        actuals.push(&draws[t]);
    }

    metrics::hit_rate(&predictions, &actuals, DRAW_SIZE)
}

impl TrainedModel {
    pub fn state_dim(&self) -> usize {
        self.cell.state_size() + INPUT_DIM
    }

    /// Pontua uma janela já codificada: sigmoide da leitura linear sobre o
    /// estado final estendido com a última entrada. Saída em [0,1] por dezena,
    /// sem normalizar para distribuição.
    pub fn score_window(&mut self, window: &[Array1<f64>], rng: &mut impl Rng) -> Array1<f64> {
        let last = match window.last() {
            Some(last) => last,
            None => {
                return Array1::from_elem(UNIVERSE_SIZE, DRAW_SIZE as f64 / UNIVERSE_SIZE as f64)
            }
        };
        let state = self.cell.run_window(window, rng);
        let ss = self.cell.state_size();
        let mut extended = Array1::zeros(self.state_dim());
        extended.slice_mut(s![..ss]).assign(&state);
        extended.slice_mut(s![ss..]).assign(last);

        let logits = self.w_out.dot(&extended);
        logits.mapv(sigmoid)
    }

    /// Pontua o próximo concurso a partir dos WINDOW_SIZE mais recentes.
    pub fn predict_scores(&mut self, draws: &[Draw], rules: &GameRules) -> Result<Array1<f64>> {
        if draws.len() < WINDOW_SIZE {
            bail!(
                "Histórico insuficiente: {} concursos, a janela exige {}",
                draws.len(),
                WINDOW_SIZE
            );
        }
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let start = draws.len() - WINDOW_SIZE;
        let window: Vec<Array1<f64>> = (start..draws.len())
            .map(|i| {
                let previous = if i > 0 { Some(&draws[i - 1]) } else { None };
                encode_draw(&draws[i], previous, rules)
            })
            .collect();
        Ok(self.score_window(&window, &mut rng))
    }
}

/// Histórico sintético determinista para testes.
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 15) as u8;
            let numbers = vec![
                base * 5 + 1,
                base * 5 + 2,
                base * 5 + 3,
                base * 5 + 4,
                base * 5 + 5,
            ];
            Draw::new(format!("{:04}", i + 1), format!("2024-01-{:02}", (i % 28) + 1), numbers)
                .unwrap()
        })
        .collect()
}
