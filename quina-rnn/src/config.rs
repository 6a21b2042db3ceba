use serde::{Deserialize, Serialize};

/// Família de célula recorrente usada pelo modelo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Lstm,
    Gru,
}

impl CellKind {
    /// Quantidade de portas da célula (blocos de pesos).
    pub fn gate_count(&self) -> usize {
        match self {
            CellKind::Lstm => 4, // entrada, esquecimento, candidato, saída
            CellKind::Gru => 3,  // atualização, reinício, candidato
        }
    }

    /// Nome do arquivo de artefato treinado correspondente.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            CellKind::Lstm => "quina_cerebro_lstm.json",
            CellKind::Gru => "quina_cerebro_gru.json",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::Lstm => write!(f, "LSTM"),
            CellKind::Gru => write!(f, "GRU"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RnnConfig {
    pub cell: CellKind,
    pub state_size: usize,
    pub spectral_radius: f64,
    pub sparsity: f64,
    pub leak_rate: f64,
    pub ridge_lambda: f64,
    pub input_scaling: f64,
    pub noise_amplitude: f64,
    pub seed: u64,
}

impl Default for RnnConfig {
    fn default() -> Self {
        Self {
            cell: CellKind::Lstm,
            state_size: 128,
            spectral_radius: 0.95,
            sparsity: 0.9,
            leak_rate: 1.0,
            ridge_lambda: 1e-3,
            input_scaling: 0.1,
            noise_amplitude: 1e-4,
            seed: 42,
        }
    }
}

impl RnnConfig {
    pub fn with_cell(cell: CellKind) -> Self {
        Self { cell, ..Self::default() }
    }
}

/// Resultado da avaliação de um treino.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub config: RnnConfig,
    pub train_windows: usize,
    pub val_windows: usize,
    /// Fração média das dezenas sorteadas presentes no top-5 previsto.
    pub val_hit_rate: f64,
    /// Mesma métrica para um palpite uniforme (5/80).
    pub baseline_hit_rate: f64,
    pub train_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSearchResults {
    pub results: Vec<TrainReport>,
    pub best_config: RnnConfig,
}
