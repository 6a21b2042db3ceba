use ndarray::Array1;

use quina_data::config::GameRules;
use quina_data::features::{feature_vector, FEATURE_DIM};
use quina_data::models::{Draw, UNIVERSE_SIZE};

/// Dimensão de entrada: multi-hot das 80 dezenas seguido das 14 features.
pub const INPUT_DIM: usize = UNIVERSE_SIZE + FEATURE_DIM;

/// Codifica um concurso como vetor de entrada do modelo.
/// Os índices 0..80 carregam o multi-hot das dezenas sorteadas (índice n-1);
/// os índices 80..94 carregam o vetor de features do concurso.
pub fn encode_draw(draw: &Draw, previous: Option<&Draw>, rules: &GameRules) -> Array1<f64> {
    let mut v = Array1::zeros(INPUT_DIM);
    for &n in &draw.numbers {
        v[(n - 1) as usize] = 1.0;
    }
    for (i, x) in feature_vector(draw, previous, rules).into_iter().enumerate() {
        v[UNIVERSE_SIZE + i] = x;
    }
    v
}

/// Alvo multi-hot sobre as 80 dezenas.
pub fn encode_target(draw: &Draw) -> Array1<f64> {
    let mut v = Array1::zeros(UNIVERSE_SIZE);
    for &n in &draw.numbers {
        v[(n - 1) as usize] = 1.0;
    }
    v
}

/// Codifica o histórico inteiro em ordem cronológica, ligando cada concurso
/// ao anterior para a feature de repetidas.
pub fn encode_history(draws: &[Draw], rules: &GameRules) -> Vec<Array1<f64>> {
    draws
        .iter()
        .enumerate()
        .map(|(i, draw)| {
            let previous = if i > 0 { Some(&draws[i - 1]) } else { None };
            encode_draw(draw, previous, rules)
        })
        .collect()
}
