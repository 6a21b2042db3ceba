pub mod recurrent;

use anyhow::Result;

use quina_data::config::GameRules;
use quina_data::models::{Draw, UNIVERSE_SIZE};

/// Fronteira opaca dos modelos: recebe o histórico em ordem cronológica e
/// devolve um score em [0,1] por dezena (índice 0 = dezena 1). O pipeline
/// combinatório só conhece este contrato.
pub trait Oracle {
    fn name(&self) -> &str;
    fn predict(&mut self, draws: &[Draw], rules: &GameRules) -> Result<Vec<f64>>;
}

/// Vetor de scores bem formado: 80 entradas finitas em [0,1].
pub fn validate_scores(scores: &[f64]) -> bool {
    scores.len() == UNIVERSE_SIZE
        && scores.iter().all(|&s| s.is_finite() && (0.0..=1.0).contains(&s))
}

/// Oráculo de testes que devolve sempre o mesmo vetor.
pub struct FixtureOracle {
    pub name: String,
    pub scores: Vec<f64>,
}

impl FixtureOracle {
    pub fn new(name: &str, scores: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            scores,
        }
    }
}

impl Oracle for FixtureOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&mut self, _draws: &[Draw], _rules: &GameRules) -> Result<Vec<f64>> {
        Ok(self.scores.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scores_ok() {
        assert!(validate_scores(&vec![0.5; UNIVERSE_SIZE]));
        assert!(validate_scores(&vec![0.0; UNIVERSE_SIZE]));
        assert!(validate_scores(&vec![1.0; UNIVERSE_SIZE]));
    }

    #[test]
    fn test_validate_scores_wrong_length() {
        assert!(!validate_scores(&vec![0.5; UNIVERSE_SIZE - 1]));
        assert!(!validate_scores(&[]));
    }

    #[test]
    fn test_validate_scores_out_of_range() {
        let mut scores = vec![0.5; UNIVERSE_SIZE];
        scores[10] = 1.5;
        assert!(!validate_scores(&scores));
        scores[10] = -0.1;
        assert!(!validate_scores(&scores));
        scores[10] = f64::NAN;
        assert!(!validate_scores(&scores));
    }

    #[test]
    fn test_fixture_oracle_returns_scores() {
        let mut oracle = FixtureOracle::new("fixo", vec![0.25; UNIVERSE_SIZE]);
        let scores = oracle.predict(&[], &GameRules::default()).unwrap();
        assert_eq!(scores, vec![0.25; UNIVERSE_SIZE]);
        assert_eq!(oracle.name(), "fixo");
    }
}
