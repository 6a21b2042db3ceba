use anyhow::{bail, Result};

use quina_data::config::GameRules;
use quina_data::models::{Draw, UNIVERSE_SIZE};

use crate::oracle::{validate_scores, Oracle};

/// Combina os oráculos por média aritmética simples, como o consenso de dois
/// especialistas de mesmo peso.
pub struct OracleEnsemble {
    pub members: Vec<Box<dyn Oracle>>,
}

#[derive(Debug, Clone)]
pub struct EnsemblePrediction {
    /// Média dos membros, grampeada em [0,1].
    pub scores: Vec<f64>,
    pub member_scores: Vec<(String, Vec<f64>)>,
    /// Desvio padrão entre os membros, dezena a dezena.
    pub spread: Vec<f64>,
}

impl OracleEnsemble {
    pub fn new(members: Vec<Box<dyn Oracle>>) -> Self {
        Self { members }
    }

    pub fn predict(&mut self, draws: &[Draw], rules: &GameRules) -> Result<EnsemblePrediction> {
        if self.members.is_empty() {
            bail!("Conjunto sem oráculos");
        }

        let mut member_scores = Vec::new();
        let mut combined = vec![0.0f64; UNIVERSE_SIZE];

        for member in &mut self.members {
            let scores = member.predict(draws, rules)?;
            if !validate_scores(&scores) {
                bail!("Oráculo {} devolveu scores fora do contrato", member.name());
            }
            for j in 0..UNIVERSE_SIZE {
                combined[j] += scores[j];
            }
            member_scores.push((member.name().to_string(), scores));
        }

        let n = self.members.len() as f64;
        for s in &mut combined {
            *s = (*s / n).clamp(0.0, 1.0);
        }

        let spread = compute_spread(&member_scores, UNIVERSE_SIZE);

        Ok(EnsemblePrediction {
            scores: combined,
            member_scores,
            spread,
        })
    }
}

fn compute_spread(member_scores: &[(String, Vec<f64>)], size: usize) -> Vec<f64> {
    let n = member_scores.len() as f64;
    (0..size)
        .map(|j| {
            let mean = member_scores.iter().map(|(_, s)| s[j]).sum::<f64>() / n;
            let variance =
                member_scores.iter().map(|(_, s)| (s[j] - mean).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FixtureOracle;

    fn fixture(name: &str, value: f64) -> Box<dyn Oracle> {
        Box::new(FixtureOracle::new(name, vec![value; UNIVERSE_SIZE]))
    }

    #[test]
    fn test_predict_averages_members() {
        let mut ensemble = OracleEnsemble::new(vec![fixture("a", 0.2), fixture("b", 0.6)]);
        let pred = ensemble.predict(&[], &GameRules::default()).unwrap();
        assert_eq!(pred.scores.len(), UNIVERSE_SIZE);
        for &s in &pred.scores {
            assert!((s - 0.4).abs() < 1e-12, "média esperada 0.4, veio {s}");
        }
        assert_eq!(pred.member_scores.len(), 2);
        assert_eq!(pred.member_scores[0].0, "a");
    }

    #[test]
    fn test_predict_spread_of_identical_members_is_zero() {
        let mut ensemble = OracleEnsemble::new(vec![fixture("a", 0.3), fixture("b", 0.3)]);
        let pred = ensemble.predict(&[], &GameRules::default()).unwrap();
        assert!(pred.spread.iter().all(|&s| s.abs() < 1e-12));
    }

    #[test]
    fn test_predict_spread_is_stddev() {
        let mut ensemble = OracleEnsemble::new(vec![fixture("a", 0.2), fixture("b", 0.6)]);
        let pred = ensemble.predict(&[], &GameRules::default()).unwrap();
        // desvio padrão populacional de {0.2, 0.6} = 0.2
        assert!(pred.spread.iter().all(|&s| (s - 0.2).abs() < 1e-12));
    }

    #[test]
    fn test_predict_scores_stay_in_unit_interval() {
        let mut ensemble = OracleEnsemble::new(vec![fixture("a", 1.0), fixture("b", 1.0)]);
        let pred = ensemble.predict(&[], &GameRules::default()).unwrap();
        assert!(pred.scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_empty_ensemble_is_error() {
        let mut ensemble = OracleEnsemble::new(Vec::new());
        assert!(ensemble.predict(&[], &GameRules::default()).is_err());
    }

    #[test]
    fn test_member_out_of_contract_is_error() {
        let bad = Box::new(FixtureOracle::new("ruim", vec![2.0; UNIVERSE_SIZE]));
        let mut ensemble = OracleEnsemble::new(vec![bad]);
        let err = ensemble.predict(&[], &GameRules::default()).unwrap_err();
        assert!(err.to_string().contains("ruim"), "{err}");
    }
}
