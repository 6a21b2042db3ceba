use std::path::Path;

use anyhow::Result;

use quina_data::config::GameRules;
use quina_data::models::Draw;
use quina_rnn::artifacts;
use quina_rnn::config::CellKind;
use quina_rnn::training::TrainedModel;

use super::Oracle;

/// Oráculo apoiado em um artefato treinado pelo quina-rnn. A célula é
/// reconstruída da semente gravada; só a leitura vem do arquivo.
#[derive(Debug)]
pub struct RecurrentOracle {
    name: String,
    model: TrainedModel,
}

impl RecurrentOracle {
    /// Carrega o artefato da célula no diretório dado. Arquivo ausente vira
    /// o erro de oráculo indisponível, com o comando de treino na mensagem.
    /// A semente dada rege só o ruído de inferência, não os pesos.
    pub fn load(dir: &Path, cell: CellKind, noise_seed: u64) -> Result<Self> {
        let path = artifacts::artifact_path(dir, cell);
        let mut model = artifacts::load_artifact(&path)?.into_model()?;
        model.config.seed = noise_seed;
        Ok(Self {
            name: cell.to_string(),
            model,
        })
    }
}

impl Oracle for RecurrentOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&mut self, draws: &[Draw], rules: &GameRules) -> Result<Vec<f64>> {
        Ok(self.model.predict_scores(draws, rules)?.to_vec())
    }
}
