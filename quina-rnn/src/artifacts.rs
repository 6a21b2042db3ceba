use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::cells::GatedCell;
use crate::config::{CellKind, RnnConfig, TrainReport};
use crate::encoding::INPUT_DIM;
use crate::training::TrainedModel;

/// Modelo treinado em disco: configuração (o seed reproduz os pesos fixos da
/// célula), a matriz de leitura linha a linha e os metadados do treino.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedArtifact {
    pub config: RnnConfig,
    pub input_dim: usize,
    pub w_out: Vec<Vec<f64>>,
    pub trained_at: String,
    pub report: TrainReport,
}

/// Caminho do artefato de uma célula dentro do diretório dado.
pub fn artifact_path(dir: &Path, cell: CellKind) -> PathBuf {
    dir.join(cell.artifact_name())
}

/// Grava o modelo treinado, sobrescrevendo artefato anterior.
pub fn save_artifact(model: &TrainedModel, report: &TrainReport, path: &Path) -> Result<()> {
    let artifact = TrainedArtifact {
        config: model.config.clone(),
        input_dim: INPUT_DIM,
        w_out: model.w_out.rows().into_iter().map(|row| row.to_vec()).collect(),
        trained_at: chrono::Local::now().to_rfc3339(),
        report: report.clone(),
    };
    let json = serde_json::to_string_pretty(&artifact)?;
    std::fs::write(path, json).with_context(|| format!("Falha ao gravar artefato {:?}", path))?;
    Ok(())
}

/// Lê um artefato do disco. Arquivo ausente é o erro de oráculo indisponível:
/// a mensagem aponta o arquivo e o comando que o gera.
pub fn load_artifact(path: &Path) -> Result<TrainedArtifact> {
    let json = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Oráculo indisponível: artefato {:?} não encontrado. Treine antes com: quina-rnn train",
            path
        )
    })?;
    let artifact: TrainedArtifact =
        serde_json::from_str(&json).with_context(|| format!("JSON inválido em {:?}", path))?;
    Ok(artifact)
}

impl TrainedArtifact {
    /// Reconstrói o modelo: a célula volta dos pesos semeados pela config e a
    /// leitura vem do artefato. Valida as dimensões antes de montar.
    pub fn into_model(self) -> Result<TrainedModel> {
        if self.input_dim != INPUT_DIM {
            bail!(
                "Artefato incompatível: dimensão de entrada {} (esperado {})",
                self.input_dim,
                INPUT_DIM
            );
        }
        let state_dim = self.config.state_size + INPUT_DIM;
        let rows = self.w_out.len();
        if rows == 0 || self.w_out.iter().any(|row| row.len() != state_dim) {
            bail!("Artefato incompatível: leitura com dimensões inconsistentes");
        }

        let mut w_out = Array2::zeros((rows, state_dim));
        for (i, row) in self.w_out.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                w_out[[i, j]] = v;
            }
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let cell = GatedCell::new(&self.config, INPUT_DIM, &mut rng);

        Ok(TrainedModel {
            config: self.config,
            cell,
            w_out,
        })
    }
}
