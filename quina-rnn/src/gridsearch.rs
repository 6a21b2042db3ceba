use std::cmp::Ordering;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use quina_data::config::GameRules;
use quina_data::models::Draw;

use crate::config::{CellKind, GridSearchResults, RnnConfig, TrainReport};
use crate::training::train_and_evaluate;

const STATE_SIZES: [usize; 3] = [64, 128, 256];
const SPECTRAL_RADII: [f64; 4] = [0.8, 0.9, 0.95, 1.05];
const LEAK_RATES: [f64; 4] = [0.3, 0.5, 0.8, 1.0];
const RIDGE_LAMBDAS: [f64; 3] = [1e-4, 1e-3, 1e-2];

/// Grade cartesiana completa de hiperparâmetros para uma célula:
/// 3 tamanhos de estado x 4 raios x 4 vazamentos x 3 lambdas = 144.
pub fn generate_grid(cell: CellKind) -> Vec<RnnConfig> {
    let mut grid = Vec::with_capacity(144);
    for &state_size in &STATE_SIZES {
        for &spectral_radius in &SPECTRAL_RADII {
            for &leak_rate in &LEAK_RATES {
                for &ridge_lambda in &RIDGE_LAMBDAS {
                    grid.push(RnnConfig {
                        cell,
                        state_size,
                        spectral_radius,
                        leak_rate,
                        ridge_lambda,
                        ..RnnConfig::default()
                    });
                }
            }
        }
    }
    grid
}

fn by_hit_rate_desc(a: &TrainReport, b: &TrainReport) -> Ordering {
    b.val_hit_rate
        .partial_cmp(&a.val_hit_rate)
        .unwrap_or(Ordering::Equal)
}

/// O arquivo de resultados guarda o melhor já visto; uma varredura nova só o
/// sobrescreve quando iguala ou supera a taxa anterior.
fn should_overwrite(path: &Path, new_rate: f64) -> bool {
    let previous = std::fs::read_to_string(path)
        .ok()
        .and_then(|json| serde_json::from_str::<GridSearchResults>(&json).ok())
        .and_then(|old| old.results.first().map(|r| r.val_hit_rate));

    match previous {
        Some(old_rate) if new_rate < old_rate => {
            println!("Resultados descartados: taxa {new_rate:.4} < anterior {old_rate:.4}");
            false
        }
        Some(old_rate) => {
            println!("Resultados salvos (taxa: {new_rate:.4}, anterior: {old_rate:.4})");
            true
        }
        None => true,
    }
}

/// Avalia todas as configurações em paralelo e ordena pela taxa de validação.
pub fn run_grid_search(
    draws: &[Draw],
    configs: &[RnnConfig],
    rules: &GameRules,
    output_path: &str,
) -> Result<GridSearchResults> {
    let bar = ProgressBar::new(configs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let sweep_start = Instant::now();
    let mut reports: Vec<TrainReport> = configs
        .par_iter()
        .filter_map(|config| {
            let outcome = train_and_evaluate(draws, config, rules);
            bar.inc(1);
            match outcome {
                Ok((_, report)) => Some(report),
                Err(e) => {
                    log::warn!("Configuração falhou: {:?}: {}", config, e);
                    None
                }
            }
        })
        .collect();
    bar.finish_and_clear();

    let secs = sweep_start.elapsed().as_secs();
    let failed = configs.len() - reports.len();
    println!(
        "Busca concluída: {}/{} configurações em {}m{:02}s ({failed} falhas)",
        reports.len(),
        configs.len(),
        secs / 60,
        secs % 60,
    );

    if reports.is_empty() {
        bail!("Todas as configurações falharam");
    }

    reports.sort_by(by_hit_rate_desc);
    let results = GridSearchResults {
        best_config: reports[0].config.clone(),
        results: reports,
    };

    if should_overwrite(Path::new(output_path), results.results[0].val_hit_rate) {
        std::fs::write(output_path, serde_json::to_string_pretty(&results)?)?;
        log::info!("Resultados gravados em {output_path}");
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::make_test_draws;

    #[test]
    fn test_grid_size() {
        let grid = generate_grid(CellKind::Lstm);
        // 3 * 4 * 4 * 3 = 144
        assert_eq!(grid.len(), 144, "grade deveria ter 144, tem {}", grid.len());
    }

    #[test]
    fn test_grid_all_seed_42_and_cell() {
        let grid = generate_grid(CellKind::Gru);
        assert!(grid.iter().all(|c| c.seed == 42));
        assert!(grid.iter().all(|c| c.cell == CellKind::Gru));
    }

    #[test]
    fn test_mini_grid_search() {
        let draws = make_test_draws(80);
        let rules = GameRules::default();

        let configs = vec![
            RnnConfig {
                cell: CellKind::Lstm,
                state_size: 16,
                spectral_radius: 0.9,
                sparsity: 0.8,
                leak_rate: 0.5,
                ridge_lambda: 1e-2,
                input_scaling: 0.1,
                noise_amplitude: 0.0,
                seed: 42,
            },
            RnnConfig {
                cell: CellKind::Lstm,
                state_size: 24,
                spectral_radius: 0.95,
                sparsity: 0.9,
                leak_rate: 1.0,
                ridge_lambda: 1e-4,
                input_scaling: 0.1,
                noise_amplitude: 0.0,
                seed: 42,
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busca_teste.json");
        let results =
            run_grid_search(&draws, &configs, &rules, path.to_str().unwrap()).unwrap();
        assert_eq!(results.results.len(), 2);
        assert!(results.results[0].val_hit_rate >= results.results[1].val_hit_rate);
        assert!(path.exists());
    }

    #[test]
    fn test_keeps_better_previous_results() {
        let draws = make_test_draws(80);
        let rules = GameRules::default();
        let config = RnnConfig {
            cell: CellKind::Gru,
            state_size: 16,
            spectral_radius: 0.9,
            sparsity: 0.8,
            leak_rate: 0.5,
            ridge_lambda: 1e-2,
            input_scaling: 0.1,
            noise_amplitude: 0.0,
            seed: 42,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busca_teste.json");

        let unbeatable = TrainReport {
            config: config.clone(),
            train_windows: 1,
            val_windows: 1,
            val_hit_rate: 2.0,
            baseline_hit_rate: 0.0625,
            train_time_ms: 0,
        };
        let old = GridSearchResults {
            results: vec![unbeatable],
            best_config: config.clone(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&old).unwrap()).unwrap();

        run_grid_search(&draws, &[config], &rules, path.to_str().unwrap()).unwrap();

        let kept: GridSearchResults =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!((kept.results[0].val_hit_rate - 2.0).abs() < 1e-12);
    }
}
