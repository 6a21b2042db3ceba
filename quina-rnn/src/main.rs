use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};

use quina_data::config::GameRules;
use quina_data::loader;
use quina_data::models::Draw;

use quina_rnn::artifacts;
use quina_rnn::config::{CellKind, RnnConfig};
use quina_rnn::display;
use quina_rnn::gridsearch;
use quina_rnn::training;

#[derive(Parser)]
#[command(name = "quina-rnn", about = "Modelos recorrentes de pontuação para a Quina")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Treinar e gravar artefatos (as duas células quando --cell é omitido)
    Train {
        /// Célula a treinar
        #[arg(long, value_enum)]
        cell: Option<CellKind>,
        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
        /// Diretório onde gravar os artefatos
        #[arg(long, default_value = ".")]
        artifacts: PathBuf,
        #[arg(long, default_value = "128")]
        state_size: usize,
        #[arg(long, default_value = "0.95")]
        spectral_radius: f64,
        #[arg(long, default_value = "0.9")]
        sparsity: f64,
        #[arg(long, default_value = "1.0")]
        leak_rate: f64,
        #[arg(long, default_value = "1e-3")]
        ridge_lambda: f64,
        #[arg(long, default_value = "0.1")]
        input_scaling: f64,
        /// Semente; o padrão deriva da data do dia
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Busca em grade de hiperparâmetros
    Gridsearch {
        /// Célula; omitido varre LSTM e GRU
        #[arg(long, value_enum)]
        cell: Option<CellKind>,
        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
        #[arg(short, long, default_value = "quina_busca.json")]
        output: String,
        #[arg(long, default_value = "20")]
        top: usize,
        /// Semente aplicada a todas as configurações (padrão fixo 42)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pontuar o próximo concurso com um artefato treinado
    Predict {
        #[arg(long, default_value = "lstm")]
        cell: CellKind,
        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
        /// Diretório dos artefatos
        #[arg(long, default_value = ".")]
        artifacts: PathBuf,
        /// Semente do ruído de inferência; o padrão deriva da data do dia
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

fn load_draws(file: &Path) -> Result<Vec<Draw>> {
    let (draws, report) = loader::load_history(file)?;
    println!(
        "{} concursos carregados ({} linhas ignoradas)",
        report.draws_loaded, report.lines_skipped
    );
    Ok(draws)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Train {
            cell,
            file,
            artifacts: artifacts_dir,
            state_size,
            spectral_radius,
            sparsity,
            leak_rate,
            ridge_lambda,
            input_scaling,
            seed,
        } => {
            let draws = load_draws(&file)?;
            let rules = GameRules::default();
            let seed = seed.unwrap_or_else(date_seed);

            let cells = match cell {
                Some(c) => vec![c],
                None => vec![CellKind::Lstm, CellKind::Gru],
            };

            for cell in cells {
                let config = RnnConfig {
                    cell,
                    state_size,
                    spectral_radius,
                    sparsity,
                    leak_rate,
                    ridge_lambda,
                    input_scaling,
                    noise_amplitude: 1e-4,
                    seed,
                };

                println!("\nTreinando {cell}...");
                println!("  state_size={state_size}, rho={spectral_radius}, sparsity={sparsity}");
                println!(
                    "  leak_rate={leak_rate}, ridge_lambda={ridge_lambda}, input_scaling={input_scaling}, seed={seed}"
                );

                let (model, report) = training::train_and_evaluate(&draws, &config, &rules)?;
                display::display_train_report(&report);

                let path = artifacts::artifact_path(&artifacts_dir, cell);
                artifacts::save_artifact(&model, &report, &path)?;
                println!("\nArtefato gravado em {}", path.display());
            }
        }
        Command::Gridsearch {
            cell,
            file,
            output,
            top,
            seed,
        } => {
            let draws = load_draws(&file)?;
            let rules = GameRules::default();

            let cells = match cell {
                Some(c) => vec![c],
                None => vec![CellKind::Lstm, CellKind::Gru],
            };
            let mut configs: Vec<RnnConfig> = cells
                .into_iter()
                .flat_map(gridsearch::generate_grid)
                .collect();
            if let Some(s) = seed {
                for config in &mut configs {
                    config.seed = s;
                }
            }
            println!("{} configurações a avaliar", configs.len());

            let results = gridsearch::run_grid_search(&draws, &configs, &rules, &output)?;
            display::display_grid_search_top(&results, top);

            let best_json = serde_json::to_string_pretty(&results.best_config)?;
            std::fs::write("quina_melhor_config.json", best_json)?;
            println!("\nMelhor configuração gravada em quina_melhor_config.json");
        }
        Command::Predict {
            cell,
            file,
            artifacts: artifacts_dir,
            seed,
        } => {
            let draws = load_draws(&file)?;
            let rules = GameRules::default();

            let path = artifacts::artifact_path(&artifacts_dir, cell);
            let mut model = artifacts::load_artifact(&path)?.into_model()?;
            model.config.seed = seed.unwrap_or_else(date_seed);

            println!("Artefato {} ({})", path.display(), model.config.cell);
            let scores = model.predict_scores(&draws, &rules)?;
            display::display_scores(&scores);
        }
    }

    Ok(())
}
