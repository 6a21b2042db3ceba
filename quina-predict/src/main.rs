use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Datelike;
use clap::Parser;

use quina_data::config::GameRules;
use quina_data::loader;
use quina_data::models::WINDOW_SIZE;

use quina_predict::candidates;
use quina_predict::display;
use quina_predict::ensemble::OracleEnsemble;
use quina_predict::oracle::recurrent::RecurrentOracle;
use quina_predict::oracle::Oracle;
use quina_rnn::config::CellKind;

/// Pipeline de palpites: consulta os dois oráculos treinados, tira a média,
/// filtra as combinações do pool e relata os melhores jogos.
#[derive(Parser)]
#[command(name = "quina-predict", about = "Gerador de palpites da Quina (LSTM + GRU)")]
struct Cli {
    /// Arquivo de histórico separado por `;`
    #[arg(short, long, default_value = "quina.csv")]
    file: PathBuf,
    /// Diretório dos artefatos treinados
    #[arg(long, default_value = ".")]
    artifacts: PathBuf,
    /// Quantidade de palpites no relatório
    #[arg(short, long, default_value = "3")]
    top: usize,
    /// Semente do ruído de inferência; o padrão deriva da data do dia
    #[arg(long)]
    seed: Option<u64>,
}

fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("== Quina Predictor ==");

    let (draws, report) = loader::load_history(&cli.file)?;
    println!(
        "{} concursos carregados ({} linhas ignoradas)",
        report.draws_loaded, report.lines_skipped
    );

    let seed = cli.seed.unwrap_or_else(date_seed);

    // Os dois artefatos são exigidos antes de qualquer previsão
    let lstm = RecurrentOracle::load(&cli.artifacts, CellKind::Lstm, seed)?;
    let gru = RecurrentOracle::load(&cli.artifacts, CellKind::Gru, seed)?;

    if draws.len() < WINDOW_SIZE {
        bail!(
            "Histórico insuficiente: {} concursos, a janela exige {}",
            draws.len(),
            WINDOW_SIZE
        );
    }

    let rules = GameRules::default();
    let members: Vec<Box<dyn Oracle>> = vec![Box::new(lstm), Box::new(gru)];
    let mut ensemble = OracleEnsemble::new(members);

    println!("Consultando especialistas (LSTM + GRU)...");
    let prediction = ensemble.predict(&draws, &rules)?;

    let report = candidates::evaluate_candidates(&prediction.scores, &rules);
    display::display_candidates(&report, cli.top);
    display::display_hot_zone(&prediction);

    Ok(())
}
