mod analysis;
mod display;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use quina_data::loader;
use quina_data::models::Draw;

use crate::analysis::{
    compute_stats, staleness, sum_stats, tag_probabilities, top_pairs, top_triples,
};
use crate::display::{display_draws, display_overdue, display_patterns, display_stats};

#[derive(Parser)]
#[command(name = "quina", about = "Estatísticas e mineração de padrões da Quina")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Listar os últimos concursos
    List {
        /// Número de concursos a exibir
        #[arg(short, long, default_value = "10")]
        last: usize,

        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
    },

    /// Frequência, atraso e etiqueta quente/frio por dezena
    Stats {
        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
    },

    /// Duques e ternos mais frequentes e estatísticas de soma
    Padroes {
        /// Quantos duques e ternos exibir
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
    },

    /// As dezenas há mais tempo sem sair
    Atrasos {
        /// Quantas dezenas exibir
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Arquivo de histórico separado por `;`
        #[arg(short, long, default_value = "quina.csv")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List { last, file } => cmd_list(&file, last),
        Command::Stats { file } => cmd_stats(&file),
        Command::Padroes { top, file } => cmd_padroes(&file, top),
        Command::Atrasos { top, file } => cmd_atrasos(&file, top),
    }
}

fn load_draws(file: &Path) -> Result<Vec<Draw>> {
    let (draws, report) = loader::load_history(file)?;
    println!(
        "{} concursos carregados ({} linhas ignoradas)",
        report.draws_loaded, report.lines_skipped
    );
    Ok(draws)
}

fn cmd_list(file: &Path, last: usize) -> Result<()> {
    let draws = load_draws(file)?;
    if draws.is_empty() {
        println!("Histórico vazio em {}.", file.display());
        return Ok(());
    }
    let start = draws.len().saturating_sub(last);
    display_draws(&draws[start..]);
    Ok(())
}

fn cmd_stats(file: &Path) -> Result<()> {
    let draws = load_draws(file)?;
    if draws.is_empty() {
        println!("Histórico vazio em {}.", file.display());
        return Ok(());
    }

    let stats = compute_stats(&draws);
    let probs = tag_probabilities(&stats);
    display_stats(&stats, &probs, draws.len());
    Ok(())
}

fn cmd_padroes(file: &Path, top: usize) -> Result<()> {
    let draws = load_draws(file)?;
    if draws.is_empty() {
        println!("Histórico vazio em {}.", file.display());
        return Ok(());
    }

    let pairs = top_pairs(&draws, top);
    let triples = top_triples(&draws, top);
    if let Some(sums) = sum_stats(&draws) {
        display_patterns(&pairs, &triples, &sums, draws.len());
    }
    Ok(())
}

fn cmd_atrasos(file: &Path, top: usize) -> Result<()> {
    let draws = load_draws(file)?;
    if draws.is_empty() {
        println!("Histórico vazio em {}.", file.display());
        return Ok(());
    }

    let gaps = staleness(&draws);
    display_overdue(&gaps, top);
    Ok(())
}
