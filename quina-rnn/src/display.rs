use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use ndarray::Array1;

use quina_data::models::{DRAW_SIZE, UNIVERSE_SIZE};

use crate::config::{GridSearchResults, TrainReport};

pub fn display_train_report(report: &TrainReport) {
    println!("\n== Treino {} ==\n", report.config.cell);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Métrica", "Valor"]);

    table.add_row(vec![
        Cell::new("Janelas de treino"),
        Cell::new(format!("{}", report.train_windows)),
    ]);
    table.add_row(vec![
        Cell::new("Janelas de validação"),
        Cell::new(format!("{}", report.val_windows)),
    ]);
    table.add_row(vec![
        Cell::new("Taxa de acerto (top-5)"),
        Cell::new(format!("{:.4}", report.val_hit_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Taxa uniforme (5/80)"),
        Cell::new(format!("{:.4}", report.baseline_hit_rate)),
    ]);

    println!("{table}");

    println!("\nTempo de treino: {} ms", report.train_time_ms);
}

pub fn display_grid_search_top(results: &GridSearchResults, top_n: usize) {
    println!(
        "\n== Top {} configurações (de {}) ==\n",
        top_n,
        results.results.len()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#",
            "célula",
            "estado",
            "rho",
            "alpha",
            "lambda",
            "taxa val",
            "uniforme",
            "ms",
        ]);

    for (i, r) in results.results.iter().take(top_n).enumerate() {
        let row = vec![
            format!("{}", i + 1),
            format!("{}", r.config.cell),
            format!("{}", r.config.state_size),
            format!("{:.2}", r.config.spectral_radius),
            format!("{:.1}", r.config.leak_rate),
            format!("{:.0e}", r.config.ridge_lambda),
            format!("{:.4}", r.val_hit_rate),
            format!("{:.4}", r.baseline_hit_rate),
            format!("{}", r.train_time_ms),
        ];

        if i == 0 {
            table.add_row(row.iter().map(|s| Cell::new(s).fg(Color::Green)).collect::<Vec<_>>());
        } else {
            table.add_row(row);
        }
    }

    println!("{table}");
}

/// Top-15 dezenas por score. A razão compara com a chance uniforme de uma
/// dezena sair no próximo concurso (5/80).
pub fn display_scores(scores: &Array1<f64>) {
    println!("\n== Pontuação das dezenas ==\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dezena", "Score", "Razão/unif"]);

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let uniform = DRAW_SIZE as f64 / UNIVERSE_SIZE as f64;
    for (rank, &idx) in indices.iter().take(15).enumerate() {
        let ratio = scores[idx] / uniform;
        let color = if rank < DRAW_SIZE { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(format!("{:2}", idx + 1)).fg(color),
            Cell::new(format!("{:.4}", scores[idx])).fg(color),
            Cell::new(format!("{:.2}x", ratio)).fg(color),
        ]);
    }
    println!("{table}");
}
