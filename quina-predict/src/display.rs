use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::candidates::CandidateReport;
use crate::ensemble::EnsemblePrediction;

/// Pool expandido, contagens e os melhores palpites aprovados.
pub fn display_candidates(report: &CandidateReport, top: usize) {
    let pool_str = report
        .pool
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ");
    println!("\nPool expandido ({} dezenas): {}", report.pool.len(), pool_str);
    println!("Jogos analisados: {}", report.evaluated);
    println!("Jogos aprovados: {}", report.approved);

    if report.ranked.is_empty() {
        println!("\nNenhum jogo aprovado pelos filtros.");
        return;
    }

    let shown = top.min(report.ranked.len());
    println!("\n== Top {} palpites ==\n", shown);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Dezenas", "Confiança"]);

    for (i, game) in report.ranked.iter().take(top).enumerate() {
        let numbers_str = game
            .numbers
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        let row = vec![
            format!("{}", i + 1),
            numbers_str,
            format!("{:.2}", game.score),
        ];
        if i == 0 {
            table.add_row(row.iter().map(|s| Cell::new(s).fg(Color::Green)).collect::<Vec<_>>());
        } else {
            table.add_row(row);
        }
    }

    println!("{table}");
}

/// As 10 dezenas de maior score do conjunto, com as colunas de cada membro
/// e a dispersão entre eles.
pub fn display_hot_zone(prediction: &EnsemblePrediction) {
    println!("\n== Zona quente (top 10) ==\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Dezena".to_string(), "Conjunto".to_string()];
    for (name, _) in &prediction.member_scores {
        header.push(name.clone());
    }
    header.push("Spread".to_string());
    table.set_header(&header);

    let mut indices: Vec<usize> = (0..prediction.scores.len()).collect();
    indices.sort_by(|&a, &b| {
        prediction.scores[b]
            .partial_cmp(&prediction.scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for &idx in indices.iter().take(10) {
        let mut row: Vec<String> = vec![
            format!("{:02}", idx + 1),
            format!("{:.2}%", prediction.scores[idx] * 100.0),
        ];
        for (_, scores) in &prediction.member_scores {
            row.push(format!("{:.2}%", scores[idx] * 100.0));
        }
        row.push(format!("{:.4}", prediction.spread[idx]));
        table.add_row(row);
    }

    println!("{table}");
}
