use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use quina_data::models::{Draw, NumberProbability, NumberStats, ProbabilityTag};

use crate::analysis::SumStats;

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Nenhum concurso a exibir.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concurso", "Data", "Dezenas"]);

    for draw in draws {
        let numbers_str = draw
            .numbers
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![&draw.draw_id, &draw.date, &numbers_str]);
    }

    println!("{table}");
}

pub fn display_stats(stats: &[NumberStats], probs: &[NumberProbability], total_draws: usize) {
    println!("\n📊 Estatísticas sobre {} concursos\n", total_draws);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dezena", "Frequência", "Atraso", "Probabilidade", "Tag"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));

    for stat in &sorted {
        let prob = &probs[(stat.number - 1) as usize];
        let color = match prob.tag {
            ProbabilityTag::Hot => Color::Green,
            ProbabilityTag::Cold => Color::Red,
            ProbabilityTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", stat.number)),
            Cell::new(stat.frequency.to_string()),
            Cell::new(stat.gap.to_string()),
            Cell::new(format!("{:.4}", prob.probability)),
            Cell::new(prob.tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_patterns(
    pairs: &[([u8; 2], u32)],
    triples: &[([u8; 3], u32)],
    sums: &SumStats,
    total_draws: usize,
) {
    println!("\n🔍 Padrões sobre {} concursos\n", total_draws);

    println!("── Duques mais frequentes ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Duque", "Ocorrências"]);
    for (pair, count) in pairs {
        let key = pair
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![&key, &count.to_string()]);
    }
    println!("{table}");

    println!("\n── Ternos mais frequentes ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Terno", "Ocorrências"]);
    for (triple, count) in triples {
        let key = triple
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![&key, &count.to_string()]);
    }
    println!("{table}");

    println!("\n── Soma das dezenas ──");
    println!("  Média  : {:.1}", sums.mean);
    println!("  Mínima : {}", sums.min);
    println!("  Máxima : {}", sums.max);
}

pub fn display_overdue(gaps: &[(u8, u32)], top: usize) {
    println!("\n⏰ Dezenas há mais tempo sem sair\n");

    let mut sorted = gaps.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted.truncate(top);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dezena", "Concursos sem sair"]);

    for (number, gap) in &sorted {
        table.add_row(vec![&format!("{:02}", number), &gap.to_string()]);
    }
    println!("{table}");
}
