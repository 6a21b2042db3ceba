use std::collections::HashMap;

use quina_data::features::sum_of;
use quina_data::models::{Draw, NumberProbability, NumberStats, ProbabilityTag, UNIVERSE_SIZE};

/// Duques mais frequentes do histórico: contagem desc, empate pela dupla menor.
pub fn top_pairs(draws: &[Draw], top: usize) -> Vec<([u8; 2], u32)> {
    let mut counts: HashMap<[u8; 2], u32> = HashMap::new();
    for draw in draws {
        let n = draw.numbers.len();
        for i in 0..n {
            for j in (i + 1)..n {
                *counts.entry([draw.numbers[i], draw.numbers[j]]).or_insert(0) += 1;
            }
        }
    }
    let mut ranked: Vec<([u8; 2], u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}

/// Ternos mais frequentes, com o mesmo critério de desempate.
pub fn top_triples(draws: &[Draw], top: usize) -> Vec<([u8; 3], u32)> {
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    for draw in draws {
        let n = draw.numbers.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for l in (j + 1)..n {
                    let key = [draw.numbers[i], draw.numbers[j], draw.numbers[l]];
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
        }
    }
    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}

#[derive(Debug, Clone, PartialEq)]
pub struct SumStats {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

pub fn sum_stats(draws: &[Draw]) -> Option<SumStats> {
    if draws.is_empty() {
        return None;
    }
    let sums: Vec<u32> = draws.iter().map(|d| sum_of(&d.numbers)).collect();
    let mean = sums.iter().map(|&s| s as f64).sum::<f64>() / sums.len() as f64;
    let min = *sums.iter().min().unwrap_or(&0);
    let max = *sums.iter().max().unwrap_or(&0);
    Some(SumStats { mean, min, max })
}

/// Atraso de cada dezena: concursos desde a última aparição, varrendo do mais
/// recente para o mais antigo e parando quando as 80 foram vistas. Dezena que
/// nunca saiu recebe o tamanho do histórico.
pub fn staleness(draws: &[Draw]) -> Vec<(u8, u32)> {
    let mut gaps: Vec<Option<u32>> = vec![None; UNIVERSE_SIZE];
    let mut found = 0usize;

    for (i, draw) in draws.iter().rev().enumerate() {
        for &n in &draw.numbers {
            let idx = (n - 1) as usize;
            if gaps[idx].is_none() {
                gaps[idx] = Some(i as u32);
                found += 1;
            }
        }
        if found == UNIVERSE_SIZE {
            break;
        }
    }

    gaps.iter()
        .enumerate()
        .map(|(idx, gap)| ((idx + 1) as u8, gap.unwrap_or(draws.len() as u32)))
        .collect()
}

/// Frequência e atraso de cada dezena sobre o histórico completo.
pub fn compute_stats(draws: &[Draw]) -> Vec<NumberStats> {
    let gaps = staleness(draws);
    let mut stats: Vec<NumberStats> = gaps
        .into_iter()
        .map(|(number, gap)| NumberStats {
            number,
            frequency: 0,
            gap,
        })
        .collect();

    for draw in draws {
        for &n in &draw.numbers {
            stats[(n - 1) as usize].frequency += 1;
        }
    }

    stats
}

/// Converte frequências em probabilidades empíricas e etiqueta desvios acima
/// de 30% da uniforme como QUENTE e abaixo como FRIO.
pub fn tag_probabilities(stats: &[NumberStats]) -> Vec<NumberProbability> {
    let total: u32 = stats.iter().map(|s| s.frequency).sum();
    let uniform = 1.0 / UNIVERSE_SIZE as f64;
    let threshold = 0.3;

    stats
        .iter()
        .map(|s| {
            let probability = if total > 0 {
                s.frequency as f64 / total as f64
            } else {
                0.0
            };
            let deviation = (probability - uniform) / uniform;
            let tag = if deviation > threshold {
                ProbabilityTag::Hot
            } else if deviation < -threshold {
                ProbabilityTag::Cold
            } else {
                ProbabilityTag::Normal
            };
            NumberProbability {
                number: s.number,
                probability,
                tag,
            }
        })
        .collect()
}
