use crate::config::GameRules;
use crate::models::Draw;

pub const FEATURE_NAMES: &[&str] = &[
    "pares",
    "soma",
    "primos",
    "fibonacci",
    "repetidas",
    "amplitude",
    "faixa_01_10",
    "faixa_11_20",
    "faixa_21_30",
    "faixa_31_40",
    "faixa_41_50",
    "faixa_51_60",
    "faixa_61_70",
    "faixa_71_80",
];

pub const FEATURE_DIM: usize = 14;

// Divisores fixos de normalização.
const COUNT_DIVISOR: f64 = 5.0; // dezenas de uma aposta simples
const SUM_DIVISOR: f64 = 390.0; // soma máxima teórica: 76+77+78+79+80
const SPAN_DIVISOR: f64 = 79.0; // amplitude máxima: 80 - 1

/// Vetor de features de um concurso, dado o concurso anterior (se houver).
/// Função pura: mesma entrada, mesmo vetor, sem estado escondido.
pub fn feature_vector(draw: &Draw, previous: Option<&Draw>, rules: &GameRules) -> Vec<f64> {
    let numbers = &draw.numbers;

    // pares: proporção de dezenas pares
    let pares = count_even(numbers) as f64 / COUNT_DIVISOR;

    // soma: soma das dezenas sobre a soma máxima teórica
    let soma = sum_of(numbers) as f64 / SUM_DIVISOR;

    // primos e fibonacci: contagem dentro dos conjuntos fixos das regras
    let primos = count_in_set(numbers, &rules.primos) as f64 / COUNT_DIVISOR;
    let fibonacci = count_in_set(numbers, &rules.fibonacci) as f64 / COUNT_DIVISOR;

    // repetidas: dezenas que também saíram no concurso anterior
    let repetidas = match previous {
        Some(prev) => {
            numbers.iter().filter(|&&n| prev.contains(n)).count() as f64 / COUNT_DIVISOR
        }
        None => 0.0,
    };

    // amplitude: maior dezena menos a menor
    let amplitude = span_of(numbers) as f64 / SPAN_DIVISOR;

    let mut features = vec![pares, soma, primos, fibonacci, repetidas, amplitude];

    // histograma de faixas: contagem por dezena de 10 (1-10, 11-20, ..., 71-80)
    for count in decade_counts(numbers) {
        features.push(count as f64 / COUNT_DIVISOR);
    }

    features
}

/// Um vetor por concurso, na ordem do histórico (mais antigo primeiro).
pub fn feature_matrix(draws: &[Draw], rules: &GameRules) -> Vec<Vec<f64>> {
    draws
        .iter()
        .enumerate()
        .map(|(i, draw)| {
            let previous = if i > 0 { Some(&draws[i - 1]) } else { None };
            feature_vector(draw, previous, rules)
        })
        .collect()
}

/// Faixa de 10 em que a dezena cai: 0 para 1-10, 7 para 71-80.
pub fn decade_of(number: u8) -> usize {
    ((number - 1) / 10) as usize
}

pub fn decade_counts(numbers: &[u8]) -> [usize; 8] {
    let mut counts = [0usize; 8];
    for &n in numbers {
        counts[decade_of(n)] += 1;
    }
    counts
}

pub fn count_even(numbers: &[u8]) -> usize {
    numbers.iter().filter(|&&n| n % 2 == 0).count()
}

pub fn sum_of(numbers: &[u8]) -> u32 {
    numbers.iter().map(|&n| n as u32).sum()
}

pub fn span_of(numbers: &[u8]) -> u8 {
    match (numbers.iter().min(), numbers.iter().max()) {
        (Some(&min), Some(&max)) => max - min,
        _ => 0,
    }
}

pub fn count_in_set(numbers: &[u8], set: &[u8]) -> usize {
    numbers.iter().filter(|n| set.contains(n)).count()
}
