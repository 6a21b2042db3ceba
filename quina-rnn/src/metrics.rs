use ndarray::Array1;

use quina_data::models::{Draw, UNIVERSE_SIZE};

/// As `k` dezenas de maior pontuação, em ordem decrescente de score.
/// Empates ficam na ordem que a ordenação instável decidir.
pub fn top_k_numbers(scores: &Array1<f64>, k: usize) -> Vec<u8> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_unstable_by(|&a, &b| {
        scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.iter().take(k).map(|&i| (i + 1) as u8).collect()
}

/// Taxa de acerto: fração média das dezenas sorteadas que aparecem entre as
/// top-k previstas. predictions[i] é o vetor de scores das 80 dezenas;
/// actuals[i] é o concurso que de fato saiu.
pub fn hit_rate(predictions: &[Array1<f64>], actuals: &[&Draw], top_k: usize) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }

    let mut total_hits = 0.0;
    for (pred, actual) in predictions.iter().zip(actuals.iter()) {
        let top_set = top_k_numbers(pred, top_k);
        let hits = actual.numbers.iter().filter(|&&n| top_set.contains(&n)).count();
        total_hits += hits as f64 / actual.numbers.len() as f64;
    }

    total_hits / predictions.len() as f64
}

/// Taxa de acerto esperada de um palpite uniforme: top_k / 80.
pub fn uniform_hit_rate(top_k: usize) -> f64 {
    top_k as f64 / UNIVERSE_SIZE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: &[u8]) -> Draw {
        Draw::new("1".to_string(), "2024-01-01".to_string(), numbers.to_vec()).unwrap()
    }

    fn scores_for(favored: &[u8]) -> Array1<f64> {
        let mut scores = Array1::from_elem(80, 0.01);
        for &n in favored {
            scores[(n - 1) as usize] = 0.9;
        }
        scores
    }

    #[test]
    fn test_top_k_numbers() {
        let scores = scores_for(&[7, 23, 80]);
        let top = top_k_numbers(&scores, 3);
        assert_eq!(top.len(), 3);
        assert!(top.contains(&7) && top.contains(&23) && top.contains(&80));
    }

    #[test]
    fn test_hit_rate_perfect() {
        let actual = draw(&[1, 5, 10, 20, 50]);
        let pred = scores_for(&[1, 5, 10, 20, 50]);
        let rate = hit_rate(&[pred], &[&actual], 5);
        assert!((rate - 1.0).abs() < 1e-10, "acerto perfeito deveria dar 1.0, deu {rate}");
    }

    #[test]
    fn test_hit_rate_zero() {
        let actual = draw(&[1, 2, 3, 4, 5]);
        let pred = scores_for(&[70, 71, 72, 73, 74]);
        let rate = hit_rate(&[pred], &[&actual], 5);
        assert!((rate - 0.0).abs() < 1e-10, "deveria dar 0.0, deu {rate}");
    }

    #[test]
    fn test_hit_rate_partial() {
        let actual = draw(&[1, 2, 3, 4, 5]);
        let pred = scores_for(&[1, 2, 60, 70, 80]);
        let rate = hit_rate(&[pred], &[&actual], 5);
        assert!((rate - 2.0 / 5.0).abs() < 1e-10, "2 de 5 deveria dar 0.4, deu {rate}");
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(hit_rate(&[], &[], 5), 0.0);
    }

    #[test]
    fn test_hit_rate_draw_with_extra_numbers() {
        // Concurso com 6 dezenas válidas: denominador acompanha o tamanho real
        let actual = draw(&[1, 2, 3, 4, 5, 6]);
        let pred = scores_for(&[1, 2, 3, 60, 70]);
        let rate = hit_rate(&[pred], &[&actual], 5);
        assert!((rate - 3.0 / 6.0).abs() < 1e-10, "3 de 6 deveria dar 0.5, deu {rate}");
    }

    #[test]
    fn test_uniform_hit_rate() {
        assert!((uniform_hit_rate(5) - 5.0 / 80.0).abs() < 1e-12);
        assert!((uniform_hit_rate(10) - 0.125).abs() < 1e-12);
    }
}
