use quina_data::config::GameRules;
use quina_data::features::{count_even, decade_counts, span_of, sum_of};
use quina_data::models::DRAW_SIZE;

/// Quantidade de dezenas do pool expandido.
pub const POOL_SIZE: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedGame {
    pub numbers: [u8; DRAW_SIZE],
    /// Soma dos scores das cinco dezenas.
    pub score: f64,
}

/// Saída do estágio combinatório de uma rodada. Zero aprovados é um resultado
/// válido que o chamador relata, não um erro.
#[derive(Debug)]
pub struct CandidateReport {
    pub pool: Vec<u8>,
    pub evaluated: usize,
    pub approved: usize,
    pub ranked: Vec<RankedGame>,
}

/// As `pool_size` dezenas de maior score, devolvidas em ordem crescente.
/// Empates na fronteira ficam na ordem que a ordenação instável decidir.
pub fn select_pool(scores: &[f64], pool_size: usize) -> Vec<u8> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_unstable_by(|&a, &b| {
        scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut pool: Vec<u8> = indices.iter().take(pool_size).map(|&i| (i + 1) as u8).collect();
    pool.sort_unstable();
    pool
}

/// Regras de plausibilidade sobre uma combinação de cinco dezenas.
pub fn is_valid_game(numbers: &[u8], rules: &GameRules) -> bool {
    let soma = sum_of(numbers);
    if soma < rules.min_soma || soma > rules.max_soma {
        return false;
    }
    let pares = count_even(numbers);
    if pares < rules.min_pares || pares > rules.max_pares {
        return false;
    }
    if span_of(numbers) < rules.min_amplitude {
        return false;
    }
    let faixas = decade_counts(numbers);
    if faixas.iter().any(|&c| c >= rules.max_por_faixa) {
        return false;
    }
    true
}

/// Percorre as k-combinações de `pool` em ordem lexicográfica. O pool chega
/// ordenado, então as combinações saem em ordem crescente de dezenas.
fn for_each_combination<F: FnMut(&[u8])>(pool: &[u8], k: usize, mut f: F) {
    let n = pool.len();
    if k == 0 || n < k {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    let mut combo = vec![0u8; k];
    loop {
        for (slot, &i) in combo.iter_mut().zip(idx.iter()) {
            *slot = pool[i];
        }
        f(&combo);

        // índice mais à direita que ainda pode avançar
        let mut i = k;
        let mut found = false;
        while i > 0 {
            i -= 1;
            if idx[i] < i + n - k {
                found = true;
                break;
            }
        }
        if !found {
            return;
        }
        idx[i] += 1;
        for j in (i + 1)..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Enumera, filtra e ranqueia as combinações de um pool já escolhido.
/// Pool menor que cinco dezenas produz relatório vazio.
pub fn rank_pool(pool: &[u8], scores: &[f64], rules: &GameRules) -> CandidateReport {
    let mut evaluated = 0usize;
    let mut ranked: Vec<RankedGame> = Vec::new();

    for_each_combination(pool, DRAW_SIZE, |combo| {
        evaluated += 1;
        if is_valid_game(combo, rules) {
            let score = combo.iter().map(|&n| scores[(n - 1) as usize]).sum();
            let mut numbers = [0u8; DRAW_SIZE];
            numbers.copy_from_slice(combo);
            ranked.push(RankedGame { numbers, score });
        }
    });

    let approved = ranked.len();
    // Ordenação estável: empates preservam a ordem lexicográfica da enumeração
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    CandidateReport {
        pool: pool.to_vec(),
        evaluated,
        approved,
        ranked,
    }
}

/// Estágio completo: pool das 30 melhores dezenas, enumeração, filtro e ranking.
pub fn evaluate_candidates(scores: &[f64], rules: &GameRules) -> CandidateReport {
    let pool = select_pool(scores, POOL_SIZE);
    rank_pool(&pool, scores, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quina_data::models::UNIVERSE_SIZE;

    fn rules() -> GameRules {
        GameRules::default()
    }

    #[test]
    fn test_select_pool_takes_highest_ascending() {
        let scores: Vec<f64> = (0..UNIVERSE_SIZE).map(|i| i as f64).collect();
        let pool = select_pool(&scores, POOL_SIZE);
        assert_eq!(pool.len(), POOL_SIZE);
        assert_eq!(pool, (51..=80).collect::<Vec<u8>>());
    }

    #[test]
    fn test_sum_bounds() {
        // só a soma viola: tudo o mais passa
        assert!(!is_valid_game(&[30, 45, 60, 76, 80], &rules()), "soma 291");
        assert!(is_valid_game(&[29, 45, 60, 76, 80], &rules()), "soma 290");
        assert!(!is_valid_game(&[1, 10, 21, 40, 47], &rules()), "soma 119");
        assert!(is_valid_game(&[2, 10, 21, 40, 47], &rules()), "soma 120");
    }

    #[test]
    fn test_all_odd_rejected() {
        assert!(!is_valid_game(&[1, 3, 5, 7, 9], &rules()));
    }

    #[test]
    fn test_all_even_rejected() {
        // 5 pares estoura MAX_PARES; o resto passa
        assert!(!is_valid_game(&[2, 20, 40, 60, 80], &rules()));
    }

    #[test]
    fn test_amplitude_bound() {
        assert!(!is_valid_game(&[30, 32, 34, 41, 45], &rules()), "amplitude 15");
        assert!(is_valid_game(&[25, 32, 34, 41, 45], &rules()), "amplitude 20");
    }

    #[test]
    fn test_decade_concentration_rejected() {
        // quatro dezenas na faixa 41-50
        assert!(!is_valid_game(&[41, 43, 45, 47, 70], &rules()));
        assert!(is_valid_game(&[41, 43, 45, 57, 70], &rules()));
    }

    #[test]
    fn test_combinations_lexicographic() {
        let mut seen: Vec<Vec<u8>> = Vec::new();
        for_each_combination(&[1, 2, 3, 4, 5, 6], 5, |c| seen.push(c.to_vec()));
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3, 4, 5],
                vec![1, 2, 3, 4, 6],
                vec![1, 2, 3, 5, 6],
                vec![1, 2, 4, 5, 6],
                vec![1, 3, 4, 5, 6],
                vec![2, 3, 4, 5, 6],
            ]
        );
    }

    #[test]
    fn test_combination_count() {
        let pool: Vec<u8> = (1..=7).collect();
        let mut count = 0;
        for_each_combination(&pool, 5, |_| count += 1);
        assert_eq!(count, 21); // C(7,5)
    }

    #[test]
    fn test_pool_smaller_than_draw_is_empty_report() {
        let scores = vec![0.5; UNIVERSE_SIZE];
        let report = rank_pool(&[10, 20, 30], &scores, &rules());
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.approved, 0);
        assert!(report.ranked.is_empty());
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let mut scores = vec![0.0; UNIVERSE_SIZE];
        // pool pequeno com jogos válidos de scores distintos
        for &n in &[5u8, 18, 30, 44, 59, 70] {
            scores[(n - 1) as usize] = n as f64 / 80.0;
        }
        let report = rank_pool(&[5, 18, 30, 44, 59, 70], &scores, &rules());
        assert!(report.approved > 1);
        for pair in report.ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_highest_scored_number_ranks_first() {
        // dezena 80 com score máximo: o candidato que a contém fica à frente
        // do idêntico com a substituta de score menor
        let mut scores = vec![0.0; UNIVERSE_SIZE];
        for n in 1..=18u8 {
            scores[(n - 1) as usize] = 0.05;
        }
        for n in 21..=26u8 {
            scores[(n - 1) as usize] = 0.05;
        }
        for &n in &[19u8, 30, 40, 50] {
            scores[(n - 1) as usize] = 0.5;
        }
        scores[59] = 0.1; // dezena 60
        scores[79] = 1.0; // dezena 80

        let report = evaluate_candidates(&scores, &rules());
        assert_eq!(report.pool.len(), POOL_SIZE);

        let with_max = [19u8, 30, 40, 50, 80];
        let with_sub = [19u8, 30, 40, 50, 60];
        let pos_max = report.ranked.iter().position(|g| g.numbers == with_max);
        let pos_sub = report.ranked.iter().position(|g| g.numbers == with_sub);
        let (pos_max, pos_sub) = (pos_max.unwrap(), pos_sub.unwrap());
        assert!(pos_max < pos_sub, "80 em {pos_max}, substituta em {pos_sub}");
    }

    #[test]
    fn test_full_pool_evaluates_all_combinations() {
        let mut scores = vec![0.1; UNIVERSE_SIZE];
        for n in 26..=55usize {
            scores[n - 1] = 0.9;
        }
        let report = evaluate_candidates(&scores, &rules());
        assert_eq!(report.pool, (26..=55).collect::<Vec<u8>>());
        assert_eq!(report.evaluated, 142_506); // C(30,5)
        assert_eq!(report.approved, report.ranked.len());
    }

    #[test]
    fn test_constant_history_yields_empty_ranking() {
        use quina_data::loader::load_history;
        use std::io::Write;

        let line = "1;2024-01-01;1;2;3;4;5\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(line.repeat(25).as_bytes()).unwrap();
        file.flush().unwrap();

        let (draws, _) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 25);
        assert!(draws.iter().all(|d| d.numbers == vec![1, 2, 3, 4, 5]));

        // score alto só nas dezenas vistas; o jogo derivado soma 15 < 120
        let mut scores = vec![0.0; UNIVERSE_SIZE];
        for &n in &draws[0].numbers {
            scores[(n - 1) as usize] = 1.0;
        }
        let report = rank_pool(&draws[0].numbers, &scores, &rules());
        assert_eq!(report.evaluated, 1);
        assert_eq!(report.approved, 0);
        assert!(report.ranked.is_empty());
    }
}
