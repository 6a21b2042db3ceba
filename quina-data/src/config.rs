use serde::{Deserialize, Serialize};

/// Regras de plausibilidade e conjuntos fixos usados pelas features e pelo
/// filtro de jogos. Imutável depois de construída; as funções puras recebem
/// uma referência em vez de ler globais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    pub min_soma: u32,
    pub max_soma: u32,
    pub min_pares: usize,
    pub max_pares: usize,
    pub min_amplitude: u8,
    /// Um jogo é rejeitado se alguma dezena de 10 (1-10, 11-20, ...) concentrar
    /// este número de dezenas ou mais.
    pub max_por_faixa: usize,
    pub primos: Vec<u8>,
    pub fibonacci: Vec<u8>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            min_soma: 120,
            max_soma: 290,
            min_pares: 1,
            max_pares: 4,
            min_amplitude: 20,
            max_por_faixa: 4,
            primos: vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79,
            ],
            fibonacci: vec![1, 2, 3, 5, 8, 13, 21, 34, 55],
        }
    }
}
