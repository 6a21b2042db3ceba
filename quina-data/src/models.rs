use anyhow::{bail, Result};

/// Maior dezena sorteável na Quina.
pub const UNIVERSE_SIZE: usize = 80;

/// Quantidade de dezenas de uma aposta simples.
pub const DRAW_SIZE: usize = 5;

/// Quantidade de concursos usada como contexto pelos modelos.
pub const WINDOW_SIZE: usize = 20;

/// Um concurso do histórico. As dezenas ficam sempre em ordem crescente;
/// podem ser mais de 5 quando a linha de origem trouxe campos extras válidos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub draw_id: String,
    pub date: String,
    pub numbers: Vec<u8>,
}

impl Draw {
    pub fn new(draw_id: String, date: String, mut numbers: Vec<u8>) -> Result<Self> {
        numbers.sort_unstable();
        validate_numbers(&numbers)?;
        Ok(Self { draw_id, date, numbers })
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub gap: u32,
}

#[derive(Debug, Clone)]
pub struct NumberProbability {
    pub number: u8,
    pub probability: f64,
    pub tag: ProbabilityTag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for ProbabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbabilityTag::Hot => write!(f, "QUENTE"),
            ProbabilityTag::Cold => write!(f, "FRIO"),
            ProbabilityTag::Normal => write!(f, "-"),
        }
    }
}

pub fn validate_numbers(numbers: &[u8]) -> Result<()> {
    if numbers.len() < DRAW_SIZE {
        bail!(
            "Apenas {} dezenas válidas (mínimo {})",
            numbers.len(),
            DRAW_SIZE
        );
    }
    for &n in numbers {
        if n < 1 || n as usize > UNIVERSE_SIZE {
            bail!("Dezena {} fora do intervalo (1-{})", n, UNIVERSE_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Dezena em duplicidade: {}", numbers[i]);
            }
        }
    }
    Ok(())
}
