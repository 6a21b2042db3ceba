use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Draw, DRAW_SIZE, UNIVERSE_SIZE};

/// Resultado da avaliação de um campo numérico de uma linha do histórico.
/// Campos descartados nunca invalidam a linha sozinhos; a linha só cai se
/// sobrarem menos de 5 dezenas válidas.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Accepted(u8),
    /// Campo não numérico (cabeçalho residual, texto, vazio).
    NotNumeric(String),
    /// Número fora do intervalo 1-80.
    OutOfRange(i64),
    /// Dezena já vista na mesma linha.
    Duplicate(u8),
}

pub fn classify_field(raw: &str, seen: &[u8]) -> FieldOutcome {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => return FieldOutcome::NotNumeric(trimmed.to_string()),
    };
    if value < 1 || value > UNIVERSE_SIZE as i64 {
        return FieldOutcome::OutOfRange(value);
    }
    let number = value as u8;
    if seen.contains(&number) {
        return FieldOutcome::Duplicate(number);
    }
    FieldOutcome::Accepted(number)
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub lines_read: u32,
    pub draws_loaded: u32,
    pub lines_skipped: u32,
    pub fields_skipped: u32,
}

/// Carrega o histórico de concursos de um arquivo separado por `;`.
/// Campo 0 = número do concurso, campo 1 = data, demais campos = dezenas.
/// As linhas vêm do mais antigo para o mais recente e essa ordem é preservada.
pub fn load_history(path: &Path) -> Result<(Vec<Draw>, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Não foi possível abrir o arquivo de histórico {:?}", path))?;

    let mut draws = Vec::new();
    let mut report = LoadReport::default();

    for record_result in reader.records() {
        report.lines_read += 1;
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Linha {}: erro de leitura: {}", report.lines_read, e);
                report.lines_skipped += 1;
                continue;
            }
        };

        let draw_id = record.get(0).map(str::trim).unwrap_or_default().to_string();
        let date = record.get(1).map(str::trim).unwrap_or_default().to_string();

        let mut numbers: Vec<u8> = Vec::new();
        for field in record.iter().skip(2) {
            match classify_field(field, &numbers) {
                FieldOutcome::Accepted(n) => numbers.push(n),
                outcome => {
                    log::debug!("Linha {}: campo descartado: {:?}", report.lines_read, outcome);
                    report.fields_skipped += 1;
                }
            }
        }

        if numbers.len() < DRAW_SIZE {
            log::warn!(
                "Linha {}: apenas {} dezenas válidas, ignorada",
                report.lines_read,
                numbers.len()
            );
            report.lines_skipped += 1;
            continue;
        }

        match Draw::new(draw_id, date, numbers) {
            Ok(draw) => {
                draws.push(draw);
                report.draws_loaded += 1;
            }
            Err(e) => {
                log::warn!("Linha {}: {}", report.lines_read, e);
                report.lines_skipped += 1;
            }
        }
    }

    Ok((draws, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_history(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_classify_field() {
        assert_eq!(classify_field(" 42 ", &[]), FieldOutcome::Accepted(42));
        assert_eq!(
            classify_field("abc", &[]),
            FieldOutcome::NotNumeric("abc".to_string())
        );
        assert_eq!(classify_field("0", &[]), FieldOutcome::OutOfRange(0));
        assert_eq!(classify_field("81", &[]), FieldOutcome::OutOfRange(81));
        assert_eq!(classify_field("7", &[7]), FieldOutcome::Duplicate(7));
    }

    #[test]
    fn test_load_valid_line_yields_sorted_draw() {
        let file = write_history("123;2024-03-10;77;3;40;12;58\n");
        let (draws, report) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].draw_id, "123");
        assert_eq!(draws[0].date, "2024-03-10");
        assert_eq!(draws[0].numbers, vec![3, 12, 40, 58, 77]);
        assert_eq!(report.draws_loaded, 1);
        assert_eq!(report.lines_skipped, 0);
    }

    #[test]
    fn test_load_skips_bad_fields_keeps_line() {
        // Campo textual e dezena fora do intervalo são descartados sem perder a linha
        let file = write_history("9;2024-01-05;5;abc;17;99;23;41;66\n");
        let (draws, report) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].numbers, vec![5, 17, 23, 41, 66]);
        assert_eq!(report.fields_skipped, 2);
    }

    #[test]
    fn test_load_line_with_too_few_numbers_is_skipped() {
        let file = write_history("1;2024-01-01;10;20;30\n2;2024-01-02;1;2;3;4;5\n");
        let (draws, report) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.lines_read, 2);
        assert_eq!(report.lines_skipped, 1);
    }

    #[test]
    fn test_load_deduplicates_repeated_fields() {
        let file = write_history("1;2024-01-01;4;4;8;15;16;23;42\n");
        let (draws, report) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].numbers, vec![4, 8, 15, 16, 23, 42]);
        assert_eq!(report.fields_skipped, 1);
    }

    #[test]
    fn test_load_keeps_extra_valid_numbers() {
        // Mais de 5 dezenas válidas: todas são mantidas, sem truncar
        let file = write_history("1;2024-01-01;10;20;30;40;50;60;70\n");
        let (draws, _) = load_history(file.path()).unwrap();
        assert_eq!(draws[0].numbers, vec![10, 20, 30, 40, 50, 60, 70]);
    }

    #[test]
    fn test_load_preserves_file_order() {
        let file = write_history(
            "1;2024-01-01;1;2;3;4;5\n2;2024-01-02;6;7;8;9;10\n3;2024-01-03;11;12;13;14;15\n",
        );
        let (draws, _) = load_history(file.path()).unwrap();
        let ids: Vec<&str> = draws.iter().map(|d| d.draw_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_history(Path::new("/tmp/quina-historico-inexistente.csv")).unwrap_err();
        assert!(err.to_string().contains("histórico"));
    }

    #[test]
    fn test_load_repeated_identical_lines() {
        let line = "1;2024-01-01;1;2;3;4;5\n";
        let file = write_history(&line.repeat(25));
        let (draws, report) = load_history(file.path()).unwrap();
        assert_eq!(draws.len(), 25);
        assert!(draws.iter().all(|d| d.numbers == vec![1, 2, 3, 4, 5]));
        assert_eq!(report.draws_loaded, 25);
    }
}
