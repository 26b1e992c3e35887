//! Validação de documentos e contatos brasileiros.
//!
//! CPF e CNS são validados pelos seus dígitos verificadores; telefone e CEP
//! pelo formato. As funções devolvem o valor normalizado (somente dígitos)
//! para que comparação e armazenamento usem sempre a mesma forma.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CPF inválido")]
    Cpf,
    #[error("CNS inválido")]
    Cns,
    #[error("telefone inválido: deve conter 10 ou 11 dígitos (DDD + número)")]
    Telefone,
    #[error("CEP inválido: use o formato 00000-000")]
    Cep,
    #[error("estado inválido: use a sigla de 2 letras (UF)")]
    Estado,
}

/// Remove tudo que não for dígito decimal.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Valida um CPF e devolve os 11 dígitos limpos.
///
/// Os dois últimos dígitos são verificadores: cada um é o resto módulo 11
/// (reduzido módulo 10) da soma ponderada dos dígitos anteriores. Sequências
/// com todos os dígitos iguais passam na conta mas não são CPFs emitidos.
pub fn validate_cpf(cpf: &str) -> Result<String, ValidationError> {
    let cleaned = only_digits(cpf);
    if cleaned.len() != 11 {
        return Err(ValidationError::Cpf);
    }
    let digits: Vec<u32> = cleaned.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err(ValidationError::Cpf);
    }

    let dv = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };

    if dv(9) != digits[9] || dv(10) != digits[10] {
        return Err(ValidationError::Cpf);
    }
    Ok(cleaned)
}

/// Valida um CNS (Cartão Nacional de Saúde) e devolve os 15 dígitos limpos.
///
/// Números definitivos começam com 1 ou 2, provisórios com 7, 8 ou 9. Em
/// ambos os casos a soma dos dígitos ponderada por 15..1 deve ser múltipla
/// de 11.
pub fn validate_cns(cns: &str) -> Result<String, ValidationError> {
    let cleaned = only_digits(cns);
    if cleaned.len() != 15 {
        return Err(ValidationError::Cns);
    }
    if !matches!(cleaned.as_bytes()[0], b'1' | b'2' | b'7' | b'8' | b'9') {
        return Err(ValidationError::Cns);
    }
    let sum: u32 = cleaned
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| d * (15 - i as u32))
        .sum();
    if sum % 11 != 0 {
        return Err(ValidationError::Cns);
    }
    Ok(cleaned)
}

/// Valida e normaliza um telefone brasileiro com DDD.
///
/// Fixo: 10 dígitos, primeiro dígito do número entre 2 e 5.
/// Celular: 11 dígitos, primeiro dígito do número igual a 9.
pub fn validate_telefone(telefone: &str) -> Result<String, ValidationError> {
    let cleaned = only_digits(telefone);
    match cleaned.len() {
        10 if matches!(cleaned.as_bytes()[2], b'2'..=b'5') => Ok(cleaned),
        11 if cleaned.as_bytes()[2] == b'9' => Ok(cleaned),
        _ => Err(ValidationError::Telefone),
    }
}

/// Valida a sigla de estado (UF) e devolve as 2 letras em maiúsculas.
pub fn validate_estado(estado: &str) -> Result<String, ValidationError> {
    let bytes = estado.as_bytes();
    if bytes.len() == 2 && bytes.iter().all(u8::is_ascii_alphabetic) {
        Ok(estado.to_ascii_uppercase())
    } else {
        Err(ValidationError::Estado)
    }
}

/// Verifica o formato `00000-000` de um CEP.
pub fn validate_cep(cep: &str) -> Result<(), ValidationError> {
    let bytes = cep.as_bytes();
    let ok = bytes.len() == 9
        && bytes[5] == b'-'
        && bytes[..5].iter().all(u8::is_ascii_digit)
        && bytes[6..].iter().all(u8::is_ascii_digit);
    if ok { Ok(()) } else { Err(ValidationError::Cep) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_digits() {
        assert_eq!(only_digits("(11) 98765-4321"), "11987654321");
        assert_eq!(only_digits("111.444.777-35"), "11144477735");
        assert_eq!(only_digits("abc"), "");
    }

    #[test]
    fn test_cpf_valido() {
        assert_eq!(validate_cpf("11144477735").unwrap(), "11144477735");
        assert_eq!(validate_cpf("529.982.247-25").unwrap(), "52998224725");
    }

    #[test]
    fn test_cpf_digito_verificador_errado() {
        assert_eq!(validate_cpf("11144477734"), Err(ValidationError::Cpf));
        assert_eq!(validate_cpf("11144477725"), Err(ValidationError::Cpf));
    }

    #[test]
    fn test_cpf_tamanho_errado() {
        assert_eq!(validate_cpf("1114447773"), Err(ValidationError::Cpf));
        assert_eq!(validate_cpf(""), Err(ValidationError::Cpf));
    }

    #[test]
    fn test_cpf_digitos_repetidos() {
        assert_eq!(validate_cpf("00000000000"), Err(ValidationError::Cpf));
        assert_eq!(validate_cpf("11111111111"), Err(ValidationError::Cpf));
    }

    #[test]
    fn test_cns_valido() {
        // soma ponderada 110 e 22, ambas múltiplas de 11
        assert_eq!(validate_cns("700000000000005").unwrap(), "700000000000005");
        assert_eq!(validate_cns("100000000000007").unwrap(), "100000000000007");
        assert_eq!(
            validate_cns("700 0000 0000 0005").unwrap(),
            "700000000000005"
        );
    }

    #[test]
    fn test_cns_invalido() {
        assert_eq!(validate_cns("700000000000001"), Err(ValidationError::Cns));
        // dígito inicial fora de {1, 2, 7, 8, 9}
        assert_eq!(validate_cns("300000000000000"), Err(ValidationError::Cns));
        assert_eq!(validate_cns("70000000000000"), Err(ValidationError::Cns));
    }

    #[test]
    fn test_telefone_fixo() {
        for ddd_seguinte in ['2', '3', '4', '5'] {
            let numero = format!("11{ddd_seguinte}2345678");
            assert_eq!(validate_telefone(&numero).unwrap(), numero);
        }
        assert_eq!(validate_telefone("1112345678"), Err(ValidationError::Telefone));
        assert_eq!(validate_telefone("1162345678"), Err(ValidationError::Telefone));
    }

    #[test]
    fn test_telefone_celular() {
        assert_eq!(
            validate_telefone("(11) 98765-4321").unwrap(),
            "11987654321"
        );
        // 11 dígitos sem o 9 depois do DDD
        assert_eq!(
            validate_telefone("11887654321"),
            Err(ValidationError::Telefone)
        );
    }

    #[test]
    fn test_telefone_tamanho_errado() {
        assert_eq!(validate_telefone("119876543"), Err(ValidationError::Telefone));
        assert_eq!(
            validate_telefone("119876543210"),
            Err(ValidationError::Telefone)
        );
        assert_eq!(validate_telefone(""), Err(ValidationError::Telefone));
    }

    #[test]
    fn test_estado() {
        assert_eq!(validate_estado("SP").unwrap(), "SP");
        assert_eq!(validate_estado("rj").unwrap(), "RJ");
        assert_eq!(validate_estado("SAOPAULO"), Err(ValidationError::Estado));
        assert_eq!(validate_estado("S"), Err(ValidationError::Estado));
        assert_eq!(validate_estado("S1"), Err(ValidationError::Estado));
        assert_eq!(validate_estado(""), Err(ValidationError::Estado));
    }

    #[test]
    fn test_cep() {
        assert_eq!(validate_cep("12345-678"), Ok(()));
        assert_eq!(validate_cep("12345678"), Err(ValidationError::Cep));
        assert_eq!(validate_cep("1234-5678"), Err(ValidationError::Cep));
        assert_eq!(validate_cep("abcde-fgh"), Err(ValidationError::Cep));
    }
}
