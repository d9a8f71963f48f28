//! Utilitários para exibir segredos e códigos em logs sem vazá-los

/// Trunca uma string sem cortar no meio de um caractere UTF-8
///
/// # Exemplo
/// ```
/// use linear_auth_middleware::utils::string_utils::truncate_safe;
///
/// assert_eq!(truncate_safe("lin_api_é", 9), "lin_api_");
/// ```
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Mascara um segredo para log: prefixo curto + tamanho total
///
/// Segredos com até 8 bytes são totalmente ocultados.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() <= 8 {
        return format!("***({} chars)", secret.chars().count());
    }

    format!(
        "{}...({} chars)",
        truncate_safe(secret, 4),
        secret.chars().count()
    )
}
