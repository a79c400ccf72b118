// src/common/security.rs

use subtle::ConstantTimeEq;

/// Compara usuário/senha do Basic Auth sem curto-circuito byte a byte.
/// Tamanhos diferentes já saem como `false` (o tamanho não é segredo aqui).
pub fn credentials_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    provided.len() == expected.len() && bool::from(provided.ct_eq(expected))
}
