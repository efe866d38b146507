/// Normalize a user-entered token symbol to its canonical form.
///
/// Symbols are compared upper-case everywhere: holdings, quote maps and the
/// coin registry all key on the result of this function.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("eth"), "ETH");
        assert_eq!(normalize_symbol("  Degen "), "DEGEN");
        assert_eq!(normalize_symbol(""), "");
    }
}
