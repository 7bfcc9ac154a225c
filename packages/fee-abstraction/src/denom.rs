/// Number of decimals of the native token on the EVM side (wei-like base units)
pub const EVM_NATIVE_DECIMALS: u8 = 18;

/// The largest number of decimals a fee token may declare. Amounts are scaled by `10^decimals`,
/// so this keeps the conversion math inside 256 bits.
pub const MAX_FEE_TOKEN_DECIMALS: u8 = 18;

/// Whether the string is a well-formed coin denom: a letter followed by 2 to 127 characters out of
/// `[a-zA-Z0-9/:._-]`.
pub fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => (),
        _ => return false,
    }

    let rest = denom.len() - 1;
    if !(2..=127).contains(&rest) {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}
