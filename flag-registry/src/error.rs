use num_bigint::BigInt;

/// Crate-wide result type.
pub type Result<T, E = FlagError> = std::result::Result<T, E>;

/// Represents all possible errors that can occur when building or transforming flags.
///
/// Lookups (`FlagRegistry::get`, `Flag::has`) never produce one of these; only
/// construction, combination, parsing and the `add`/`remove` transforms do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    /// The candidate bitmask is below zero.
    #[error("Negative flag value: {0}")]
    NegativeValue(BigInt),
    /// The candidate bitmask has bits set that the registry does not know about.
    #[error("Unknown flags in value: {0}")]
    UnknownFlags(BigInt),
    /// A flag name was used that is not registered.
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
    /// The text is not an integer literal in the given radix.
    #[error("Cannot parse {input:?} as an integer in radix {radix}")]
    Unparseable { input: String, radix: u32 },
    /// The radix is outside of `MIN_RADIX..=MAX_RADIX`.
    #[error("Invalid radix: {0}")]
    InvalidRadix(u32),
}
