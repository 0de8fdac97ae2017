use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{
    error::{FlagError, Result},
    registry::FlagRegistry,
};

/// Alias of a value with no flag set.
pub const EMPTY_ALIAS: &str = "EMPTY_FLAG";

/// An immutable set of flags from a [`FlagRegistry`].
///
/// The bitmask is checked when the value is built and never changes afterwards:
/// [`Flag::add`] and [`Flag::remove`] hand back a new value, or `self` when the bitmask
/// would stay the same.
///
/// ```rust
/// use flag_registry::FlagRegistry;
///
/// let registry = FlagRegistry::build(["A", "B", "C", "D"]);
/// let flags = registry.combine(["A", "D"]).unwrap();
/// assert!(flags.has("D"));
/// assert!(!flags.has("NOPE"));
///
/// let flags = flags.add(["B"]).unwrap();
/// assert_eq!(flags.to_string(), "Flag([A+B+D]: 11)");
/// ```
#[derive(Clone)]
pub struct Flag<'r> {
    registry: &'r FlagRegistry,
    value: BigUint,
    /// Filled on first call to `alias`.
    alias: OnceLock<String>,
}

impl<'r> Flag<'r> {
    /// Builds a value bound to `registry`.
    ///
    /// Fails with [`FlagError::NegativeValue`] for values below zero and with
    /// [`FlagError::UnknownFlags`] when a bit is set that the registry does not know.
    pub fn new(registry: &'r FlagRegistry, value: impl Into<BigInt>) -> Result<Self> {
        let value = value.into();
        let Some(bits) = value.to_biguint() else {
            tracing::trace!(%value, "Rejected negative flag value");
            return Err(FlagError::NegativeValue(value));
        };
        Self::from_bits(registry, bits)
    }

    pub(crate) fn from_bits(registry: &'r FlagRegistry, value: BigUint) -> Result<Self> {
        if !contains(registry.known_bits(), &value) {
            tracing::trace!(%value, known = %registry.known_bits(), "Rejected unknown flags");
            return Err(FlagError::UnknownFlags(BigInt::from(value)));
        }
        Ok(Self::with_known_bits(registry, value))
    }

    /// Zero is valid for every registry.
    pub(crate) fn empty_in(registry: &'r FlagRegistry) -> Self {
        Self::with_known_bits(registry, BigUint::zero())
    }

    /// Caller guarantees `value` only holds bits of `registry`.
    pub(crate) fn with_known_bits(registry: &'r FlagRegistry, value: BigUint) -> Self {
        Flag {
            registry,
            value,
            alias: OnceLock::new(),
        }
    }

    /// The raw bitmask.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The registry this value is bound to.
    pub fn registry(&self) -> &'r FlagRegistry {
        self.registry
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_zero()
    }

    /// Checks whether `name` is set. Unknown names are simply not set.
    pub fn has(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .is_some_and(|bit| contains(&self.value, bit))
    }

    /// Names of the set flags in assignment order.
    pub fn names(&self) -> impl Iterator<Item = &'r str> + '_ {
        let registry: &'r FlagRegistry = self.registry;
        registry
            .entries()
            .filter(move |(_, bit)| contains(&self.value, bit))
            .map(|(name, _)| name)
    }

    /// Sets every flag in `names`.
    ///
    /// Every name must be registered, set or not. Returns `self` borrowed when all of
    /// them were already set.
    pub fn add<I, S>(&self, names: I) -> Result<Cow<'_, Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: Option<BigUint> = None;
        for name in names {
            let bit = self.registry.require(name.as_ref())?;
            if contains(next.as_ref().unwrap_or(&self.value), bit) {
                continue;
            }
            *next.get_or_insert_with(|| self.value.clone()) |= bit;
        }
        self.derive(next)
    }

    /// Clears every flag in `names`.
    ///
    /// Every name must be registered, set or not. Returns `self` borrowed when none of
    /// them were set.
    pub fn remove<I, S>(&self, names: I) -> Result<Cow<'_, Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: Option<BigUint> = None;
        for name in names {
            let bit = self.registry.require(name.as_ref())?;
            if !contains(next.as_ref().unwrap_or(&self.value), bit) {
                continue;
            }
            // bit is known to be set, so xor clears it
            *next.get_or_insert_with(|| self.value.clone()) ^= bit;
        }
        self.derive(next)
    }

    fn derive(&self, next: Option<BigUint>) -> Result<Cow<'_, Self>> {
        match next {
            Some(value) if value != self.value => {
                Ok(Cow::Owned(Self::from_bits(self.registry, value)?))
            }
            _ => Ok(Cow::Borrowed(self)),
        }
    }

    /// Human-readable label, e.g. `[A+B]`, or [`EMPTY_ALIAS`] for the empty value.
    pub fn alias(&self) -> &str {
        self.alias.get_or_init(|| render_alias(self.names()))
    }
}

/// `(value & bit) == bit`
fn contains(value: &BigUint, bit: &BigUint) -> bool {
    &(value & bit) == bit
}

fn render_alias<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        return EMPTY_ALIAS.to_string();
    }
    format!("[{}]", names.join("+"))
}

impl fmt::Display for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flag({}: {})", self.alias(), self.value)
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("alias", &self.alias())
            .field("value", &self.value)
            .finish()
    }
}

/// Values are equal when they share a registry and a bitmask.
impl PartialEq for Flag<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.value == other.value
    }
}

impl Eq for Flag<'_> {}

impl Hash for Flag<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_requires_every_bit() {
        let value = BigUint::from(0b1010u32);
        assert!(contains(&value, &BigUint::from(0b0010u32)));
        assert!(contains(&value, &BigUint::from(0b1010u32)));
        assert!(!contains(&value, &BigUint::from(0b0110u32)));
        assert!(contains(&value, &BigUint::zero()));
    }

    #[test]
    fn render_alias_brackets_and_joins() {
        assert_eq!(render_alias(std::iter::empty()), EMPTY_ALIAS);
        assert_eq!(render_alias(["A"].into_iter()), "[A]");
        assert_eq!(render_alias(["A", "B", "C"].into_iter()), "[A+B+C]");
    }

    #[test]
    fn alias_is_cached() {
        let registry = FlagRegistry::build(["A", "B"]);
        let flag = registry.combine(["B"]).unwrap();
        let first = flag.alias() as *const str;
        let second = flag.alias() as *const str;
        assert_eq!(first, second);
        assert_eq!(flag.alias(), "[B]");
    }

    #[test]
    fn flags_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlagRegistry>();
        assert_send_sync::<Flag<'static>>();
    }
}
