use std::collections::hash_map::Entry;
use std::collections::HashMap;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::{
    error::{FlagError, Result},
    flag::Flag,
    input::FlagInput,
};

/// The vocabulary of flag names and the bit assigned to each of them.
///
/// Bits are assigned by position: the i-th distinct name (in first-seen order)
/// receives `2^i`. The registry never changes after [`FlagRegistry::build`], so it can
/// be shared freely between any number of [`Flag`] values and threads.
///
/// ```rust
/// use flag_registry::FlagRegistry;
///
/// let registry = FlagRegistry::build(["READ", "WRITE", "EXEC", "READ"]);
/// assert_eq!(registry.keys().collect::<Vec<_>>(), ["READ", "WRITE", "EXEC"]);
///
/// let flags = registry.combine(["READ", "EXEC"]).unwrap();
/// assert_eq!(flags.to_string(), "Flag([READ+EXEC]: 5)");
/// ```
#[derive(Debug, Default)]
pub struct FlagRegistry {
    /// Registered names and their bit, in assignment order.
    flags: Vec<(String, BigUint)>,
    /// Position of every name inside `flags`.
    index: HashMap<String, usize>,
    /// Union of every registered bit.
    known_bits: BigUint,
}

impl FlagRegistry {
    /// Builds a registry from an ordered list of names.
    ///
    /// Duplicates are dropped, keeping the first occurrence. An empty list is valid and
    /// yields a registry that can only produce the empty value.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags: Vec<(String, BigUint)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut known_bits = BigUint::zero();
        let mut duplicates = 0usize;

        for name in names {
            match index.entry(name.into()) {
                Entry::Occupied(_) => duplicates += 1,
                Entry::Vacant(slot) => {
                    let position = flags.len();
                    let bit = BigUint::one() << position;
                    known_bits |= &bit;
                    flags.push((slot.key().clone(), bit));
                    slot.insert(position);
                }
            }
        }

        tracing::debug!(flags = flags.len(), duplicates, "Built flag registry");

        FlagRegistry {
            flags,
            index,
            known_bits,
        }
    }

    /// Returns the bit of a registered name, or `None` when the name is unknown.
    pub fn get(&self, name: &str) -> Option<&BigUint> {
        self.index.get(name).map(|&position| &self.flags[position].1)
    }

    /// Same as [`FlagRegistry::get`], but an unknown name is an error.
    pub(crate) fn require(&self, name: &str) -> Result<&BigUint> {
        self.get(name)
            .ok_or_else(|| FlagError::UnknownFlag(name.to_string()))
    }

    /// Checks whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Union of every registered bit.
    pub fn known_bits(&self) -> &BigUint {
        &self.known_bits
    }

    /// Registered names in assignment order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.flags.iter().map(|(name, _)| name.as_str())
    }

    /// Registered bits in assignment order.
    pub fn values(&self) -> impl Iterator<Item = &BigUint> + Clone + '_ {
        self.flags.iter().map(|(_, bit)| bit)
    }

    /// Name and bit pairs in assignment order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BigUint)> + Clone + '_ {
        self.flags.iter().map(|(name, bit)| (name.as_str(), bit))
    }

    /// A value with no flag set.
    pub fn empty(&self) -> Flag<'_> {
        Flag::empty_in(self)
    }

    /// A value with every registered flag set.
    pub fn all(&self) -> Flag<'_> {
        Flag::with_known_bits(self, self.known_bits.clone())
    }

    /// Combines the given names into a single value.
    ///
    /// Every name must be registered; the first unknown one fails the whole call.
    /// Combining no names yields the empty value.
    pub fn combine<I, S>(&self, names: I) -> Result<Flag<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bits = BigUint::zero();
        for name in names {
            bits |= self.require(name.as_ref())?;
        }
        Flag::from_bits(self, bits)
    }

    /// Builds a value from a raw integer or integer text.
    ///
    /// The parsed bitmask is validated like any other value, so parsing never lets
    /// negative values or unknown bits through.
    ///
    /// ```rust
    /// use flag_registry::{FlagInput, FlagRegistry};
    ///
    /// let registry = FlagRegistry::build(["A", "B", "C", "D"]);
    /// assert_eq!(registry.parse(5u8).unwrap().alias(), "[A+C]");
    /// assert_eq!(registry.parse(FlagInput::text_radix("1100", 2)).unwrap().alias(), "[C+D]");
    /// ```
    pub fn parse<'a>(&self, input: impl Into<FlagInput<'a>>) -> Result<Flag<'_>> {
        let value = input.into().into_big_int()?;
        Flag::new(self, value)
    }

    /// Builds a value from a native integer.
    pub fn parse_int(&self, value: impl Into<i128>) -> Result<Flag<'_>> {
        self.parse(FlagInput::Int(value.into()))
    }

    /// Builds a value from an arbitrary-precision integer.
    pub fn parse_big_int(&self, value: BigInt) -> Result<Flag<'_>> {
        self.parse(FlagInput::BigInt(value))
    }

    /// Builds a value from integer text in `radix` (10 when `None`).
    pub fn parse_text(&self, text: &str, radix: Option<u32>) -> Result<Flag<'_>> {
        self.parse(FlagInput::Text {
            text: text.into(),
            radix,
        })
    }
}
