//! # flag-registry
//!
//! `flag-registry` packs a fixed vocabulary of named boolean flags into a single
//! arbitrary-width bitmask.
//!
//! ## Features
//! - Bits assigned by name order, no upper limit on the number of flags
//! - Immutable values: `add`/`remove` return new values and leave the original alone
//! - Every value is validated against its registry, including parsed ones
//! - Readable labels such as `Flag([READ+EXEC]: 5)`
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! flag-registry = "0.1"
//! ```
//!
//! ### Example: Combining and Transforming Flags
//! ```rust
//! use flag_registry::{FlagError, FlagRegistry};
//!
//! let registry = FlagRegistry::build(["READ", "WRITE", "EXEC"]);
//!
//! let read_exec = registry.combine(["READ", "EXEC"]).unwrap();
//! assert_eq!(read_exec.alias(), "[READ+EXEC]");
//!
//! // Already set, so nothing changes.
//! let same = read_exec.add(["READ"]).unwrap();
//! assert!(std::ptr::eq(&*same, &read_exec));
//!
//! let exec = read_exec.remove(["READ"]).unwrap();
//! assert_eq!(exec.to_string(), "Flag([EXEC]: 4)");
//!
//! // Lookups are forgiving, transforms are not.
//! assert!(!exec.has("DELETE"));
//! assert_eq!(
//!     exec.add(["DELETE"]).unwrap_err(),
//!     FlagError::UnknownFlag("DELETE".to_string())
//! );
//!
//! let parsed = registry.parse(("110", 2)).unwrap();
//! assert_eq!(parsed.alias(), "[WRITE+EXEC]");
//! ```

pub mod error;
pub mod flag;
pub mod input;
pub mod registry;

pub use error::FlagError;
pub use flag::{Flag, EMPTY_ALIAS};
pub use input::{FlagInput, DEFAULT_RADIX, MAX_RADIX, MIN_RADIX};
pub use num_bigint::{BigInt, BigUint};
pub use registry::FlagRegistry;
