//! Map type backing sparse lookups such as module address overrides.
//!
//! The hasher is picked by cargo feature; with conflicting or no hash
//! features the std `HashMap` is used.

#[cfg(all(
    feature = "rustc-hash",
    not(any(feature = "ahash", feature = "std-hash"))
))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(all(
    feature = "ahash",
    not(any(feature = "rustc-hash", feature = "std-hash"))
))]
pub type FastMap<K, V> = ahash::AHashMap<K, V>;

#[cfg(any(
    all(
        not(feature = "rustc-hash"),
        not(feature = "ahash"),
        not(feature = "std-hash")
    ),
    feature = "std-hash",
    all(feature = "rustc-hash", feature = "ahash"),
))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
