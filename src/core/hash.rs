//! Stable name hashing for storage keys
//!
//! Persistent values are keyed by a 32-bit hash of the owning component's
//! configured name, so the key is stable across restarts and distinct per
//! instance. FNV-1a is used: tiny, const-evaluable and good enough for a
//! handful of keys.

/// FNV-1a 32-bit offset basis
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a name into a stable 32-bit storage key
pub const fn fnv1a_hash(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
