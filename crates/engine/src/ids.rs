//! Identifier capability.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces a new opaque identifier on every call.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random identifiers rendered as 32 lowercase hex characters.
///
/// All 128 bits come from the thread-local CSPRNG; no version or variant
/// bits are fixed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomHexIds;

impl IdGenerator for RandomHexIds {
    fn new_id(&self) -> String {
        let bytes: [u8; 16] = rand::random();
        Uuid::from_bytes(bytes).simple().to_string()
    }
}

/// Deterministic `id-1`, `id-2`, ... sequence. Local/test use only: two
/// processes sharing a store would hand out the same ids.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("id-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_32_hex_chars() {
        let id = RandomHexIds.new_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, RandomHexIds.new_id());
    }

    #[test]
    fn random_ids_do_not_pin_uuid_version_bits() {
        // A v4 generator would always put '4' at position 12.
        let all_fours = (0..64).all(|_| RandomHexIds.new_id().as_bytes()[12] == b'4');
        assert!(!all_fours);
    }

    #[test]
    fn sequential_ids_count_from_one() {
        let ids = SequentialIds::default();
        assert_eq!(ids.new_id(), "id-1");
        assert_eq!(ids.new_id(), "id-2");
    }
}
