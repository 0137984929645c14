//! Identifier generation for todo records.
//!
//! # Responsibility
//! - Produce short, probabilistically-unique record identifiers.
//!
//! # Invariants
//! - Generated tokens are exactly `ID_LEN` lowercase base36 characters.
//! - No collision detection or retry: at this collection scale the
//!   collision probability is accepted, not handled.

use uuid::Uuid;

/// Stable identifier for a todo record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = String;

/// Length of a generated identifier token.
pub const ID_LEN: usize = 8;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns a fresh short identifier token.
///
/// Entropy is drawn from the process random source through `Uuid::new_v4`
/// and folded into `ID_LEN` base36 digits. The token is not
/// cryptographically meaningful and carries no ordering.
pub fn new_id() -> TodoId {
    let mut value = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        token.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    token
}

#[cfg(test)]
mod tests {
    use super::{new_id, ID_LEN};
    use std::collections::HashSet;

    #[test]
    fn token_is_fixed_length_lowercase_base36() {
        for _ in 0..64 {
            let id = new_id();
            assert_eq!(id.len(), ID_LEN);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn tokens_do_not_repeat_in_a_small_sample() {
        let ids: HashSet<_> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
