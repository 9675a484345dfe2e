use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Persisted user record, keyed by email.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub email: String,
    pub password_hash: String,
}

/// Booking draft held in the session between the booking form and payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PendingBooking {
    pub movie: String,
    pub seat: String,
    pub date: String,
    pub time: String,
}

/// Finalized booking, written once on successful payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Booking {
    pub movie: String,
    pub seat: String,
    pub date: String,
    pub time: String,
    pub user: String,
    pub id: String,
    pub created_at: String,
}

impl Booking {
    /// Turn a draft into a finalized booking for `user`, stamping the
    /// generated id and creation time. The id is 8 random hex characters;
    /// uniqueness against existing records is not checked.
    pub fn finalize(draft: PendingBooking, user: &str) -> Booking {
        let mut id = uuid::Uuid::new_v4().to_simple().to_string();
        id.truncate(8);
        Booking {
            movie: draft.movie,
            seat: draft.seat,
            date: draft.date,
            time: draft.time,
            user: user.to_owned(),
            id,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Catalog entry. The catalog is static configuration, so entries borrow
/// from the binary.
#[derive(Serialize, Debug, Clone)]
pub struct Movie {
    pub title: &'static str,
    pub genre: &'static str,
    pub poster: &'static str,
    pub duration: &'static str,
    pub rating: &'static str,
    pub synopsis: &'static str,
}

/// Unsalted SHA-256 hex digest of the plaintext password. Weak by modern
/// standards but fixed: stored credentials were produced by this exact
/// digest.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PendingBooking {
        PendingBooking {
            movie: "Example Movie".to_owned(),
            seat: "A1".to_owned(),
            date: "2024-01-01".to_owned(),
            time: "18:00".to_owned(),
        }
    }

    #[test]
    fn hash_password_is_the_sha256_hex_digest() {
        assert_eq!(hash_password("pw1").len(), 64);
        assert!(hash_password("pw1").chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic, no per-user salt.
        assert_eq!(hash_password("pw1"), hash_password("pw1"));
        assert_ne!(hash_password("pw1"), hash_password("pw2"));
    }

    #[test]
    fn finalize_stamps_id_and_carries_draft_fields() {
        let booking = Booking::finalize(draft(), "a@x.com");
        assert_eq!(booking.id.len(), 8);
        assert!(booking.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(booking.user, "a@x.com");
        assert_eq!(booking.movie, "Example Movie");
        assert_eq!(booking.seat, "A1");
        assert_eq!(booking.date, "2024-01-01");
        assert_eq!(booking.time, "18:00");
        assert!(!booking.created_at.is_empty());
    }

    #[test]
    fn finalize_generates_distinct_ids() {
        let first = Booking::finalize(draft(), "a@x.com");
        let second = Booking::finalize(draft(), "a@x.com");
        assert_ne!(first.id, second.id);
    }
}
