use crate::model::*;

const PROFILES: &'static [u8] = b"profiles";
const BOOKINGS: &'static [u8] = b"bookings";

/// Composite booking key: `<user>#<id>`, so a user's bookings share a key
/// prefix.
fn booking_key(user: &str, id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(user.len() + 1 + id.len());
    key.extend_from_slice(user.as_bytes());
    key.push(b'#');
    key.extend_from_slice(id.as_bytes());
    key
}

/// Outcome of a profile create. Registration never overwrites an existing
/// credential.
#[derive(Debug, PartialEq)]
pub enum ProfileCreate {
    Created,
    AlreadyExists,
}

pub trait ProfileDb {
    type Error;
    fn create_profile(&self, profile: &Profile) -> Result<ProfileCreate, Self::Error>;
    fn get_profile(&self, email: &str) -> Result<Option<Profile>, Self::Error>;
    fn verify_profile(&self, email: &str, password_hash: &str) -> Result<bool, Self::Error>;
}

impl ProfileDb for sled::Db {
    type Error = sled::Error;

    fn create_profile(&self, profile: &Profile) -> sled::Result<ProfileCreate> {
        let profiles = self.open_tree(PROFILES)?;
        let value = bincode::serialize(profile).unwrap();
        match profiles.compare_and_swap(
            profile.email.as_bytes(),
            None as Option<&[u8]>,
            Some(value),
        )? {
            Ok(()) => Ok(ProfileCreate::Created),
            Err(_) => Ok(ProfileCreate::AlreadyExists),
        }
    }

    fn get_profile(&self, email: &str) -> sled::Result<Option<Profile>> {
        let profiles = self.open_tree(PROFILES)?;
        Ok(profiles
            .get(email.as_bytes())?
            .map(|d| bincode::deserialize(&d).unwrap()))
    }

    fn verify_profile(&self, email: &str, password_hash: &str) -> sled::Result<bool> {
        Ok(match self.get_profile(email)? {
            Some(profile) => profile.password_hash == password_hash,
            None => false,
        })
    }
}

pub trait BookingDb {
    type Error;
    fn put_booking(&self, booking: &Booking) -> Result<(), Self::Error>;
}

impl BookingDb for sled::Db {
    type Error = sled::Error;

    fn put_booking(&self, booking: &Booking) -> sled::Result<()> {
        let bookings = self.open_tree(BOOKINGS)?;
        bookings.insert(
            booking_key(&booking.user, &booking.id),
            bincode::serialize(booking).unwrap(),
        )?;
        Ok(())
    }
}
