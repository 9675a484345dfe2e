use crate::model::{Booking, PendingBooking};
use actix_session::Session;
use actix_web::Error;

const PENDING_BOOKING: &str = "pending_booking";
const LAST_BOOKING: &str = "last_booking";

/// Typed view of the booking flow state kept in the session cookie. The
/// authenticated identity itself lives in the identity cookie, not here.
pub trait BookingFlow {
    /// Draft captured by the booking form, present only until payment
    /// completes.
    fn pending_booking(&self) -> Option<PendingBooking>;
    fn set_pending_booking(&self, draft: &PendingBooking) -> Result<(), Error>;
    fn clear_pending_booking(&self);
    /// Most recently finalized booking, used to render the confirmation
    /// page. Overwritten by each new finalization.
    fn last_booking(&self) -> Option<Booking>;
    fn set_last_booking(&self, booking: &Booking) -> Result<(), Error>;
}

impl BookingFlow for Session {
    fn pending_booking(&self) -> Option<PendingBooking> {
        // A tampered or unreadable cookie reads as "no draft" and lands in
        // the login redirect like any other missing precondition.
        self.get(PENDING_BOOKING).ok().flatten()
    }

    fn set_pending_booking(&self, draft: &PendingBooking) -> Result<(), Error> {
        self.set(PENDING_BOOKING, draft)
    }

    fn clear_pending_booking(&self) {
        self.remove(PENDING_BOOKING);
    }

    fn last_booking(&self) -> Option<Booking> {
        self.get(LAST_BOOKING).ok().flatten()
    }

    fn set_last_booking(&self, booking: &Booking) -> Result<(), Error> {
        self.set(LAST_BOOKING, booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::UserSession;
    use actix_web::test;

    fn draft() -> PendingBooking {
        PendingBooking {
            movie: "Example Movie".to_owned(),
            seat: "A1".to_owned(),
            date: "2024-01-01".to_owned(),
            time: "18:00".to_owned(),
        }
    }

    #[test]
    fn draft_roundtrips_and_clears() {
        let mut req = test::TestRequest::default().to_http_request();
        let session = req.get_session();

        assert_eq!(session.pending_booking(), None);
        session.set_pending_booking(&draft()).unwrap();
        assert_eq!(session.pending_booking(), Some(draft()));
        session.clear_pending_booking();
        assert_eq!(session.pending_booking(), None);
    }

    #[test]
    fn last_booking_is_overwritten() {
        let mut req = test::TestRequest::default().to_http_request();
        let session = req.get_session();

        assert_eq!(session.last_booking(), None);
        let first = Booking::finalize(draft(), "a@x.com");
        session.set_last_booking(&first).unwrap();
        assert_eq!(session.last_booking(), Some(first));

        let second = Booking::finalize(draft(), "a@x.com");
        session.set_last_booking(&second).unwrap();
        assert_eq!(session.last_booking(), Some(second));
    }

    #[test]
    fn clear_drops_every_flow_key() {
        let mut req = test::TestRequest::default().to_http_request();
        let session = req.get_session();

        session.set_pending_booking(&draft()).unwrap();
        session
            .set_last_booking(&Booking::finalize(draft(), "a@x.com"))
            .unwrap();
        session.clear();
        assert_eq!(session.pending_booking(), None);
        assert_eq!(session.last_booking(), None);
    }
}
