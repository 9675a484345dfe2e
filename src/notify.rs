use crate::model::Booking;
use log::info;

pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

/// Fire-and-forget delivery of a booking confirmation. Callers log and
/// discard any error; finalizing a booking never depends on delivery.
pub trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, booking: &Booking) -> Result<(), NotifyError>;
}

/// Simulated email channel: formats the confirmation message and writes it
/// to the log.
pub struct MockEmailer;

pub fn confirmation_message(booking: &Booking) -> String {
    format!(
        "Booking confirmed for {}\nSeat: {}, Date: {}, Time: {}\nBooking ID: {}",
        booking.movie, booking.seat, booking.date, booking.time, booking.id
    )
}

impl Notifier for MockEmailer {
    fn notify(&self, recipient: &str, booking: &Booking) -> Result<(), NotifyError> {
        info!(
            "[MOCK EMAIL] Sent to {}:\n{}",
            recipient,
            confirmation_message(booking)
        );
        Ok(())
    }
}

/// Test double that records deliveries (or refuses them), shared through a
/// handle so tests keep access after the app takes ownership.
#[cfg(test)]
#[derive(Clone)]
pub struct RecordingNotifier {
    sent: std::sync::Arc<std::sync::Mutex<Vec<(String, Booking)>>>,
    fail: bool,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        RecordingNotifier {
            sent: Default::default(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        RecordingNotifier {
            sent: Default::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, Booking)> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, recipient: &str, booking: &Booking) -> Result<(), NotifyError> {
        if self.fail {
            return Err("channel unreachable".into());
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_owned(), booking.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PendingBooking;

    #[test]
    fn message_follows_the_fixed_template() {
        let booking = Booking::finalize(
            PendingBooking {
                movie: "Example Movie".to_owned(),
                seat: "A1".to_owned(),
                date: "2024-01-01".to_owned(),
                time: "18:00".to_owned(),
            },
            "a@x.com",
        );
        let message = confirmation_message(&booking);
        assert!(message.starts_with("Booking confirmed for Example Movie\n"));
        assert!(message.contains("Seat: A1, Date: 2024-01-01, Time: 18:00"));
        assert!(message.ends_with(&format!("Booking ID: {}", booking.id)));
    }
}
