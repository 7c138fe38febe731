//! Booking lifecycle notifications.
//!
//! Services enqueue `BookingEvent`s on an unbounded channel after their transaction
//! commits. A single worker task drains the channel and delivers each notification;
//! delivery is best-effort and never affects the booking that triggered it.

use sea_orm::DatabaseConnection;
use tokio::sync::mpsc;

use crate::server::{
    data::booking::BookingRepository, error::AppError, model::event::BookingEvent,
};

/// Sending half of the notification channel.
#[derive(Clone)]
pub struct EventDispatcher {
    sender: mpsc::UnboundedSender<BookingEvent>,
}

impl EventDispatcher {
    /// Creates a dispatcher and the receiver its events arrive on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BookingEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueues an event without waiting.
    ///
    /// A closed channel is logged and otherwise ignored.
    pub fn dispatch(&self, event: BookingEvent) {
        if let Err(e) = self.sender.send(event) {
            tracing::warn!(
                "Dropping {} notification for booking {}: {}",
                event.name(),
                event.booking_id(),
                e
            );
        }
    }
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Delivers the notification for one event.
    ///
    /// Loads the booking (including soft-deleted ones, since deletion emits a
    /// cancellation), its listing and both parties, then logs the message.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification delivered
    /// - `Ok(false)` - Booking no longer exists
    /// - `Err(AppError)` - Database error while loading details
    pub async fn deliver(&self, event: BookingEvent) -> Result<bool, AppError> {
        let Some(details) = BookingRepository::new(self.db)
            .find_for_notification(event.booking_id())
            .await?
        else {
            return Ok(false);
        };

        tracing::info!(
            event = event.name(),
            booking_id = %details.booking.id,
            guest = %details.guest.email,
            host = %details.host.email,
            listing = %details.listing.title,
            start_date = %details.booking.start_date,
            end_date = %details.booking.end_date,
            status = %details.booking.status,
            "Booking notification"
        );

        Ok(true)
    }
}

/// Drains the notification channel until every dispatcher is dropped.
pub async fn run_worker(
    db: DatabaseConnection,
    mut receiver: mpsc::UnboundedReceiver<BookingEvent>,
) {
    tracing::info!("Booking notification worker started");

    while let Some(event) = receiver.recv().await {
        if let Err(e) = NotificationService::new(&db).deliver(event).await {
            tracing::error!(
                "Failed to deliver {} notification for booking {}: {}",
                event.name(),
                event.booking_id(),
                e
            );
        }
    }

    tracing::info!("Booking notification worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{create_booking, helpers::create_booking_dependencies},
    };
    use uuid::Uuid;

    #[test]
    fn dispatch_to_closed_channel_does_not_panic() {
        let (events, receiver) = EventDispatcher::channel();
        drop(receiver);

        events.dispatch(BookingEvent::Created(Uuid::new_v4()));
    }

    #[test]
    fn dispatch_preserves_order() {
        let (events, mut receiver) = EventDispatcher::channel();
        let id = Uuid::new_v4();

        events.dispatch(BookingEvent::Created(id));
        events.dispatch(BookingEvent::Cancelled(id));

        assert_eq!(receiver.try_recv(), Ok(BookingEvent::Created(id)));
        assert_eq!(receiver.try_recv(), Ok(BookingEvent::Cancelled(id)));
    }

    /// Expected: delivered for an existing booking, skipped for an unknown one
    #[tokio::test]
    async fn delivers_only_for_known_bookings() -> Result<(), AppError> {
        let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (_host, listing, guest) = create_booking_dependencies(db).await?;
        let booking = create_booking(db, listing.id, guest.id).await?;
        let service = NotificationService::new(db);

        assert!(service.deliver(BookingEvent::Confirmed(booking.id)).await?);
        assert!(!service.deliver(BookingEvent::Created(Uuid::new_v4())).await?);

        Ok(())
    }
}
