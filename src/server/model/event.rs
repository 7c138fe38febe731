use uuid::Uuid;

/// Booking lifecycle events, enqueued after the triggering change is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    Created(Uuid),
    Confirmed(Uuid),
    Cancelled(Uuid),
}

impl BookingEvent {
    pub fn booking_id(&self) -> Uuid {
        match self {
            Self::Created(id) | Self::Confirmed(id) | Self::Cancelled(id) => *id,
        }
    }

    /// Short name used in notification logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created(_) => "booking_created",
            Self::Confirmed(_) => "booking_confirmed",
            Self::Cancelled(_) => "booking_cancelled",
        }
    }
}
