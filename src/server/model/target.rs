//! Polymorphic review and media owners.

use uuid::Uuid;

/// Kind of entity a review or media item can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Listing,
    User,
}

/// Every kind with a stored tag, in lookup order.
const TARGET_KINDS: [TargetKind; 2] = [TargetKind::Listing, TargetKind::User];

impl TargetKind {
    /// Tag stored in the `*_type` column.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::User => "user",
        }
    }

    /// Resolves a stored tag back to its kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        TARGET_KINDS.iter().copied().find(|kind| kind.tag() == tag)
    }
}

/// A concrete review or media owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Listing(Uuid),
    User(Uuid),
}

impl Target {
    pub fn new(kind: TargetKind, id: Uuid) -> Self {
        match kind {
            TargetKind::Listing => Self::Listing(id),
            TargetKind::User => Self::User(id),
        }
    }

    /// Builds a target from a stored `(type, id)` pair.
    ///
    /// # Returns
    /// - `Some(Target)` - Tag is known
    /// - `None` - Tag is not a known target kind
    pub fn from_tagged(tag: &str, id: Uuid) -> Option<Self> {
        TargetKind::from_tag(tag).map(|kind| Self::new(kind, id))
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Listing(_) => TargetKind::Listing,
            Self::User(_) => TargetKind::User,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Listing(id) | Self::User(id) => *id,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Listing id when the target is a listing.
    pub fn listing_id(&self) -> Option<Uuid> {
        match self {
            Self::Listing(id) => Some(*id),
            Self::User(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_tags() {
        let id = Uuid::new_v4();

        assert_eq!(Target::from_tagged("listing", id), Some(Target::Listing(id)));
        assert_eq!(Target::from_tagged("user", id), Some(Target::User(id)));
        assert_eq!(Target::from_tagged("App\\Models\\Listing", id), None);
    }

    #[test]
    fn tag_round_trips_through_lookup() {
        for kind in TARGET_KINDS {
            assert_eq!(TargetKind::from_tag(kind.tag()), Some(kind));
        }
    }
}
