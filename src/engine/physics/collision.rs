use rapier2d::prelude::*;
use std::ops::BitOr;
use std::sync::{Arc, Mutex};

/// Physics categories a body can belong to
///
/// Categories are a closed set. Masks are built from them with `|`, so a
/// mask can never name a bit that has no category behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PhysicsCategory {
    /// The player character
    Player = 0b0001,

    /// Obstacle tiles (trees, rocks) generated from the tile map
    Breakable = 0b0010,

    /// The edge loop around the world
    Edge = 0b0100,
}

impl PhysicsCategory {
    pub const ALL: [PhysicsCategory; 3] = [
        PhysicsCategory::Player,
        PhysicsCategory::Breakable,
        PhysicsCategory::Edge,
    ];

    fn bits(self) -> u32 {
        self as u32
    }
}

/// A set of physics categories, used for collision and contact masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u32);

impl CategorySet {
    /// Matches nothing
    pub const EMPTY: CategorySet = CategorySet(0);

    /// Matches every category, including ones added later
    pub const ALL: CategorySet = CategorySet(u32::MAX);

    pub fn contains(self, category: PhysicsCategory) -> bool {
        self.0 & category.bits() != 0
    }

    pub fn union(self, other: CategorySet) -> CategorySet {
        CategorySet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    fn to_group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

impl From<PhysicsCategory> for CategorySet {
    fn from(category: PhysicsCategory) -> Self {
        CategorySet(category.bits())
    }
}

impl BitOr for PhysicsCategory {
    type Output = CategorySet;

    fn bitor(self, rhs: PhysicsCategory) -> CategorySet {
        CategorySet::from(self).union(rhs.into())
    }
}

impl BitOr<PhysicsCategory> for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: PhysicsCategory) -> CategorySet {
        self.union(rhs.into())
    }
}

impl BitOr for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: CategorySet) -> CategorySet {
        self.union(rhs)
    }
}

/// Category, collision mask and contact mask of a collider
///
/// Stored in the collider's `user_data` so contact filtering does not need a
/// side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderTags {
    /// Category the collider belongs to
    pub category: PhysicsCategory,
    /// Categories the collider physically collides with
    pub collision_mask: CategorySet,
    /// Categories whose contacts with this collider get reported
    pub contact_mask: CategorySet,
}

impl ColliderTags {
    pub fn new(category: PhysicsCategory) -> Self {
        Self {
            category,
            collision_mask: CategorySet::ALL,
            contact_mask: CategorySet::EMPTY,
        }
    }

    /// Rapier interaction groups: membership is the category, filter the
    /// collision mask
    pub fn interaction_groups(&self) -> InteractionGroups {
        InteractionGroups::new(
            CategorySet::from(self.category).to_group(),
            self.collision_mask.to_group(),
        )
    }

    pub fn to_user_data(&self) -> u128 {
        (self.contact_mask.bits() as u128) << 64
            | (self.collision_mask.bits() as u128) << 32
            | self.category.bits() as u128
    }

    pub fn from_user_data(data: u128) -> Option<Self> {
        let category_bits = (data & 0xFFFF_FFFF) as u32;
        let category = PhysicsCategory::ALL
            .into_iter()
            .find(|category| category.bits() == category_bits)?;

        Some(Self {
            category,
            collision_mask: CategorySet(((data >> 32) & 0xFFFF_FFFF) as u32),
            contact_mask: CategorySet(((data >> 64) & 0xFFFF_FFFF) as u32),
        })
    }

    /// Whether a contact between `self` and `other` should be reported
    pub fn reports_contact_with(&self, other: &ColliderTags) -> bool {
        self.contact_mask.contains(other.category) || other.contact_mask.contains(self.category)
    }
}

/// Contact event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Two colliders started touching
    Began {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Ended {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl ContactEvent {
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            ContactEvent::Began {
                collider1,
                collider2,
            }
            | ContactEvent::Ended {
                collider1,
                collider2,
            } => (collider1, collider2),
        }
    }

    pub fn is_began(&self) -> bool {
        matches!(self, ContactEvent::Began { .. })
    }

    pub fn involves(&self, collider: ColliderHandle) -> bool {
        let (a, b) = self.colliders();
        a == collider || b == collider
    }

    /// The collider on the other side of the contact from `collider`
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (a, b) = self.colliders();
        if a == collider {
            Some(b)
        } else if b == collider {
            Some(a)
        } else {
            None
        }
    }
}

/// Queue for storing contact events during a physics step
pub struct ContactEventQueue {
    events: Arc<Mutex<Vec<ContactEvent>>>,
}

impl ContactEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all contact events from this step
    pub fn events(&self) -> Vec<ContactEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ContactEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for ContactEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ContactEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let (h1, h2) = (event.collider1(), event.collider2());

        // Contact masks decide what reaches game logic
        let tags = |handle| {
            colliders
                .get(handle)
                .and_then(|c: &Collider| ColliderTags::from_user_data(c.user_data))
        };
        let reported = match (tags(h1), tags(h2)) {
            (Some(a), Some(b)) => a.reports_contact_with(&b),
            _ => false,
        };
        if !reported {
            return;
        }

        match event {
            CollisionEvent::Started(..) => self.push(ContactEvent::Began {
                collider1: h1,
                collider2: h2,
            }),
            CollisionEvent::Stopped(..) => self.push(ContactEvent::Ended {
                collider1: h1,
                collider2: h2,
            }),
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_have_unique_bits() {
        for (i, a) in PhysicsCategory::ALL.iter().enumerate() {
            for (j, b) in PhysicsCategory::ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(a.bits() & b.bits(), a.bits(), "Categories must not overlap");
                }
            }
        }
    }

    #[test]
    fn test_category_union() {
        let mask = PhysicsCategory::Player | PhysicsCategory::Edge;
        assert!(mask.contains(PhysicsCategory::Player));
        assert!(mask.contains(PhysicsCategory::Edge));
        assert!(!mask.contains(PhysicsCategory::Breakable));

        let all = mask | PhysicsCategory::Breakable;
        assert!(all.contains(PhysicsCategory::Breakable));
        assert_eq!(all.bits(), 0b111);
    }

    #[test]
    fn test_empty_and_all() {
        assert!(CategorySet::EMPTY.is_empty());
        for category in PhysicsCategory::ALL {
            assert!(!CategorySet::EMPTY.contains(category));
            assert!(CategorySet::ALL.contains(category));
        }
    }

    #[test]
    fn test_tags_user_data_roundtrip() {
        let tags = ColliderTags {
            category: PhysicsCategory::Player,
            collision_mask: PhysicsCategory::Breakable | PhysicsCategory::Edge,
            contact_mask: CategorySet::ALL,
        };
        assert_eq!(ColliderTags::from_user_data(tags.to_user_data()), Some(tags));
        assert_eq!(ColliderTags::from_user_data(0), None);
    }

    #[test]
    fn test_contact_reporting_follows_contact_masks() {
        let mut player = ColliderTags::new(PhysicsCategory::Player);
        player.contact_mask = CategorySet::ALL;
        let obstacle = ColliderTags::new(PhysicsCategory::Breakable);
        let edge = ColliderTags::new(PhysicsCategory::Edge);

        assert!(player.reports_contact_with(&obstacle));
        assert!(obstacle.reports_contact_with(&player));
        assert!(!obstacle.reports_contact_with(&edge));
    }

    #[test]
    fn test_interaction_groups_membership() {
        let tags = ColliderTags::new(PhysicsCategory::Breakable);
        let groups = tags.interaction_groups();
        assert_eq!(groups.memberships.bits(), PhysicsCategory::Breakable as u32);
        assert_eq!(groups.filter, Group::ALL);
    }

    #[test]
    fn test_contact_event_other() {
        let a = ColliderHandle::from_raw_parts(0, 0);
        let b = ColliderHandle::from_raw_parts(1, 0);
        let c = ColliderHandle::from_raw_parts(2, 0);
        let event = ContactEvent::Began {
            collider1: a,
            collider2: b,
        };
        assert!(event.involves(a));
        assert_eq!(event.other(a), Some(b));
        assert_eq!(event.other(b), Some(a));
        assert_eq!(event.other(c), None);
        assert!(event.is_began());
    }
}
