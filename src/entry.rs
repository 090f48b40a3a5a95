use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Two-dimensional key, `primary` is the distance along the track and
/// `secondary` is the lane. Keys are ordered by primary, ties broken
/// by secondary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub primary: i64,
    pub secondary: i64,
}

impl Key {
    #[inline]
    pub fn new(primary: i64, secondary: i64) -> Key {
        Key { primary, secondary }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.secondary)
    }
}

impl From<(i64, i64)> for Key {
    fn from((primary, secondary): (i64, i64)) -> Key {
        Key::new(primary, secondary)
    }
}

/// Entry is the indexed record, a [`Key`] and an opaque value. Two
/// entries are equal when their keys are equal, value is not part of
/// the identity.
#[derive(Clone, Debug)]
pub struct Entry<V> {
    key: Key,
    value: V,
}

impl<V> Entry<V> {
    pub fn new(primary: i64, secondary: i64, value: V) -> Entry<V> {
        Entry {
            key: Key::new(primary, secondary),
            value,
        }
    }

    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub fn primary(&self) -> i64 {
        self.key.primary
    }

    #[inline]
    pub fn secondary(&self) -> i64 {
        self.key.secondary
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Check whether this entry falls inside the closed rectangle
    /// `[primary_min, primary_max] x [secondary_min, secondary_max]`.
    pub fn is_within(
        &self,
        primary_min: i64,
        primary_max: i64,
        secondary_min: i64,
        secondary_max: i64,
    ) -> bool {
        let p = primary_min <= self.key.primary && self.key.primary <= primary_max;
        p && secondary_min <= self.key.secondary && self.key.secondary <= secondary_max
    }
}

impl<V> PartialEq for Entry<V> {
    fn eq(&self, other: &Entry<V>) -> bool {
        self.key == other.key
    }
}

impl<V> Eq for Entry<V> {}

impl<V> Hash for Entry<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state)
    }
}

impl<V> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entry{}", self.key)
    }
}
