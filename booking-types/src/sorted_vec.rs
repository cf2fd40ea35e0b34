use std::ops::Deref;

/// A wrapper around a [`Vec`] that is always sorted and with values
/// repeating at most once. Slot lists are only ever handed to the UI in
/// this form.
///
/// ```
/// use booking_types::{TimeOfDay, UniqueSortedVec};
///
/// let slot = |raw: &str| raw.parse::<TimeOfDay>().unwrap();
/// let slots: UniqueSortedVec<_> = vec![slot("12:30"), slot("12:00"), slot("12:30")].into();
/// assert_eq!(slots.as_slice(), &[slot("12:00"), slot("12:30")]);
/// ```
#[repr(transparent)]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct UniqueSortedVec<T>(Vec<T>);

impl<T> Default for UniqueSortedVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UniqueSortedVec<T> {
    /// Create a new empty instance.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }
}

impl<T: Ord> UniqueSortedVec<T> {
    /// Returns true if the slice contains an element with the given value.
    ///
    /// ```
    /// use booking_types::{TimeOfDay, UniqueSortedVec};
    ///
    /// let slot = |raw: &str| raw.parse::<TimeOfDay>().unwrap();
    /// let slots: UniqueSortedVec<_> = vec![slot("10:00"), slot("14:00")].into();
    /// assert!(slots.contains(&slot("14:00")));
    /// assert!(!slots.contains(&slot("15:00")));
    /// ```
    #[inline]
    pub fn contains(&self, x: &T) -> bool {
        self.0.binary_search(x).is_ok()
    }
}

impl<T: Ord> From<Vec<T>> for UniqueSortedVec<T> {
    #[inline]
    fn from(mut vec: Vec<T>) -> Self {
        vec.sort_unstable();
        vec.dedup();
        Self(vec)
    }
}

impl<T: Ord> From<UniqueSortedVec<T>> for Vec<T> {
    #[inline]
    fn from(val: UniqueSortedVec<T>) -> Self {
        val.0
    }
}

impl<T: Ord> Deref for UniqueSortedVec<T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
