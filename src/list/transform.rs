use super::List;

// =============================================================================
// Milestone 6: Higher-order traversal
// =============================================================================
//
// Every operation here is a single front-to-back pass through a shared
// borrow, so the source list cannot change while it is being walked.

impl<T> List<T> {
    /// Calls `callback(value, index)` for every value.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&T, usize),
    {
        for (index, value) in self.iter().enumerate() {
            callback(value, index);
        }
    }

    /// A new list of `callback(value, index)` results, same order.
    pub fn map<U, F>(&self, mut callback: F) -> List<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        self.iter()
            .enumerate()
            .map(|(index, value)| callback(value, index))
            .collect()
    }

    /// Like [`List::map`], stopping at the first failing callback.
    pub fn try_map<U, E, F>(&self, mut callback: F) -> Result<List<U>, E>
    where
        F: FnMut(&T, usize) -> Result<U, E>,
    {
        self.iter()
            .enumerate()
            .map(|(index, value)| callback(value, index))
            .collect()
    }

    /// Left fold starting from `initial`.
    pub fn reduce<A, F>(&self, initial: A, callback: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(initial, callback)
    }

    /// Left fold starting from `A::default()` (zero for numbers).
    pub fn reduce_default<A, F>(&self, callback: F) -> A
    where
        A: Default,
        F: FnMut(A, &T) -> A,
    {
        self.reduce(A::default(), callback)
    }

    pub fn try_reduce<A, E, F>(&self, initial: A, callback: F) -> Result<A, E>
    where
        F: FnMut(A, &T) -> Result<A, E>,
    {
        self.iter().try_fold(initial, callback)
    }

    /// The first `(index, value)` for which `predicate(value, index)` holds.
    pub fn find<F>(&self, mut predicate: F) -> Option<(usize, &T)>
    where
        F: FnMut(&T, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .find(|(index, value)| predicate(*value, *index))
    }

    pub fn includes(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(|candidate, _| candidate == value).is_some()
    }

    /// True as soon as one value passes.
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    /// True when every value passes. The predicate sees every value, even
    /// after a failure.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let passed = self.iter().filter(|value| predicate(*value)).count();
        passed == self.length
    }

    pub fn filter<F>(&self, mut predicate: F) -> List<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|value| predicate(*value))
            .cloned()
            .collect()
    }

    /// Clones of this list's values followed by clones of `other`'s.
    pub fn concat(&self, other: &List<T>) -> List<T>
    where
        T: Clone,
    {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// A new list with the values in reverse order.
    pub fn reverse(&self) -> List<T>
    where
        T: Clone,
    {
        let mut reversed = List::new();
        for value in self.iter() {
            reversed.push_front(value.clone());
        }
        reversed
    }
}
