use alloc::{boxed::Box, string::String, vec::Vec};
use core::{
    fmt::{self, Write},
    iter::{self, Flatten},
    mem, slice,
};

use crate::*;

/// Smallest capacity an array is allowed to have, also the default one.
pub const MINCAP: usize = 2;

/// Growable and shrinkable ordered sequence.
///
/// Slots `[0, size)` are always occupied, slots past `size` are always empty. Capacity
/// doubles when a write hits a full array and halves once occupancy drops to a third of
/// it, but never below [`MINCAP`].
#[derive(Clone)]
pub struct DynArray<T> {
    storage: Box<[Option<T>]>,
    size: usize,
}

pub type ArrayIter<'a, T> = Flatten<slice::Iter<'a, Option<T>>>;
pub type ArrayIterMut<'a, T> = Flatten<slice::IterMut<'a, Option<T>>>;
pub type ArrayIntoIter<T> = Flatten<alloc::vec::IntoIter<Option<T>>>;

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> DynArray<T> {
    pub fn new() -> Self {
        Self {
            storage: empty_slots(MINCAP),
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity < MINCAP {
            return Err(GameError::InvalidCapacity(capacity));
        }
        Ok(Self {
            storage: empty_slots(capacity),
            size: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        self.storage[index].as_ref().ok_or(GameError::InvalidValue("unoccupied slot"))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;
        self.storage[index].as_mut().ok_or(GameError::InvalidValue("unoccupied slot"))
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Appends `value`, growing first when the array is full.
    pub fn add(&mut self, value: T) -> Result<()> {
        if self.size == self.capacity() {
            self.grow()?;
        }
        self.storage[self.size] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// Inserts `value` at `index` in `[0, size]`, shifting the tail one slot to the end.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.size {
            return Err(GameError::IndexOutOfRange {
                index,
                len: self.size,
            });
        }
        if self.size == self.capacity() {
            self.grow()?;
        }
        // slot `size` is empty, rotating moves it to `index`
        self.storage[index..=self.size].rotate_right(1);
        self.storage[index] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// Removes the element at `index`, closing the gap, then shrinks if sparse enough.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let value = self.storage[index].take();
        self.storage[index..self.size].rotate_left(1);
        self.size -= 1;

        let capacity = self.capacity();
        if self.size <= capacity / 3 && capacity / 2 >= MINCAP {
            self.reallocate(capacity / 2);
        }

        value.ok_or(GameError::InvalidValue("unoccupied slot"))
    }

    pub fn iter(&self) -> ArrayIter<'_, T> {
        self.storage[..self.size].iter().flatten()
    }

    pub fn iter_mut(&mut self) -> ArrayIterMut<'_, T> {
        self.storage[..self.size].iter_mut().flatten()
    }

    /// Multi-line listing of every item together with size and capacity.
    pub fn debug_string(&self) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = write!(
            out,
            "DynArray with {} items and a capacity of {}:",
            self.size,
            self.capacity()
        );
        for (i, item) in self.iter().enumerate() {
            let _ = write!(out, "\n [{}]: {}", i, item);
        }
        out
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(GameError::IndexOutOfRange {
                index,
                len: self.size,
            })
        }
    }

    /// Only called on a full array, so doubling the occupancy doubles the capacity.
    fn grow(&mut self) -> Result<()> {
        let max_len = isize::MAX as usize / mem::size_of::<Option<T>>().max(1);
        let new_capacity = self
            .size
            .checked_mul(2)
            .filter(|&capacity| capacity <= max_len)
            .ok_or(GameError::CapacityOverflow)?;
        self.reallocate(new_capacity);
        Ok(())
    }

    fn reallocate(&mut self, new_capacity: usize) {
        log::trace!("capacity {} -> {}", self.capacity(), new_capacity);
        let mut storage = empty_slots(new_capacity);
        for (dst, src) in storage.iter_mut().zip(self.storage[..self.size].iter_mut()) {
            *dst = src.take();
        }
        self.storage = storage;
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut slots: Vec<Option<T>> = iter.into_iter().map(Some).collect();
        let size = slots.len();
        slots.resize_with(size.max(MINCAP), || None);
        Self {
            storage: slots.into_boxed_slice(),
            size,
        }
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = ArrayIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_vec().into_iter().flatten()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = ArrayIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
