//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Floor index, `0` is the ground floor.
    pub struct FloorId(u16);
}

typed_id! {
    /// Index of an elevator car.
    pub struct ElevatorId(u16);
}

typed_id! {
    /// Passenger serial number, allocated in creation order.
    pub struct PassengerId(u32);
}

typed_id! {
    /// Slot of a logical process in the kernel's process table.
    pub struct ProcessId(u32);
}

typed_id! {
    /// Handle of a wake signal owned by the kernel.
    pub struct SignalId(u32);
}

typed_id! {
    /// Handle of a rendezvous channel owned by the kernel.
    pub struct ChannelId(u32);
}

typed_id! {
    /// Handle of a resource counter owned by the kernel.
    pub struct CounterId(u32);
}

impl FloorId {
    pub const GROUND: FloorId = FloorId(0);

    /// Absolute number of floors between `self` and `other`.
    #[inline]
    pub fn distance(self, other: FloorId) -> u16 {
        self.0.abs_diff(other.0)
    }
}
