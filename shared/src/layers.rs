//! Collision layers used to filter ground probes.
//!
//! Each static collider carries the bits of the layers it belongs to (stored in the rapier
//! collider's `user_data`). A probe only reports hits on colliders sharing at least one bit
//! with its [`LayerMask`].

use num_traits::{One, PrimInt};

/// Implemented by enums whose discriminant is a bit index in some integer storage.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must stay below the bit width of `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bit set keyed by a [`FlagBitmask`] enum.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    pub fn from_flags<U: FlagBitmask<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut out = Self::empty();
        for &flag in flags {
            out.add(flag);
        }
        out
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    /// True when the two sets share at least one bit.
    pub fn intersects(&self, other: Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Scene layers. Discriminants are bit indices and are part of the collider `user_data` format.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layer {
    Default = 0,
    Ground = 1,
    Player = 2,
    Props = 3,
}

impl FlagBitmask for Layer {
    type Storage = u32;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

/// Layer membership / filter bits.
pub type LayerMask = BitmaskFlags<u32>;

/// Encode a layer mask into a rapier collider `user_data` value.
#[inline]
pub fn mask_to_user_data(mask: LayerMask) -> u128 {
    mask.bits as u128
}

/// Decode the layer mask stored in a rapier collider's `user_data`.
///
/// Only the low 32 bits are meaningful; anything above is ignored.
#[inline]
pub fn mask_from_user_data(user_data: u128) -> LayerMask {
    LayerMask::new((user_data & u32::MAX as u128) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_mask_matches_only_ground_colliders() {
        let probe = LayerMask::from_flags(&[Layer::Ground]);
        let floor = LayerMask::from_flags(&[Layer::Ground, Layer::Default]);
        let crate_prop = LayerMask::from_flags(&[Layer::Props]);

        assert!(probe.intersects(floor));
        assert!(!probe.intersects(crate_prop));
        assert!(LayerMask::all().intersects(crate_prop));
        assert!(!LayerMask::empty().intersects(floor));
    }

    #[test]
    fn add_and_remove_toggle_single_bits() {
        let mut mask = LayerMask::empty();
        mask.add(Layer::Player);
        assert!(mask.has(Layer::Player));
        assert_eq!(mask.bits, 1 << 2);

        mask.remove(Layer::Player);
        assert!(mask.is_empty());
    }

    #[test]
    fn user_data_encoding_ignores_high_bits() {
        let mask = LayerMask::from_flags(&[Layer::Ground, Layer::Props]);
        let encoded = mask_to_user_data(mask) | (0xFFu128 << 64);
        assert_eq!(mask_from_user_data(encoded), mask);
    }
}
