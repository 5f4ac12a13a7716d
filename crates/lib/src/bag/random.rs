//! Random sampling and shuffling.
//!
//! Every operation draws from `rand::thread_rng()` and has a `*_with` variant
//! taking any [`Rng`], so tests and simulations can use a seeded generator.

use rand::{
    Rng,
    seq::{SliceRandom, index},
};

use super::{BagCore, BagError};
use crate::value::{Key, Map, Value};

/// Random selection over a bag's entries.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use satchel::prelude::*;
///
/// let bag = Bag::from_values(["a", "b", "c", "d"]);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let sample = bag.random_values_with(2, &mut rng)?;
/// assert_eq!(sample.count(), 2);
/// assert!(sample.is_indexed());
///
/// assert!(Bag::new().random_value().is_err());
/// # Ok::<(), satchel::Error>(())
/// ```
pub trait Random: BagCore {
    /// A uniformly chosen value
    fn random_value(&self) -> Result<&Value, BagError> {
        self.random_value_with(&mut rand::thread_rng())
    }

    /// A uniformly chosen value, drawn from `rng`
    fn random_value_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Value, BagError> {
        let (_, value) = pick_one(self.items(), rng, "pick a value")?;
        Ok(value)
    }

    /// A uniformly chosen key
    fn random_key(&self) -> Result<Key, BagError> {
        self.random_key_with(&mut rand::thread_rng())
    }

    /// A uniformly chosen key, drawn from `rng`
    fn random_key_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Key, BagError> {
        let (key, _) = pick_one(self.items(), rng, "pick a key")?;
        Ok(key.clone())
    }

    /// `count` distinct values in their original order, re-indexed
    fn random_values(&self, count: usize) -> Result<Self, BagError> {
        self.random_values_with(count, &mut rand::thread_rng())
    }

    /// Like [`random_values`](Random::random_values), drawing from `rng`
    fn random_values_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, BagError> {
        let positions = sample_positions(self.items().len(), count, rng)?;
        Ok(Self::from_items(
            positions
                .into_iter()
                .filter_map(|i| self.items().get_index(i))
                .map(|(_, value)| value.clone())
                .collect(),
        ))
    }

    /// `count` distinct keys in their original order, as an indexed bag
    fn random_keys(&self, count: usize) -> Result<Self, BagError> {
        self.random_keys_with(count, &mut rand::thread_rng())
    }

    /// Like [`random_keys`](Random::random_keys), drawing from `rng`
    fn random_keys_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, BagError> {
        let positions = sample_positions(self.items().len(), count, rng)?;
        Ok(Self::from_items(
            positions
                .into_iter()
                .filter_map(|i| self.items().get_index(i))
                .map(|(key, _)| key.to_value())
                .collect(),
        ))
    }

    /// The entries in random order.
    ///
    /// An indexed bag is re-indexed; an associative bag keeps its keys.
    fn shuffle(&self) -> Self {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Like [`shuffle`](Random::shuffle), drawing from `rng`
    fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut entries: Vec<(&Key, &Value)> = self.items().iter().collect();
        entries.shuffle(rng);

        let items: Map = if self.items().is_indexed() {
            entries.into_iter().map(|(_, value)| value.clone()).collect()
        } else {
            entries
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        };
        Self::from_items(items)
    }
}

impl<T: BagCore> Random for T {}

fn pick_one<'a, R: Rng + ?Sized>(
    items: &'a Map,
    rng: &mut R,
    operation: &'static str,
) -> Result<(&'a Key, &'a Value), BagError> {
    if items.is_empty() {
        return Err(BagError::EmptyBag { operation });
    }
    items
        .get_index(rng.gen_range(0..items.len()))
        .ok_or(BagError::EmptyBag { operation })
}

/// Distinct positions in ascending order
fn sample_positions<R: Rng + ?Sized>(
    available: usize,
    requested: usize,
    rng: &mut R,
) -> Result<Vec<usize>, BagError> {
    if requested == 0 || requested > available {
        return Err(BagError::SampleSize {
            requested,
            available,
        });
    }
    let mut positions = index::sample(rng, available, requested).into_vec();
    positions.sort_unstable();
    Ok(positions)
}
