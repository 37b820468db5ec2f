//! Uniform random account picker.

use rand::Rng;

use crate::traits::AccountPicker;

/// Picks uniformly among registered accounts using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl AccountPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
