use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Unbiased Fisher-Yates: walks from the last slot down to 1, swapping
    /// each with a uniformly chosen slot at or below it.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let mut a = RngState::from_seed(11);
        let mut b = RngState::from_seed(11);
        let mut left: Vec<u32> = (0..20).collect();
        let mut right = left.clone();
        a.shuffle(&mut left);
        b.shuffle(&mut right);
        assert_eq!(left, right);
        assert_eq!(a.seed(), 11);
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = RngState::from_seed(3);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = vec![9];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut rng = RngState::from_seed(5);
        let mut items: Vec<u8> = (0..52).collect();
        rng.shuffle(&mut items);
        assert_ne!(items, (0..52).collect::<Vec<u8>>());
        items.sort_unstable();
        assert_eq!(items, (0..52).collect::<Vec<u8>>());
    }
}
