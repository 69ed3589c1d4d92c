//! Deterministic RNG streams segregated by draw domain.
//!
//! Dice rolls and card draws consume independent streams so that one
//! domain's draw count never perturbs the other. The same user seed
//! therefore replays an identical attempt.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Deterministic bundle of RNG streams segregated by draw domain.
#[derive(Debug, Clone)]
pub struct RngBundle {
    dice: RefCell<CountingRng<ChaCha8Rng>>,
    cards: RefCell<CountingRng<ChaCha8Rng>>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let dice = CountingRng::new(derive_stream_seed(seed, b"dice"));
        let cards = CountingRng::new(derive_stream_seed(seed, b"cards"));
        Self {
            dice: RefCell::new(dice),
            cards: RefCell::new(cards),
        }
    }

    /// Access the dice RNG stream.
    #[must_use]
    pub fn dice(&self) -> RefMut<'_, CountingRng<ChaCha8Rng>> {
        self.dice.borrow_mut()
    }

    /// Access the card RNG stream.
    #[must_use]
    pub fn cards(&self) -> RefMut<'_, CountingRng<ChaCha8Rng>> {
        self.cards.borrow_mut()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha8Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
