//! Deterministic per-session RNG streams segregated by negotiation domain.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Deterministic bundle of RNG streams segregated by negotiation domain.
///
/// Separate streams keep the offer cursor, theft attempts, notice rolls,
/// and escalation rolls from perturbing one another, so a replayed seed
/// reproduces a session draw for draw.
#[derive(Debug, Clone)]
pub struct SessionRng {
    offer: RefCell<CountingRng<SmallRng>>,
    theft: RefCell<CountingRng<SmallRng>>,
    notice: RefCell<CountingRng<SmallRng>>,
    temper: RefCell<CountingRng<SmallRng>>,
}

impl SessionRng {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let offer = CountingRng::new(derive_stream_seed(seed, b"offer"));
        let theft = CountingRng::new(derive_stream_seed(seed, b"theft"));
        let notice = CountingRng::new(derive_stream_seed(seed, b"notice"));
        let temper = CountingRng::new(derive_stream_seed(seed, b"temper"));
        Self {
            offer: RefCell::new(offer),
            theft: RefCell::new(theft),
            notice: RefCell::new(notice),
            temper: RefCell::new(temper),
        }
    }

    /// Access the offer-selection RNG stream.
    #[must_use]
    pub fn offer(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.offer.borrow_mut()
    }

    /// Access the theft-attempt RNG stream.
    #[must_use]
    pub fn theft(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.theft.borrow_mut()
    }

    /// Access the theft-notice RNG stream.
    #[must_use]
    pub fn notice(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.notice.borrow_mut()
    }

    /// Access the escalation-roll RNG stream.
    #[must_use]
    pub fn temper(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.temper.borrow_mut()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
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

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
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
