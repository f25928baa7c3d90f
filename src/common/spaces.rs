use std::sync::{LazyLock, Mutex, MutexGuard};

use dyn_clone::DynClone;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub static SHARED_RNG: LazyLock<Mutex<StdRng>> =
    LazyLock::new(|| Mutex::new(StdRng::seed_from_u64(1234)));

fn shared_rng() -> MutexGuard<'static, StdRng> {
    // a panic while sampling can't leave the rng in a bad state
    SHARED_RNG.lock().unwrap_or_else(|e| e.into_inner())
}

/// Reseeds the rng shared by every space, making `sample` reproducible.
pub fn seed_spaces_rng(seed: u64) {
    *shared_rng() = StdRng::seed_from_u64(seed);
}

/// Defines a space in which a action, observation, or other may exist
pub trait Space<T: Clone>: DynClone + Send {
    /// tests whether the sample is contained within the space
    fn contains(&self, sample: &T) -> bool;

    /// randomly samples from the space
    fn sample(&mut self) -> T;

    /// returns some semantic representation of the space of
    /// the space, to be used for initialising models
    fn shape(&self) -> T;
}

dyn_clone::clone_trait_object!(<T> Space<T> where T: Clone);

/// Defines a Discrete Space.
///
/// A Discrete space is a space on `usize` where samples
/// are drawn uniformly from `[0, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrete {
    /// The upper bound on the space
    n: usize,
}

impl From<usize> for Discrete {
    fn from(value: usize) -> Self {
        Self { n: value }
    }
}

impl Discrete {
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Space<usize> for Discrete {
    fn contains(&self, sample: &usize) -> bool {
        *sample < self.n
    }

    fn sample(&mut self) -> usize {
        shared_rng().gen_range(0..self.n)
    }

    fn shape(&self) -> usize {
        self.n
    }
}

/// Defines a `BoxSpace<T>`.
///
/// A `BoxSpace` is an n-dimensional container on
/// some generic `T`, where `T` is classically some
/// form of number. Bounds are inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace<T> {
    /// The lower bound on the space
    low: T,

    /// The upper bound on the space
    high: T,
}

impl From<(Vec<f32>, Vec<f32>)> for BoxSpace<Vec<f32>> {
    fn from(value: (Vec<f32>, Vec<f32>)) -> Self {
        Self {
            low: value.0,
            high: value.1,
        }
    }
}

impl Space<Vec<f32>> for BoxSpace<Vec<f32>> {
    fn contains(&self, sample: &Vec<f32>) -> bool {
        if sample.len() != self.low.len() {
            return false;
        }

        sample
            .iter()
            .zip(self.low.iter())
            .zip(self.high.iter())
            .all(|((&s, &l), &h)| l <= s && s <= h)
    }

    /// Samples uniformly per dimension. A dimension whose bounds are
    /// inverted yields its upper bound.
    fn sample(&mut self) -> Vec<f32> {
        let mut rng = shared_rng();
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(&l, &h)| if l < h { rng.gen_range(l..=h) } else { h })
            .collect()
    }

    fn shape(&self) -> Vec<f32> {
        self.low.clone()
    }
}

impl BoxSpace<Vec<f32>> {
    pub fn low(&self) -> &Vec<f32> {
        &self.low
    }

    pub fn high(&self) -> &Vec<f32> {
        &self.high
    }
}
