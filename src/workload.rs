//! The draw/accept generator and the interleaving policies built on it.
//!
//! All three policies share the same primitive: draw the next address from
//! the corpus and accept it with some probability. They only differ in how
//! PUTs and GETs are interleaved and where the stream is bounded.

use std::io;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::corpus::AddressCorpus;
use crate::error::ConfigError;
use crate::instruction::{Instruction, MAX_PREFIX_LEN, MAX_PRIORITY, MIN_PREFIX_LEN};
use crate::sink::InstructionSink;

/// How generated PUT instructions get their route name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// The same literal name on every route.
    Fixed(String),
    /// A random 5-character uppercase token per route.
    RandomToken,
    /// `<prefix><n>` with a counter starting at 1.
    Indexed {
        /// Prepended to the counter, e.g. `IP:`.
        prefix: String,
    },
}

impl Default for NamePolicy {
    fn default() -> Self {
        NamePolicy::Fixed("Name".to_owned())
    }
}

/// How PUTs and GETs are interleaved into one instruction stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// One accepted GET followed by one accepted PUT per logical step.
    Paired {
        /// Per-draw acceptance probability for the GET of each pair.
        #[serde(default = "default_get_probability")]
        get_probability: f64,
        /// Per-draw acceptance probability for the PUT of each pair.
        #[serde(default = "default_put_probability")]
        put_probability: f64,
        /// Number of GET/PUT pairs to generate.
        #[serde(default = "default_pairs")]
        pairs: u64,
    },
    /// Read-heavy skew: one pass emitting a PUT per address with
    /// probability `1/write_factor`, then a second, independent pass
    /// emitting a GET for every address.
    RatioFiltered {
        /// The write factor `R`; each address PUTs with probability `1/R`.
        #[serde(default = "default_write_factor")]
        write_factor: u32,
    },
    /// Bulk load with an occasional read, splitting output across
    /// sequentially numbered files.
    Rotation {
        /// Instructions per output file before rotating to the next one.
        #[serde(default = "default_rotate_every")]
        rotate_every: u64,
        /// Every `get_every`-th instruction is a GET for the current
        /// address; all others are PUTs.
        #[serde(default = "default_get_every")]
        get_every: u64,
    },
}

fn default_get_probability() -> f64 {
    1.0
}

fn default_put_probability() -> f64 {
    0.5
}

fn default_pairs() -> u64 {
    20
}

fn default_write_factor() -> u32 {
    10
}

fn default_rotate_every() -> u64 {
    20_000
}

fn default_get_every() -> u64 {
    2_000
}

impl Policy {
    /// Rejects parameter combinations under which generation is undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Policy::Paired {
                get_probability,
                put_probability,
                pairs,
            } => {
                check_probability(*get_probability)?;
                check_probability(*put_probability)?;
                if *pairs == 0 {
                    return Err(ConfigError::ZeroPairs);
                }
            }
            Policy::RatioFiltered { write_factor } => {
                if *write_factor == 0 {
                    return Err(ConfigError::ZeroWriteFactor);
                }
            }
            Policy::Rotation {
                rotate_every,
                get_every,
            } => {
                if *rotate_every == 0 {
                    return Err(ConfigError::ZeroRotation);
                }
                if *get_every == 0 {
                    return Err(ConfigError::ZeroGetInterval);
                }
            }
        }
        Ok(())
    }
}

fn check_probability(p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::InvalidProbability(p));
    }
    Ok(())
}

/// Counts reported after a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of PUT instructions written.
    pub puts: u64,
    /// Number of GET instructions written.
    pub gets: u64,
}

impl RunReport {
    /// Total number of instructions written.
    pub fn total(&self) -> u64 {
        self.puts + self.gets
    }
}

/// Rejection-sampling instruction generator over an address corpus.
///
/// One seedable RNG drives acceptance, prefix lengths, priorities and
/// random route names, so a fixed seed reproduces an entire stream.
#[derive(Debug)]
pub struct Generator {
    corpus: AddressCorpus,
    rng: SmallRng,
    names: NamePolicy,
    issued_names: u64,
}

impl Generator {
    /// Creates a generator over `corpus`; the seed is drawn from entropy
    /// when unset.
    pub fn new(corpus: AddressCorpus, names: NamePolicy, seed: Option<u64>) -> Self {
        let rng = SmallRng::seed_from_u64(seed.unwrap_or_else(rand::random));
        Self {
            corpus,
            rng,
            names,
            issued_names: 0,
        }
    }

    /// Draws addresses until one is accepted with `probability`, wrapping
    /// the corpus on exhaustion, and returns a GET for it.
    ///
    /// With a probability of zero this never returns; use
    /// [`Generator::try_next_get`] when the loop must be bounded.
    pub fn next_get(&mut self, probability: f64) -> Instruction {
        loop {
            let address = self.corpus.next_wrapping().to_owned();
            if self.rng.random_bool(probability) {
                return Instruction::Get { address };
            }
        }
    }

    /// Bounded variant of [`Generator::next_get`]: gives up after
    /// `max_draws` rejected draws.
    pub fn try_next_get(&mut self, probability: f64, max_draws: usize) -> Option<Instruction> {
        for _ in 0..max_draws {
            let address = self.corpus.next_wrapping().to_owned();
            if self.rng.random_bool(probability) {
                return Some(Instruction::Get { address });
            }
        }
        None
    }

    /// Draws addresses until one is accepted with `probability` and
    /// returns a PUT with uniformly sampled prefix length and priority.
    ///
    /// With a probability of zero this never returns; use
    /// [`Generator::try_next_put`] when the loop must be bounded.
    pub fn next_put(&mut self, probability: f64) -> Instruction {
        loop {
            let address = self.corpus.next_wrapping().to_owned();
            if self.rng.random_bool(probability) {
                return self.sample_route(address);
            }
        }
    }

    /// Bounded variant of [`Generator::next_put`]: gives up after
    /// `max_draws` rejected draws.
    pub fn try_next_put(&mut self, probability: f64, max_draws: usize) -> Option<Instruction> {
        for _ in 0..max_draws {
            let address = self.corpus.next_wrapping().to_owned();
            if self.rng.random_bool(probability) {
                return Some(self.sample_route(address));
            }
        }
        None
    }

    /// Runs the policy to completion, writing every instruction to the
    /// sink in program order.
    pub fn run(
        &mut self,
        policy: &Policy,
        sink: &mut dyn InstructionSink,
    ) -> io::Result<RunReport> {
        let mut report = RunReport::default();
        match *policy {
            Policy::Paired {
                get_probability,
                put_probability,
                pairs,
            } => {
                for _ in 0..pairs {
                    let get = self.next_get(get_probability);
                    sink.write(&get)?;
                    report.gets += 1;

                    let put = self.next_put(put_probability);
                    sink.write(&put)?;
                    report.puts += 1;
                }
            }
            Policy::RatioFiltered { write_factor } => {
                let addresses: Vec<String> =
                    self.corpus.iter().map(str::to_owned).collect();
                for address in &addresses {
                    if self.rng.random_range(0..write_factor) == 0 {
                        let put = self.sample_route(address.clone());
                        sink.write(&put)?;
                        report.puts += 1;
                    }
                }
                for address in addresses {
                    sink.write(&Instruction::Get { address })?;
                    report.gets += 1;
                }
            }
            Policy::Rotation { get_every, .. } => {
                let addresses: Vec<String> =
                    self.corpus.iter().map(str::to_owned).collect();
                for (i, address) in addresses.into_iter().enumerate() {
                    let instruction = if i as u64 % get_every == 0 {
                        report.gets += 1;
                        Instruction::Get { address }
                    } else {
                        report.puts += 1;
                        self.sample_route(address)
                    };
                    sink.write(&instruction)?;
                }
            }
        }
        Ok(report)
    }

    fn sample_route(&mut self, address: String) -> Instruction {
        let prefix_len = self.rng.random_range(MIN_PREFIX_LEN..=MAX_PREFIX_LEN);
        let priority = self.rng.random_range(0..=MAX_PRIORITY);
        let name = self.next_name();
        Instruction::Put {
            address,
            prefix_len,
            priority,
            name,
        }
    }

    fn next_name(&mut self) -> String {
        match &self.names {
            NamePolicy::Fixed(name) => name.clone(),
            NamePolicy::RandomToken => (0..5).map(|_| self.rng.random_range('A'..='Z')).collect(),
            NamePolicy::Indexed { prefix } => {
                self.issued_names += 1;
                format!("{}{}", prefix, self.issued_names)
            }
        }
    }
}
