//! Bit-flip noise injection for exercising the codec.
//!
//! [`Jammer`] simulates a noisy channel by flipping bits in a byte stream.
//! Two models are supported:
//!
//! - [`NoiseModel::Independent`]: every bit is flipped with probability `p`,
//!   independently of every other bit.
//! - [`NoiseModel::Burst`]: flips come in contiguous runs of 1 to
//!   `max_burst` bits. Burst starts are drawn at a reduced rate
//!   `p / ((1 + max_burst) / 2)` so the expected fraction of flipped bits is
//!   still `p`.
//!
//! The randomness source is supplied by the caller, so a seeded RNG gives
//! reproducible noise.

use crate::constants::{DEFAULT_FLIP_PROBABILITY, DEFAULT_NOISE_BUFFER_SIZE, MAX_NOISE_BUFFER_SIZE};
use crate::error::CodecError;
use crate::bits::flip_buffer_bit;
use alloc::format;
use rand::Rng;
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use crate::encoder::read_full;
#[cfg(feature = "std")]
use alloc::vec;
#[cfg(feature = "std")]
use std::io::{Read, Write};

#[cfg(feature = "logging")]
use tracing::debug;

/// Shape of the injected noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// Memoryless per-bit flips
    Independent,

    /// Contiguous runs of up to `max_burst` flipped bits
    Burst {
        /// Longest run of flipped bits
        max_burst: usize,
    },
}

/// Noise injector configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Overall fraction of bits to flip, in `[0, 1]`; 0 passes data through
    pub probability: f64,

    /// Independent or burst flips
    pub model: NoiseModel,

    /// Read buffer size in bytes for the independent model
    pub buffer_size: usize,
}

impl NoiseConfig {
    /// Independent flips with probability `p`
    pub fn independent(probability: f64) -> Self {
        Self {
            probability,
            model: NoiseModel::Independent,
            buffer_size: DEFAULT_NOISE_BUFFER_SIZE,
        }
    }

    /// Burst flips of up to `max_burst` bits at overall probability `p`
    pub fn burst(probability: f64, max_burst: usize) -> Self {
        Self {
            probability,
            model: NoiseModel::Burst { max_burst },
            buffer_size: DEFAULT_NOISE_BUFFER_SIZE,
        }
    }

    /// Override the independent model's buffer size
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CodecError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(CodecError::InvalidParameter(format!(
                "flip probability {} outside [0, 1]",
                self.probability
            )));
        }

        if self.buffer_size == 0 {
            return Err(CodecError::InvalidParameter(
                "noise buffer size must be at least 1".into(),
            ));
        }

        if let NoiseModel::Burst { max_burst: 0 } = self.model {
            return Err(CodecError::InvalidParameter(
                "max_burst must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Longest run flipped by one burst; 1 for the independent model
    pub fn max_burst(&self) -> usize {
        match self.model {
            NoiseModel::Independent => 1,
            NoiseModel::Burst { max_burst } => max_burst.max(1),
        }
    }

    /// Probability that a burst starts at a given bit
    pub fn effective_rate(&self) -> f64 {
        let max_burst = self.max_burst();
        if max_burst < 2 {
            self.probability
        } else {
            self.probability / ((1 + max_burst) as f64 / 2.0)
        }
    }

    /// Bytes read per buffer.
    ///
    /// The burst model sizes its buffer so roughly `max_burst` bursts are
    /// expected per buffer: `round(max_burst / rate / 8)`.
    pub fn read_buffer_size(&self) -> usize {
        let max_burst = self.max_burst();
        let rate = self.effective_rate();
        if max_burst < 2 || rate <= 0.0 {
            return self.buffer_size;
        }

        let size = max_burst as f64 / rate / 8.0 + 0.5;
        if size >= MAX_NOISE_BUFFER_SIZE as f64 {
            MAX_NOISE_BUFFER_SIZE
        } else {
            (size as usize).max(1)
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::independent(DEFAULT_FLIP_PROBABILITY)
    }
}

/// Counters reported by the noise injector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseStats {
    /// Bytes passed through
    pub bytes: u64,

    /// Bits flipped
    pub bits_flipped: u64,

    /// Runs of flipped bits (equals `bits_flipped` for independent noise)
    pub bursts: u64,
}

impl NoiseStats {
    /// Add another set of counters
    pub fn merge(&mut self, other: &NoiseStats) {
        self.bytes += other.bytes;
        self.bits_flipped += other.bits_flipped;
        self.bursts += other.bursts;
    }

    /// Observed fraction of flipped bits
    pub fn flip_rate(&self) -> f64 {
        if self.bytes == 0 {
            return 0.0;
        }
        self.bits_flipped as f64 / (self.bytes * 8) as f64
    }
}

/// Noise injector driven by an explicit randomness source
#[derive(Debug)]
pub struct Jammer<R> {
    config: NoiseConfig,
    rng: R,
}

impl<R: Rng> Jammer<R> {
    /// Create a jammer after validating `config`
    pub fn new(config: NoiseConfig, rng: R) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Active configuration
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Flip bits of `buf` in place according to the configured model
    pub fn distort_buffer(&mut self, buf: &mut [u8]) -> NoiseStats {
        let mut stats = NoiseStats {
            bytes: buf.len() as u64,
            ..NoiseStats::default()
        };

        if self.config.probability <= 0.0 {
            return stats;
        }

        let bits = buf.len() * 8;
        let rate = self.config.effective_rate();
        let max_burst = self.config.max_burst();

        let mut addr = 0;
        while addr < bits {
            if self.rng.gen::<f64>() >= rate {
                addr += 1;
                continue;
            }

            let run = if max_burst > 1 {
                1 + self.rng.gen_range(0..max_burst)
            } else {
                1
            };
            let end = (addr + run).min(bits);
            for flip_addr in addr..end {
                flip_buffer_bit(buf, flip_addr);
            }

            stats.bits_flipped += (end - addr) as u64;
            stats.bursts += 1;
            addr = end;
        }

        stats
    }

    /// Copy `reader` to `writer`, flipping bits along the way.
    ///
    /// The output is exactly as long as the input, including a final short
    /// buffer.
    #[cfg(feature = "std")]
    pub fn distort_stream<I: Read, O: Write>(
        &mut self,
        reader: &mut I,
        writer: &mut O,
    ) -> Result<NoiseStats, CodecError> {
        let mut stats = NoiseStats::default();

        if self.config.probability <= 0.0 {
            stats.bytes = std::io::copy(reader, writer)?;
            writer.flush()?;
            return Ok(stats);
        }

        let mut buffer = vec![0u8; self.config.read_buffer_size()];

        #[cfg(feature = "logging")]
        debug!(
            "Distorting stream: p = {}, rate = {}, max burst = {}, buffer = {} bytes",
            self.config.probability,
            self.config.effective_rate(),
            self.config.max_burst(),
            buffer.len()
        );

        loop {
            let read = read_full(reader, &mut buffer)?;
            if read == 0 {
                break;
            }

            let chunk = &mut buffer[..read];
            let buffer_stats = self.distort_buffer(chunk);
            writer.write_all(chunk)?;
            stats.merge(&buffer_stats);

            if read < buffer.len() {
                break;
            }
        }

        #[cfg(feature = "logging")]
        debug!(
            "Flipped {} bits in {} bursts over {} bytes",
            stats.bits_flipped, stats.bursts, stats.bytes
        );

        writer.flush()?;
        Ok(stats)
    }
}
