//! Records the sequence of public operations a call performs.
//!
//! The sequence depends only on public lengths and the variant, so two calls
//! with equal-length inputs must produce identical traces. Tests use this to
//! check that no control flow depends on secret data.

/// One public step of an AEAD pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// A tweakable block cipher call with its public TK1 contents.
    Cipher {
        /// Domain-separation byte.
        domain: u8,
        /// Block counter value.
        counter: u64,
    },
    /// A padded block XORed into the state.
    Absorb,
    /// The feedback transform over `len` message bytes.
    Feedback {
        /// Bytes processed.
        len: usize,
    },
    /// Keystream applied to `len` bytes.
    Keystream {
        /// Bytes processed.
        len: usize,
    },
    /// One compression-function call of the tag hash.
    Compress,
    /// Constant-time tag comparison.
    Verify,
}

/// Sink for [`Step`]s.
pub(crate) trait Tracer {
    fn record(&mut self, step: Step);
}

/// Production calls discard the trace.
impl Tracer for () {
    #[inline(always)]
    fn record(&mut self, _step: Step) {}
}

impl Tracer for Vec<Step> {
    fn record(&mut self, step: Step) {
        self.push(step);
    }
}
