//! Decoder configuration.

/// Default maximum nesting depth for aggregates (arrays, maps, sets, etc.).
///
/// An aggregate header met at this depth is reported as
/// [`MalformedReason::RecursionTooDeep`](crate::MalformedReason::RecursionTooDeep)
/// and its children are left undecoded.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Default maximum payload length shown inline or offered to the embedded
/// decoder.
pub const DEFAULT_DISPLAY_THRESHOLD: usize = 256;

/// Default cap on bytes a [`Reassembler`](crate::Reassembler) retains while
/// waiting for an incomplete frame (16MB).
pub const DEFAULT_MAX_PENDING_LEN: usize = 16 * 1024 * 1024;

/// Configuration options for RESP decoding.
///
/// These are plain values consumed by the decoder; the transport owns the
/// policy of whether more bytes can actually be gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Emit [`ResumeRequest`](crate::ResumeRequest)s for incomplete frames.
    ///
    /// When disabled, incomplete frames are decoded partially over the bytes
    /// on hand and marked as partial.
    pub enable_reassembly: bool,
    /// Offer JSON-looking bulk payloads to the embedded decoder.
    pub enable_embedded_sniffing: bool,
    /// Maximum payload length shown inline or sniffed.
    pub display_threshold: usize,
    /// Maximum aggregate nesting depth.
    pub max_depth: usize,
    /// Maximum bytes retained by a reassembler between segments.
    pub max_pending_len: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderOptions {
    /// Create new decoder options with default values.
    pub const fn new() -> Self {
        Self {
            enable_reassembly: true,
            enable_embedded_sniffing: true,
            display_threshold: DEFAULT_DISPLAY_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
            max_pending_len: DEFAULT_MAX_PENDING_LEN,
        }
    }

    /// Enable or disable resume requests.
    pub const fn enable_reassembly(mut self, enable: bool) -> Self {
        self.enable_reassembly = enable;
        self
    }

    /// Enable or disable embedded document sniffing.
    pub const fn enable_embedded_sniffing(mut self, enable: bool) -> Self {
        self.enable_embedded_sniffing = enable;
        self
    }

    /// Set the display threshold.
    pub const fn display_threshold(mut self, len: usize) -> Self {
        self.display_threshold = len;
        self
    }

    /// Set the maximum nesting depth.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the reassembly buffer cap.
    pub const fn max_pending_len(mut self, len: usize) -> Self {
        self.max_pending_len = len;
        self
    }
}
