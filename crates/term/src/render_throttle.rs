//! Flush throttling for frames that did not change.

/// FNV-1a 64-bit over `bytes`, mixed with `salt`.
///
/// Cheap change detector for the packed lattice plus whatever scalar state
/// the caller folds into `salt` (step count, run state).
pub fn fingerprint(bytes: &[u8], salt: u64) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in salt.to_le_bytes().iter().chain(bytes) {
        h ^= *b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_flush_ms: u64,
    last_fingerprint: u64,
    has_flushed: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_flush_ms: 0,
            last_fingerprint: 0,
            has_flushed: false,
        }
    }

    /// Force the next call to flush, e.g. after a terminal resize.
    pub fn invalidate(&mut self) {
        self.has_flushed = false;
    }

    /// Decide whether to flush the composed frame to the terminal.
    ///
    /// - When `is_static=false` (simulation running): always flush.
    /// - When `is_static=true`: flush immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_flush(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        if !self.has_flushed || !is_static || fingerprint != self.last_fingerprint {
            self.has_flushed = true;
            self.last_flush_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_flush_ms) >= self.min_static_interval_ms {
            self.last_flush_ms = now_ms;
            return true;
        }

        false
    }
}
