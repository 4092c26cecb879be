//! Pluggable security policy hooks invoked by the write pipeline.
//!
//! A [`SecurityPolicy`] is consulted before any part is written: it may
//! veto the whole write via a rate limit, reject an individual image via
//! quarantine, and observe file writes via logging/checksum hooks. The
//! write entry point takes a `&dyn SecurityPolicy` explicitly rather than
//! reaching for global state, so callers choose [`PermissiveSecurityPolicy`]
//! or [`StandardSecurityPolicy`] (or their own) at the call site.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::image::ImageFormat;

/// Outcome of scanning an image payload before it is written to `xl/media/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageVerdict {
    /// The payload is accepted as-is.
    Ok,
    /// The payload is rejected; the string is a human-readable reason.
    Quarantine(String),
}

/// Collaborator consulted by the write pipeline around a write.
///
/// Implementations must be `Send + Sync`: the rate limiter hook may be
/// invoked from multiple threads per spec (its own internal state is
/// expected to be synchronized, not the trait object itself).
pub trait SecurityPolicy: Send + Sync {
    /// Checks whether another write-level operation is permitted right
    /// now under this policy's rate limit. Returns `Err` to veto.
    fn check_rate_limit(&self) -> Result<()>;

    /// Validates a destination file path before any file is created there.
    fn validate_file_path(&self, path: &std::path::Path) -> Result<()>;

    /// Scans an image payload destined for `xl/media/` before it is
    /// written, returning a verdict rather than an error so callers can
    /// decide whether quarantine is fatal.
    fn validate_image_bytes(&self, bytes: &[u8], format: ImageFormat) -> ImageVerdict;

    /// Observes a named event with free-form key/value fields. The
    /// default implementation is a no-op sink.
    fn log(&self, event: &str, fields: &[(&str, &str)]) {
        let _ = (event, fields);
    }

    /// Records a checksum for a written part. The default implementation
    /// discards it; checksum storage is off by default per spec.
    fn record_checksum(&self, path: &std::path::Path, sha256: &str) {
        let _ = (path, sha256);
    }
}

/// Default policy: no rate cap, no path restriction, no quarantine, no
/// checksum storage. Matches spec §4.9's "default policy is permissive".
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveSecurityPolicy;

impl SecurityPolicy for PermissiveSecurityPolicy {
    fn check_rate_limit(&self) -> Result<()> {
        Ok(())
    }

    fn validate_file_path(&self, _path: &std::path::Path) -> Result<()> {
        Ok(())
    }

    fn validate_image_bytes(&self, _bytes: &[u8], _format: ImageFormat) -> ImageVerdict {
        ImageVerdict::Ok
    }
}

/// Per-format payload size caps, in bytes.
fn size_cap_bytes(format: ImageFormat) -> usize {
    match format {
        ImageFormat::Gif => 10 * 1024 * 1024,
        ImageFormat::Png => 20 * 1024 * 1024,
        ImageFormat::Jpeg => 15 * 1024 * 1024,
    }
}

/// Fixed set of banned substrings checked against the payload decoded as
/// lossy UTF-8 text — script-injection markers that have no business
/// inside a GIF/PNG/JPEG payload.
const BANNED_SUBSTRINGS: &[&str] = &["<script", "javascript:", "<?php", "<%"];

/// Sliding-window rate limiter: N operations per T seconds, O(N)
/// bookkeeping via a timestamp ring buffer guarded by a mutex so it may
/// be invoked from multiple threads.
struct SlidingWindowLimiter {
    max_ops: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    fn new(max_ops: usize, window: Duration) -> Self {
        Self {
            max_ops,
            window,
            timestamps: Mutex::new(VecDeque::with_capacity(max_ops)),
        }
    }

    fn check(&self) -> Result<()> {
        let now = Instant::now();
        let mut ts = self
            .timestamps
            .lock()
            .map_err(|_| Error::Internal("rate limiter mutex poisoned".to_string()))?;
        while let Some(&front) = ts.front() {
            if now.duration_since(front) > self.window {
                ts.pop_front();
            } else {
                break;
            }
        }
        if ts.len() >= self.max_ops {
            return Err(Error::RateLimit(format!(
                "{}/{}s exceeded",
                self.max_ops,
                self.window.as_secs()
            )));
        }
        ts.push_back(now);
        Ok(())
    }
}

/// Reference security policy: sliding-window rate limiting plus image
/// quarantine by banned substring and per-format size cap.
pub struct StandardSecurityPolicy {
    limiter: SlidingWindowLimiter,
}

impl StandardSecurityPolicy {
    /// Builds a policy with the default 100 operations per 60 seconds.
    pub fn new() -> Self {
        Self::with_rate_limit(100, Duration::from_secs(60))
    }

    /// Builds a policy with a custom rate limit window.
    pub fn with_rate_limit(max_ops: usize, window: Duration) -> Self {
        Self {
            limiter: SlidingWindowLimiter::new(max_ops, window),
        }
    }
}

impl Default for StandardSecurityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityPolicy for StandardSecurityPolicy {
    fn check_rate_limit(&self) -> Result<()> {
        self.limiter.check()
    }

    fn validate_file_path(&self, _path: &std::path::Path) -> Result<()> {
        Ok(())
    }

    fn validate_image_bytes(&self, bytes: &[u8], format: ImageFormat) -> ImageVerdict {
        let cap = size_cap_bytes(format);
        if bytes.len() > cap {
            return ImageVerdict::Quarantine(format!(
                "payload of {} bytes exceeds {:?} cap of {} bytes",
                bytes.len(),
                format,
                cap
            ));
        }
        let text = String::from_utf8_lossy(bytes);
        for needle in BANNED_SUBSTRINGS {
            if text.contains(needle) {
                return ImageVerdict::Quarantine(format!(
                    "payload contains banned substring {needle:?}"
                ));
            }
        }
        ImageVerdict::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_never_rejects() {
        let policy = PermissiveSecurityPolicy;
        assert!(policy.check_rate_limit().is_ok());
        assert!(policy
            .validate_file_path(std::path::Path::new("/tmp/out.xlsx"))
            .is_ok());
        assert_eq!(
            policy.validate_image_bytes(&[0u8; 64], ImageFormat::Png),
            ImageVerdict::Ok
        );
    }

    #[test]
    fn test_standard_rate_limit_exhausts() {
        let policy = StandardSecurityPolicy::with_rate_limit(2, Duration::from_secs(60));
        assert!(policy.check_rate_limit().is_ok());
        assert!(policy.check_rate_limit().is_ok());
        assert!(policy.check_rate_limit().is_err());
    }

    #[test]
    fn test_standard_rejects_oversized_png() {
        let policy = StandardSecurityPolicy::new();
        let bytes = vec![0u8; 21 * 1024 * 1024];
        match policy.validate_image_bytes(&bytes, ImageFormat::Png) {
            ImageVerdict::Quarantine(_) => {}
            ImageVerdict::Ok => panic!("expected quarantine"),
        }
    }

    #[test]
    fn test_standard_rejects_banned_substring() {
        let policy = StandardSecurityPolicy::new();
        let bytes = b"GIF89a<script>alert(1)</script>".to_vec();
        match policy.validate_image_bytes(&bytes, ImageFormat::Gif) {
            ImageVerdict::Quarantine(_) => {}
            ImageVerdict::Ok => panic!("expected quarantine"),
        }
    }

    #[test]
    fn test_standard_accepts_clean_small_payload() {
        let policy = StandardSecurityPolicy::new();
        let bytes = vec![0x47, 0x49, 0x46, 0x38, 0x39, 0x61];
        assert_eq!(
            policy.validate_image_bytes(&bytes, ImageFormat::Gif),
            ImageVerdict::Ok
        );
    }
}
