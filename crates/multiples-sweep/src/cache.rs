//! Memoized sweeps keyed by content hash
//!
//! Regenerating a sweep is cheap for a handful of variants but the preview
//! asks for it on every parameter change. [`SweepCache`] keys the result on a
//! [`ContentHash`] over everything that influences it; presentation-only
//! settings such as the cell size are not part of the key.

use crate::error::SweepError;
use crate::generator::{generate, SweepOptions, Variant};
use moka::sync::Cache;
use multiples_params::{Parameter, RangeMap};
use multiples_text::ContentHash;
use std::sync::Arc;

/// Default number of memoized sweeps
pub const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Concurrent cache of generated sweeps
#[derive(Debug, Clone)]
pub struct SweepCache {
    inner: Cache<ContentHash, Arc<Vec<Variant>>>,
}

impl Default for SweepCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SweepCache {
    /// Cache holding at most `max_capacity` sweeps
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Key for a sweep request
    #[must_use]
    pub fn key(
        code: &str,
        params: &[Parameter],
        ranges: &RangeMap,
        options: &SweepOptions,
    ) -> ContentHash {
        let mut hasher = ContentHash::builder()
            .text(code)
            .number(params.len() as u64);
        for param in params {
            hasher = hasher
                .text(&param.id().to_string())
                .number(param.from() as u64)
                .number(param.to() as u64)
                .text(param.value());
            hasher = match ranges.get(&param.id()) {
                Some(range) => hasher
                    .number(1)
                    .text(&range.start)
                    .text(&range.end)
                    .text(&range.count)
                    .text(range.number_type.as_str()),
                None => hasher.number(0),
            };
        }
        hasher
            .number(options.count as u64)
            .text(options.mode.as_str())
            .number(options.max_cells as u64)
            .finish()
    }

    /// Cached sweep, generating and storing it on a miss
    ///
    /// Failed generations are not cached.
    ///
    /// # Errors
    /// Returns error if generation fails
    pub fn get_or_generate(
        &self,
        code: &str,
        params: &[Parameter],
        ranges: &RangeMap,
        options: &SweepOptions,
    ) -> Result<Arc<Vec<Variant>>, SweepError> {
        let key = Self::key(code, params, ranges, options);
        if let Some(cached) = self.inner.get(&key) {
            tracing::debug!(key = %key.short(), "sweep cache hit");
            return Ok(cached);
        }

        tracing::debug!(key = %key.short(), "sweep cache miss");
        let variants = Arc::new(generate(code, params, ranges, options)?);
        self.inner.insert(key, Arc::clone(&variants));
        Ok(variants)
    }

    /// Check if a sweep is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &ContentHash) -> bool {
        self.inner.contains_key(key)
    }

    /// Drop every cached sweep
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of cached sweeps
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
