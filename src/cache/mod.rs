//! Cache module for storing weather API responses to disk
//!
//! This module provides a cache manager that persists fetched weather payloads
//! to the filesystem with configurable TTL (time-to-live) values. It supports
//! graceful degradation by returning expired cache entries with an `is_expired`
//! flag, allowing the application to show stale data when the weather API is
//! unavailable.

mod manager;

pub use manager::{CacheKind, CacheManager, CachedData};
