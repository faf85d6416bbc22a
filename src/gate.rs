//! Per-sink throttle and dedup gate
//!
//! Each sink owns one [`ThrottleGate`]. A candidate `(key, value)` is admitted
//! when the key has never been emitted, or when the configured interval has
//! elapsed since its last emission *and* the value differs from the one last
//! emitted. The interval check runs first: a value that changes and changes
//! back inside one interval is never observed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::Value;

/// How numeric zeros are treated before the timing checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Zeros are ordinary values.
    Forward,
    /// Zeros are rejected outright.
    Suppress,
}

impl ZeroPolicy {
    pub fn from_allow_zero(allow_zero: bool) -> Self {
        if allow_zero { ZeroPolicy::Forward } else { ZeroPolicy::Suppress }
    }
}

/// Last admitted emission for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub at: Instant,
    pub value: Value,
}

/// Outcome of [`ThrottleGate::admit`], mostly useful for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    ZeroSuppressed,
    TooSoon,
    Unchanged,
}

impl Verdict {
    pub fn is_admitted(self) -> bool {
        self == Verdict::Admitted
    }
}

#[derive(Debug, Default)]
pub struct ThrottleGate {
    last: HashMap<String, Emission>,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `value` may be emitted under `key` at `now`.
    ///
    /// An admitted value replaces the stored emission for `key`.
    pub fn admit(
        &mut self,
        key: &str,
        value: &Value,
        zeros: ZeroPolicy,
        interval: Duration,
        now: Instant,
    ) -> Verdict {
        if zeros == ZeroPolicy::Suppress && value.is_zero() {
            return Verdict::ZeroSuppressed;
        }

        match self.last.get_mut(key) {
            None => {
                self.last.insert(key.to_string(), Emission { at: now, value: value.clone() });
                Verdict::Admitted
            }
            Some(prev) => {
                if now.saturating_duration_since(prev.at) < interval {
                    return Verdict::TooSoon;
                }
                if prev.value.same_as(value) {
                    return Verdict::Unchanged;
                }
                prev.at = now;
                prev.value = value.clone();
                Verdict::Admitted
            }
        }
    }

    pub fn last(&self, key: &str) -> Option<&Emission> {
        self.last.get(key)
    }

    /// Number of keys with a stored emission.
    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    /// Forget every stored emission.
    pub fn clear(&mut self) {
        self.last.clear();
    }
}
