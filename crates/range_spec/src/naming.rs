//! Per-pod resource naming and credentials.

use sha2::{Digest, Sha256};

use crate::models::Environment;

const PASSWORD_LEN: usize = 16;
const PASSWORD_DOMAIN: &[u8] = b"ranger/pod-password/v1\0";

// Ambiguous glyphs (I, O, l, 0, 1) are left out.
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";

/// Derives per-pod names and passwords for one environment.
#[derive(Debug, Clone, Copy)]
pub struct PodNamer<'a> {
    environment: &'a str,
    prefix: &'a str,
}

impl<'a> PodNamer<'a> {
    pub fn new(environment: &'a str, prefix: &'a str) -> Self {
        Self { environment, prefix }
    }

    /// `prefix` followed by the decimal pod offset, e.g. `blue3`.
    pub fn suffix(&self, pod_offset: i64) -> String {
        format!("{}{}", self.prefix, pod_offset)
    }

    /// `base_<suffix>`, the name of a per-pod infrastructure resource.
    pub fn resource_name(&self, base: &str, pod_offset: i64) -> String {
        format!("{}_{}", base, self.suffix(pod_offset))
    }

    /// Deterministic password for pod `pod_id` of this environment.
    ///
    /// Every generated password mixes upper case, lower case and digits.
    pub fn pod_password(&self, pod_id: i64) -> String {
        determined_password(&format!("{}-{}", self.environment, pod_id))
    }
}

impl Environment {
    /// Naming scheme for this environment's pods.
    pub fn pod_namer(&self) -> PodNamer<'_> {
        PodNamer::new(&self.name, &self.prefix)
    }
}

/// Map a seed to a password through SHA-256.
pub fn determined_password(seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(PASSWORD_DOMAIN);
    hasher.update(seed.as_bytes());
    let digest = hasher.finalize();

    digest
        .iter()
        .take(PASSWORD_LEN)
        .enumerate()
        .map(|(i, byte)| {
            let alphabet = match i % 3 {
                0 => UPPER,
                1 => LOWER,
                _ => DIGITS,
            };
            alphabet[usize::from(*byte) % alphabet.len()] as char
        })
        .collect()
}
