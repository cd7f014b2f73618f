//! Resolution of a keyset into runtime signing and verification entries.

use crate::format;
use signet_core::{HmacKey, Keyset, OutputPrefixType};
use std::collections::HashMap;

/// One enabled key, with the header identifier it is indexed under.
///
/// Only `Tink` keys carry an identifier: their headers always self-identify.
/// `Raw` keys stay unindexed because their headers never reliably carry one.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    key: HmacKey,
    kid: Option<String>,
}

impl Entry {
    pub(crate) fn key(&self) -> &HmacKey {
        &self.key
    }
}

/// The runtime view of a keyset snapshot.
///
/// Rebuilt from scratch whenever the keyset changes; immutable thereafter,
/// so concurrent signers and verifiers never observe a half-updated set.
/// A set with zero enabled keys is valid: it verifies nothing and fails
/// at sign time, not at construction.
#[derive(Debug)]
pub(crate) struct PrimitiveSet {
    /// Enabled keys in keyset order.
    entries: Vec<Entry>,
    /// Indices of `Tink` entries, grouped by header identifier.
    by_kid: HashMap<String, Vec<usize>>,
    /// Indices of unindexed (`Raw`) entries, checked against every token.
    fallback: Vec<usize>,
    /// The primary entry, present only if the primary key is enabled.
    signing: Option<Entry>,
}

impl PrimitiveSet {
    pub(crate) fn resolve(keyset: &Keyset) -> Self {
        let mut entries = Vec::new();
        let mut by_kid: HashMap<String, Vec<usize>> = HashMap::new();
        let mut fallback = Vec::new();

        for key in keyset.keys() {
            if !key.is_enabled() {
                continue;
            }
            let kid = match key.prefix() {
                OutputPrefixType::Tink => Some(
                    key.custom_kid()
                        .map(str::to_string)
                        .unwrap_or_else(|| format::keyset_kid(key.key_id())),
                ),
                _ => None,
            };
            let index = entries.len();
            match &kid {
                Some(kid) => by_kid.entry(kid.clone()).or_default().push(index),
                None => fallback.push(index),
            }
            entries.push(Entry {
                key: key.clone(),
                kid,
            });
        }

        let signing = keyset.primary().filter(|k| k.is_enabled()).map(|key| Entry {
            kid: None,
            key: key.clone(),
        });

        Self {
            entries,
            by_kid,
            fallback,
            signing,
        }
    }

    /// The entry that signs, if the primary key is enabled.
    pub(crate) fn signing(&self) -> Option<&Entry> {
        self.signing.as_ref()
    }

    pub(crate) fn enabled_len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn indexed_len(&self) -> usize {
        self.entries.len() - self.fallback.len()
    }

    /// Verification candidates, ordered by lookup priority.
    ///
    /// The token's `kid` is an advisory hint: entries indexed under it come
    /// first, then the unindexed fallback group, then every remaining
    /// entry. The full enabled set is always reachable, so a token is never
    /// rejected solely because its `kid` points elsewhere.
    pub(crate) fn candidates(&self, kid: Option<&str>) -> impl Iterator<Item = &Entry> {
        let matched: &[usize] = kid
            .and_then(|kid| self.by_kid.get(kid))
            .map_or(&[], Vec::as_slice);

        let rest = self
            .entries
            .iter()
            .enumerate()
            .filter(move |(i, entry)| {
                !matched.contains(i) && !self.fallback.contains(i) && entry.kid.is_some()
            })
            .map(|(_, entry)| entry);

        matched
            .iter()
            .chain(self.fallback.iter())
            .map(|&i| &self.entries[i])
            .chain(rest)
    }
}
