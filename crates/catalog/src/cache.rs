//! Tagged in-memory query results with explicit rollback.
//!
//! Every successfully resolved query leaves a [`CachedResult`] here, tagged
//! with the identifiers it depends on plus - for collection results - the
//! [`Tag::AllProducts`] sentinel. The mutation engine uses the inverted tag
//! index to find which live results a mutation on a given product must
//! patch, and captures a [`PatchSet`] beforehand so a failed mutation can
//! restore each result to its exact prior contents.
//!
//! There is no TTL and no size-bound eviction: results live until they are
//! explicitly invalidated or the cache is dropped. This mirrors the system's
//! deliberate fetch-once lifecycle.

use std::collections::{HashMap, HashSet};

use shopwindow_core::{Product, ProductId, ProductPatch};

/// Shape of a cached query.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum QueryKey {
    /// The full product collection.
    Collection,
    /// A single product looked up by identifier.
    Item(ProductId),
}

/// A resolved query result.
///
/// Collection and item results share no common structural type, so the
/// variants are explicit and the mutation engine pattern-matches them
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResult {
    Collection(Vec<Product>),
    Item(Product),
}

/// A dependency tag correlating cached results with the entities they hold.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Tag {
    /// The result depends on this specific product.
    Product(ProductId),
    /// Whole-collection sentinel: the result depends on every product.
    AllProducts,
}

/// Tags for a collection result: the sentinel plus every member id.
#[must_use]
pub fn collection_tags(products: &[Product]) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(products.len() + 1);
    tags.push(Tag::AllProducts);
    tags.extend(products.iter().map(|p| Tag::Product(p.id)));
    tags
}

// =============================================================================
// ResultCache
// =============================================================================

struct TaggedResult {
    value: CachedResult,
    tags: Vec<Tag>,
}

impl TaggedResult {
    /// Whether this result actually contains the product `id`.
    fn holds(&self, id: ProductId) -> bool {
        match &self.value {
            CachedResult::Collection(products) => products.iter().any(|p| p.id == id),
            CachedResult::Item(product) => product.id == id,
        }
    }
}

/// Live query results indexed by key and by dependency tag.
#[derive(Default)]
pub struct ResultCache {
    results: HashMap<QueryKey, TaggedResult>,
    by_tag: HashMap<Tag, HashSet<QueryKey>>,
}

impl ResultCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` with its dependency `tags`, replacing any
    /// prior result for the same key.
    pub fn insert(&mut self, key: QueryKey, value: CachedResult, tags: Vec<Tag>) {
        self.unlink(key);
        for tag in &tags {
            self.by_tag.entry(*tag).or_default().insert(key);
        }
        self.results.insert(key, TaggedResult { value, tags });
    }

    /// The result currently held under `key`, if any.
    #[must_use]
    pub fn get(&self, key: QueryKey) -> Option<&CachedResult> {
        self.results.get(&key).map(|entry| &entry.value)
    }

    /// Keys of every live result carrying `tag`.
    #[must_use]
    pub fn keys_for(&self, tag: Tag) -> Vec<QueryKey> {
        self.by_tag
            .get(&tag)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Drop the result under `key`.
    pub fn invalidate(&mut self, key: QueryKey) {
        self.unlink(key);
    }

    /// Drop every result.
    pub fn invalidate_all(&mut self) {
        self.results.clear();
        self.by_tag.clear();
    }

    fn unlink(&mut self, key: QueryKey) {
        if let Some(entry) = self.results.remove(&key) {
            for tag in entry.tags {
                if let Some(keys) = self.by_tag.get_mut(&tag) {
                    keys.remove(&key);
                    if keys.is_empty() {
                        self.by_tag.remove(&tag);
                    }
                }
            }
        }
    }

    /// Keys affected by a mutation on `id`: results tagged with the product
    /// itself or with the whole-collection sentinel.
    fn keys_touching(&self, id: ProductId) -> Vec<QueryKey> {
        let mut keys = self.keys_for(Tag::Product(id));
        for key in self.keys_for(Tag::AllProducts) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Speculatively merge `patch` into every live result holding `id`.
    ///
    /// Returns the [`PatchSet`] that restores the prior state; apply it with
    /// [`PatchSet::revert`] if the underlying mutation fails.
    pub fn patch_update(&mut self, id: ProductId, patch: &ProductPatch) -> PatchSet {
        let mut reversals = Vec::new();

        for key in self.keys_touching(id) {
            let Some(entry) = self.results.get_mut(&key) else {
                continue;
            };
            if !entry.holds(id) {
                continue;
            }

            reversals.push(Reversal::of(key, entry));
            match &mut entry.value {
                CachedResult::Collection(products) => {
                    for product in products.iter_mut().filter(|p| p.id == id) {
                        patch.apply(product);
                    }
                }
                CachedResult::Item(product) => patch.apply(product),
            }
        }

        PatchSet { reversals }
    }

    /// Speculatively remove `id` from every live result holding it.
    ///
    /// Collection results drop the matching entry in place; item results for
    /// the deleted product are invalidated outright. Positions are preserved
    /// by the returned [`PatchSet`], so a revert restores byte-for-byte prior
    /// contents.
    pub fn patch_delete(&mut self, id: ProductId) -> PatchSet {
        let mut reversals = Vec::new();
        let mut dropped = Vec::new();

        for key in self.keys_touching(id) {
            let Some(entry) = self.results.get_mut(&key) else {
                continue;
            };
            if !entry.holds(id) {
                continue;
            }

            reversals.push(Reversal::of(key, entry));
            match &mut entry.value {
                CachedResult::Collection(products) => products.retain(|p| p.id != id),
                CachedResult::Item(_) => dropped.push(key),
            }
        }

        for key in dropped {
            self.unlink(key);
        }

        PatchSet { reversals }
    }
}

// =============================================================================
// PatchSet
// =============================================================================

/// Inverse of one speculative edit: reinstates a result's prior value and
/// tags under its key.
struct Reversal {
    key: QueryKey,
    value: CachedResult,
    tags: Vec<Tag>,
}

impl Reversal {
    fn of(key: QueryKey, entry: &TaggedResult) -> Self {
        Self {
            key,
            value: entry.value.clone(),
            tags: entry.tags.clone(),
        }
    }
}

/// The rollback command for one speculative mutation.
///
/// Captured before any cached result is touched; dropping it commits the
/// speculative state, calling [`PatchSet::revert`] restores every affected
/// result to its exact pre-mutation contents.
#[must_use = "dropping a PatchSet commits the speculative patch"]
pub struct PatchSet {
    reversals: Vec<Reversal>,
}

impl PatchSet {
    /// Restore every affected result to its pre-patch value.
    pub fn revert(self, cache: &mut ResultCache) {
        for reversal in self.reversals {
            cache.insert(reversal.key, reversal.value, reversal.tags);
        }
    }

    /// Whether the speculative patch touched any live result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reversals.is_empty()
    }
}
