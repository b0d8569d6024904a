//! The catalog client: read-through caching plus optimistic mutations.
//!
//! # Read path
//!
//! `get_collection` serves the mirror verbatim when it is populated and only
//! falls back to the remote source on a miss, converting every record and
//! seeding the mirror on the way through. `get_by_id` reads the mirror
//! first too, but a single-item fallback fetch never seeds the mirror - only
//! full-collection fetches do.
//!
//! # Mutation path
//!
//! Each mutation moves through `Initiated -> Patched -> Committed |
//! RolledBack`. In the Patched state every live cached result depending on
//! the target product is edited speculatively, with a [`PatchSet`] captured
//! first. The mirror is then read, edited, and saved wholesale; if the
//! mirror is absent (or, for updates, lacks the target) the patch set is
//! reverted and the caller sees [`CatalogError::NoCache`]. A committed
//! mutation leaves the mirror consistent with the patched collection result.
//!
//! A single async mutex serializes every operation, so readers always see a
//! consistent snapshot and at most one mutation's speculative state exists
//! at a time. A mutation queued behind another on the same product observes
//! its predecessor's outcome, not the pre-mutation state (most recent
//! request wins). There is no cancellation: once initiated, a mutation
//! always reaches Committed or RolledBack.

use rust_decimal::Decimal;
use shopwindow_core::{Product, ProductId, ProductPatch};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::cache::{CachedResult, QueryKey, ResultCache, Tag, collection_tags};
use crate::currency;
use crate::error::{CatalogError, FetchError, StorageError};
use crate::mirror::MirrorStore;
use crate::remote::ProductSource;

/// Catalog facade over a mirror store and a remote product source.
pub struct CatalogClient<S, R> {
    store: S,
    source: R,
    rate: Decimal,
    cache: Mutex<ResultCache>,
}

impl<S: MirrorStore, R: ProductSource> CatalogClient<S, R> {
    /// Create a client with the given store, source, and exchange rate.
    pub fn new(store: S, source: R, rate: Decimal) -> Self {
        Self {
            store,
            source,
            rate,
            cache: Mutex::new(ResultCache::new()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get the full product collection.
    ///
    /// Serves the mirror verbatim when populated; otherwise fetches the
    /// collection remotely, converts every price, seeds the mirror, and
    /// returns the converted records. A mirror write failure is logged and
    /// the in-memory result is returned anyway.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] if the mirror is empty and the remote
    /// call fails; nothing is persisted or cached in that case.
    #[instrument(skip(self))]
    pub async fn get_collection(&self) -> Result<Vec<Product>, CatalogError> {
        let mut cache = self.cache.lock().await;

        if let Some(products) = self.store.load().await {
            debug!(count = products.len(), "mirror hit for collection");
            let tags = collection_tags(&products);
            cache.insert(
                QueryKey::Collection,
                CachedResult::Collection(products.clone()),
                tags,
            );
            return Ok(products);
        }

        let raw = self.source.fetch_all().await?;
        let products: Vec<Product> = raw
            .into_iter()
            .map(|record| currency::normalize(record, self.rate))
            .collect();
        debug!(count = products.len(), "fetched and converted collection");

        if let Err(err) = self.store.save(&products).await {
            // Non-fatal by policy: serve the in-memory result regardless
            warn!(error = %err, "failed to seed mirror after collection fetch");
        }

        let tags = collection_tags(&products);
        cache.insert(
            QueryKey::Collection,
            CachedResult::Collection(products.clone()),
            tags,
        );
        Ok(products)
    }

    /// Get a single product by identifier.
    ///
    /// Serves the mirror entry verbatim when present. When the mirror is
    /// empty, or populated but missing `id`, the product is fetched
    /// individually and converted - without seeding the mirror: only
    /// full-collection fetches do that.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the fallback fetch cannot
    /// locate `id`, or [`CatalogError::Fetch`] on transport failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        let mut cache = self.cache.lock().await;

        if let Some(products) = self.store.load().await {
            if let Some(product) = products.into_iter().find(|p| p.id == id) {
                debug!("mirror hit for product");
                cache.insert(
                    QueryKey::Item(id),
                    CachedResult::Item(product.clone()),
                    vec![Tag::Product(id)],
                );
                return Ok(product);
            }
            debug!("mirror populated but product absent, trying remote");
        }

        let raw = match self.source.fetch_one(id).await {
            Ok(raw) => raw,
            Err(FetchError::NotFound) => return Err(CatalogError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };
        let product = currency::normalize(raw, self.rate);

        cache.insert(
            QueryKey::Item(id),
            CachedResult::Item(product.clone()),
            vec![Tag::Product(id)],
        );
        Ok(product)
    }

    // =========================================================================
    // Mutations (local-mirror-only, never propagated remotely)
    // =========================================================================

    /// Merge `patch` into the product `id`.
    ///
    /// Live cached results are patched speculatively before the mirror
    /// write. A mirror save failure is logged and the mutation still
    /// commits; only a missing mirror or missing target rolls back.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCache`] if the mirror is unpopulated or has
    /// no entry for `id`; every speculative edit is reverted first.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        let mut cache = self.cache.lock().await;

        // Patched: speculative, reverted on failure
        let speculative = cache.patch_update(id, &patch);

        let Some(mut products) = self.store.load().await else {
            speculative.revert(&mut cache);
            debug!("update rolled back: mirror unpopulated");
            return Err(CatalogError::NoCache);
        };

        let Some(target) = products.iter_mut().find(|p| p.id == id) else {
            speculative.revert(&mut cache);
            debug!("update rolled back: product absent from mirror");
            return Err(CatalogError::NoCache);
        };

        patch.apply(target);
        let updated = target.clone();

        if let Err(err) = self.store.save(&products).await {
            warn!(error = %err, "mirror save failed after update; committing in-memory state");
        }

        // Committed: the speculative patch already matches the mirror
        drop(speculative);
        Ok(updated)
    }

    /// Delete the product `id` from the mirror.
    ///
    /// Live cached results drop the product speculatively before the mirror
    /// write. Deleting an id the mirror does not contain succeeds as a
    /// no-op: the wholesale filter is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCache`] only when the mirror itself is
    /// unpopulated; speculative edits are reverted first.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        let mut cache = self.cache.lock().await;

        let speculative = cache.patch_delete(id);

        let Some(mut products) = self.store.load().await else {
            speculative.revert(&mut cache);
            debug!("delete rolled back: mirror unpopulated");
            return Err(CatalogError::NoCache);
        };

        products.retain(|p| p.id != id);

        if let Err(err) = self.store.save(&products).await {
            warn!(error = %err, "mirror save failed after delete; committing in-memory state");
        }

        drop(speculative);
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reset the mirror and drop every cached result.
    ///
    /// The next `get_collection` fetches from the remote source again.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the mirror blob cannot be removed.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().await;
        self.store.clear().await?;
        cache.invalidate_all();
        debug!("mirror cleared");
        Ok(())
    }

    /// Snapshot of the currently-held collection result, if any.
    ///
    /// Exposed for inspecting optimistic state in tests and diagnostics;
    /// normal reads go through [`get_collection`](Self::get_collection).
    pub async fn cached_collection(&self) -> Option<Vec<Product>> {
        let cache = self.cache.lock().await;
        match cache.get(QueryKey::Collection) {
            Some(CachedResult::Collection(products)) => Some(products.clone()),
            _ => None,
        }
    }
}
