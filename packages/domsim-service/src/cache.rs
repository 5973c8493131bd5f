use std::{
	future::Future,
	hash::Hash,
	num::NonZeroUsize,
	sync::{Mutex, MutexGuard},
	time::{Duration, Instant},
};

use lru::LruCache;

/// Read-through cache with a time-to-live and a bounded entry count.
///
/// A zero TTL disables the cache: every read goes to the loader and nothing is stored. When
/// full, the least recently used entry is evicted. Loader errors are never cached.
pub struct TtlCache<K, V> {
	ttl: Duration,
	entries: Mutex<LruCache<K, Entry<V>>>,
}

struct Entry<V> {
	value: V,
	inserted_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
	K: Eq + Hash,
	V: Clone,
{
	pub fn new(ttl: Duration, max_entries: usize) -> Self {
		let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);

		Self { ttl, entries: Mutex::new(LruCache::new(capacity)) }
	}

	pub fn is_enabled(&self) -> bool {
		!self.ttl.is_zero()
	}

	pub fn get(&self, key: &K) -> Option<V> {
		self.get_at(key, Instant::now())
	}

	pub fn insert(&self, key: K, value: V) {
		self.insert_at(key, value, Instant::now());
	}

	pub fn invalidate(&self, key: &K) -> bool {
		self.lock().pop(key).is_some()
	}

	pub fn clear(&self) {
		self.lock().clear();
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	/// Returns the cached value, or runs `load` and caches its `Ok` result.
	///
	/// The lock is not held across `load`, so concurrent misses may each load.
	pub async fn get_or_try_load<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<V, E>>,
	{
		if let Some(value) = self.get(&key) {
			return Ok(value);
		}

		let value = load().await?;

		self.insert(key, value.clone());

		Ok(value)
	}

	fn get_at(&self, key: &K, now: Instant) -> Option<V> {
		if !self.is_enabled() {
			return None;
		}

		let mut entries = self.lock();
		let entry = entries.get(key)?;

		if now.saturating_duration_since(entry.inserted_at) < self.ttl {
			return Some(entry.value.clone());
		}

		entries.pop(key);

		None
	}

	fn insert_at(&self, key: K, value: V, now: Instant) {
		if !self.is_enabled() {
			return;
		}

		self.lock().put(key, Entry { value, inserted_at: now });
	}

	fn lock(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner())
	}
}
