//! The cart state container.
//!
//! [`CartStore`] owns the ordered list of line items, mirrors it to a
//! [`KeyValueStorage`] under a single key, and exposes the three cart
//! operations. Storage I/O never blocks an operation: the initial load and
//! every persistence write run as detached tokio tasks, so operations must be
//! called from within a tokio runtime.
//!
//! Ordering caveats:
//! - An operation invoked before the load finishes runs against the items
//!   present at that moment; the finished load then replaces the items
//!   wholesale.
//! - Writes are not serialized against each other. The last write to land wins.
//! - With [`PersistMode::Lagged`] each write carries the items as they were
//!   before the operation, so storage trails memory by one operation.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    cart,
    config::{CartConfig, PersistMode},
    dto::{LineItem, NewLineItem},
    stores::KeyValueStorage,
    Error,
};

pub struct CartStore {
    items: Arc<watch::Sender<Vec<LineItem>>>,
    storage: Arc<dyn KeyValueStorage>,
    key: Arc<str>,
    persist_mode: PersistMode,
    load_started: AtomicBool,
    /// Detached load/persist tasks not yet reaped. Dropping a handle detaches
    /// the task, so unmounting never cancels an in-flight write.
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl CartStore {
    /// Creates an empty cart. Nothing is read from storage until [`load`](Self::load).
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &CartConfig) -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self {
            items: Arc::new(items),
            storage,
            key: Arc::from(config.storage_key()),
            persist_mode: config.persist_mode,
            load_started: AtomicBool::new(false),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn persist_mode(&self) -> PersistMode {
        self.persist_mode
    }

    /// Current items, newest addition first.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.borrow().to_vec()
    }

    /// Receiver that is notified whenever the in-memory items change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.items.subscribe()
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        cart::item_count(&self.items.borrow())
    }

    /// Starts reading the saved cart from storage. Only the first call has any
    /// effect; the read runs in the background and failures are logged.
    pub fn load(&self) {
        if self.load_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let items = Arc::clone(&self.items);
        let storage = Arc::clone(&self.storage);
        let key = Arc::clone(&self.key);
        self.track(tokio::spawn(async move {
            match read_saved_items(storage.as_ref(), &key).await {
                Ok(Some(saved)) => {
                    info!(key = %key, count = saved.len(), "loaded saved cart");
                    items.send_replace(saved);
                }
                Ok(None) => debug!(key = %key, "no saved cart"),
                Err(e) => warn!(key = %key, error = %e, "failed to load saved cart"),
            }
        }));
    }

    /// Adds one unit of `product`; see [`cart::add_item`].
    pub fn add_to_cart(&self, product: NewLineItem) {
        debug!(id = %product.id, "add to cart");
        self.apply(|items| cart::add_item(items, product));
    }

    pub fn increment(&self, id: &str) {
        debug!(id, "increment");
        self.apply(|items| cart::increment_item(items, id));
    }

    pub fn decrement(&self, id: &str) {
        debug!(id, "decrement");
        self.apply(|items| cart::decrement_item(items, id));
    }

    /// Waits for every background task started so far (and any started while
    /// waiting) to finish. Does not cancel anything.
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.pending.lock());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "cart background task failed");
                }
            }
        }
    }

    /// Runs `mutate` on the items, then persists per the configured mode.
    /// `mutate` returns whether it changed anything; subscribers are only
    /// notified on change, but storage is written either way.
    fn apply<F>(&self, mutate: F)
    where
        F: FnOnce(&mut Vec<LineItem>) -> bool,
    {
        let mode = self.persist_mode;
        let mut snapshot = Vec::new();
        self.items.send_if_modified(|items| match mode {
            PersistMode::Lagged => {
                snapshot = items.clone();
                mutate(items)
            }
            PersistMode::Current => {
                let changed = mutate(items);
                snapshot = items.clone();
                changed
            }
        });
        self.persist(&snapshot);
    }

    fn persist(&self, snapshot: &[LineItem]) {
        let value = match serde_json::to_string(snapshot) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode cart");
                return;
            }
        };

        let storage = Arc::clone(&self.storage);
        let key = Arc::clone(&self.key);
        self.track(tokio::spawn(async move {
            if let Err(e) = storage.set_item(&key, value).await {
                warn!(key = %key, error = %e, "failed to persist cart");
            }
        }));
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock();
        pending.retain(|pending| !pending.is_finished());
        pending.push(handle);
    }
}

/// Reads and decodes the saved items. An empty stored value counts as absent.
async fn read_saved_items(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Vec<LineItem>>, Error> {
    match storage.get_item(key).await? {
        Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
        _ => Ok(None),
    }
}
