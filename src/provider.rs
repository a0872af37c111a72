//! Scoped access to the one shared cart.
//!
//! A [`CartProvider`] is owned by the composition root. Mounting it creates
//! the [`CartStore`] and starts the saved-cart load; everything below it gets
//! a [`CartHandle`] through [`CartProvider::use_cart`]. Asking an unmounted
//! provider for the cart fails with [`Error::OutsideProvider`].

use std::sync::Arc;
use tracing::info;

use crate::{config::CartConfig, store::CartStore, stores::KeyValueStorage, Error};

/// Shared handle to the mounted cart.
pub type CartHandle = Arc<CartStore>;

#[derive(Default)]
pub struct CartProvider {
    cart: Option<CartHandle>,
}

impl CartProvider {
    /// A provider with no cart mounted.
    pub fn new() -> Self {
        Self { cart: None }
    }

    /// Creates the cart over `storage` and starts loading the saved copy.
    /// Mounting an already mounted provider replaces the previous cart.
    /// Must be called from within a tokio runtime.
    pub fn mount(
        &mut self,
        storage: Arc<dyn KeyValueStorage>,
        config: &CartConfig,
    ) -> CartHandle {
        let cart = Arc::new(CartStore::new(storage, config));
        cart.load();
        info!(key = cart.storage_key(), mode = ?cart.persist_mode(), "cart mounted");
        self.cart = Some(Arc::clone(&cart));
        cart
    }

    /// Convenience for mounting a fresh provider.
    pub fn mounted(storage: Arc<dyn KeyValueStorage>, config: &CartConfig) -> Self {
        let mut provider = Self::new();
        provider.mount(storage, config);
        provider
    }

    pub fn is_mounted(&self) -> bool {
        self.cart.is_some()
    }

    pub fn use_cart(&self) -> Result<CartHandle, Error> {
        self.cart.clone().ok_or(Error::OutsideProvider)
    }

    /// Drops the provider's reference to the cart. In-flight writes keep
    /// running and the persisted copy is left in place.
    pub fn unmount(&mut self) {
        if self.cart.take().is_some() {
            info!("cart unmounted");
        }
    }
}
