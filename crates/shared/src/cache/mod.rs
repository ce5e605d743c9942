mod cache_store;
mod checkout;

pub use self::cache_store::CacheStore;
pub use self::checkout::{
    CheckoutSession, CheckoutSessionStoreTrait, CheckoutStore, DynCheckoutSessionStore,
};
