#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("entry name must not be empty")]
    EmptyName,
    #[error("entry description must not be empty")]
    EmptyDescription,
    #[error("base price must be a finite, non-negative number")]
    InvalidBasePrice,
    #[error("discount percent must be between 0 and 100")]
    DiscountOutOfRange,
}

#[derive(thiserror::Error, Debug)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
    #[error("payment rejected: {0} is not a positive amount")]
    Rejected(f64),
}

/// Failure surface for store and service operations. Domain conditions
/// (validation, not-found, rejected checkout) are returned, never panicked;
/// `Storage` covers I/O and encode failures at the persistence boundary.
#[derive(thiserror::Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no catalog entry with id {0}")]
    NotFound(u64),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}
