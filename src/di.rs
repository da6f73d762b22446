//! Dependency injection infrastructure.
//!
//! Repositories and services are resolved from the application [`Context`]
//! at call time using the `FromRef` trait. Each resolvable type implements
//! `FromRef<Context>` by cloning the handles it needs out of the context.
//!
//! [`Context`]: crate::context::Context

/// Trait for extracting a value from a reference to another type.
///
/// This is the core trait for compile-time dependency injection.
/// Types that implement `FromRef<T>` can be extracted from `&T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Blanket implementation: any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}
