//! End-to-end checks of the resolver against the real socket layer.

mod resolution;
