//! Multi-interactor scenarios

pub(crate) mod support;
