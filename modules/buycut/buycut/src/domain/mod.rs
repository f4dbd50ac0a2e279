pub mod error;
pub mod images;
pub mod ports;
pub mod repo;
pub mod service;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;
