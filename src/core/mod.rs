pub mod feed;
pub mod fingerprint;
pub mod format;
pub mod mode;
pub mod monitor;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
