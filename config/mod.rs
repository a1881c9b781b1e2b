//! Configuration management
//!
//! Run configuration resolved from the command line. The machine
//! geometry (page size, frame count, TLB capacity) is fixed by design
//! and lives in `core::mm`; only the input paths vary per run.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default backing store filename, resolved in the working directory
pub const DEFAULT_STORE_PATH: &str = "BACKING_STORE.bin";

/// Per-run configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Address-list file to translate
    pub trace_path: PathBuf,
    /// Backing store file
    pub store_path: PathBuf,
}

impl SimConfig {
    /// Build a configuration from command-line arguments
    ///
    /// Expects exactly one positional argument (the address file)
    /// after the program name; anything else is a usage error.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        let trace_path = args.next().ok_or(Error::Usage)?;
        if args.next().is_some() {
            return Err(Error::Usage);
        }

        Ok(Self {
            trace_path: PathBuf::from(trace_path),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        })
    }

    /// Validate the configuration before the run
    pub fn validate(&self) -> Result<()> {
        if self.trace_path.as_os_str().is_empty() {
            return Err(Error::Usage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_positional_argument() {
        let config = SimConfig::from_args(args(&["vmmsim", "addresses.txt"])).unwrap();
        assert_eq!(config.trace_path, PathBuf::from("addresses.txt"));
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_argument_is_usage_error() {
        let err = SimConfig::from_args(args(&["vmmsim"])).unwrap_err();
        assert!(matches!(err, Error::Usage));
    }

    #[test]
    fn test_extra_argument_is_usage_error() {
        let err = SimConfig::from_args(args(&["vmmsim", "a.txt", "b.txt"])).unwrap_err();
        assert!(matches!(err, Error::Usage));
    }
}
