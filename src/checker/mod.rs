// src/checker/mod.rs
mod checker;
mod error;
mod result;

pub use checker::ConnectivityChecker;
pub use error::{CheckError, FailureKind};
pub use result::CheckResult;
