//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use zamm_api::{DispatchError, RegistryError};

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to build method registry: {0}")]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to write response: {0}")]
    WriteResponse(io::Error),
}

impl AppError {
    /// Process exit status for this error.
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::LoadConfiguration(_) | Self::Telemetry(_) => 2,
            Self::CliUsage(error) => u8::try_from(error.exit_code()).unwrap_or(2),
            Self::Registry(_) => 1,
            Self::Dispatch(error) => error.exit_status(),
            // EX_IOERR
            Self::WriteResponse(_) => 74,
        }
    }
}
