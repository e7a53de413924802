use crate::{FailureStage, ScanError, SymbolFormat};
use std::fmt;

/// A decoded barcode payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub text: String,
    pub format: SymbolFormat,
}

impl ScanResult {
    pub fn new(text: impl Into<String>, format: SymbolFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScannerState {
    #[default]
    Idle,
    CheckingDevice,
    RequestingPermission,
    AwaitingVideoReady,
    Scanning,
    Scanned(ScanResult),
    Failed(ScanError),
}

impl ScannerState {
    /// `Scanned` and `Failed` end an activation; only a retry leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScannerState::Scanned(_) | ScannerState::Failed(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ScannerState::CheckingDevice
                | ScannerState::RequestingPermission
                | ScannerState::AwaitingVideoReady
        )
    }
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScannerState::Idle => write!(f, "idle"),
            ScannerState::CheckingDevice => write!(f, "checking-device"),
            ScannerState::RequestingPermission => write!(f, "requesting-permission"),
            ScannerState::AwaitingVideoReady => write!(f, "awaiting-video-ready"),
            ScannerState::Scanning => write!(f, "scanning"),
            ScannerState::Scanned(result) => write!(f, "scanned({} {})", result.format, result.text),
            ScannerState::Failed(error) => write!(f, "failed({})", error.stage()),
        }
    }
}

/// What the presentation layer renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerView {
    pub loading: bool,
    pub permission_granted: bool,
    pub scanning: bool,
    pub result: Option<ScanResult>,
    pub error: Option<String>,
    pub error_stage: Option<FailureStage>,
}

impl ScannerView {
    pub(crate) fn new(state: &ScannerState, permission_granted: bool) -> Self {
        let (error, error_stage) = match state {
            ScannerState::Failed(error) => (Some(error.message().to_string()), Some(error.stage())),
            _ => (None, None),
        };
        Self {
            loading: state.is_loading(),
            permission_granted,
            scanning: matches!(state, ScannerState::Scanning),
            result: match state {
                ScannerState::Scanned(result) => Some(result.clone()),
                _ => None,
            },
            error,
            error_stage,
        }
    }
}
