use thiserror::Error;

/// Errors reported by the liquidity ledger.
///
/// `AccountAlreadyExists` is the ledger's duplicate rejection. Concurrent
/// packets racing to provision the same account rely on it, so implementations
/// must report it instead of creating a second record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("liquidity account already exists")]
    AccountAlreadyExists,
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{message}")]
    Unreachable {
        message: &'static str,
        stream_destination: Option<String>,
        destination_address: String,
    },
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Directory error: {0}")]
    Directory(String),
    #[error("accounts have not been resolved for this packet")]
    AccountsNotResolved,
    #[error("accounts have already been resolved for this packet")]
    AccountsAlreadyResolved,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConnectorError>;

/// ILP reject codes produced by this connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IlpErrorCode {
    F02Unreachable,
    T00InternalError,
}

impl IlpErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IlpErrorCode::F02Unreachable => "F02",
            IlpErrorCode::T00InternalError => "T00",
        }
    }
}

/// How a failed packet is rejected at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Transport-level status, e.g. 401 for an unauthenticated caller.
    Status(u16),
    /// Protocol-level reject carrying only a generic code.
    Ilp(IlpErrorCode),
}

impl Rejection {
    pub fn code(&self) -> String {
        match self {
            Rejection::Status(status) => status.to_string(),
            Rejection::Ilp(code) => code.as_str().to_string(),
        }
    }
}

impl ConnectorError {
    pub fn rejection(&self) -> Rejection {
        match self {
            ConnectorError::Unauthorized => Rejection::Status(401),
            ConnectorError::Unreachable { .. } => Rejection::Ilp(IlpErrorCode::F02Unreachable),
            _ => Rejection::Ilp(IlpErrorCode::T00InternalError),
        }
    }
}
