use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid timezone '{0}': expected an IANA name (Asia/Kolkata) or an offset (+05:30)")]
    InvalidTimezone(String),
    #[error("unknown payment type '{0}'")]
    UnknownPaymentType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
