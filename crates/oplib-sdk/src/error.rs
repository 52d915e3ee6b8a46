use thiserror::Error;

/// Errors produced while registering or invoking operators.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("Unknown operator: {0}")]
    UnknownOp(String),

    #[error("Operator {0} is already registered")]
    AlreadyRegistered(String),

    #[error("Missing input {input} for operator {op}")]
    MissingInput { op: String, input: String },

    #[error("Unexpected input {input} for operator {op}")]
    UnexpectedInput { op: String, input: String },

    #[error("Input {input} of {op} must be scalar, but had shape: {shape}")]
    NotScalar {
        op: String,
        input: String,
        shape: String,
    },

    #[error("Operator {op} declares no output named {output}")]
    UnknownOutput { op: String, output: String },

    #[error("Operator {op} produced no value for output {output}")]
    MissingOutput { op: String, output: String },

    #[error("Invalid argument to {op}: {message}")]
    InvalidArgument { op: String, message: String },
}

pub type Result<T, E = OpError> = std::result::Result<T, E>;
