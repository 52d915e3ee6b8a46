/// Value exchanged with operator kernels.
///
/// Operators here move opaque byte strings around, so only string payloads
/// are modeled: a rank-0 scalar or a rank-1 vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Vector(Vec<String>),
}

impl Value {
    pub fn scalar(s: impl Into<String>) -> Self {
        Value::Scalar(s.into())
    }

    pub fn vector<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Vector(items.into_iter().map(Into::into).collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Vector(_) => None,
        }
    }

    pub fn rank(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
        }
    }

    /// Shape rendered for error messages: `[]` for a scalar, `[n]` for a vector.
    pub fn shape_string(&self) -> String {
        match self {
            Value::Scalar(_) => "[]".to_string(),
            Value::Vector(items) => format!("[{}]", items.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_rank_and_shape() {
        let v = Value::scalar("hello");
        assert!(v.is_scalar());
        assert_eq!(v.rank(), 0);
        assert_eq!(v.shape_string(), "[]");
        assert_eq!(v.as_scalar(), Some("hello"));
    }

    #[test]
    fn vector_rank_and_shape() {
        let v = Value::vector(["a", "b", "c"]);
        assert!(!v.is_scalar());
        assert_eq!(v.rank(), 1);
        assert_eq!(v.shape_string(), "[3]");
        assert_eq!(v.as_scalar(), None);
    }
}
