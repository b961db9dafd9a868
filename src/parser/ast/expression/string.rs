use serde::Serialize;

/// A string literal. The contents are exactly the characters between the
/// quotes; there is no escape processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringLiteral(pub String);
