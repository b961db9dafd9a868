use serde::Serialize;

/// An integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Num(pub i64);
