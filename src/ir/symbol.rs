use std::fmt;

/// Static type of a Mica value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Type::Int => "int",
            Type::Bool => "bool",
        };
        write!(f, "{s}")
    }
}

/// A resolved variable.
///
/// Symbols compare by value. The binder hands out distinct names for
/// distinct variables (shadowed ones are renamed during resolution), and
/// the lowering pass mangles a counter into the names of the variables it
/// synthesizes, so value equality doubles as identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSymbol {
    pub name: String,
    pub read_only: bool,
    pub ty: Type,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, read_only: bool, ty: Type) -> Self {
        Self {
            name: name.into(),
            read_only,
            ty,
        }
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
