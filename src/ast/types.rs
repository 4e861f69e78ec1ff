use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The primitive value types of the language.
///
/// `Untyped` is a parser-internal sentinel used before a context fixes the
/// concrete type of a numeric literal; it never escapes parsing. `Str`
/// marks a string literal's pointer value during lowering: strings have no
/// declarable type and participate in no conversion, the marker only keeps
/// diagnostics about misused literals honest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    I64,
    I32,
    I16,
    I8,
    Float,
    Double,
    Bool,
    Void,
    Str,
    Untyped,
}

impl ValueType {
    /// Position in the implicit-widening order `i8 < i16 < i32 < i64 <
    /// float < double`. `Bool` and `Void` participate in no implicit
    /// conversion and have no rank.
    pub fn widening_rank(&self) -> Option<u8> {
        match self {
            ValueType::I8 => Some(0),
            ValueType::I16 => Some(1),
            ValueType::I32 => Some(2),
            ValueType::I64 => Some(3),
            ValueType::Float => Some(4),
            ValueType::Double => Some(5),
            ValueType::Bool | ValueType::Void | ValueType::Str | ValueType::Untyped => None,
        }
    }

    /// The wider of two numeric types, if both have a rank.
    pub fn wider_of(a: ValueType, b: ValueType) -> Option<ValueType> {
        let rank_a = a.widening_rank()?;
        let rank_b = b.widening_rank()?;
        Some(if rank_a >= rank_b { a } else { b })
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ValueType::I64 | ValueType::I32 | ValueType::I16 | ValueType::I8
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ValueType::Float | ValueType::Double)
    }

    /// Resolves a type-name keyword token into a value type.
    pub fn from_token_kind(kind: TokenKind) -> Option<ValueType> {
        match kind {
            TokenKind::I64 => Some(ValueType::I64),
            TokenKind::I32 => Some(ValueType::I32),
            TokenKind::I16 => Some(ValueType::I16),
            TokenKind::I8 => Some(ValueType::I8),
            TokenKind::Float => Some(ValueType::Float),
            TokenKind::Double => Some(ValueType::Double),
            TokenKind::Bool => Some(ValueType::Bool),
            TokenKind::Void => Some(ValueType::Void),
            _ => None,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::I64 => "i64",
            ValueType::I32 => "i32",
            ValueType::I16 => "i16",
            ValueType::I8 => "i8",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Bool => "bool",
            ValueType::Void => "void",
            ValueType::Str => "string",
            ValueType::Untyped => "<untyped>",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::ValueType;

    #[test]
    fn test_widening_order() {
        assert!(ValueType::I8.widening_rank() < ValueType::I16.widening_rank());
        assert!(ValueType::I16.widening_rank() < ValueType::I32.widening_rank());
        assert!(ValueType::I32.widening_rank() < ValueType::I64.widening_rank());
        assert!(ValueType::I64.widening_rank() < ValueType::Float.widening_rank());
        assert!(ValueType::Float.widening_rank() < ValueType::Double.widening_rank());
    }

    #[test]
    fn test_wider_of() {
        assert_eq!(
            ValueType::wider_of(ValueType::I32, ValueType::I64),
            Some(ValueType::I64)
        );
        assert_eq!(
            ValueType::wider_of(ValueType::Double, ValueType::I8),
            Some(ValueType::Double)
        );
        assert_eq!(
            ValueType::wider_of(ValueType::I32, ValueType::I32),
            Some(ValueType::I32)
        );
    }

    #[test]
    fn test_bool_and_void_have_no_rank() {
        assert_eq!(ValueType::Bool.widening_rank(), None);
        assert_eq!(ValueType::Void.widening_rank(), None);
        assert_eq!(ValueType::Str.widening_rank(), None);
        assert_eq!(ValueType::wider_of(ValueType::Bool, ValueType::I32), None);
        assert_eq!(ValueType::wider_of(ValueType::Str, ValueType::I32), None);
    }
}
