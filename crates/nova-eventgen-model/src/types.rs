use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Binary name of the wrapper class (`int` => `java.lang.Integer`).
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }

    /// Java literal for the default value of a field of this type.
    pub fn zero_literal(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "false",
            PrimitiveType::Char => "'\\0'",
            PrimitiveType::Long => "0L",
            PrimitiveType::Float => "0.0f",
            PrimitiveType::Double => "0.0d",
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => "0",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Reference,
    Void,
}

/// A reference to a type, independent of the metadata source it came from.
///
/// Equality and hashing only consider the qualified name and the kind (i.e. the erasure);
/// use [`TypeRef::same_instantiation`] when type arguments matter.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: String,
    kind: TypeKind,
    args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Reference,
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Reference,
            args,
        }
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            name: primitive.keyword().to_string(),
            kind: TypeKind::Primitive(primitive),
            args: Vec::new(),
        }
    }

    pub fn array(component: TypeRef) -> Self {
        Self::class(format!("{component}[]"))
    }

    pub fn void() -> Self {
        Self {
            name: "void".to_string(),
            kind: TypeKind::Void,
            args: Vec::new(),
        }
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveType::Boolean)
    }

    pub fn int() -> Self {
        Self::primitive(PrimitiveType::Int)
    }

    pub fn string() -> Self {
        Self::class(crate::well_known::STRING)
    }

    pub fn object() -> Self {
        Self::class(crate::well_known::OBJECT)
    }

    pub fn optional(element: TypeRef) -> Self {
        Self::generic(crate::well_known::OPTIONAL, vec![element])
    }

    /// Parse Java-like type text: `int`, `java.lang.String`, `java.util.Map<K, V>`, `T[]`.
    pub fn parse(text: &str) -> Result<Self, TypeParseError> {
        let mut parser = Parser { text, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos != text.len() {
            return Err(TypeParseError::Trailing {
                text: text.to_string(),
                pos: parser.pos,
            });
        }
        Ok(ty)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self.kind {
            TypeKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_primitive_boolean(&self) -> bool {
        self.kind == TypeKind::Primitive(PrimitiveType::Boolean)
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeKind::Void
    }

    pub fn is_reference(&self) -> bool {
        self.kind == TypeKind::Reference
    }

    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    pub fn is_optional(&self) -> bool {
        self.is_reference() && self.name == crate::well_known::OPTIONAL
    }

    /// Name without the package prefix (`java.util.Optional` => `Optional`).
    pub fn simple_name(&self) -> &str {
        if self.is_array() {
            return &self.name;
        }
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn package(&self) -> Option<&str> {
        if !self.is_reference() || self.is_array() {
            return None;
        }
        self.name.rsplit_once('.').map(|(pkg, _)| pkg)
    }

    /// Drops type arguments, including those embedded in an array's component
    /// (`java.util.List<java.lang.String>[]` => `java.util.List[]`).
    pub fn erasure(&self) -> TypeRef {
        let mut name = String::with_capacity(self.name.len());
        let mut depth = 0usize;
        for c in self.name.chars() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                _ if depth == 0 => name.push(c),
                _ => {}
            }
        }
        Self {
            name,
            kind: self.kind,
            args: Vec::new(),
        }
    }

    /// Whether the runtime class fully describes this type, so no unchecked cast is needed.
    pub fn is_reifiable(&self) -> bool {
        self.args.is_empty() && !self.name.contains('<')
    }

    /// Structural equality including type arguments.
    pub fn same_instantiation(&self, other: &TypeRef) -> bool {
        self == other
            && self.args.len() == other.args.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| a.same_instantiation(b))
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (idx, arg) in self.args.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("expected a type name at offset {pos} in `{text}`")]
    ExpectedName { text: String, pos: usize },
    #[error("unexpected input at offset {pos} in `{text}`")]
    Trailing { text: String, pos: usize },
    #[error("unterminated type argument list in `{text}`")]
    Unterminated { text: String },
    #[error("`{name}` cannot take type arguments")]
    ArgumentsOnNonReference { name: String },
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        let Some(after) = rest.strip_prefix(keyword) else {
            return false;
        };
        if !after.starts_with(char::is_whitespace) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    fn parse_qualified_name(&mut self) -> Result<String, TypeParseError> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '.')))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let name = &rest[..len];
        let valid = !name.is_empty()
            && name.split('.').all(|segment| {
                segment
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
            });
        if !valid {
            return Err(TypeParseError::ExpectedName {
                text: self.text.to_string(),
                pos: self.pos,
            });
        }
        self.pos += len;
        Ok(name.to_string())
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
        self.skip_ws();
        if self.eat("?") {
            self.skip_ws();
            let name = if self.eat_keyword("extends") {
                format!("? extends {}", self.parse_type()?)
            } else if self.eat_keyword("super") {
                format!("? super {}", self.parse_type()?)
            } else {
                "?".to_string()
            };
            return Ok(TypeRef::class(name));
        }

        let name = self.parse_qualified_name()?;
        let mut ty = match PrimitiveType::from_keyword(&name) {
            Some(primitive) => TypeRef::primitive(primitive),
            None if name == "void" => TypeRef::void(),
            None => TypeRef::class(name),
        };

        self.skip_ws();
        if self.eat("<") {
            if !ty.is_reference() {
                return Err(TypeParseError::ArgumentsOnNonReference { name: ty.name });
            }
            loop {
                ty.args.push(self.parse_type()?);
                self.skip_ws();
                if self.eat(",") {
                    continue;
                }
                if self.eat(">") {
                    break;
                }
                return Err(TypeParseError::Unterminated {
                    text: self.text.to_string(),
                });
            }
        }

        loop {
            self.skip_ws();
            if !self.eat("[]") {
                break;
            }
            ty = TypeRef::array(ty);
        }

        Ok(ty)
    }
}
