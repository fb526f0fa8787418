//! Output-independent description of generated classes.
//!
//! Synthesis decides *what* a member does in terms of these nodes; a [`crate::Backend`]
//! decides how it is spelled.

use nova_eventgen_model::{PrimitiveType, TypeRef, Visibility};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<TypeRef>,
    #[serde(default)]
    pub implements: Vec<TypeRef>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn new(package: Option<String>, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
            is_final: false,
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::class(self.qualified_name())
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether any member body contains an [`Expr::NarrowCast`].
    pub fn uses_narrowing(&self) -> bool {
        let mut found = false;
        let mut visit = |expr: &Expr| found |= matches!(expr, Expr::NarrowCast { .. });
        for field in &self.fields {
            if let Some(init) = &field.initializer {
                init.walk(&mut visit);
            }
        }
        for body in self
            .constructors
            .iter()
            .map(|c| &c.body)
            .chain(self.methods.iter().map(|m| &m.body))
        {
            for stmt in body {
                stmt.walk(&mut visit);
            }
        }
        found
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub ty: TypeRef,
}

impl ParamDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDef {
    pub visibility: Visibility,
    pub params: Vec<ParamDef>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    /// Implements or overrides an inherited declaration.
    #[serde(default)]
    pub overrides: bool,
    pub return_type: TypeRef,
    #[serde(default)]
    pub params: Vec<ParamDef>,
    pub body: Vec<Stmt>,
}

impl MethodDef {
    /// A public, non-static instance method overriding an inherited declaration.
    pub fn overriding(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            overrides: true,
            return_type,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Stmt {
    /// Fail with a null-pointer error naming `property` if `value` is null.
    RequireNonNull { value: Expr, property: String },
    /// `this.<field> = value`
    StoreField { field: String, value: Expr },
    Return { value: Expr },
    Expr { value: Expr },
}

impl Stmt {
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        match self {
            Stmt::RequireNonNull { value, .. }
            | Stmt::StoreField { value, .. }
            | Stmt::Return { value }
            | Stmt::Expr { value } => value.walk(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Literal {
    Null,
    Bool { value: bool },
    Int { value: i64 },
    Str { value: String },
    /// Default value of a primitive field.
    Zero { ty: PrimitiveType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    This,
    LoadParam {
        name: String,
    },
    /// `this.<field>`
    LoadField {
        field: String,
    },
    Literal {
        value: Literal,
    },
    /// Checked narrowing to `to`. A value of another runtime type fails with a message naming
    /// `method`, the expected type and the actual type.
    NarrowCast {
        value: Box<Expr>,
        to: TypeRef,
        method: String,
    },
    /// Wrap a possibly-null value into the optional wrapper.
    WrapOptional {
        value: Box<Expr>,
    },
    EmptyOptional,
    Invoke {
        target: Box<Expr>,
        method: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    InvokeStatic {
        owner: TypeRef,
        method: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    New {
        ty: TypeRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// String concatenation of all parts.
    Concat {
        parts: Vec<Expr>,
    },
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Self {
        Expr::LoadParam { name: name.into() }
    }

    pub fn field(field: impl Into<String>) -> Self {
        Expr::LoadField {
            field: field.into(),
        }
    }

    pub fn null() -> Self {
        Expr::Literal {
            value: Literal::Null,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::Str {
                value: value.into(),
            },
        }
    }

    pub fn zero(ty: PrimitiveType) -> Self {
        Expr::Literal {
            value: Literal::Zero { ty },
        }
    }

    pub fn narrow(self, to: TypeRef, method: impl Into<String>) -> Self {
        Expr::NarrowCast {
            value: Box::new(self),
            to,
            method: method.into(),
        }
    }

    pub fn wrap_optional(self) -> Self {
        Expr::WrapOptional {
            value: Box::new(self),
        }
    }

    pub fn invoke(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: Box::new(self),
            method: method.into(),
            args,
        }
    }

    /// Pre-order traversal.
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        f(self);
        match self {
            Expr::This
            | Expr::LoadParam { .. }
            | Expr::LoadField { .. }
            | Expr::Literal { .. }
            | Expr::EmptyOptional => {}
            Expr::NarrowCast { value, .. } | Expr::WrapOptional { value } => value.walk(f),
            Expr::Invoke { target, args, .. } => {
                target.walk(f);
                args.iter().for_each(|arg| arg.walk(f));
            }
            Expr::InvokeStatic { args, .. } | Expr::New { args, .. } => {
                args.iter().for_each(|arg| arg.walk(f));
            }
            Expr::Concat { parts } => parts.iter().for_each(|part| part.walk(f)),
        }
    }
}
