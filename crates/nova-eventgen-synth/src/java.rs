use nova_eventgen_model::Visibility;
use serde::Serialize;

use crate::ir::{ClassDef, ConstructorDef, Expr, FieldDef, Literal, MethodDef, ParamDef, Stmt};

/// Lowers the IR to a concrete output representation.
pub trait Backend {
    type Output;

    fn lower(&self, class: &ClassDef) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Slash-separated path relative to the source root, e.g. `com/example/FooImpl.java`.
    pub path: String,
    pub text: String,
}

/// Renders classes as Java source. Types are always written fully qualified so no imports are
/// needed.
#[derive(Debug, Clone)]
pub struct JavaSourceBackend {
    indent: String,
}

impl Default for JavaSourceBackend {
    fn default() -> Self {
        Self::with_indent(4)
    }
}

const NARROW_HELPER: &str = "checkedCast";
const HEADER: &str = "// Generated by nova-eventgen. Do not edit.";

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

impl JavaSourceBackend {
    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    pub fn render(&self, class: &ClassDef) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n\n");
        if let Some(package) = &class.package {
            out.push_str(&format!("package {package};\n\n"));
        }

        out.push_str("public ");
        if class.is_final {
            out.push_str("final ");
        }
        out.push_str(&format!("class {}", class.name));
        if let Some(extends) = &class.extends {
            out.push_str(&format!(" extends {extends}"));
        }
        if !class.implements.is_empty() {
            out.push_str(" implements ");
            out.push_str(&join(class.implements.iter().map(ToString::to_string)));
        }
        out.push_str(" {\n");

        let mut sections = Vec::new();
        if !class.fields.is_empty() {
            sections.push(
                class
                    .fields
                    .iter()
                    .map(|field| self.field(field))
                    .collect::<String>(),
            );
        }
        sections.extend(class.constructors.iter().map(|c| self.constructor(&class.name, c)));
        sections.extend(class.methods.iter().map(|m| self.method(m)));
        if class.uses_narrowing() {
            sections.push(self.narrow_helper());
        }
        for section in sections {
            out.push('\n');
            out.push_str(&section);
        }

        out.push_str("}\n");
        out
    }

    fn field(&self, field: &FieldDef) -> String {
        let mut line = format!("{}{}", self.indent, visibility(field.visibility));
        if field.is_final {
            line.push_str("final ");
        }
        line.push_str(&format!("{} {}", field.ty, ident(&field.name)));
        if let Some(init) = &field.initializer {
            line.push_str(&format!(" = {}", expr(init)));
        }
        line.push_str(";\n");
        line
    }

    fn constructor(&self, class_name: &str, ctor: &ConstructorDef) -> String {
        let signature = format!(
            "{}{class_name}({})",
            visibility(ctor.visibility),
            params(&ctor.params)
        );
        self.block(&signature, &ctor.body)
    }

    fn method(&self, method: &MethodDef) -> String {
        let mut out = String::new();
        if method.overrides {
            out.push_str(&format!("{}@Override\n", self.indent));
        }
        let signature = format!(
            "{}{}{} {}({})",
            visibility(method.visibility),
            if method.is_static { "static " } else { "" },
            method.return_type,
            method.name,
            params(&method.params)
        );
        out.push_str(&self.block(&signature, &method.body));
        out
    }

    fn block(&self, signature: &str, body: &[Stmt]) -> String {
        let mut out = format!("{}{signature} {{\n", self.indent);
        for stmt in body {
            out.push_str(&format!("{0}{0}{1}\n", self.indent, statement(stmt)));
        }
        out.push_str(&format!("{}}}\n", self.indent));
        out
    }

    fn narrow_helper(&self) -> String {
        let i = &self.indent;
        [
            format!(
                "{i}private static <T> T {NARROW_HELPER}(Object value, Class<T> type, String method) {{"
            ),
            format!("{i}{i}if (value != null && !type.isInstance(value)) {{"),
            format!(
                "{i}{i}{i}throw new ClassCastException(method + \": expected \" + type.getName() \
                 + \" but found \" + value.getClass().getName());"
            ),
            format!("{i}{i}}}"),
            format!("{i}{i}return type.cast(value);"),
            format!("{i}}}"),
        ]
        .iter()
        .map(|line| format!("{line}\n"))
        .collect()
    }
}

impl Backend for JavaSourceBackend {
    type Output = SourceFile;

    fn lower(&self, class: &ClassDef) -> SourceFile {
        let mut path = class
            .package
            .as_deref()
            .map(|package| format!("{}/", package.replace('.', "/")))
            .unwrap_or_default();
        path.push_str(&class.name);
        path.push_str(".java");
        SourceFile {
            path,
            text: self.render(class),
        }
    }
}

fn visibility(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public ",
        Visibility::Protected => "protected ",
        Visibility::Package => "",
        Visibility::Private => "private ",
    }
}

/// Whether `name` is usable as a Java identifier: a letter, `_` or `$` followed by letters,
/// digits, `_` or `$`, and not a keyword.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(is_identifier_part)
        && !JAVA_KEYWORDS.contains(&name)
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Identifiers that collide with Java keywords get a trailing underscore.
fn ident(name: &str) -> String {
    if JAVA_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn params(params: &[ParamDef]) -> String {
    join(params.iter().map(|p| format!("{} {}", p.ty, ident(&p.name))))
}

fn statement(stmt: &Stmt) -> String {
    match stmt {
        Stmt::RequireNonNull { value, property } => format!(
            "java.util.Objects.requireNonNull({}, {});",
            expr(value),
            string_literal(&format!("The property '{property}' was not provided!"))
        ),
        Stmt::StoreField { field, value } => format!("this.{} = {};", ident(field), expr(value)),
        Stmt::Return { value } => format!("return {};", expr(value)),
        Stmt::Expr { value } => format!("{};", expr(value)),
    }
}

fn expr(e: &Expr) -> String {
    match e {
        Expr::This => "this".to_string(),
        Expr::LoadParam { name } => ident(name),
        Expr::LoadField { field } => format!("this.{}", ident(field)),
        Expr::Literal { value } => literal(value),
        Expr::NarrowCast { value, to, method } => {
            let call = format!(
                "{NARROW_HELPER}({}, {}.class, {})",
                expr(value),
                to.erasure(),
                string_literal(method)
            );
            if to.is_reifiable() {
                call
            } else {
                format!("({to}) {call}")
            }
        }
        Expr::WrapOptional { value } => format!("java.util.Optional.ofNullable({})", expr(value)),
        Expr::EmptyOptional => "java.util.Optional.empty()".to_string(),
        Expr::Invoke {
            target,
            method,
            args,
        } => format!("{}.{method}({})", receiver(target), arguments(args)),
        Expr::InvokeStatic {
            owner,
            method,
            args,
        } => format!("{}.{method}({})", owner.erasure(), arguments(args)),
        Expr::New { ty, args } => format!("new {ty}({})", arguments(args)),
        Expr::Concat { parts } => {
            let mut rendered: Vec<String> = parts.iter().map(expr).collect();
            let starts_with_string = matches!(
                parts.first(),
                Some(Expr::Literal {
                    value: Literal::Str { .. }
                })
            );
            if !starts_with_string {
                rendered.insert(0, "\"\"".to_string());
            }
            rendered.join(" + ")
        }
    }
}

/// A cast expression needs parentheses before a member access.
fn receiver(target: &Expr) -> String {
    let rendered = expr(target);
    match target {
        Expr::NarrowCast { to, .. } if !to.is_reifiable() => format!("({rendered})"),
        _ => rendered,
    }
}

fn arguments(args: &[Expr]) -> String {
    join(args.iter().map(expr))
}

fn literal(value: &Literal) -> String {
    match value {
        Literal::Null => "null".to_string(),
        Literal::Bool { value } => value.to_string(),
        Literal::Int { value } => {
            if i32::try_from(*value).is_ok() {
                value.to_string()
            } else {
                format!("{value}L")
            }
        }
        Literal::Str { value } => string_literal(value),
        Literal::Zero { ty } => ty.zero_literal().to_string(),
    }
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
