use nova_eventgen_model::well_known::{decapitalize, strip_bean_prefix};
use nova_eventgen_model::MethodRef;

/// What a method contributes to the property model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRole {
    Accessor { property: String },
    Mutator { property: String },
    None,
}

/// Classify a method by name and shape.
///
/// Accessors: public, no arguments, and one of `get<Name>` (non-void), `is<Name>` /
/// `keeps<Name>` (boolean) or `has<Name>` (boolean). `has<Name>` keeps its prefix as the
/// property name (`hasPermission()` => `hasPermission`).
///
/// Mutators: public, one argument, void, `set<Name>`.
pub fn classify(method: &MethodRef) -> MethodRole {
    if !method.is_public() || method.is_static {
        return MethodRole::None;
    }

    let name = method.name.as_str();
    let ret = &method.return_type;

    match method.params.len() {
        0 => {
            if ret.is_void() {
                return MethodRole::None;
            }
            if let Some(rest) = strip_bean_prefix(name, "get") {
                return MethodRole::Accessor {
                    property: decapitalize(rest),
                };
            }
            if !ret.is_primitive_boolean() {
                return MethodRole::None;
            }
            if let Some(rest) =
                strip_bean_prefix(name, "is").or_else(|| strip_bean_prefix(name, "keeps"))
            {
                return MethodRole::Accessor {
                    property: decapitalize(rest),
                };
            }
            if strip_bean_prefix(name, "has").is_some() {
                return MethodRole::Accessor {
                    property: name.to_string(),
                };
            }
            MethodRole::None
        }
        1 if ret.is_void() => match strip_bean_prefix(name, "set") {
            Some(rest) => MethodRole::Mutator {
                property: decapitalize(rest),
            },
            None => MethodRole::None,
        },
        _ => MethodRole::None,
    }
}
