//! Renders a `TypeDescriptor` as BAML type syntax.

use indexmap::IndexSet;

use bamlgen_core::{PrimitiveKind, TypeDescriptor};

/// Render a type descriptor to its BAML type string.
///
/// Total: every descriptor renders, unclassified host types as `unknown`.
pub fn render(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(kind) => primitive(*kind).to_string(),
        TypeDescriptor::Record(name) | TypeDescriptor::Enum(name) => name.short_name().to_string(),
        TypeDescriptor::Array(element) => format!("{}[]", wrap_if_union(&render(element))),
        TypeDescriptor::Map { value, .. } => format!("map<string, {}>", render(value)),
        TypeDescriptor::Optional(inner) => optional(&render(inner)),
        TypeDescriptor::Union(members) => render_union(members),
        TypeDescriptor::Unknown => "unknown".to_string(),
    }
}

fn primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Dynamic => "json",
        PrimitiveKind::String | PrimitiveKind::Symbol | PrimitiveKind::DateTime => "string",
        PrimitiveKind::Integer => "int",
        PrimitiveKind::Float => "float",
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Null => "null",
    }
}

/// Mark a rendered type optional. `null` and already-optional types pass through.
fn optional(inner: &str) -> String {
    if inner == "null" || inner.ends_with('?') {
        return inner.to_string();
    }
    format!("{}?", wrap_if_union(inner))
}

fn render_union(members: &[TypeDescriptor]) -> String {
    let mut flat = Vec::new();
    let mut nullable = false;
    flatten(members, &mut flat, &mut nullable);

    let rendered: IndexSet<String> = flat.into_iter().map(render).collect();
    match rendered.len() {
        0 => "null".to_string(),
        1 => {
            let only = &rendered[0];
            if nullable { optional(only) } else { only.clone() }
        }
        _ => {
            let joined = rendered.into_iter().collect::<Vec<_>>().join(" | ");
            if nullable {
                format!("({joined})?")
            } else {
                joined
            }
        }
    }
}

/// Splice nested unions and optionals into one member list, pulling out null.
fn flatten<'a>(members: &'a [TypeDescriptor], out: &mut Vec<&'a TypeDescriptor>, nullable: &mut bool) {
    for member in members {
        flatten_one(member, out, nullable);
    }
}

fn flatten_one<'a>(member: &'a TypeDescriptor, out: &mut Vec<&'a TypeDescriptor>, nullable: &mut bool) {
    match member {
        TypeDescriptor::Union(nested) => flatten(nested, out, nullable),
        TypeDescriptor::Optional(inner) => {
            *nullable = true;
            flatten_one(inner, out, nullable);
        }
        m if m.is_null() => *nullable = true,
        m => out.push(m),
    }
}

/// Parenthesize a rendered type whose outermost level contains a `|`.
///
/// Pipes nested inside `(...)` or `<...>` are already grouped.
pub(crate) fn wrap_if_union(type_str: &str) -> String {
    if has_top_level_pipe(type_str) {
        format!("({type_str})")
    } else {
        type_str.to_string()
    }
}

fn has_top_level_pipe(type_str: &str) -> bool {
    let mut depth = 0usize;
    for c in type_str.chars() {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}
