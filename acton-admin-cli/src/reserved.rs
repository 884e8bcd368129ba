//! Identifiers that cannot be used as generated class names
//!
//! The generated admin code is PHP, so every keyword and magic constant of
//! that language is off limits, as are the type and scope names it refuses
//! as class names. Matching is case-insensitive because class
//! names are always title-cased before the check.

use phf::{phf_set, Set};

static RESERVED_NAMES: Set<&'static str> = phf_set! {
    "__halt_compiler",
    "abstract",
    "and",
    "array",
    "as",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "enum",
    "eval",
    "exit",
    "extends",
    "final",
    "finally",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "interface",
    "isset",
    "list",
    "match",
    "namespace",
    "new",
    "or",
    "print",
    "private",
    "protected",
    "public",
    "readonly",
    "require",
    "require_once",
    "return",
    "static",
    "switch",
    "throw",
    "trait",
    "try",
    "unset",
    "use",
    "var",
    "while",
    "xor",
    "yield",
    // Names PHP refuses as class names
    "bool",
    "false",
    "float",
    "int",
    "iterable",
    "mixed",
    "never",
    "null",
    "object",
    "parent",
    "self",
    "string",
    "true",
    "void",
    "__class__",
    "__dir__",
    "__file__",
    "__function__",
    "__line__",
    "__method__",
    "__namespace__",
    "__trait__",
};

/// Check whether `name` collides with a reserved identifier
///
/// # Examples
///
/// ```
/// # use acton_admin_cli_lib::reserved::is_reserved;
/// assert!(is_reserved("Class"));
/// assert!(!is_reserved("BlogPost"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(name.to_lowercase().as_str())
}
