/// Last segment of a `::`- or `.`-separated path.
///
/// # Examples
/// ```
/// use bamlgen_core::utils::short_name;
/// assert_eq!(short_name("app::models::User"), "User");
/// assert_eq!(short_name("app.models.User"), "User");
/// assert_eq!(short_name("User"), "User");
/// ```
pub fn short_name(path: &str) -> &str {
    let tail = path.rsplit("::").next().unwrap_or(path);
    tail.rsplit('.').next().unwrap_or(tail)
}

/// Split an identifier into words.
///
/// Words break on `_`, `-`, `.` and spaces, on a lowercase-to-uppercase
/// transition, and before the last capital of an acronym run (`HTTPServer` →
/// `HTTP`, `Server`).
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert any identifier style to PascalCase.
///
/// # Examples
/// ```
/// use bamlgen_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert any identifier style to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert any identifier style to snake_case.
///
/// # Examples
/// ```
/// use bamlgen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    join_words(s, '_', str::to_lowercase)
}

/// Convert any identifier style to SCREAMING_SNAKE_CASE.
pub fn to_screaming_snake_case(s: &str) -> String {
    join_words(s, '_', str::to_uppercase)
}

/// Convert any identifier style to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    join_words(s, '-', str::to_lowercase)
}

fn join_words(s: &str, separator: char, case: fn(&str) -> String) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, word) in words(s).iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(&case(word));
    }
    out
}

/// Rename strategy applied to field names and enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    LowerCase,
    UpperCase,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
}

impl RenameRule {
    /// Parse the serde-style rule name (`"snake_case"`, `"camelCase"`, ...).
    pub fn parse(rule: &str) -> Option<Self> {
        let rule = match rule {
            "lowercase" => Self::LowerCase,
            "UPPERCASE" => Self::UpperCase,
            "PascalCase" => Self::PascalCase,
            "camelCase" => Self::CamelCase,
            "snake_case" => Self::SnakeCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            "kebab-case" => Self::KebabCase,
            _ => return None,
        };
        Some(rule)
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::LowerCase => name.to_lowercase(),
            Self::UpperCase => name.to_uppercase(),
            Self::PascalCase => to_pascal_case(name),
            Self::CamelCase => to_camel_case(name),
            Self::SnakeCase => to_snake_case(name),
            Self::ScreamingSnakeCase => to_screaming_snake_case(name),
            Self::KebabCase => to_kebab_case(name),
        }
    }
}
