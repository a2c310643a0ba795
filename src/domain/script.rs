use serde::{Deserialize, Serialize};

/// A named unit of SQL text to execute. Immutable once defined; names are
/// expected to be unique within a run (the script-file loader enforces this).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSpec {
    pub name: String,
    pub query: String,
}

impl ScriptSpec {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }

    pub fn kind(&self) -> StatementKind {
        StatementKind::classify(&self.query)
    }
}

/// First top-level SQL verb of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Ddl,
    Other,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Ddl => "DDL",
            Self::Other => "OTHER",
        }
    }

    /// Classify a statement by its first top-level SQL verb. A naive prefix
    /// check is not enough: DML may live inside CTEs (`WITH ... UPDATE`), so
    /// we scan for the first recognized verb outside of parentheses, string
    /// literals, and comments.
    pub fn classify(query: &str) -> Self {
        let lower = query.trim().to_lowercase();
        let chars: Vec<(usize, char)> = lower.char_indices().collect();
        let len = chars.len();

        let mut i = 0;
        let mut depth = 0i32;
        let mut in_string = false;

        while i < len {
            let (byte_pos, c) = chars[i];

            // Skip -- line comments
            if c == '-' && i + 1 < len && chars[i + 1].1 == '-' {
                while i < len && chars[i].1 != '\n' {
                    i += 1;
                }
                continue;
            }

            // Skip /* block comments */
            if c == '/' && i + 1 < len && chars[i + 1].1 == '*' {
                i += 2;
                while i + 1 < len && !(chars[i].1 == '*' && chars[i + 1].1 == '/') {
                    i += 1;
                }
                i += 2; // skip */
                continue;
            }

            // Handle string literals
            if c == '\'' {
                if in_string {
                    if i + 1 < len && chars[i + 1].1 == '\'' {
                        i += 2; // escaped quote ''
                        continue;
                    }
                    in_string = false;
                } else {
                    in_string = true;
                }
                i += 1;
                continue;
            }

            if in_string {
                i += 1;
                continue;
            }

            if c == '(' {
                depth += 1;
            } else if c == ')' {
                depth -= 1;
            }

            if depth == 0 && is_word_start(&chars, i) {
                let rest = &lower[byte_pos..];
                if let Some(kind) = verb_at(rest) {
                    return kind;
                }
            }

            i += 1;
        }

        Self::Other
    }
}

fn verb_at(rest: &str) -> Option<StatementKind> {
    const VERBS: [(&str, StatementKind); 8] = [
        ("select", StatementKind::Select),
        ("insert", StatementKind::Insert),
        ("update", StatementKind::Update),
        ("delete", StatementKind::Delete),
        ("create", StatementKind::Ddl),
        ("alter", StatementKind::Ddl),
        ("drop", StatementKind::Ddl),
        ("truncate", StatementKind::Ddl),
    ];

    VERBS
        .into_iter()
        .find(|(verb, _)| is_keyword(rest, verb))
        .map(|(_, kind)| kind)
}

fn is_word_start(chars: &[(usize, char)], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    let prev = chars[i - 1].1;
    !prev.is_alphanumeric() && prev != '_'
}

fn is_keyword(s: &str, keyword: &str) -> bool {
    if !s.starts_with(keyword) {
        return false;
    }
    s[keyword.len()..]
        .chars()
        .next()
        .map(|c| !c.is_alphanumeric() && c != '_')
        .unwrap_or(true)
}
