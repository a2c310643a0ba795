use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Structural features detected in a query. Each flag counts once toward the
/// complexity score regardless of how often the construct appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityIndicators {
    pub ctes: bool,
    pub window_functions: bool,
    pub subqueries: bool,
    pub joins: bool,
    pub aggregations: bool,
    pub having_clause: bool,
}

impl ComplexityIndicators {
    pub fn count(self) -> usize {
        [
            self.ctes,
            self.window_functions,
            self.subqueries,
            self.joins,
            self.aggregations,
            self.having_clause,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryAnalysis {
    pub complexity: Complexity,
    pub performance_score: u8,
    pub indicators: ComplexityIndicators,
    pub recommendations: Vec<&'static str>,
}

/// Rough complexity estimate from keyword structure. Four or more indicators
/// rank High (score 70), two or three Medium (85), otherwise Low (95).
pub fn analyze(query: &str) -> QueryAnalysis {
    let lower = query.to_lowercase();

    let indicators = ComplexityIndicators {
        ctes: contains_keyword(&lower, "with"),
        window_functions: contains_keyword(&lower, "over"),
        subqueries: lower.contains('(') && contains_keyword(&lower, "select"),
        joins: contains_keyword(&lower, "join"),
        aggregations: ["count", "sum", "avg", "min", "max"]
            .iter()
            .any(|agg| contains_keyword(&lower, agg)),
        having_clause: contains_keyword(&lower, "having"),
    };

    let (complexity, performance_score) = match indicators.count() {
        n if n >= 4 => (Complexity::High, 70),
        n if n >= 2 => (Complexity::Medium, 85),
        _ => (Complexity::Low, 95),
    };

    QueryAnalysis {
        complexity,
        performance_score,
        indicators,
        recommendations: recommendations(&lower, indicators),
    }
}

/// SQL keywords present in the query, uppercased for display. Word-boundary
/// aware, so identifiers like `counter` never register as COUNT.
pub fn keywords(query: &str) -> Vec<&'static str> {
    const KEYWORDS: [&str; 24] = [
        "select", "from", "where", "join", "group", "order", "having", "insert", "update",
        "delete", "create", "alter", "drop", "union", "with", "over", "partition", "count",
        "sum", "avg", "min", "max", "case", "limit",
    ];
    const DISPLAY: [&str; 24] = [
        "SELECT", "FROM", "WHERE", "JOIN", "GROUP", "ORDER", "HAVING", "INSERT", "UPDATE",
        "DELETE", "CREATE", "ALTER", "DROP", "UNION", "WITH", "OVER", "PARTITION", "COUNT",
        "SUM", "AVG", "MIN", "MAX", "CASE", "LIMIT",
    ];

    let lower = query.to_lowercase();
    KEYWORDS
        .into_iter()
        .zip(DISPLAY)
        .filter(|(keyword, _)| contains_keyword(&lower, keyword))
        .map(|(_, display)| display)
        .collect()
}

fn recommendations(lower: &str, indicators: ComplexityIndicators) -> Vec<&'static str> {
    let mut recs = Vec::new();
    if indicators.joins {
        recs.push("Check that join columns are covered by indexes");
    }
    if indicators.ctes {
        recs.push("Keep CTEs selective; the planner may materialize them");
    }
    if indicators.window_functions {
        recs.push("Window functions sort each partition; index the ORDER BY columns");
    }
    if indicators.subqueries {
        recs.push("Consider whether correlated subqueries can be rewritten as joins");
    }
    if contains_keyword(lower, "select") && !contains_keyword(lower, "limit") {
        recs.push("Add a LIMIT clause to bound the result set");
    }
    recs
}

/// Word-boundary keyword search so identifiers like `counter` or
/// `overdue_at` never register as COUNT / OVER hits. Positions are tracked
/// against the full string, so a match starting mid-identifier is rejected
/// even after earlier rejected hits.
fn contains_keyword(lower: &str, keyword: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = lower[start..].find(keyword) {
        let abs = start + pos;
        let before_ok = abs == 0
            || lower[..abs]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric() && c != '_');
        let after_ok = lower[abs + keyword.len()..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric() && c != '_')
            .unwrap_or(true);
        if before_ok && after_ok {
            return true;
        }
        start = abs + keyword.len();
    }
    false
}
