use smol_str::SmolStr;

/// Clause text that may be absent. Blank text counts as absent.
pub trait IntoClause {
    fn into_clause(self) -> Option<String>;
}

fn present(text: &str) -> bool {
    !text.trim().is_empty()
}

impl IntoClause for &str {
    fn into_clause(self) -> Option<String> {
        present(self).then(|| self.to_owned())
    }
}

impl IntoClause for String {
    fn into_clause(self) -> Option<String> {
        present(&self).then_some(self)
    }
}

impl IntoClause for &String {
    fn into_clause(self) -> Option<String> {
        self.as_str().into_clause()
    }
}

impl IntoClause for SmolStr {
    fn into_clause(self) -> Option<String> {
        self.as_str().into_clause()
    }
}

impl<T> IntoClause for Option<T>
where
    T: IntoClause,
{
    fn into_clause(self) -> Option<String> {
        self.and_then(IntoClause::into_clause)
    }
}

/// Wraps the expression in parentheses, absent stays absent.
pub fn parentheses<C: IntoClause>(expression: C) -> Option<String> {
    expression.into_clause().map(|expr| format!("({expr})"))
}

/// Joins the present expressions with ` and `.
///
/// Absent or blank entries are dropped, so nothing present yields an empty string.
pub fn and<I>(expressions: I) -> String
where
    I: IntoIterator,
    I::Item: IntoClause,
{
    let mut out = String::new();
    for expr in expressions.into_iter().filter_map(IntoClause::into_clause) {
        if !out.is_empty() {
            out.push_str(" and ");
        }
        out.push_str(&expr);
    }
    out
}
