use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::{Bind, IntoBind, Params},
    clause::IntoClause,
    col::{
        Column, DerivedColumns, IntoDerived, Projection, ProjectionSchema, Selection,
        write_selections,
    },
    exec::PreparedQuery,
    ident::TableAliases,
    writer::{FormatContext, FormatWriter},
};

/// Assembles one native sql query and its positional parameters.
///
/// Clauses are rendered as soon as their method runs, in the order
/// select, where, order by, limit. Aliases must be registered with
/// [`QueryBuilder::configure_table_alias`] before the clauses that use them.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    query: String,
    aliases: TableAliases,
    params: Params,
    position: u32,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            query: String::with_capacity(64),
            ..Default::default()
        }
    }

    /// Registers or overwrites the alias of `table`.
    pub fn configure_table_alias<T, A>(&mut self, table: T, alias: A) -> &mut Self
    where
        T: Into<SmolStr>,
        A: Into<SmolStr>,
    {
        let table = table.into();
        let alias = alias.into();
        tracing::trace!(%table, %alias, "table alias");
        self.aliases.insert(table, alias);
        self
    }

    // select stuff

    /// Appends `select <columns> from <table>`.
    ///
    /// Projection columns come first, then the derived ones, each in the order given.
    pub fn select<D>(&mut self, projection: &Projection, from_table: &str, derived: D) -> &mut Self
    where
        D: IntoDerived,
    {
        let select = SelectClause {
            projection,
            derived: derived.into_derived(),
            from_table,
        };
        self.append(&select);
        self
    }

    pub fn select_as<T, D>(&mut self, from_table: &str, derived: D) -> &mut Self
    where
        T: ProjectionSchema,
        D: IntoDerived,
    {
        self.select(&T::projection(), from_table, derived)
    }

    // clauses

    /// Appends ` where <clause>`, nothing when the clause is absent or blank.
    pub fn where_clause<C: IntoClause>(&mut self, clause: C) -> &mut Self {
        if let Some(clause) = clause.into_clause() {
            self.query.push_str(" where ");
            self.query.push_str(&clause);
        }
        self
    }

    /// Appends ` order by <clause> DESC `, nothing when the clause is absent or blank.
    pub fn sort_by<C: IntoClause>(&mut self, clause: C) -> &mut Self {
        if let Some(clause) = clause.into_clause() {
            self.query.push_str(" order by ");
            self.query.push_str(&clause);
            self.query.push_str(" DESC ");
        }
        self
    }

    /// Restricts the result to a single row.
    pub fn limit(&mut self) -> &mut Self {
        if !self.query.is_empty() && !self.query.ends_with(char::is_whitespace) {
            self.query.push(' ');
        }
        self.query.push_str("limit 1");
        self
    }

    // parameters

    /// Stores `value` under the next position and returns its placeholder, `?<position>`.
    ///
    /// Every literal must go through here so it ends up bound, never inlined.
    pub fn add_param<V: IntoBind>(&mut self, value: V) -> String {
        self.push_bind(value.into_bind())
    }

    fn push_bind(&mut self, value: Bind) -> String {
        self.position += 1;
        self.params.insert(self.position, value);
        format!("?{}", self.position)
    }

    /// `<column> = ?<n>`, or `None` without binding anything when `value` is null.
    pub fn eq<V: IntoBind>(&mut self, column: &Column, value: V) -> Option<String> {
        let value = value.into_bind();
        if value.is_null() {
            return None;
        }
        let column = self.column(column);
        let placeholder = self.push_bind(value);
        Some(format!("{column} = {placeholder}"))
    }

    /// `?<n> between <start> and <end>`, or `None` when `value` is null.
    pub fn between<V: IntoBind>(&mut self, value: V, start: &Column, end: &Column) -> Option<String> {
        let value = value.into_bind();
        if value.is_null() {
            return None;
        }
        let placeholder = self.push_bind(value);
        Some(format!(
            "{placeholder} between {} and {}",
            self.column(start),
            self.column(end)
        ))
    }

    // rendering helpers

    /// The column as it must appear in this query, `<alias>.<name>` or `<name>`.
    pub fn column(&self, column: &Column) -> String {
        self.render(column)
    }

    /// The table as it must appear in a from or join, `<table> <alias>` or `<table>`.
    pub fn table(&self, table: &str) -> String {
        self.render(&FromTable(table))
    }

    fn append<F: FormatWriter>(&mut self, value: &F) {
        let mut context = FormatContext::new(&mut self.query, &self.aliases);
        value
            .format_writer(&mut context)
            .expect("should not fail on a string writer");
    }

    fn render<F: FormatWriter>(&self, value: &F) -> String {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &self.aliases);
        value
            .format_writer(&mut context)
            .expect("should not fail on a string writer");
        str
    }

    // building the builder

    pub fn sql(&self) -> &str {
        self.query.as_str()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn build(self) -> PreparedQuery {
        PreparedQuery::new(self.query, self.params)
    }
}

struct SelectClause<'a> {
    projection: &'a Projection,
    derived: DerivedColumns,
    from_table: &'a str,
}

impl FormatWriter for SelectClause<'_> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        let selections = self
            .projection
            .columns()
            .iter()
            .map(Selection::Column)
            .chain(self.derived.iter().map(Selection::Derived));

        context.writer.write_str("select ")?;
        write_selections(context, selections)?;
        context.writer.write_str(" from ")?;
        context.write_table(self.from_table)
    }
}

struct FromTable<'a>(&'a str);

impl FormatWriter for FromTable<'_> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.write_table(self.0)
    }
}
