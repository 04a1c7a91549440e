use std::fmt;

use smol_str::SmolStr;

use crate::{
    ident::replace_column_name,
    writer::{FormatContext, FormatWriter},
};

/// A physical column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: SmolStr,
    name: SmolStr,
    uuid_type: bool,
}

impl Column {
    pub fn new<T, N>(table: T, name: N) -> Self
    where
        T: Into<SmolStr>,
        N: Into<SmolStr>,
    {
        Self {
            table: table.into(),
            name: name.into(),
            uuid_type: false,
        }
    }

    /// A column holding a uuid, selected as `cast(.. as varchar)`.
    pub fn uuid<T, N>(table: T, name: N) -> Self
    where
        T: Into<SmolStr>,
        N: Into<SmolStr>,
    {
        Self {
            uuid_type: true,
            ..Self::new(table, name)
        }
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_uuid_type(&self) -> bool {
        self.uuid_type
    }
}

impl FormatWriter for Column {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.write_column(self)
    }
}

/// The static select list of a query.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Projection(Vec<Column>);

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: Column) -> Self {
        self.0.push(column);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.0
    }
}

impl FromIterator<Column> for Projection {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Column>> for Projection {
    fn from(columns: Vec<Column>) -> Self {
        Self(columns)
    }
}

/// Types that know their own select list, usually through `#[derive(Projection)]`.
pub trait ProjectionSchema {
    fn projection() -> Projection;
}

/// A computed selection such as `price * qty as total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnExpression {
    expression: SmolStr,
    columns: Vec<Column>,
    maybe_name: Option<SmolStr>,
}

impl ColumnExpression {
    /// `columns` are referenced by bare name inside `expression`.
    pub fn new<E, I>(expression: E, columns: I) -> Self
    where
        E: Into<SmolStr>,
        I: IntoIterator<Item = Column>,
    {
        Self {
            expression: expression.into(),
            columns: columns.into_iter().collect(),
            maybe_name: None,
        }
    }

    pub fn name<N: Into<SmolStr>>(mut self, name: N) -> Self {
        self.maybe_name = Some(name.into());
        self
    }

    pub fn output_name(&self) -> Option<&str> {
        self.maybe_name.as_deref()
    }
}

impl FormatWriter for ColumnExpression {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        let expression = qualify_template(context, &self.expression, &self.columns);
        context.writer.write_str(&expression)?;
        // a blank name means no alias
        let alias = self.output_name().filter(|name| !name.trim().is_empty());
        context.write_alias(alias)
    }
}

/// A correlated subquery selected under a mandatory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSubquery {
    subquery: SmolStr,
    parent_columns: Vec<Column>,
    name: SmolStr,
}

impl ColumnSubquery {
    /// `parent_columns` belong to the outer query and are referenced by bare name.
    pub fn new<S, I, N>(subquery: S, parent_columns: I, name: N) -> Self
    where
        S: Into<SmolStr>,
        I: IntoIterator<Item = Column>,
        N: Into<SmolStr>,
    {
        Self {
            subquery: subquery.into(),
            parent_columns: parent_columns.into_iter().collect(),
            name: name.into(),
        }
    }

    pub fn output_name(&self) -> &str {
        self.name.as_str()
    }
}

impl FormatWriter for ColumnSubquery {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        let subquery = qualify_template(context, &self.subquery, &self.parent_columns);
        context.writer.write_char('(')?;
        context.writer.write_str(&subquery)?;
        context.writer.write_char(')')?;
        context.write_alias(Some(self.output_name()))
    }
}

fn qualify_template<W: fmt::Write>(
    context: &FormatContext<'_, W>,
    template: &str,
    columns: &[Column],
) -> String {
    columns.iter().fold(template.to_owned(), |acc, column| {
        replace_column_name(&acc, column.name(), &context.qualified(column))
    })
}

/// A column whose sql is computed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedColumn {
    Expression(ColumnExpression),
    Subquery(ColumnSubquery),
}

impl From<ColumnExpression> for DerivedColumn {
    fn from(value: ColumnExpression) -> Self {
        Self::Expression(value)
    }
}

impl From<ColumnSubquery> for DerivedColumn {
    fn from(value: ColumnSubquery) -> Self {
        Self::Subquery(value)
    }
}

impl FormatWriter for DerivedColumn {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            DerivedColumn::Expression(expr) => expr.format_writer(context),
            DerivedColumn::Subquery(sub) => sub.format_writer(context),
        }
    }
}

pub type DerivedColumns = Vec<DerivedColumn>;

pub trait IntoDerived {
    fn into_derived(self) -> DerivedColumns;
}

impl IntoDerived for () {
    fn into_derived(self) -> DerivedColumns {
        Vec::new()
    }
}

impl IntoDerived for DerivedColumn {
    fn into_derived(self) -> DerivedColumns {
        vec![self]
    }
}

impl IntoDerived for ColumnExpression {
    fn into_derived(self) -> DerivedColumns {
        vec![DerivedColumn::Expression(self)]
    }
}

impl IntoDerived for ColumnSubquery {
    fn into_derived(self) -> DerivedColumns {
        vec![DerivedColumn::Subquery(self)]
    }
}

impl<const N: usize> IntoDerived for [DerivedColumn; N] {
    fn into_derived(self) -> DerivedColumns {
        self.into()
    }
}

impl IntoDerived for Vec<DerivedColumn> {
    fn into_derived(self) -> DerivedColumns {
        self
    }
}

/// One entry of the select list.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Selection<'a> {
    Column(&'a Column),
    Derived(&'a DerivedColumn),
}

impl FormatWriter for Selection<'_> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            Selection::Derived(derived) => derived.format_writer(context),
            Selection::Column(column) if column.is_uuid_type() => {
                // uuids are handed back as text
                context.writer.write_str("cast(")?;
                context.write_column(column)?;
                context.writer.write_str(" as varchar)")
            }
            Selection::Column(column) => context.write_column(column),
        }
    }
}

/// Renders `selections` separated by commas.
pub(crate) fn write_selections<'a, W, I>(
    context: &mut FormatContext<'_, W>,
    selections: I,
) -> fmt::Result
where
    W: fmt::Write,
    I: IntoIterator<Item = Selection<'a>>,
{
    for (index, selection) in selections.into_iter().enumerate() {
        if index > 0 {
            context.writer.write_str(", ")?;
        }
        selection.format_writer(context)?;
    }
    Ok(())
}
