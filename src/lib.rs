extern crate self as qnative;

mod bind;
mod builder;
mod clause;
mod col;
mod error;
mod exec;
mod ident;
mod writer;

pub use bind::Bind;
pub use bind::IntoBind;
pub use bind::Params;

pub use col::Column;
pub use col::ColumnExpression;
pub use col::ColumnSubquery;
pub use col::DerivedColumn;
pub use col::DerivedColumns;
pub use col::IntoDerived;
pub use col::Projection;
pub use col::ProjectionSchema;

pub use clause::IntoClause;
pub use clause::and;
pub use clause::parentheses;

pub use ident::TableAliases;

pub use builder::QueryBuilder;

pub use exec::Executor;
pub use exec::PreparedQuery;

pub use error::BoxError;
pub use error::Error;
pub use error::Result;

pub use qnative_derive::Projection;

/// Builds an array of [`DerivedColumn`] from expressions and subqueries.
#[macro_export]
macro_rules! derived {
    () => {
        $crate::DerivedColumns::new()
    };
    ( $($col:expr),+ $(,)? ) => {
        [$( $crate::DerivedColumn::from($col) ),+]
    };
}

/// Joins heterogeneous clauses with ` and `, dropping the absent ones.
#[macro_export]
macro_rules! and {
    () => {
        ::std::string::String::new()
    };
    ( $($expr:expr),+ $(,)? ) => {
        $crate::and([$( $crate::IntoClause::into_clause($expr) ),+])
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{ident::TableAliases, writer};

    pub(crate) fn format_writer<W: writer::FormatWriter>(writer: W, aliases: &TableAliases) -> String {
        let mut str = String::new();
        let mut context = writer::FormatContext::new(&mut str, aliases);
        writer.format_writer(&mut context).unwrap();
        str
    }

    mod derive {
        use crate::{Column, Projection, ProjectionSchema, QueryBuilder};

        #[allow(dead_code, non_snake_case)]
        #[derive(Projection)]
        #[projection(table = "orders")]
        struct OrderRow {
            #[projection(uuid)]
            id: String,
            customerName: String,
            #[projection(rename = "total_amount")]
            total: f64,
            #[projection(table = "customers")]
            email: String,
            #[projection(ignore)]
            cached: bool,
        }

        #[test]
        fn test_derived_projection() {
            let projection = OrderRow::projection();
            assert_eq!(
                vec![
                    Column::uuid("orders", "id"),
                    Column::new("orders", "customer_name"),
                    Column::new("orders", "total_amount"),
                    Column::new("customers", "email"),
                ],
                projection.columns()
            );
        }

        #[test]
        fn test_select_as() {
            let mut builder = QueryBuilder::new();
            builder
                .configure_table_alias("orders", "o")
                .configure_table_alias("customers", "c")
                .select_as::<OrderRow, _>("orders", ());
            assert_eq!(
                "select cast(o.id as varchar), o.customer_name, o.total_amount, c.email from orders o",
                builder.sql()
            );
        }
    }
}
