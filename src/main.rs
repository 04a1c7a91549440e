use qnative::{Column, ColumnExpression, ColumnSubquery, Projection, QueryBuilder, and, parentheses};

fn main() {
    let id = Column::uuid("orders", "id");
    let status = Column::new("orders", "status");
    let total = Column::new("orders", "total");

    let mut builder = QueryBuilder::new();
    builder.configure_table_alias("orders", "o");

    let open = builder.eq(&status, "open");
    let min_total = builder.add_param(100i64);
    let big = format!("{} > {min_total}", builder.column(&total));
    let filter = and![parentheses(and![open, big]), "o.deleted_at is null"];

    let projection = Projection::from(vec![id, status, total.clone()]);
    builder
        .select(
            &projection,
            "orders",
            qnative::derived![
                ColumnExpression::new("total * 0.21", [total]).name("tax"),
                ColumnSubquery::new(
                    "select count(*) from order_lines l where l.order_id = id",
                    [Column::new("orders", "id")],
                    "line_count",
                ),
            ],
        )
        .where_clause(filter)
        .sort_by("o.created_at")
        .limit();

    println!("{}", builder.sql());
    println!("{:?}", builder.params());
}
