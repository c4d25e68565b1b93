use crate::domain::listing::{OrderField, OrderSpec, SortDirection};
use crate::infrastructure::database::SortCollation;
use sqlx::{Postgres, QueryBuilder};

/// Append an `ORDER BY` clause for `order`. Ties are broken by `id` in the
/// same direction so pages never overlap.
pub(super) fn push_order_by(
    builder: &mut QueryBuilder<'_, Postgres>,
    order: OrderSpec,
    timestamp_column: &str,
    text_column: &str,
    id_column: &str,
    collation: &SortCollation,
) {
    let direction = match order.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    builder.push(" ORDER BY ");
    match order.field {
        OrderField::Timestamp => {
            builder.push(format_args!("{timestamp_column} {direction}"));
        }
        OrderField::Text if order.localized => {
            builder.push(format_args!("{text_column} {collation} {direction}"));
        }
        OrderField::Text => {
            builder.push(format_args!("{text_column} {direction}"));
        }
    }
    builder.push(format_args!(", {id_column} {direction}"));
}
