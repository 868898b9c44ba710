use sea_orm::{ColumnTrait, EntityTrait, Order, QueryOrder, QuerySelect, Select};

use rolodex_domain::pagination::Sort;

pub trait SelectWindow {
    /// Apply `LIMIT`/`OFFSET`, leaving a clause out entirely when its value is not positive.
    fn window(self, limit: i64, offset: i64) -> Self;

    fn order_by_sort<C: ColumnTrait>(self, col: C, sort: Sort) -> Self;
}

impl<E> SelectWindow for Select<E>
where
    E: EntityTrait,
{
    fn window(mut self, limit: i64, offset: i64) -> Self {
        if limit > 0 {
            self = self.limit(limit as u64);
        }
        if offset > 0 {
            self = self.offset(offset as u64);
        }
        self
    }

    fn order_by_sort<C: ColumnTrait>(self, col: C, sort: Sort) -> Self {
        let order = match sort {
            Sort::Asc => Order::Asc,
            Sort::Desc => Order::Desc,
        };
        self.order_by(col, order)
    }
}
