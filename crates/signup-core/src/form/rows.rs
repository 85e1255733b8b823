use crate::domain::{OrderDraft, OrderRowId};

/// One editable order line. `id` survives removal of other rows; the
/// position in [`OrderRows`] does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderRowId,
    pub title: String,
    pub total: String,
}

impl OrderRow {
    fn blank() -> Self {
        let draft = OrderDraft::blank_row();
        Self {
            id: OrderRowId::new(),
            title: draft.title,
            total: draft.total,
        }
    }

    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft::new(self.title.clone(), self.total.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRows {
    rows: Vec<OrderRow>,
}

impl OrderRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blank_rows(count: usize) -> Self {
        let mut rows = Self::new();
        for _ in 0..count {
            rows.add_row();
        }
        rows
    }

    /// Appends a blank row and returns its id.
    pub fn add_row(&mut self) -> OrderRowId {
        let row = OrderRow::blank();
        let id = row.id;
        self.rows.push(row);
        id
    }

    /// Removes the row at `index`. Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) -> Option<OrderRow> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_id(&mut self, id: OrderRowId) -> Option<OrderRow> {
        let index = self.position(id)?;
        self.remove_row(index)
    }

    pub fn position(&self, id: OrderRowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&OrderRow> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut OrderRow> {
        self.rows.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_drafts(&self) -> Vec<OrderDraft> {
        self.rows.iter().map(OrderRow::to_draft).collect()
    }
}

impl<'a> IntoIterator for &'a OrderRows {
    type Item = &'a OrderRow;
    type IntoIter = std::slice::Iter<'a, OrderRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderRows;

    #[test]
    fn add_row_appends_blank_defaults() {
        let mut rows = OrderRows::new();
        let id = rows.add_row();
        assert_eq!(rows.len(), 1);
        let row = rows.get(0).expect("row");
        assert_eq!(row.id, id);
        assert_eq!(row.title, "");
        assert_eq!(row.total, "1");
    }

    #[test]
    fn remove_row_out_of_bounds_is_noop() {
        let mut rows = OrderRows::with_blank_rows(2);
        let before = rows.clone();
        assert!(rows.remove_row(2).is_none());
        assert_eq!(rows, before);
    }

    #[test]
    fn remove_row_keeps_identity_of_later_rows() {
        let mut rows = OrderRows::with_blank_rows(3);
        let third = rows.get(2).expect("row").id;
        rows.get_mut(2).expect("row").title = "Pen".to_string();

        let removed = rows.remove_row(0).expect("removed");
        assert_ne!(removed.id, third);
        assert_eq!(rows.position(third), Some(1));
        assert_eq!(rows.get(1).map(|row| row.title.as_str()), Some("Pen"));
    }

    #[test]
    fn remove_by_id_targets_the_matching_row() {
        let mut rows = OrderRows::with_blank_rows(3);
        let middle = rows.get(1).expect("row").id;
        let removed = rows.remove_by_id(middle).expect("removed");
        assert_eq!(removed.id, middle);
        assert_eq!(rows.len(), 2);
        assert!(rows.position(middle).is_none());
    }
}
