use super::menu::{ItemId, MenuItem};

/// One item in the cart. The name and unit price are captured when the item
/// is first added so totals never need a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Outcome of a quantity change on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUpdate {
    /// The line is still in the cart with this quantity.
    Quantity(u32),
    /// The quantity reached zero and the line was dropped.
    Removed,
    /// No line for that item.
    Missing,
}

/// Ordered list of cart lines, at most one per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Builds a cart from arbitrary lines, merging duplicates and dropping
    /// zero quantities.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::default();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.item_id) {
                Some(index) => {
                    let merged = &mut cart.lines[index];
                    merged.quantity = merged.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds one unit of `item`, returning the line's new quantity.
    /// Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        match self.position(item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::from_item(item));
                1
            }
        }
    }

    /// Drops the line for `item_id`. Returns whether a line was present.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        self.lines.len() != before
    }

    pub fn increase(&mut self, item_id: ItemId) -> LineUpdate {
        match self.position(item_id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                LineUpdate::Quantity(line.quantity)
            }
            None => LineUpdate::Missing,
        }
    }

    /// Subtracts one unit; a line at quantity 1 is removed instead.
    pub fn decrease(&mut self, item_id: ItemId) -> LineUpdate {
        match self.position(item_id) {
            Some(index) if self.lines[index].quantity > 1 => {
                let line = &mut self.lines[index];
                line.quantity -= 1;
                LineUpdate::Quantity(line.quantity)
            }
            Some(index) => {
                self.lines.remove(index);
                LineUpdate::Removed
            }
            None => LineUpdate::Missing,
        }
    }

    /// Sets an existing line's quantity; zero removes it.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: u32) -> LineUpdate {
        match self.position(item_id) {
            Some(index) if quantity == 0 => {
                self.lines.remove(index);
                LineUpdate::Removed
            }
            Some(index) => {
                self.lines[index].quantity = quantity;
                LineUpdate::Quantity(quantity)
            }
            None => LineUpdate::Missing,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Empties the cart and hands back its lines.
    pub fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn total(&self) -> u64 {
        sum_subtotals(&self.lines)
    }

    fn position(&self, item_id: ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == item_id)
    }
}

/// Sum of line subtotals, saturating instead of overflowing.
pub fn sum_subtotals(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .map(CartLine::subtotal)
        .fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn item(id: ItemId, price: u64) -> MenuItem {
        MenuItem::new(id, format!("item {id}"), price, Category::MainCourse, "")
    }

    #[test]
    fn repeated_adds_collapse_into_one_line() {
        let mut cart = Cart::default();
        let nasi = item(1, 25_000);
        for expected in 1..=5 {
            assert_eq!(cart.add(&nasi), expected);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(5));
    }

    #[test]
    fn remove_then_add_starts_from_one() {
        let mut cart = Cart::default();
        let nasi = item(1, 25_000);
        cart.add(&nasi);
        cart.add(&nasi);
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert_eq!(cart.add(&nasi), 1);
    }

    #[test]
    fn decrease_at_one_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(&item(4, 5_000));
        cart.add(&item(4, 5_000));
        assert_eq!(cart.decrease(4), LineUpdate::Quantity(1));
        assert_eq!(cart.decrease(4), LineUpdate::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.decrease(4), LineUpdate::Missing);
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut cart = Cart::default();
        cart.add(&item(2, 20_000));
        assert_eq!(cart.set_quantity(2, 3), LineUpdate::Quantity(3));
        assert_eq!(cart.total(), 60_000);
        assert_eq!(cart.set_quantity(2, 0), LineUpdate::Removed);
        assert_eq!(cart.set_quantity(2, 1), LineUpdate::Missing);
    }

    #[test]
    fn increase_ignores_missing_lines() {
        let mut cart = Cart::default();
        assert_eq!(cart.increase(9), LineUpdate::Missing);
        assert!(cart.is_empty());
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add(&item(1, 25_000));
        cart.add(&item(4, 5_000));
        cart.add(&item(4, 5_000));
        assert_eq!(cart.total(), 35_000);
    }

    #[test]
    fn from_lines_merges_duplicates_and_drops_zero() {
        let mut a = CartLine::from_item(&item(1, 10));
        a.quantity = 2;
        let mut b = CartLine::from_item(&item(1, 10));
        b.quantity = 3;
        let mut zero = CartLine::from_item(&item(2, 10));
        zero.quantity = 0;

        let cart = Cart::from_lines([a, zero, b]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(5));
    }

    #[test]
    fn quantities_saturate_instead_of_overflowing() {
        let mut cart = Cart::default();
        let nasi = item(1, 25_000);
        cart.add(&nasi);
        assert_eq!(cart.set_quantity(1, u32::MAX), LineUpdate::Quantity(u32::MAX));

        assert_eq!(cart.increase(1), LineUpdate::Quantity(u32::MAX));
        assert_eq!(cart.add(&nasi), u32::MAX);
        assert_eq!(cart.total(), 25_000 * u64::from(u32::MAX));

        assert_eq!(cart.decrease(1), LineUpdate::Quantity(u32::MAX - 1));
    }

    #[test]
    fn from_lines_saturates_merged_quantities() {
        let mut a = CartLine::from_item(&item(1, 10));
        a.quantity = u32::MAX;
        let b = CartLine::from_item(&item(1, 10));

        let cart = Cart::from_lines([a, b]);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(u32::MAX));
    }

    #[test]
    fn totals_saturate_on_huge_prices() {
        let mut cart = Cart::default();
        cart.add(&item(1, u64::MAX));
        cart.add(&item(2, 1));
        assert_eq!(cart.set_quantity(1, 2), LineUpdate::Quantity(2));
        assert_eq!(cart.total(), u64::MAX);
    }
}
