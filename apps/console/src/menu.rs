//! The numbered main menu.

use std::fmt;
use std::str::FromStr;

use grocer_core::ValidationError;

/// One entry of the main menu, numbered 1 to 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    MakeTransaction,
    DisplayRecords,
    UpdateRewards,
    AddCustomer,
    AddVendor,
    AddProduct,
    AddCoupon,
    UpdateCustomer,
    UpdateVendor,
    UpdateProduct,
    UpdateCoupon,
    DeleteCustomer,
    DeleteVendor,
    DeleteProduct,
    DeleteCoupon,
    Quit,
}

impl MenuChoice {
    /// Menu order.
    pub const ALL: [MenuChoice; 16] = [
        MenuChoice::MakeTransaction,
        MenuChoice::DisplayRecords,
        MenuChoice::UpdateRewards,
        MenuChoice::AddCustomer,
        MenuChoice::AddVendor,
        MenuChoice::AddProduct,
        MenuChoice::AddCoupon,
        MenuChoice::UpdateCustomer,
        MenuChoice::UpdateVendor,
        MenuChoice::UpdateProduct,
        MenuChoice::UpdateCoupon,
        MenuChoice::DeleteCustomer,
        MenuChoice::DeleteVendor,
        MenuChoice::DeleteProduct,
        MenuChoice::DeleteCoupon,
        MenuChoice::Quit,
    ];

    pub fn number(&self) -> usize {
        MenuChoice::ALL
            .iter()
            .position(|choice| choice == self)
            .map_or(0, |idx| idx + 1)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MenuChoice::MakeTransaction => "Make a transaction",
            MenuChoice::DisplayRecords => "Display records",
            MenuChoice::UpdateRewards => "Update rewards points",
            MenuChoice::AddCustomer => "Add a customer",
            MenuChoice::AddVendor => "Add a vendor",
            MenuChoice::AddProduct => "Add a product",
            MenuChoice::AddCoupon => "Add a coupon",
            MenuChoice::UpdateCustomer => "Update a customer",
            MenuChoice::UpdateVendor => "Update a vendor",
            MenuChoice::UpdateProduct => "Update a product",
            MenuChoice::UpdateCoupon => "Update a coupon",
            MenuChoice::DeleteCustomer => "Delete a customer",
            MenuChoice::DeleteVendor => "Delete a vendor",
            MenuChoice::DeleteProduct => "Delete a product",
            MenuChoice::DeleteCoupon => "Delete a coupon",
            MenuChoice::Quit => "Quit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let out_of_range = || ValidationError::OutOfRange {
            field: "choice".to_string(),
            min: 1,
            max: MenuChoice::ALL.len() as i64,
        };

        let n: usize = s.trim().parse().map_err(|_| out_of_range())?;
        n.checked_sub(1)
            .and_then(|idx| MenuChoice::ALL.get(idx).copied())
            .ok_or_else(out_of_range)
    }
}

/// The menu in two columns.
pub fn menu_text() -> String {
    let mut text = String::from("Menu:\n");
    for pair in MenuChoice::ALL.chunks(2) {
        let line = match pair {
            [left, right] => format!("{:<28}{}", left.to_string(), right),
            [only] => only.to_string(),
            _ => continue,
        };
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_follow_menu_order() {
        assert_eq!(MenuChoice::MakeTransaction.number(), 1);
        assert_eq!(MenuChoice::AddCoupon.number(), 7);
        assert_eq!(MenuChoice::Quit.number(), 16);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::MakeTransaction);
        assert_eq!(" 14 ".parse::<MenuChoice>().unwrap(), MenuChoice::DeleteProduct);
        assert_eq!("16".parse::<MenuChoice>().unwrap(), MenuChoice::Quit);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        for raw in ["0", "17", "-1", "quit", ""] {
            assert!(matches!(
                raw.parse::<MenuChoice>(),
                Err(ValidationError::OutOfRange { min: 1, max: 16, .. })
            ), "{raw}");
        }
    }

    #[test]
    fn test_menu_text_lists_every_choice() {
        let text = menu_text();
        for choice in MenuChoice::ALL {
            assert!(text.contains(&choice.to_string()), "{choice}");
        }
        assert_eq!(text.lines().count(), 1 + 8);
        assert!(text.lines().nth(1).unwrap().starts_with("1.Make a transaction"));
    }
}
