//! Plain-text rendering of table dumps and receipts.

use grocer_db::{TableDump, TransactionReceipt};

const GAP: &str = "  ";

/// Renders a dump as left-aligned columns under a title line.
///
/// ```text
/// Products:
/// product_id  name         vendor_id  price  quantity
/// ----------  -----------  ---------  -----  --------
/// 1           Rolled Oats             $4.49  10
/// ```
pub fn table(dump: &TableDump) -> String {
    let mut widths: Vec<usize> = dump.columns.iter().map(|c| c.chars().count()).collect();
    for row in &dump.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("{}:\n", dump.table);
    push_row(&mut out, dump.columns.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &dump.rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if dump.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One receipt block for a recorded transaction.
pub fn receipt(receipt: &TransactionReceipt) -> String {
    let mut out = format!(
        "Receipt #{}\n  customer {}  product {}  quantity {}  type {}\n",
        receipt.transaction_id,
        receipt.customer_id,
        receipt.product_id,
        receipt.quantity,
        receipt.kind
    );
    if let (Some(charged), Some(balance)) = (receipt.charged, receipt.credit_balance) {
        out.push_str(&format!(
            "  charged to credit {}  credit balance {}\n",
            charged, balance
        ));
    }
    out.push_str(&format!("  {} left on hand\n", receipt.quantity_on_hand));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{Money, Table, TransactionKind};

    fn products() -> TableDump {
        TableDump {
            table: Table::Products,
            columns: vec!["product_id", "name", "price"],
            rows: vec![
                vec!["1".to_string(), "Rolled Oats".to_string(), "$4.49".to_string()],
                vec!["12".to_string(), "Eggs".to_string(), "$3.89".to_string()],
            ],
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let text = table(&products());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Products:");
        assert_eq!(lines[1], "product_id  name         price");
        assert_eq!(lines[2], "----------  -----------  -----");
        assert_eq!(lines[3], "1           Rolled Oats  $4.49");
        assert_eq!(lines[4], "12          Eggs         $3.89");
    }

    #[test]
    fn test_empty_table() {
        let dump = TableDump {
            table: Table::Coupons,
            columns: vec!["coupon_id", "code"],
            rows: Vec::new(),
        };
        let text = table(&dump);
        assert!(text.starts_with("Coupons:\ncoupon_id  code\n"));
        assert!(text.ends_with("(no rows)\n"));
    }

    #[test]
    fn test_receipt_shows_credit_only_for_credit() {
        let mut r = TransactionReceipt {
            transaction_id: 4,
            customer_id: 1,
            product_id: 2,
            kind: TransactionKind::new("credit"),
            quantity: 3,
            charged: Some(Money::from_cents(3000)),
            credit_balance: Some(Money::from_cents(8000)),
            quantity_on_hand: 17,
        };
        let text = receipt(&r);
        assert!(text.starts_with("Receipt #4\n"));
        assert!(text.contains("charged to credit $30.00  credit balance $80.00"));
        assert!(text.contains("17 left on hand"));

        r.kind = TransactionKind::new("cash");
        r.charged = None;
        r.credit_balance = None;
        assert!(!receipt(&r).contains("credit balance"));
    }
}
