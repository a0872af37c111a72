//! CSV serialization utilities.

use serde::Serialize;
use std::io::Write;

/// Writes an iterator of records to a CSV writer.
/// Each record must implement Serialize. The header comes from the first record,
/// so an empty iterator writes nothing.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CartRow;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_cart_rows() -> csv::Result<()> {
        let rows = vec![
            CartRow {
                id: "B".to_string(),
                title: "Pen, blue".to_string(),
                image_url: "https://img/p.png".to_string(),
                price: dec!(1.50),
                quantity: 1,
            },
            CartRow {
                id: "A".to_string(),
                title: "Mug".to_string(),
                image_url: "https://img/a.png".to_string(),
                price: dec!(12),
                quantity: 3,
            },
        ];

        let mut output = Vec::new();
        write_csv(&mut output, rows.into_iter())?;

        let expected = "id,title,image_url,price,quantity
B,\"Pen, blue\",https://img/p.png,1.50,1
A,Mug,https://img/a.png,12,3
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
        Ok(())
    }
}
