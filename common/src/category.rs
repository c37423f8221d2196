//! Category Mapper (pemetaan unor + backfill Pemda)

use crate::grouping::{Grouping, OTHER_CATEGORY, PLACEHOLDER_CATEGORY};
use crate::types::{CategorizedRecord, CategorizedTable, ClassifiedTable};

/// Menetapkan unor untuk setiap baris
///
/// 1. lookup langsung satker → unor, selain itu `Lainnya`
/// 2. baris `Pemda` mengambil unor konkret pertama di bawahnya
pub fn assign_categories(table: ClassifiedTable, grouping: Option<&Grouping>) -> CategorizedTable {
    let mut categories: Vec<String> = table
        .records
        .iter()
        .map(|record| {
            record
                .satker
                .as_deref()
                .and_then(|satker| grouping.and_then(|g| g.category_of(satker)))
                .unwrap_or(OTHER_CATEGORY)
                .to_string()
        })
        .collect();

    let filled = backfill_placeholders(&mut categories);
    tracing::debug!(records = categories.len(), filled, "pemetaan unor selesai");

    let records = table
        .records
        .into_iter()
        .zip(categories)
        .map(|(record, category)| CategorizedRecord { record, category })
        .collect();

    CategorizedTable {
        columns: table.columns,
        label_column: table.label_column,
        records,
    }
}

fn is_concrete(category: &str) -> bool {
    category != PLACEHOLDER_CATEGORY && category != OTHER_CATEGORY
}

/// Mengisi slot `Pemda` dengan unor konkret terdekat di bawahnya
///
/// Scan mundur satu kali sambil membawa unor konkret terakhir yang terlihat.
/// Slot `Pemda` tanpa unor konkret sesudahnya tetap `Pemda`.
/// Mengembalikan jumlah slot yang terisi.
pub fn backfill_placeholders(categories: &mut [String]) -> usize {
    let mut next_concrete: Option<String> = None;
    let mut filled = 0;

    for category in categories.iter_mut().rev() {
        if is_concrete(category.as_str()) {
            next_concrete = Some(category.clone());
        } else if category.as_str() == PLACEHOLDER_CATEGORY {
            if let Some(concrete) = &next_concrete {
                category.clone_from(concrete);
                filled += 1;
            }
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassifiedRecord;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn table(satkers: &[Option<&str>]) -> ClassifiedTable {
        ClassifiedTable {
            columns: vec!["Kode".into()],
            records: satkers
                .iter()
                .map(|s| ClassifiedRecord {
                    cells: vec![],
                    satker: s.map(String::from),
                    work_type: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_backfill_example() {
        let mut categories = strings(&["Pemda", "Pemda", "BM", "Lainnya", "Pemda"]);
        let filled = backfill_placeholders(&mut categories);
        assert_eq!(categories, strings(&["BM", "BM", "BM", "Lainnya", "Pemda"]));
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_backfill_skips_other_and_takes_nearest() {
        let mut categories = strings(&["Pemda", "Lainnya", "Pemda", "CK", "Pemda", "SDA"]);
        backfill_placeholders(&mut categories);
        assert_eq!(
            categories,
            strings(&["CK", "Lainnya", "CK", "CK", "SDA", "SDA"])
        );
    }

    #[test]
    fn test_backfill_empty() {
        let mut categories: Vec<String> = vec![];
        assert_eq!(backfill_placeholders(&mut categories), 0);
    }

    #[test]
    fn test_assign_direct_lookup_and_backfill() {
        let mut grouping = Grouping::new(["Kab X", "Balai Jalan", "Balai Air", "Lain"]);
        grouping.move_label("Kab X", "Pemda").unwrap();
        grouping.move_label("Balai Jalan", "BM").unwrap();
        grouping.move_label("Balai Air", "SDA").unwrap();

        let result = assign_categories(
            table(&[
                Some("Kab X"),
                Some("Balai Jalan"),
                Some("Lain"),
                Some("Kab X"),
                Some("Balai Air"),
                Some("Kab X"),
            ]),
            Some(&grouping),
        );

        assert_eq!(
            result.categories(),
            vec!["BM", "BM", "Lainnya", "SDA", "SDA", "Pemda"]
        );
    }

    #[test]
    fn test_no_grouping_means_other() {
        let result = assign_categories(table(&[Some("A"), Some("B")]), None);
        assert_eq!(result.categories(), vec!["Lainnya", "Lainnya"]);

        let empty = Grouping::default();
        let result = assign_categories(table(&[Some("A")]), Some(&empty));
        assert_eq!(result.categories(), vec!["Lainnya"]);
    }

    #[test]
    fn test_null_satker_is_other() {
        let grouping = Grouping::new(["A"]);
        let result = assign_categories(table(&[None]), Some(&grouping));
        assert_eq!(result.categories(), vec!["Lainnya"]);
    }

    #[test]
    fn test_staging_items_fall_back_to_other() {
        let grouping = Grouping::new(["A"]);
        let result = assign_categories(table(&[Some("A")]), Some(&grouping));
        assert_eq!(result.categories(), vec!["Lainnya"]);
    }
}
