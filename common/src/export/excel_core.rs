//! Penulis xlsx (library bersama)
//!
//! Menulis tabel hasil akhir ke satu sheet: header tebal, header dibekukan,
//! autofilter, lebar kolom mengikuti isi.

use crate::error::{Error, Result};
use crate::types::{Cell, Table};
use rust_xlsxwriter::*;

/// Batas baris per sheet Excel
const MAX_ROWS: usize = 1_048_576;
const MIN_COL_WIDTH: usize = 6;
const MAX_COL_WIDTH: usize = 60;

fn excel_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

/// Lebar kolom dalam satuan karakter
fn column_widths(table: &Table) -> Vec<f64> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = table
                .rows()
                .iter()
                .map(|row| row[col].as_text().chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH) as f64
        })
        .collect()
}

/// Menulis tabel ke buffer xlsx
///
/// # Arguments
/// * `table` - tabel hasil akhir
/// * `sheet_name` - nama sheet (mis. `Data_Proses`)
pub fn generate_excel_buffer(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    if table.len() + 1 > MAX_ROWS {
        return Err(Error::Excel(format!(
            "jumlah baris melebihi batas sheet: {}",
            table.len()
        )));
    }

    let mut workbook = Workbook::new();

    // Format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let datetime_format = Format::new().set_num_format("dd/mm/yyyy hh:mm");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(excel_err("nama sheet tidak valid"))?;

    for (col, (header, width)) in table.columns().iter().zip(column_widths(table)).enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(excel_err("gagal menulis header"))?;
        worksheet
            .set_column_width(col, width)
            .map_err(excel_err("gagal mengatur lebar kolom"))?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col = c as u16;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Number(n) => worksheet.write_number(row_num, col, *n),
                Cell::Bool(b) => worksheet.write_boolean(row_num, col, *b),
                Cell::DateTime { serial } if serial.fract() == 0.0 => {
                    worksheet.write_number_with_format(row_num, col, *serial, &date_format)
                }
                Cell::DateTime { serial } => {
                    worksheet.write_number_with_format(row_num, col, *serial, &datetime_format)
                }
                Cell::Text(s) => worksheet.write_string(row_num, col, s),
            };
            written.map_err(excel_err("gagal menulis sel"))?;
        }
    }

    if !table.columns().is_empty() {
        let last_col = (table.columns().len() - 1) as u16;
        worksheet
            .set_freeze_panes(1, 0)
            .map_err(excel_err("gagal membekukan header"))?;
        worksheet
            .autofilter(0, 0, table.len() as u32, last_col)
            .map_err(excel_err("gagal memasang autofilter"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(excel_err("gagal menyimpan workbook"))
}
