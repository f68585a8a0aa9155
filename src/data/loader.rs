use std::io::Read;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use calamine::{open_workbook_auto, Data, Range, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, Record};

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "make_year",
    "brand",
    "fuel_type",
    "transmission",
    "price_usd",
    "owner_count",
    "service_history",
    "mileage_kmpl",
    "engine_cc",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one column per field (recommended for large tables)
/// * `.xlsx`    – first worksheet, header row with the column names
/// * `.json`    – `[{ "make_year": 2018, "brand": "Toyota", ... }, ...]`
/// * `.csv`     – header row with the column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "xlsx" | "xls" => load_workbook(path),
        "json" => {
            let file = std::fs::File::open(path).context("opening JSON file")?;
            read_json(std::io::BufReader::new(file))
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} listings ({} brands) from {}",
        dataset.len(),
        dataset.profile().brands.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row checks shared by every format
// ---------------------------------------------------------------------------

fn check_record(rec: &Record, row: usize) -> Result<()> {
    ensure!(!rec.brand.is_empty(), "Row {row}: empty 'brand'");
    ensure!(!rec.transmission.is_empty(), "Row {row}: empty 'transmission'");
    ensure!(
        rec.price_usd.is_finite() && rec.price_usd >= 0.0,
        "Row {row}: 'price_usd' must be a non-negative number, got {}",
        rec.price_usd
    );
    ensure!(
        rec.mileage_kmpl.is_finite() && rec.mileage_kmpl >= 0.0,
        "Row {row}: 'mileage_kmpl' must be a non-negative number, got {}",
        rec.mileage_kmpl
    );
    ensure!(
        rec.owner_count >= 1,
        "Row {row}: 'owner_count' must be at least 1"
    );
    Ok(())
}

/// Blank categorical cells count as null.
fn normalise(mut rec: Record) -> Record {
    rec.fuel_type = rec.fuel_type.filter(|s| !s.trim().is_empty());
    rec.service_history = rec.service_history.filter(|s| !s.trim().is_empty());
    rec
}

fn finish(records: Vec<Record>) -> Result<Dataset> {
    for (row, rec) in records.iter().enumerate() {
        check_record(rec, row)?;
    }
    Dataset::from_records(records).context("building dataset")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one listing per row.
/// Extra columns are ignored; empty `fuel_type` / `service_history` cells
/// are null.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        ensure!(
            headers.iter().any(|h| h == col),
            "CSV missing '{col}' column"
        );
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(normalise(record));
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, one object per listing):
///
/// ```json
/// [
///   { "make_year": 2018, "brand": "Toyota", "fuel_type": null, ... },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(source: R) -> Result<Dataset> {
    let records: Vec<Record> = serde_json::from_reader(source).context("parsing JSON")?;
    finish(records.into_iter().map(normalise).collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Integer and floating columns of any width are accepted; they are cast to
/// `Int64` / `Float64` before reading. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }

    finish(records)
}

fn read_batch(batch: &RecordBatch, first_row: usize, out: &mut Vec<Record>) -> Result<()> {
    let years = int_column(batch, "make_year")?;
    let mut brands = str_column(batch, "brand")?;
    let mut fuels = str_column(batch, "fuel_type")?;
    let mut transmissions = str_column(batch, "transmission")?;
    let prices = float_column(batch, "price_usd")?;
    let owners = int_column(batch, "owner_count")?;
    let mut services = str_column(batch, "service_history")?;
    let mileages = float_column(batch, "mileage_kmpl")?;
    let engines = int_column(batch, "engine_cc")?;

    for i in 0..batch.num_rows() {
        let row = first_row + i;
        let make_year = required(years[i], row, "make_year")?;
        let owner_count = required(owners[i], row, "owner_count")?;

        out.push(normalise(Record {
            make_year: i32::try_from(make_year)
                .with_context(|| format!("Row {row}: 'make_year' {make_year} out of range"))?,
            brand: required(brands[i].take(), row, "brand")?,
            fuel_type: fuels[i].take(),
            transmission: required(transmissions[i].take(), row, "transmission")?,
            price_usd: required(prices[i], row, "price_usd")?,
            owner_count: u32::try_from(owner_count)
                .with_context(|| format!("Row {row}: 'owner_count' {owner_count} out of range"))?,
            service_history: services[i].take(),
            mileage_kmpl: required(mileages[i], row, "mileage_kmpl")?,
            engine_cc: required(engines[i], row, "engine_cc")?,
        }));
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn required<T>(value: Option<T>, row: usize, col: &str) -> Result<T> {
    value.with_context(|| format!("Row {row}: null value in '{col}'"))
}

/// Fetch a column by name and cast it to `to`, whatever width it was stored with.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))?;
    cast(col, to).with_context(|| format!("column '{name}' cannot be read as {to:?}"))
}

fn int_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>> {
    let array = cast_column(batch, name, &DataType::Int64)?;
    let arr = array
        .as_any()
        .downcast_ref::<Int64Array>()
        .context("expected Int64Array")?;
    Ok(arr.iter().collect())
}

fn float_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>> {
    let array = cast_column(batch, name, &DataType::Float64)?;
    let arr = array
        .as_any()
        .downcast_ref::<Float64Array>()
        .context("expected Float64Array")?;
    Ok(arr.iter().collect())
}

fn str_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let array = cast_column(batch, name, &DataType::Utf8)?;
    let arr = array
        .as_any()
        .downcast_ref::<StringArray>()
        .context("expected StringArray")?;
    Ok(arr.iter().map(|v| v.map(str::to_string)).collect())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of an Excel workbook.
///
/// The first row holds the column names, every following non-blank row is
/// one listing. Blank `fuel_type` / `service_history` cells are null.
fn load_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;
    read_sheet(&range)
}

fn read_sheet(range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range.rows();
    let header = rows.next().context("worksheet is empty")?;

    let mut index = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in index.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = header
            .iter()
            .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
            .with_context(|| format!("Worksheet missing '{name}' column"))?;
    }
    let [year, brand, fuel, trans, price, owners, service, mileage, engine] = index;

    let mut records = Vec::new();
    let listings = rows.filter(|cells| !cells.iter().all(|c| matches!(c, Data::Empty)));
    for (row, cells) in listings.enumerate() {
        let make_year = sheet_value(cell_integer(cells.get(year)), row, "make_year")?;
        let owner_count = sheet_value(cell_integer(cells.get(owners)), row, "owner_count")?;

        records.push(normalise(Record {
            make_year: i32::try_from(make_year)
                .with_context(|| format!("Row {row}: 'make_year' {make_year} out of range"))?,
            brand: sheet_value(cell_text(cells.get(brand)), row, "brand")?,
            fuel_type: cell_text(cells.get(fuel)),
            transmission: sheet_value(cell_text(cells.get(trans)), row, "transmission")?,
            price_usd: sheet_value(cell_number(cells.get(price)), row, "price_usd")?,
            owner_count: u32::try_from(owner_count)
                .with_context(|| format!("Row {row}: 'owner_count' {owner_count} out of range"))?,
            service_history: cell_text(cells.get(service)),
            mileage_kmpl: sheet_value(cell_number(cells.get(mileage)), row, "mileage_kmpl")?,
            engine_cc: sheet_value(cell_integer(cells.get(engine)), row, "engine_cc")?,
        }));
    }

    finish(records)
}

// -- Worksheet cell helpers --

fn sheet_value<T>(value: Option<T>, row: usize, col: &str) -> Result<T> {
    value.with_context(|| format!("Row {row}: missing or invalid value in '{col}'"))
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) => Some(s.trim().to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Float(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        _ => None,
    }
}

fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole numbers only; Excel stores every number as a float.
fn cell_integer(cell: Option<&Data>) -> Option<i64> {
    match cell? {
        Data::Int(v) => Some(*v),
        Data::String(s) => s.trim().parse().ok(),
        other => {
            let v = cell_number(Some(other))?;
            (v.fract() == 0.0).then_some(v as i64)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::io::Write;

    use arrow::array::Int32Array;
    use parquet::arrow::ArrowWriter;
    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    const CSV: &str = "\
make_year,brand,fuel_type,transmission,price_usd,owner_count,service_history,mileage_kmpl,engine_cc,color
2018,Toyota,Petrol,Manual,10000,1,Full,15.2,1500,Red
2020,Honda,,Automatic,15000.5,2,,18.0,1800,Blue
";

    #[test]
    fn csv_rows_load_with_null_categories() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        let recs = ds.records();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].brand, "Toyota");
        assert_eq!(recs[0].fuel_type.as_deref(), Some("Petrol"));
        assert_eq!(recs[1].fuel_type, None);
        assert_eq!(recs[1].service_history, None);
        assert_eq!(recs[1].price_usd, 15000.5);
        assert_eq!(recs[1].engine_cc, 1800);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let text = "make_year,brand\n2018,Toyota\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'fuel_type'"));
    }

    #[test]
    fn csv_empty_numeric_cell_is_an_error() {
        let text = "\
make_year,brand,fuel_type,transmission,price_usd,owner_count,service_history,mileage_kmpl,engine_cc
2018,Toyota,Petrol,Manual,,1,Full,15.2,1500
";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn negative_price_and_zero_owners_are_rejected() {
        let json = r#"[{"make_year": 2018, "brand": "Kia", "fuel_type": null,
            "transmission": "Manual", "price_usd": -1.0, "owner_count": 1,
            "service_history": null, "mileage_kmpl": 12.0, "engine_cc": 1200}]"#;
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("price_usd"));

        let json = json.replace("-1.0", "1.0").replace("\"owner_count\": 1", "\"owner_count\": 0");
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("owner_count"));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"make_year": 2016, "brand": "Ford", "fuel_type": "Diesel",
             "transmission": "Manual", "price_usd": 7200.0, "owner_count": 3,
             "service_history": "Partial", "mileage_kmpl": 19.5, "engine_cc": 2000},
            {"make_year": 2019, "brand": "BMW", "fuel_type": null,
             "transmission": "Automatic", "price_usd": 31000.0, "owner_count": 1,
             "service_history": null, "mileage_kmpl": 11.0, "engine_cc": 3000}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.profile().fuel_types.len(), 1);
        assert_eq!(ds.records()[1].fuel_type, None);
    }

    #[test]
    fn empty_sources_are_refused() {
        assert!(read_json("[]".as_bytes()).is_err());
        let header_only = REQUIRED_COLUMNS.join(",") + "\n";
        assert!(read_csv(header_only.as_bytes()).is_err());
    }

    #[test]
    fn unsupported_extension_is_refused() {
        let err = load_file(Path::new("listings.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension: .txt"));
    }

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Listings" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

    /// Write a one-sheet workbook. Cells that parse as numbers are stored as
    /// numbers, other text as inline strings, empty text is left out.
    fn write_workbook(path: &Path, rows: &[&[&str]]) {
        let mut sheet = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, cells) in rows.iter().enumerate() {
            sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, value) in cells.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let cell_ref = format!("{}{}", char::from(b'A' + c as u8), r + 1);
                if value.parse::<f64>().is_ok() {
                    sheet.push_str(&format!(r#"<c r="{cell_ref}"><v>{value}</v></c>"#));
                } else {
                    sheet.push_str(&format!(
                        r#"<c r="{cell_ref}" t="inlineStr"><is><t>{value}</t></is></c>"#
                    ));
                }
            }
            sheet.push_str("</row>");
        }
        sheet.push_str("</sheetData></worksheet>");

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ];
        let mut writer = ZipWriter::new(std::fs::File::create(path).unwrap());
        let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);
        for (name, body) in parts {
            writer.start_file(name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn xlsx_first_sheet_loads_by_header_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("used_car_price_dataset_extended.xlsx");
        // Columns deliberately out of order, with an extra one.
        write_workbook(
            &path,
            &[
                &[
                    "brand", "make_year", "color", "fuel_type", "transmission", "price_usd",
                    "owner_count", "service_history", "mileage_kmpl", "engine_cc",
                ],
                &[
                    "Toyota", "2018", "Red", "Petrol", "Manual", "10000", "1", "Full", "15.2",
                    "1500",
                ],
                &["", "", "", "", "", "", "", "", "", ""],
                &[
                    "Honda", "2020", "Blue", "", "Automatic", "15000.5", "2", "", "18", "1800",
                ],
            ],
        );

        let ds = load_file(&path).unwrap();
        let recs = ds.records();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].make_year, 2018);
        assert_eq!(recs[0].brand, "Toyota");
        assert_eq!(recs[0].fuel_type.as_deref(), Some("Petrol"));
        assert_eq!(recs[0].mileage_kmpl, 15.2);
        assert_eq!(recs[1].fuel_type, None);
        assert_eq!(recs[1].service_history, None);
        assert_eq!(recs[1].price_usd, 15000.5);
        assert_eq!(recs[1].owner_count, 2);
        assert_eq!(recs[1].engine_cc, 1800);
    }

    #[test]
    fn xlsx_missing_column_and_bad_cell_are_reported() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("short.xlsx");
        write_workbook(&path, &[&["make_year", "brand"], &["2018", "Toyota"]]);
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'fuel_type' column"));

        let path = dir.path().join("bad.xlsx");
        let mut header = REQUIRED_COLUMNS.to_vec();
        header.push("color");
        write_workbook(
            &path,
            &[
                &header,
                &["2018", "Kia", "Petrol", "Manual", "cheap", "1", "Full", "14", "1200", "Red"],
            ],
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0: missing or invalid value in 'price_usd'"));
    }

    #[test]
    fn parquet_columns_are_cast_and_read() {
        let batch = RecordBatch::try_from_iter(vec![
            ("make_year", Arc::new(Int32Array::from(vec![2017, 2022])) as ArrayRef),
            ("brand", Arc::new(StringArray::from(vec!["Audi", "Tesla"])) as ArrayRef),
            ("fuel_type", Arc::new(StringArray::from(vec![Some("Petrol"), None])) as ArrayRef),
            ("transmission", Arc::new(StringArray::from(vec!["Manual", "Automatic"])) as ArrayRef),
            ("price_usd", Arc::new(Float64Array::from(vec![14500.0, 42000.0])) as ArrayRef),
            ("owner_count", Arc::new(Int64Array::from(vec![2, 1])) as ArrayRef),
            ("service_history", Arc::new(StringArray::from(vec![None, Some("Full")])) as ArrayRef),
            ("mileage_kmpl", Arc::new(Float64Array::from(vec![13.1, 0.0])) as ArrayRef),
            ("engine_cc", Arc::new(Int64Array::from(vec![1984, 0])) as ArrayRef),
        ])
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        let recs = ds.records();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].make_year, 2017);
        assert_eq!(recs[1].brand, "Tesla");
        assert_eq!(recs[1].fuel_type, None);
        assert_eq!(recs[1].service_history.as_deref(), Some("Full"));
        assert_eq!(recs[0].owner_count, 2);
    }

    #[test]
    fn parquet_null_in_numeric_column_is_an_error() {
        let batch = RecordBatch::try_from_iter(vec![
            ("make_year", Arc::new(Int64Array::from(vec![Some(2017)])) as ArrayRef),
            ("brand", Arc::new(StringArray::from(vec!["Audi"])) as ArrayRef),
            ("fuel_type", Arc::new(StringArray::from(vec![Some("Petrol")])) as ArrayRef),
            ("transmission", Arc::new(StringArray::from(vec!["Manual"])) as ArrayRef),
            ("price_usd", Arc::new(Float64Array::from(vec![None::<f64>])) as ArrayRef),
            ("owner_count", Arc::new(Int64Array::from(vec![1])) as ArrayRef),
            ("service_history", Arc::new(StringArray::from(vec![Some("Full")])) as ArrayRef),
            ("mileage_kmpl", Arc::new(Float64Array::from(vec![13.1])) as ArrayRef),
            ("engine_cc", Arc::new(Int64Array::from(vec![1984])) as ArrayRef),
        ])
        .unwrap();

        let mut out = Vec::new();
        let err = read_batch(&batch, 0, &mut out).unwrap_err();
        assert!(err.to_string().contains("null value in 'price_usd'"));
    }
}
