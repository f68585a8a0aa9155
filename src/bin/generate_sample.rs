use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use used_car_explorer::data::model::Record;

const DEFAULT_ROWS: usize = 2000;
const OUTPUT_DIR: &str = "sample_data";

/// (brand, base price in USD, typical engine size in cc)
const BRANDS: [(&str, f64, i64); 12] = [
    ("Toyota", 18000.0, 1800),
    ("Honda", 17000.0, 1600),
    ("Ford", 15000.0, 2000),
    ("Chevrolet", 14500.0, 2200),
    ("Nissan", 14000.0, 1600),
    ("Hyundai", 13000.0, 1400),
    ("Kia", 12500.0, 1400),
    ("Volkswagen", 19000.0, 1800),
    ("BMW", 32000.0, 2500),
    ("Mercedes", 35000.0, 2500),
    ("Audi", 30000.0, 2000),
    ("Tesla", 42000.0, 0),
];
const FUELS: [&str; 4] = ["Petrol", "Diesel", "Hybrid", "Electric"];
const TRANSMISSIONS: [&str; 2] = ["Manual", "Automatic"];
const SERVICES: [&str; 3] = ["Full", "Partial", "None"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn generate_listing(rng: &mut SimpleRng) -> Record {
    let (brand, base_price, engine) = BRANDS[rng.below(BRANDS.len())];
    let electric_only = engine == 0;

    let make_year = 2005 + rng.below(20) as i32;
    let age = f64::from(2025 - make_year);
    let owner_count = 1 + rng.below(5) as u32;

    let fuel = if electric_only {
        "Electric"
    } else {
        FUELS[rng.below(FUELS.len() - 1)]
    };
    let transmission = if electric_only {
        "Automatic"
    } else {
        TRANSMISSIONS[rng.below(TRANSMISSIONS.len())]
    };

    // Depreciate ~7% per year and ~4% per previous owner, plus noise.
    let noise = 0.85 + 0.3 * rng.next_f64();
    let price = base_price * 0.93f64.powf(age) * (1.0 - 0.04 * f64::from(owner_count - 1)) * noise;

    let mileage = match fuel {
        "Electric" => 0.0,
        "Hybrid" => 20.0 + 8.0 * rng.next_f64(),
        "Diesel" => 16.0 + 8.0 * rng.next_f64(),
        _ => 10.0 + 8.0 * rng.next_f64(),
    };

    Record {
        make_year,
        brand: brand.to_string(),
        // A few listings come without fuel type or service history.
        fuel_type: (!rng.chance(0.03)).then(|| fuel.to_string()),
        transmission: transmission.to_string(),
        price_usd: (price * 100.0).round() / 100.0,
        owner_count,
        service_history: (!rng.chance(0.05))
            .then(|| SERVICES[rng.below(SERVICES.len())].to_string()),
        mileage_kmpl: (mileage * 10.0).round() / 10.0,
        engine_cc: if electric_only { 0 } else { engine + 100 * rng.below(5) as i64 },
    }
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn int_array(values: impl Iterator<Item = i64>) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(values))
}

fn float_array(values: impl Iterator<Item = f64>) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(values))
}

fn string_array<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(values.collect::<StringArray>())
}

fn write_parquet(path: &Path, records: &[Record]) -> Result<()> {
    let batch = RecordBatch::try_from_iter(vec![
        ("make_year", int_array(records.iter().map(|r| i64::from(r.make_year)))),
        ("brand", string_array(records.iter().map(|r| Some(r.brand.as_str())))),
        ("fuel_type", string_array(records.iter().map(|r| r.fuel_type.as_deref()))),
        ("transmission", string_array(records.iter().map(|r| Some(r.transmission.as_str())))),
        ("price_usd", float_array(records.iter().map(|r| r.price_usd))),
        ("owner_count", int_array(records.iter().map(|r| i64::from(r.owner_count)))),
        ("service_history", string_array(records.iter().map(|r| r.service_history.as_deref()))),
        ("mileage_kmpl", float_array(records.iter().map(|r| r.mileage_kmpl))),
        ("engine_cc", int_array(records.iter().map(|r| r.engine_cc))),
    ])
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let rows = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("row count '{arg}' is not a number"))?,
        None => DEFAULT_ROWS,
    };

    let mut rng = SimpleRng::new(42);
    let records: Vec<Record> = (0..rows).map(|_| generate_listing(&mut rng)).collect();

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).context("creating output directory")?;

    let csv_path = dir.join("used_cars.csv");
    write_csv(&csv_path, &records)?;
    let parquet_path = dir.join("used_cars.parquet");
    write_parquet(&parquet_path, &records)?;

    log::info!("Wrote {rows} listings");
    println!(
        "Wrote {rows} listings to {} and {}",
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
