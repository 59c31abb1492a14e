use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

/// Entity name and the units a prediction for it may use.
const ENTITIES: &[(&str, &[&str])] = &[
    ("width", &["centimetre", "inch", "millimetre"]),
    ("height", &["centimetre", "foot", "metre"]),
    ("item_weight", &["gram", "kilogram", "pound", "ounce"]),
    ("voltage", &["volt", "kilovolt"]),
    ("wattage", &["watt", "kilowatt"]),
    ("item_volume", &["millilitre", "litre", "fluid ounce", "cup"]),
];

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a matching sample_test.csv / sample_test_out.csv pair")]
struct Args {
    /// Directory to write the two files into
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Number of rows in each file
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("creating {}", args.dir.display()))?;
    let test_path = args.dir.join("sample_test.csv");
    let out_path = args.dir.join("sample_test_out.csv");

    let mut test = csv::Writer::from_path(&test_path)
        .with_context(|| format!("creating {}", test_path.display()))?;
    let mut out = csv::Writer::from_path(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;

    test.write_record(["index", "group_id", "entity_name"])?;
    out.write_record(["index", "prediction"])?;

    for index in 0..args.rows {
        let (entity, units) = *rng.pick(ENTITIES);
        let group_id = 100_000 + rng.next_u64() % 900_000;
        test.write_record([index.to_string(), group_id.to_string(), entity.to_string()])?;

        // Roughly one prediction in ten is left blank.
        let prediction = if rng.next_f64() < 0.1 {
            String::new()
        } else {
            let value = (rng.next_f64() * 1000.0 * 100.0).round() / 100.0;
            format!("{value} {}", rng.pick(units))
        };
        out.write_record([index.to_string(), prediction])?;
    }

    test.flush()?;
    out.flush()?;

    info!("seed {}", args.seed);
    println!(
        "Wrote {} rows to {} and {}",
        args.rows,
        test_path.display(),
        out_path.display()
    );
    Ok(())
}
