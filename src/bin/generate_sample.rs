use anyhow::{Context, Result};

const EMPLOYERS: &[&str] = &[
    "Enterprise Holdings, Inc",
    "LaunchCode",
    "Lockerdome",
    "Mastercard",
    "Monsanto",
    "World Wide Technology",
];
const LOCATIONS: &[&str] = &["Saint Louis", "Kansas City", "Miami", "Tampa"];
const POSITIONS: &[(&str, &[&str])] = &[
    ("Web - Front End", &["Javascript", "HTML / CSS", "React"]),
    ("Web - Back End", &["Java", "Ruby", "Python"]),
    ("Data Scientist / Business Intelligence", &["Statistical Analysis", "SQL", "R"]),
    ("Mobile", &["Swift", "Kotlin"]),
];
const TITLES: &[&str] = &["Junior", "Associate", "Senior", "Lead"];

/// Deterministic splitmix64 stream; same seed, same sample file.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Index in `0..n` by multiply-shift.
    fn below(&mut self, n: usize) -> usize {
        ((self.next_u64() >> 32) * n as u64 >> 32) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "job_data.csv".to_string());
    let rows: usize = match std::env::args().nth(2) {
        Some(n) => n.parse().with_context(|| format!("row count '{n}' is not a number"))?,
        None => 100,
    };

    let mut rng = SampleRng(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["name", "employer", "location", "position type", "core competency"])?;

    for _ in 0..rows {
        let (position, skills) = *rng.pick(POSITIONS);
        let skill = *rng.pick(skills);
        let name = format!("{} {skill} Developer", rng.pick(TITLES));
        writer.write_record([
            name.as_str(),
            *rng.pick(EMPLOYERS),
            *rng.pick(LOCATIONS),
            position,
            skill,
        ])?;
    }
    writer.flush().context("flushing CSV writer")?;

    log::info!("wrote {rows} jobs to {output_path}");
    println!("Wrote {rows} jobs to {output_path}");
    Ok(())
}
