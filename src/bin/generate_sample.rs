use anyhow::{Context, Result};

use tumour_kinetics::ChartConfig;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Growth profile of one subject.
struct Subject {
    name: &'static str,
    initial_volume: f64,
    /// Daily exponential growth rate outside treatment.
    growth: f64,
    /// Daily rate during treatment windows (negative = shrinking).
    treated: Option<f64>,
}

/// Volume at which a subject leaves the study; later cells are missing.
const ENDPOINT_VOLUME: f64 = 1500.0;

/// Share of cells randomly left empty (missed measurement days).
const MISSING_RATE: f64 = 0.08;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_tumour_volumes.csv".to_string());

    let windows = ChartConfig::default().treatment_windows;
    let mut rng = SimpleRng::new(23);

    // Measurement days: twice a week, alternating 3 and 4 day gaps.
    let mut days = vec![0.0];
    let mut day = 0.0;
    while day < 105.0 {
        day += if days.len() % 2 == 1 { 3.0 } else { 4.0 };
        days.push(day);
    }

    let subjects = [
        Subject { name: "TP1-PT", initial_volume: 45.0, growth: 0.045, treated: Some(-0.020) },
        Subject { name: "TP2-PT", initial_volume: 60.0, growth: 0.040, treated: Some(-0.015) },
        Subject { name: "TP3-V", initial_volume: 52.0, growth: 0.050, treated: Some(0.005) },
        Subject { name: "TP4-V", initial_volume: 38.0, growth: 0.048, treated: Some(-0.010) },
        Subject { name: "TP5-V", initial_volume: 55.0, growth: 0.042, treated: Some(0.0) },
        Subject { name: "C1", initial_volume: 50.0, growth: 0.055, treated: None },
        Subject { name: "C2", initial_volume: 42.0, growth: 0.060, treated: None },
    ];

    // columns[s][row]
    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(subjects.len());
    for subject in &subjects {
        let mut volume = subject.initial_volume;
        let mut prev_day = 0.0;
        let mut left_study = false;
        let mut cells = Vec::with_capacity(days.len());

        for &day in &days {
            let dt = day - prev_day;
            prev_day = day;
            let in_treatment = windows.iter().any(|w| w.contains(day));
            let rate = match (in_treatment, subject.treated) {
                (true, Some(rate)) => rate,
                _ => subject.growth,
            };
            volume *= (rate * dt).exp();

            if left_study || volume > ENDPOINT_VOLUME {
                left_study = true;
                cells.push(None);
                continue;
            }
            if day > 0.0 && rng.next_f64() < MISSING_RATE {
                cells.push(None);
                continue;
            }
            let measured = (volume * (1.0 + rng.gauss(0.0, 0.08))).max(0.0);
            cells.push(Some((measured * 10.0).round() / 10.0));
        }
        columns.push(cells);
    }

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["Time (Days)".to_string()];
    header.extend(subjects.iter().map(|s| s.name.to_string()));
    writer.write_record(&header)?;

    for (row, day) in days.iter().enumerate() {
        let mut record = vec![day.to_string()];
        record.extend(
            columns
                .iter()
                .map(|c| c[row].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} days × {} subjects to {output_path}",
        days.len(),
        subjects.len()
    );
    Ok(())
}
