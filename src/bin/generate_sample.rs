use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the deployment export, column order as the pipeline writes it.
#[derive(Serialize)]
struct Row {
    make: String,
    model: String,
    vehicle_title: String,
    review: String,
    rating: f64,
    text_for_clustering: String,
    strengths: String,
    weaknesses: String,
    sentiment: &'static str,
    sentiment_score: f64,
    cluster: u32,
    assigned_topic: &'static str,
    make_cluster_perc: f64,
    assigned_topic_cluster_perc: f64,
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

const VEHICLES: [(&str, &str); 9] = [
    ("Toyota", "Camry"),
    ("Toyota", "RAV4"),
    ("Honda", "Civic"),
    ("Honda", "CR-V"),
    ("Ford", "Mustang"),
    ("Ford", "F-150"),
    ("Mercedes-Benz", "SL"),
    ("Kia", "Telluride"),
    ("Tesla", "Model 3"),
];

/// (topic, what reviewers on that topic talk about)
const TOPICS: [(&str, &str); 5] = [
    ("comfort", "a smooth, quiet ride and supportive seats"),
    ("performance", "strong acceleration and sharp handling"),
    ("reliability", "years of trouble-free ownership"),
    ("technology", "an intuitive infotainment screen and driver aids"),
    ("other", "a mix of impressions"),
];

const STRENGTHS: [&str; 4] = ["fuel economy", "cargo space", "resale value", "build quality"];
const WEAKNESSES: [&str; 4] = ["road noise", "firm suspension", "dated interior", "pricey options"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = Path::new("data/enriched_with_clusters_deployment.csv");
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).context("creating data directory")?;
    }

    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    let mut rows = 0usize;

    for (v, &(make, model)) in VEHICLES.iter().enumerate() {
        let make_perc = 0.2 + 0.7 * rng.next_f64();
        for year in [2023, 2024, 2025] {
            let (topic, highlight) = *rng.pick(&TOPICS);
            let positive = rng.next_f64() < 0.7;
            let rating = if positive {
                3.5 + 1.5 * rng.next_f64()
            } else {
                1.0 + 2.0 * rng.next_f64()
            };
            let row = Row {
                make: make.to_string(),
                model: model.to_string(),
                vehicle_title: format!("{year} {make} {model}"),
                review: format!("Owned the {year} {model} for a year: {highlight}."),
                rating: (rating * 10.0).round() / 10.0,
                text_for_clustering: highlight.to_string(),
                strengths: rng.pick(&STRENGTHS).to_string(),
                weaknesses: rng.pick(&WEAKNESSES).to_string(),
                sentiment: if positive { "positive" } else { "negative" },
                sentiment_score: 0.5 + 0.5 * rng.next_f64(),
                cluster: (v % 4) as u32,
                assigned_topic: topic,
                make_cluster_perc: make_perc,
                assigned_topic_cluster_perc: rng.next_f64(),
            };
            writer.serialize(&row).context("writing row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} reviews to {}", output_path.display());
    Ok(())
}
