use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use rusty_bikeshare::data::registry::{City, DataFormat};

const TRIPS_PER_CITY: usize = 2_000;

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

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

fn stations(city: City) -> &'static [&'static str] {
    match city {
        City::Chicago => &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Michigan Ave & Oak St",
        ],
        City::NewYorkCity => &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "8 Ave & W 31 St",
            "Broadway & E 22 St",
        ],
        City::Washington => &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
        ],
    }
}

/// Commute-shaped start hour: peaks around 8am and 5pm.
fn start_hour(rng: &mut SimpleRng) -> i64 {
    let roll = rng.next_f64();
    if roll < 0.3 {
        7 + rng.below(3) as i64
    } else if roll < 0.6 {
        16 + rng.below(3) as i64
    } else {
        rng.below(24) as i64
    }
}

fn random_start(rng: &mut SimpleRng, origin: NaiveDateTime) -> NaiveDateTime {
    // 2017-01-01 .. 2017-06-30
    let day = rng.below(181) as i64;
    origin
        + Duration::days(day)
        + Duration::hours(start_hour(rng))
        + Duration::minutes(rng.below(60) as i64)
        + Duration::seconds(rng.below(60) as i64)
}

fn write_city(dir: &Path, city: City, rng: &mut SimpleRng) -> Result<PathBuf> {
    let path = dir.join(city.file_name(DataFormat::Csv));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let demographics = city != City::Washington;
    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    let origin = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid origin date")?;
    let names = stations(city);

    for id in 0..TRIPS_PER_CITY {
        let start = random_start(rng, origin);
        let duration = 60 + rng.below(2_400) as i64;
        let end = start + Duration::seconds(duration);
        let user_type = if rng.next_f64() < 0.8 { "Subscriber" } else { "Customer" };

        let mut record = vec![
            id.to_string(),
            start.format("%Y-%m-%d %H:%M:%S").to_string(),
            end.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration.to_string(),
            rng.pick(names).to_string(),
            rng.pick(names).to_string(),
            user_type.to_string(),
        ];
        if demographics {
            // Customers usually leave the demographic fields blank.
            if user_type == "Customer" && rng.next_f64() < 0.9 {
                record.extend([String::new(), String::new()]);
            } else {
                record.push(rng.pick(&["Male", "Female"]).to_string());
                record.push(format!("{}.0", 1940 + rng.below(62)));
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    for city in City::ALL {
        let path = write_city(&dir, city, &mut rng)?;
        println!("Wrote {TRIPS_PER_CITY} trips for {city} to {}", path.display());
    }
    Ok(())
}
