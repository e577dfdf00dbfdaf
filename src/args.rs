use bevy::math::UVec2;
use clap::Parser;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// A Valentine card with a shy "No" button and a sky full of hearts
pub struct Args {
    /// Initial window size, as width,height
    #[arg(long, default_value = "1000,800")]
    pub win: String,
    /// Number of hearts drifting in the background
    #[arg(long, default_value = "60")]
    pub hearts: usize,
    /// Who the card is addressed to
    #[arg(long, default_value = "Hey you")]
    pub name: String,
    /// Seed for the random number generators (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    /// Parses `--win`, falling back to the default size when it is malformed.
    pub fn window_size(&self) -> UVec2 {
        parse_window_size(&self.win).unwrap_or(DEFAULT_WINDOW_SIZE)
    }
}

pub const DEFAULT_WINDOW_SIZE: UVec2 = UVec2::new(1000, 800);

pub fn parse_window_size(win: &str) -> Option<UVec2> {
    let (w, h) = win.split_once(',')?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some(UVec2::new(w, h))
}

pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

/// An RNG for one consumer. With `--seed`, each stream gets its own reproducible sequence.
pub fn seeded_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}
