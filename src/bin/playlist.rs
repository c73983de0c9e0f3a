//! Builds a three-song playlist with front, back and positional inserts and
//! prints it as an arrow chain.

use serde::Serialize;
use seqlist::{List, Result};

#[derive(Debug, Clone, Serialize)]
struct Song {
    name: String,
    author: String,
    song: String,
    duration: f64,
}

impl Song {
    fn new(name: &str, author: &str, duration: f64) -> Self {
        Song {
            name: name.to_string(),
            author: author.to_string(),
            song: format!("{name}.mp3"),
            duration,
        }
    }
}

#[allow(clippy::approx_constant)]
fn main() -> Result<()> {
    env_logger::init();

    let mut playlist = List::new();
    playlist.push_back(Song::new("Демони", "Один в каноє", 2.20));
    playlist.push_front(Song::new("Човен", "Один в каноє", 2.44));
    playlist.insert_at(Song::new("Коала", "Khrystyna Soloviy", 3.14), 1)?;

    playlist.print()
}
