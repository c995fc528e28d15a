use clap::Parser;
use sweeper_core::{CellCount, Coord};
use wasm_bindgen::prelude::*;

mod game;
mod settings;
mod utils;

use settings::NewGameParams;
use utils::LocalOrDefault;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Width of the first board
    #[arg(long)]
    width: Option<Coord>,

    /// Height of the first board
    #[arg(long)]
    height: Option<Coord>,

    /// Mine count of the first board
    #[arg(long)]
    mines: Option<CellCount>,
}

impl Args {
    /// First game parameters, only when at least one of them was given.
    fn params(&self) -> Option<NewGameParams> {
        if self.width.is_none() && self.height.is_none() && self.mines.is_none() {
            return None;
        }
        let stored = NewGameParams::local_or_default();
        Some(NewGameParams {
            width: self.width.map_or(stored.width, i64::from),
            height: self.height.map_or(stored.height, i64::from),
            mines: self.mines.map_or(stored.mines, i64::from),
        })
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::warn!("ignoring location hash {:?}: {}", location_hash, err);
    }
    log::debug!("seed: {:?}", args.seed);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = game::GameProps {
        seed: args.seed,
        params: args.params(),
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_hash(hash: &str) -> Args {
        Args::try_parse_from(hash.split(['#', '&'])).unwrap()
    }

    #[test]
    fn hash_arguments_are_parsed() {
        let args = parse_hash("#--seed=7&--width=20&-vv");
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.width, Some(20));
        assert_eq!(args.height, None);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_hash("");
        assert_eq!(args.seed, None);
        assert_eq!(args.params(), None);
    }

    #[test]
    fn oversized_width_is_rejected_by_parser() {
        assert!(Args::try_parse_from("#--width=300".split(['#', '&'])).is_err());
    }
}
