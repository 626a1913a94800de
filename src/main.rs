//! Command-line entrypoint: classify one fundus image with a local
//! TorchScript model and print the result as JSON.

use anyhow::Result;
use retinascan::config::Settings;
use retinascan::engine::Engine;
use std::{env, fs, process};

const USAGE: &str = "usage: ./retinascan <model file> <image file>";

fn get_args() -> (String, String) {
    let args: Vec<String> = env::args().collect();
    if args.len() - 1 != 2 {
        println!("{USAGE}");
        process::exit(1);
    }
    (args[1].clone(), args[2].clone())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let (model, image) = get_args();

    // The output head still comes from config/env; the CLI only picks the
    // artifact and the image.
    let mut settings = Settings::load()?;
    settings.model_path = model;

    let engine = Engine::from_settings(&settings)?;
    let bytes = fs::read(image)?;
    let result = engine.classify_image(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
