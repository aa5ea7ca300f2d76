use log::{error, info};
use std::io::{self, Read};

use mela_recipes::{standardize_json, StandardizeConfig, StandardizeError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // One .melarecipe document on stdin, the standardized document on stdout
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    match run(&input) {
        Ok(output) => {
            info!("Recipe standardized");
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Unable to standardize the recipe: {}", e);
            Err(e.into())
        }
    }
}

fn run(input: &str) -> Result<String, StandardizeError> {
    let config = StandardizeConfig::load()?;
    standardize_json(input, &config)
}
