use std::fs;
use std::path::PathBuf;

use algoviz_api_core::{Recorder, Value};
use algoviz_scenes::{
    array_tour, linear_search, max_sum_k_successive, selection_sort, two_sum, valid_parentheses,
    Scene,
};
use algoviz_structures::ArrayConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::json;

#[derive(Parser)]
#[command(name = "algoviz")]
#[command(about = "Record algorithm walkthrough animations as JSON timelines")]
struct Cli {
    /// Write the timeline here instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    /// Pretty-print the JSON
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an array for a target value
    LinearSearch {
        /// Comma-separated values
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value,
              default_value = "4,1,8,6,3,0,4,9,-5,3,7,10,7,5")]
        values: Vec<Value>,
        #[arg(long, allow_hyphen_values = true, value_parser = parse_value, default_value = "7")]
        target: Value,
    },
    /// Sort an array by selecting the minimum of the unsorted tail
    SelectionSort {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value,
              default_value = "4,10,-3,5,200,0,4,8,9,4,12")]
        values: Vec<Value>,
    },
    /// Find two entries of a sorted array adding up to a target
    TwoSum {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value,
              default_value = "1,4,5,5,8,12,15,16,25,36,37,40,42,43,66,71")]
        values: Vec<Value>,
        #[arg(long, allow_hyphen_values = true, value_parser = parse_value, default_value = "58")]
        target: Value,
    },
    /// Largest sum of k successive entries, with a sliding window
    MaxSum {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value,
              default_value = "5,2,8,0,5,100,2,5,3,80,2,44,2")]
        values: Vec<Value>,
        /// Window size
        #[arg(short, long, default_value_t = 4)]
        k: usize,
    },
    /// Check bracket matching with a stack
    ValidParentheses {
        #[arg(long, default_value = "(({[({})]}()[([])])){()()}")]
        input: String,
    },
    /// Run every array operation once
    ArrayTour {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value,
              default_value = "20,35,1,8,100,2,5")]
        values: Vec<Value>,
        /// Seed for the shuffle step
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Array layout as JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Integers first, then floats, anything else is text.
fn parse_value(raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty value".to_string());
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Ok(Value::Float(f));
    }
    Ok(Value::text(raw))
}

fn main() -> Result<()> {
    // Info by default; RUST_LOG still wins.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut scene = Scene::new(Recorder::new());

    let result = match cli.command {
        Commands::LinearSearch { values, target } => {
            json!(linear_search(&mut scene, &values, target)?)
        }
        Commands::SelectionSort { values } => json!(selection_sort(&mut scene, &values)?),
        Commands::TwoSum { values, target } => json!(two_sum(&mut scene, &values, target)?),
        Commands::MaxSum { values, k } => {
            let (start, sum) = max_sum_k_successive(&mut scene, &values, k)?;
            json!({ "start": start, "sum": sum })
        }
        Commands::ValidParentheses { input } => json!(valid_parentheses(&mut scene, &input)?),
        Commands::ArrayTour {
            values,
            seed,
            config,
        } => {
            let config = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    ArrayConfig::from_json(&text)
                        .with_context(|| format!("invalid array config {}", path.display()))?
                }
                None => ArrayConfig::default(),
            };
            json!(array_tour(&mut scene, &values, seed, config)?)
        }
    };

    let recorder = scene.into_playback();
    let mut report = recorder.to_json()?;
    report["result"] = result;
    let text = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match cli.out {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "wrote {} plans ({:.2}s) to {}",
                recorder.plans().len(),
                recorder.total_duration(),
                path.display()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}
