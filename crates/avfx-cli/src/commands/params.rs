//! Parameter table listing.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use avfx_engine::ParamId;
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if args.json {
        let table: Vec<_> = ParamId::ALL
            .into_iter()
            .map(|id| {
                let desc = id.descriptor();
                serde_json::json!({
                    "id": id.as_str(),
                    "name": desc.name,
                    "min": desc.min,
                    "max": desc.max,
                    "default": desc.default,
                    "step": desc.step,
                    "unit": desc.unit.suffix().trim(),
                    "smoothing_ms": id.smoothing_ms(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:16}  {:18}  {:22}  {:12}  {}",
        "Id", "Name", "Range", "Default", "Smoothing"
    );
    println!(
        "  {:16}  {:18}  {:22}  {:12}  {}",
        "--", "----", "-----", "-------", "---------"
    );
    for id in ParamId::ALL {
        let desc = id.descriptor();
        let range = format!(
            "{} .. {}",
            desc.format_value(desc.min),
            desc.format_value(desc.max)
        );
        let smoothing = match id.smoothing_ms() {
            ms if ms > 0.0 => format!("{ms} ms"),
            _ => "-".to_string(),
        };
        println!(
            "  {:16}  {:18}  {:22}  {:12}  {}",
            id.as_str(),
            desc.name,
            range,
            desc.format_value(desc.default),
            smoothing
        );
    }

    Ok(())
}
