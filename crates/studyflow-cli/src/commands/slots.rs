use std::path::PathBuf;

use clap::Args;
use studyflow_core::{find_free_slots, Booking};

use crate::common;

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON file with existing bookings (array of {start_time, end_time})
    #[arg(long)]
    pub bookings: Option<PathBuf>,
    /// Horizon start (RFC 3339), defaults to now
    #[arg(long)]
    pub from: Option<String>,
    #[command(flatten)]
    pub options: common::OptionOverrides,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = common::resolve_options(&args.options);
    let bookings: Vec<Booking> = match &args.bookings {
        Some(path) => common::read_json(path)?,
        None => Vec::new(),
    };
    let horizon_start = common::parse_horizon_start(args.from.as_deref())?;

    let slots = find_free_slots(&bookings, &options, horizon_start)?;
    println!("{}", serde_json::to_string_pretty(&slots)?);
    Ok(())
}
