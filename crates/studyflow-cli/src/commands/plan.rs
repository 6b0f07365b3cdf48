use std::path::PathBuf;

use clap::Args;
use studyflow_core::{
    find_free_slots, summarize_plan, Booking, PlanContext, SessionAllocator, Topic,
};

use crate::common;

#[derive(Args)]
pub struct PlanArgs {
    /// JSON file with existing bookings (array of {start_time, end_time})
    #[arg(long)]
    pub bookings: Option<PathBuf>,
    /// JSON file with syllabus topics
    #[arg(long)]
    pub topics: PathBuf,
    /// Subject the sessions belong to
    #[arg(long)]
    pub subject: String,
    /// Syllabus the topics come from
    #[arg(long)]
    pub syllabus: String,
    /// Horizon start (RFC 3339), defaults to now
    #[arg(long)]
    pub from: Option<String>,
    /// Print per-topic coverage instead of the session list
    #[arg(long)]
    pub summary: bool,
    #[command(flatten)]
    pub options: common::OptionOverrides,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = common::resolve_options(&args.options);
    let bookings: Vec<Booking> = match &args.bookings {
        Some(path) => common::read_json(path)?,
        None => Vec::new(),
    };
    let topics: Vec<Topic> = common::read_json(&args.topics)?;
    let horizon_start = common::parse_horizon_start(args.from.as_deref())?;
    let context = PlanContext::new(args.subject, args.syllabus);

    let slots = find_free_slots(&bookings, &options, horizon_start)?;
    let allocator = SessionAllocator::new(options)?;
    let mut sessions = allocator.allocate(slots, &topics, &context);

    // The allocator groups sessions by topic; order by start time for
    // display.
    sessions.sort_by_key(|s| s.start_time);

    if args.summary {
        let coverage = summarize_plan(&topics, &sessions);
        println!("{}", serde_json::to_string_pretty(&coverage)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    }
    Ok(())
}
