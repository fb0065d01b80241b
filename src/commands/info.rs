use std::path::Path;

use anyhow::Result;
use calcut_core::ics::parse;
use owo_colors::OwoColorize;

use super::read_input;
use crate::render;

pub fn run(input: &Path, list: bool) -> Result<()> {
    let content = read_input(input)?;
    let calendar = parse(&content);

    println!("{}", render::info(input, &calendar.info(&content)));

    if let Some(block) = &calendar.unterminated_block {
        println!(
            "   {}",
            format!("Unterminated {} block at end of input (ignored)", block).yellow()
        );
    }

    if list && !calendar.events.is_empty() {
        println!();
        for (i, event) in calendar.events.iter().enumerate() {
            println!("{}", render::event_row(i + 1, event));
        }
    }

    Ok(())
}
