use consensus::io::load_extracts;
use consensus::text::{TextExtract, TextReducer, TextReducerParams};

#[cfg(feature = "tracing")]
use consensus::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(log::LevelFilter::Info, false)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: reduce_text <extracts.json>");
        return Ok(());
    };

    let extracts: Vec<TextExtract> = load_extracts(path.as_ref())?;
    let reducer = TextReducer::new(TextReducerParams::default())?;
    let reduction = reducer.reduce(&extracts);

    for (frame, lines) in &reduction.frames {
        println!("{frame}: {} lines", lines.len());
        for line in lines {
            println!(
                "  [gutter {} slope {:6.1}] {}",
                line.gutter_label,
                line.line_slope,
                line.consensus_text()
            );
        }
    }
    Ok(())
}
