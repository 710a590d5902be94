//! Frequency to note mapping.

use clap::Args;
use earshot_analysis::nearest_note;

/// Map frequencies to equal-tempered notes.
#[derive(Args)]
pub struct NoteArgs {
    /// Frequencies in Hz
    #[arg(value_name = "FREQ", required = true, allow_negative_numbers = true)]
    frequencies: Vec<f32>,
}

/// Run the note command.
pub fn run(args: NoteArgs) -> anyhow::Result<()> {
    println!(
        "{:>12}  {:<6} {:>16}  {:>8}",
        "Freq [Hz]", "Note", "Theoretical [Hz]", "Cents"
    );
    for freq in args.frequencies {
        let note = nearest_note(freq);
        println!(
            "{:>12.3}  {:<6} {:>16.3}  {:>+8.2}",
            freq,
            note.name(),
            note.theoretical_hz,
            note.cents
        );
    }
    Ok(())
}
