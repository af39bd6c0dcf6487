//! Note table command.

use clap::Args;
use keywave_synth::{HIGHEST_KEY, LOWEST_KEY, Note, key_octave};

#[derive(Args)]
pub struct NotesArgs {
    /// Only list keys in this octave
    #[arg(short, long)]
    octave: Option<i32>,
}

pub fn run(args: NotesArgs) -> anyhow::Result<()> {
    println!("{:>4}  {:<4}  {:>10}", "Key", "Note", "Hz");
    for key in LOWEST_KEY..=HIGHEST_KEY {
        if args.octave.is_some_and(|octave| key_octave(key) != octave) {
            continue;
        }
        let note = Note::from_key(key)?;
        println!(
            "{:>4}  {:<4}  {:>10.2}",
            key,
            note.name().to_string(),
            note.frequency_hz()
        );
    }
    Ok(())
}
