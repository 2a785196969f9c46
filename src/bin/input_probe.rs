//=========================================================================
// Input Probe
//
// Diagnostic binary for the raw terminal decoder. Prints every decoded
// token with a label, which makes it easy to check what a particular
// terminal emits for arrows, function keys, and multi-byte characters.
//
// Run with: cargo run --bin input_probe
//
//=========================================================================

use proscenium::prelude::*;

fn label_for(token: &str) -> &'static str {
    match token {
        keys::UP | keys::UP_SS3 => "arrow up",
        keys::DOWN | keys::DOWN_SS3 => "arrow down",
        keys::LEFT | keys::LEFT_SS3 => "arrow left",
        keys::RIGHT | keys::RIGHT_SS3 => "arrow right",
        keys::ESC => "escape",
        _ if token.starts_with('\x1b') => "sequence",
        _ => "line",
    }
}

fn main() -> Result<()> {
    let mut decoder = match RawDecoder::for_terminal() {
        Ok(decoder) => decoder,
        Err(e) => {
            eprintln!("raw input unavailable: {}", e);
            return Ok(());
        }
    };

    println!("Raw input probe. Keys arrive one token per read; arrows come");
    println!("through as escape sequences. Type \"quit\", press Ctrl-C, or");
    println!("press Ctrl-D to leave.");

    loop {
        match decoder.read_token("probe> ") {
            Ok(token) => {
                if token == "quit" {
                    break;
                }
                println!("{:>8}: {:?}", label_for(&token), token);
            }
            Err(Error::Interrupted) => {
                println!("\ninterrupted");
                break;
            }
            Err(Error::EndOfInput) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
