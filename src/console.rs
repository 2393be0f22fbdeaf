//! Interactive text menu for sending commands by hand.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::camera::{Camera, CommandOutcome};
use crate::error::Result;
use crate::visca::{self, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, Toggle, ZoomDirection};

const MENU: &str = "\
Camera Serial Communication Tool
================================
Available commands:
  1. Send custom hex command
  2. Zoom (level: 0-16384)
  3. Toggle ICR (Infrared Cut-off Filter)
  4. Toggle IR Correction
  6. Zoom in one step
  7. Zoom out one step
  5. Exit";

/// Menu loop over `input`/`output` until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(camera: &mut Camera, mut input: R, mut output: W) -> Result<()> {
    writeln!(output, "\n{MENU}")?;

    loop {
        let Some(choice) = prompt(&mut input, &mut output, "\nEnter command choice (1-7): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(text) = prompt(&mut input, &mut output, "Enter hex command (e.g., 8101044700000000FF): ")?
                else {
                    break;
                };
                report(&mut output, camera.send_hex(&text))?;
            }
            "2" => {
                let Some(text) = prompt(&mut input, &mut output, "Enter zoom level (0-16384): ")? else {
                    break;
                };
                match text.parse::<i64>() {
                    Ok(level) if (i64::from(MIN_ZOOM_LEVEL)..=i64::from(MAX_ZOOM_LEVEL)).contains(&level) => {
                        report(&mut output, camera.zoom_to_level(level as u16))?;
                    }
                    Ok(_) => writeln!(output, "Level must be between {MIN_ZOOM_LEVEL} and {MAX_ZOOM_LEVEL}")?,
                    Err(_) => writeln!(output, "Invalid input. Please enter a number.")?,
                }
            }
            "3" => {
                let Some(enable) = confirm(&mut input, &mut output, "Enable ICR? (y/n): ")? else {
                    break;
                };
                report(&mut output, camera.set_toggle(Toggle::Icr, enable))?;
            }
            "4" => {
                let Some(enable) = confirm(&mut input, &mut output, "Enable IR Correction? (y/n): ")? else {
                    break;
                };
                report(&mut output, camera.set_toggle(Toggle::IrCorrection, enable))?;
            }
            "5" => {
                writeln!(output, "Exiting...")?;
                break;
            }
            "6" => step(&mut output, camera, ZoomDirection::In)?,
            "7" => step(&mut output, camera, ZoomDirection::Out)?,
            _ => writeln!(output, "Invalid choice. Please enter a number between 1 and 7.")?,
        }
    }

    camera.disconnect();
    Ok(())
}

/// Print a prompt and read one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        debug!("Console input closed");
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Yes/no question; only `y` (any case) counts as yes.
fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<bool>> {
    Ok(prompt(input, output, text)?.map(|answer| answer.eq_ignore_ascii_case("y")))
}

fn step<W: Write>(output: &mut W, camera: &mut Camera, direction: ZoomDirection) -> Result<()> {
    match camera.zoom_step(direction) {
        Ok((level, response)) => {
            report(output, Ok(response))?;
            writeln!(output, "Zoom: {:.1}x", visca::level_to_multiplier(level))?;
        }
        Err(e) => report(output, Err(e))?,
    }
    Ok(())
}

fn report<W: Write>(output: &mut W, result: Result<Option<String>>) -> Result<()> {
    writeln!(output, "{}", CommandOutcome::from_result(result))?;
    Ok(())
}
