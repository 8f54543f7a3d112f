//! The ordered input/compute sequence: nine fixed steps, visited in order,
//! cycled until the operator answers "Y" at the last one.

use crate::{
    calculator::{Calculator, MAX_THICKNESS_PER_SIDE},
    console::Console,
    prelude::*,
    text::{Output, TextSource},
};

/// One of the nine fixed interaction steps, in cycle order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    ProgramDescription,
    StartWeight,
    Width,
    Length,
    SidesPlated,
    Pieces,
    PanelSize,
    FinalWeight,
    Quit,
}

impl Step {
    /// The closed step order. Never reordered, never skipped.
    pub const SEQUENCE: [Self; 9] = [
        Self::ProgramDescription,
        Self::StartWeight,
        Self::Width,
        Self::Length,
        Self::SidesPlated,
        Self::Pieces,
        Self::PanelSize,
        Self::FinalWeight,
        Self::Quit,
    ];

    /// 1-based position within the cycle.
    #[must_use]
    pub fn index(self) -> usize {
        1 + Self::SEQUENCE.iter().position(|step| *step == self).unwrap_or_default()
    }

    pub const fn prompt_key(self) -> &'static str {
        match self {
            Self::ProgramDescription => "entry.programDescription.prompt",
            Self::StartWeight => "entry.weight1.prompt",
            Self::Width => "entry.width.prompt",
            Self::Length => "entry.length.prompt",
            Self::SidesPlated => "entry.nbrSides.prompt",
            Self::Pieces => "entry.nbrPieces.prompt",
            Self::PanelSize => "entry.panelSize.prompt",
            Self::FinalWeight => "entry.weight2.prompt",
            Self::Quit => "entry.quit.prompt",
        }
    }
}

/// What a processed step hands back to the cycle loop.
///
/// Only [`Step::Quit`] ever carries an answer; every other step yields the
/// continue sentinel.
enum Signal {
    Continue,
    Answer(String),
}

/// Which message the final-weight step reports for a computed thickness.
fn thickness_output(thickness_per_side: f64) -> Output {
    if thickness_per_side > MAX_THICKNESS_PER_SIDE {
        Output::ThicknessError
    } else {
        Output::Thickness
    }
}

/// Drives the step cycle against the text source and the console, feeding
/// operator input into the calculator.
pub struct Sequencer<'a, C> {
    text: &'a TextSource,
    console: &'a mut C,
    calculator: Calculator,
}

impl<'a, C: Console> Sequencer<'a, C> {
    pub fn new(text: &'a TextSource, console: &'a mut C) -> Self {
        Self { text, console, calculator: Calculator::default() }
    }

    /// Loop full cycles until the quit answer equals `"Y"`.
    ///
    /// Any other answer restarts the whole nine-step cycle, repeating every
    /// prompt; there is no re-entry of the final weight alone.
    pub fn run(mut self) -> Result {
        loop {
            let mut answer = String::new();
            for step in Step::SEQUENCE {
                if let Signal::Answer(quit_answer) = self.process_step(step)? {
                    answer = quit_answer;
                }
            }
            if answer == "Y" {
                info!("done");
                return Ok(());
            }
            debug!(answer = %answer, "restarting the cycle");
        }
    }

    /// Print the step's prompt, then run its fixed behavior: consume input,
    /// derive, report. Every step but the quit one finishes with the shared
    /// two-newline epilogue.
    fn process_step(&mut self, step: Step) -> Result<Signal> {
        let prompt = self.text.get(step.prompt_key())?;
        self.console.print(&format!("{prompt}\t"))?;

        match step {
            Step::ProgramDescription => {}
            Step::StartWeight => {
                self.calculator.start_weight = self.read_number(step)?;
            }
            Step::Width => {
                self.calculator.width = self.read_number(step)?;
            }
            Step::Length => {
                self.calculator.length = self.read_number(step)?;
            }
            Step::SidesPlated => {
                self.calculator.n_sides_plated = self.read_number(step)?;
            }
            Step::Pieces => {
                self.calculator.n_pieces = self.read_number(step)?;
                self.calculator.calculate_surface_areas();
                let line =
                    self.text.render(Output::SurfaceArea, &[self.calculator.total_surface_area])?;
                self.console.print(&line)?;
            }
            Step::PanelSize => {
                self.calculator.selection = self.read_number(step)?;
                self.calculator.calculate_current_values();
                let line =
                    self.text.render(Output::AmpsRequired, &[self.calculator.total_amps_used])?;
                self.console.print(&line)?;
                self.console.print_line("")?;
                let line =
                    self.text.render(Output::AmpHours, &[self.calculator.total_amp_hours_used])?;
                self.console.print(&line)?;
            }
            Step::FinalWeight => {
                self.calculator.final_weight = self.read_number(step)?;
                self.calculator.calculate_nickel_thickness()?;
                let line = match thickness_output(self.calculator.thickness_per_side) {
                    Output::Thickness => self
                        .text
                        .render(Output::Thickness, &[self.calculator.thickness_per_side])?,
                    output => self.text.render(output, &[])?,
                };
                self.console.print(&line)?;
                self.console.print_line("")?;
                self.console.print_line("")?;

                // The summary goes out regardless of the threshold check.
                let summary = self.text.render(
                    Output::Summary,
                    &[
                        self.calculator.total_amps_used,
                        self.calculator.total_amp_hours_used,
                        self.calculator.n_sides_plated,
                        self.calculator.n_pieces,
                        self.calculator.width,
                        self.calculator.length,
                        self.calculator.total_surface_area,
                        self.calculator.thickness_per_side,
                    ],
                )?;
                self.console.print_line(&summary)?;
            }
            Step::Quit => {
                let answer = self.console.read_line()?;
                return Ok(Signal::Answer(answer.trim().to_uppercase()));
            }
        }

        self.console.print_line("")?;
        self.console.print_line("")?;
        Ok(Signal::Continue)
    }

    /// Read one line and parse it as a real number. A malformed entry is
    /// fatal for the run: no retry, no default value.
    fn read_number(&mut self, step: Step) -> Result<f64> {
        let answer = self.console.read_line()?;
        answer
            .trim()
            .parse()
            .with_context(|| format!("step {}: `{answer}` is not a valid number", step.index()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Console double: canned input lines, captured transcript.
    struct ScriptedConsole {
        inputs: VecDeque<&'static str>,
        transcript: String,
    }

    impl ScriptedConsole {
        fn new(inputs: &[&'static str]) -> Self {
            Self { inputs: inputs.iter().copied().collect(), transcript: String::new() }
        }
    }

    impl Console for ScriptedConsole {
        fn print(&mut self, text: &str) -> Result {
            self.transcript.push_str(text);
            Ok(())
        }

        fn print_line(&mut self, line: &str) -> Result {
            self.transcript.push_str(line);
            self.transcript.push('\n');
            Ok(())
        }

        fn read_line(&mut self) -> Result<String> {
            self.inputs.pop_front().map(str::to_owned).context("the script ran out of input")
        }
    }

    fn test_text() -> TextSource {
        TextSource::from_toml(
            r#"
            "entry.programDescription.prompt" = "Nickel plating thickness calculator."
            "entry.weight1.prompt" = "Starting weight (grams):"
            "entry.width.prompt" = "Width (inches):"
            "entry.length.prompt" = "Length (inches):"
            "entry.nbrSides.prompt" = "Sides plated:"
            "entry.nbrPieces.prompt" = "Pieces plated:"
            "entry.panelSize.prompt" = "1 for a coupon, 2 for a panel:"
            "entry.weight2.prompt" = "Final weight (grams):"
            "entry.quit.prompt" = "Quit? (Y/N):"
            "output.surfaceArea" = "Total surface area: {area} sq in"
            "output.ampsRequired" = "Current required: {amps} A"
            "output.ampHours" = "Charge required: {ampHours} Ah"
            "output.thickness" = "Thickness per side: {thickness} in"
            "output.thickness.error" = "Thickness is over the plating limit."
            "output.summary" = "{amps}|{ampHours}|{sides}|{pieces}|{width}|{length}|{area}|{thickness}"
            "#,
        )
        .unwrap()
    }

    /// Inputs for one cycle: weights and dimensions chosen so the thickness
    /// stays under the threshold, plus the quit answer.
    fn cycle_inputs(quit_answer: &'static str) -> [&'static str; 8] {
        ["10.0", "3.0", "4.0", "2.0", "10.0", "1.0", "10.05", quit_answer]
    }

    #[test]
    fn test_single_cycle_transcript() -> Result {
        let text = test_text();
        let mut console = ScriptedConsole::new(&cycle_inputs("Y"));
        Sequencer::new(&text, &mut console).run()?;

        assert!(console.transcript.contains("Total surface area: 240.0 sq in"));
        assert!(console.transcript.contains("Current required:  9.25 A"));
        assert!(console.transcript.contains("Charge required:  8.81 Ah"));
        assert!(console.transcript.contains("Thickness per side: 0.00001 in"));
        assert!(console.transcript.contains("  9.3| 8.81|  2|   10| 3.00| 4.00|240.00|0.00001"));
        Ok(())
    }

    #[test]
    fn test_quit_answer_is_normalized() -> Result {
        let text = test_text();
        let mut console =
            ScriptedConsole::new(&["10.0", "3.0", "4.0", "2.0", "10.0", "1.0", "10.05", "  y "]);
        Sequencer::new(&text, &mut console).run()?;
        Ok(())
    }

    #[test]
    fn test_non_quit_answer_restarts_the_whole_cycle() -> Result {
        let text = test_text();
        let mut inputs = Vec::new();
        inputs.extend_from_slice(&cycle_inputs("n"));
        inputs.extend_from_slice(&cycle_inputs("Y"));
        let mut console = ScriptedConsole::new(&inputs);
        Sequencer::new(&text, &mut console).run()?;

        // Both cycles re-prompt everything and re-run every derivation.
        assert_eq!(console.transcript.matches("Width (inches):").count(), 2);
        assert_eq!(console.transcript.matches("Total surface area:").count(), 2);
        assert_eq!(console.transcript.matches("Thickness per side:").count(), 2);
        Ok(())
    }

    #[test]
    fn test_over_threshold_prints_error_and_summary() -> Result {
        let text = test_text();
        // 5 grams over 24 sq in per piece: far past the limit.
        let mut console =
            ScriptedConsole::new(&["10.0", "3.0", "4.0", "2.0", "10.0", "1.0", "15.0", "Y"]);
        Sequencer::new(&text, &mut console).run()?;

        assert!(console.transcript.contains("Thickness is over the plating limit."));
        assert!(!console.transcript.contains("Thickness per side:"));
        // The summary still goes out with the computed value.
        assert!(console.transcript.contains("|0.00139"));
        Ok(())
    }

    #[test]
    fn test_thickness_threshold_boundary() {
        assert_eq!(thickness_output(0.0002), Output::Thickness);
        assert_eq!(thickness_output(0.000_200_01), Output::ThicknessError);
    }

    #[test]
    fn test_malformed_number_is_fatal() {
        let text = test_text();
        let mut console = ScriptedConsole::new(&["not a number"]);
        let error = Sequencer::new(&text, &mut console).run().unwrap_err();
        assert!(error.to_string().contains("not a valid number"));
    }

    #[test]
    fn test_zero_pieces_is_an_explicit_error() {
        let text = test_text();
        let mut console =
            ScriptedConsole::new(&["10.0", "3.0", "4.0", "2.0", "0.0", "1.0", "10.05", "Y"]);
        let error = Sequencer::new(&text, &mut console).run().unwrap_err();
        assert!(error.to_string().contains("zero pieces"));
    }

    #[test]
    fn test_step_indices_are_one_based_and_ordered() {
        assert_eq!(Step::ProgramDescription.index(), 1);
        assert_eq!(Step::Pieces.index(), 6);
        assert_eq!(Step::Quit.index(), 9);
    }
}
