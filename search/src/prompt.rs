use std::io::{self, BufRead, Write};

/// Prints `label` on stdout and reads one trimmed line from stdin.
/// End of input reads as an empty answer.
pub fn ask(label: &str) -> io::Result<String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_with(&mut stdin.lock(), &mut stdout.lock(), label)
}

pub fn ask_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_answer() {
        let mut input = Cursor::new("  rust developer \nMorocco\n");
        let mut output = Vec::new();

        let answer = ask_with(&mut input, &mut output, "Job title: ").unwrap();
        assert_eq!(answer, "rust developer");
        assert_eq!(String::from_utf8(output).unwrap(), "Job title: ");

        let mut output = Vec::new();
        assert_eq!(ask_with(&mut input, &mut output, "Location: ").unwrap(), "Morocco");
    }

    #[test]
    fn test_end_of_input_is_empty() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(ask_with(&mut input, &mut output, "> ").unwrap(), "");
    }
}
