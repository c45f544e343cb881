use std::fmt::Display;
use std::io::{self, Stdout, Write};

use colored::Colorize;
use supports_color::Stream;

use crate::filesystem::TreeResult;

/// Line oriented printer for command results.
pub struct Output<W: Write> {
    writer: W,
    colored: bool,
}

impl Output<Stdout> {
    pub fn stdout() -> Self {
        Output {
            writer: io::stdout(),
            colored: supports_color::on(Stream::Stdout).is_some(),
        }
    }
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, colored: bool) -> Self {
        Output { writer, colored }
    }

    pub fn line(&mut self, value: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{value}")
    }

    /// Directories first, then files, one path per line.
    pub fn tree(&mut self, tree: &TreeResult) -> io::Result<()> {
        for directory in &tree.directories {
            let text = directory.display().to_string();
            if self.colored {
                writeln!(self.writer, "{}", text.blue().bold())?;
            } else {
                writeln!(self.writer, "{text}")?;
            }
        }
        for file in &tree.files {
            writeln!(self.writer, "{}", file.display())?;
        }
        Ok(())
    }

    pub fn flag(&mut self, value: bool) -> io::Result<()> {
        match (self.colored, value) {
            (true, true) => writeln!(self.writer, "{}", "true".green()),
            (true, false) => writeln!(self.writer, "{}", "false".red()),
            (false, _) => writeln!(self.writer, "{value}"),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_tree_output_without_color() {
        let tree = TreeResult {
            directories: vec![PathBuf::from("root"), PathBuf::from("root/sub")],
            files: vec![PathBuf::from("root/a.txt"), PathBuf::from("root/sub/b.txt")],
        };
        let mut output = Output::new(Vec::new(), false);
        output.tree(&tree).unwrap();

        let printed = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(printed, "root\nroot/sub\nroot/a.txt\nroot/sub/b.txt\n");
    }

    #[test]
    fn test_flag_output_without_color() {
        let mut output = Output::new(Vec::new(), false);
        output.flag(true).unwrap();
        output.flag(false).unwrap();
        output.line("done").unwrap();

        let printed = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(printed, "true\nfalse\ndone\n");
    }
}
