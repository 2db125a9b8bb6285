//! Newline-delimited destinations for generated instructions.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::instruction::Instruction;

/// Destination for serialized instructions, one per line.
pub trait InstructionSink {
    /// Writes one instruction in its line format.
    fn write(&mut self, instruction: &Instruction) -> io::Result<()>;

    /// Flushes buffered lines; called once after the last write.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes every instruction to a single buffered file.
#[derive(Debug)]
pub struct LineSink {
    writer: BufWriter<File>,
}

impl LineSink {
    /// Creates (truncating) the output file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }
}

impl InstructionSink for LineSink {
    fn write(&mut self, instruction: &Instruction) -> io::Result<()> {
        writeln!(self.writer, "{instruction}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Prints instructions to stdout; used by paired runs without an output
/// file.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl InstructionSink for StdoutSink {
    fn write(&mut self, instruction: &Instruction) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{instruction}")
    }
}

/// Splits output across sequentially numbered files.
///
/// Files are named `<prefix><index>.txt` with the index starting at zero;
/// a new file is started every `rotate_every` instructions, and the
/// previous file is flushed and closed before the next one is opened.
/// Partially written files from an interrupted run are left in place.
#[derive(Debug)]
pub struct RotatingSink {
    prefix: PathBuf,
    rotate_every: u64,
    written: u64,
    current: Option<BufWriter<File>>,
}

impl RotatingSink {
    /// Creates a rotating sink; no file is opened until the first write.
    ///
    /// `rotate_every` must be non-zero, which configuration validation
    /// guarantees.
    pub fn create(prefix: impl Into<PathBuf>, rotate_every: u64) -> Self {
        Self {
            prefix: prefix.into(),
            rotate_every,
            written: 0,
            current: None,
        }
    }

    fn path_for(&self, index: u64) -> PathBuf {
        PathBuf::from(format!("{}{index}.txt", self.prefix.display()))
    }
}

impl InstructionSink for RotatingSink {
    fn write(&mut self, instruction: &Instruction) -> io::Result<()> {
        if self.written % self.rotate_every == 0 {
            // close the previous interval's file before opening the next
            if let Some(mut previous) = self.current.take() {
                previous.flush()?;
            }
            let file = File::create(self.path_for(self.written / self.rotate_every))?;
            self.current = Some(BufWriter::new(file));
        }
        let Some(writer) = self.current.as_mut() else {
            unreachable!("the sink rotates on the first write");
        };
        writeln!(writer, "{instruction}")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(writer) = self.current.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Collects serialized lines in memory; the sink used by tests.
#[derive(Debug, Default)]
pub struct VecSink {
    lines: Vec<String>,
}

impl VecSink {
    /// The lines written so far, in write order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl InstructionSink for VecSink {
    fn write(&mut self, instruction: &Instruction) -> io::Result<()> {
        self.lines.push(instruction.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn get(address: &str) -> Instruction {
        Instruction::Get {
            address: address.to_owned(),
        }
    }

    #[test]
    fn line_sink_writes_one_instruction_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = LineSink::create(&path).unwrap();
        sink.write(&get("10.0.0.1")).unwrap();
        sink.write(&get("10.0.0.2")).unwrap();
        sink.finish().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "GET 10.0.0.1\nGET 10.0.0.2\n"
        );
    }

    #[test]
    fn rotating_sink_switches_files_at_the_interval() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("ip");

        let mut sink = RotatingSink::create(&prefix, 2);
        for address in ["a", "b", "c", "d", "e"] {
            sink.write(&get(address)).unwrap();
        }
        sink.finish().unwrap();

        let file = |i: u64| fs::read_to_string(dir.path().join(format!("ip{i}.txt"))).unwrap();
        assert_eq!(file(0), "GET a\nGET b\n");
        assert_eq!(file(1), "GET c\nGET d\n");
        assert_eq!(file(2), "GET e\n");
    }

    #[test]
    fn rotating_sink_opens_no_file_before_the_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("ip");

        let mut sink = RotatingSink::create(&prefix, 2);
        sink.finish().unwrap();

        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
