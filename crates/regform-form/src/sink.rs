use std::io::Write;

use regform_schema::{Field, RegistrationRecord};

use crate::error::SinkError;

/// Destination for accepted registration records.
pub trait RecordSink {
    fn emit(&mut self, record: &RegistrationRecord) -> Result<(), SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, record: &RegistrationRecord) -> Result<(), SinkError> {
        (**self).emit(record)
    }
}

/// Collects records in memory.
impl RecordSink for Vec<RegistrationRecord> {
    fn emit(&mut self, record: &RegistrationRecord) -> Result<(), SinkError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Emits one structured `info` event per record. Passwords are masked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn emit(&mut self, record: &RegistrationRecord) -> Result<(), SinkError> {
        tracing::info!(
            target: "regform::submission",
            first_name = record.first_name(),
            last_name = record.last_name(),
            email = record.email(),
            age = record.age(),
            zip_code = record.zip_code(),
            password = %record.display_value(Field::Password),
            "registration accepted"
        );
        Ok(())
    }
}

/// Writes each record as one JSON line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &RegistrationRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use regform_schema::RegistrationInput;

    use super::*;

    fn record() -> RegistrationRecord {
        let input = RegistrationInput::new()
            .with(Field::FirstName, "Grace")
            .with(Field::LastName, "Hopper")
            .with(Field::Email, "grace@example.com")
            .with(Field::Age, 85)
            .with(Field::ZipCode, "20500")
            .with(Field::Password, "cobol1959")
            .with(Field::ConfirmPassword, "cobol1959");
        regform_schema::validate(&input).unwrap()
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&record()).unwrap();
        sink.emit(&record()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["firstName"], "Grace");
        assert_eq!(value["age"], 85);
    }

    #[test]
    fn json_lines_sink_surfaces_writer_errors() {
        let mut sink = JsonLinesSink::new(BrokenWriter);
        assert!(matches!(sink.emit(&record()), Err(SinkError::Io(_))));
    }

    #[test]
    fn vec_and_tracing_sinks_accept_records() {
        let mut records = Vec::new();
        records.emit(&record()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zip_code(), "20500");

        assert!(TracingSink.emit(&record()).is_ok());
    }
}
