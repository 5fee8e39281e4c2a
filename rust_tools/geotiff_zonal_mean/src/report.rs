use crate::batch::AggregationResult;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HEADER: &str = "Location,Value";

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => value.to_string(),
    }
}

/// Write `Location,Value` rows in the given order
pub fn write_report<W: Write>(writer: &mut W, results: &[AggregationResult], precision: Option<usize>) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for result in results {
        writeln!(
            writer,
            "{},{}",
            escape_field(&result.location),
            format_value(result.value, precision)
        )?;
    }
    Ok(())
}

pub fn write_report_file<P: AsRef<Path>>(path: P, results: &[AggregationResult], precision: Option<usize>) -> Result<()> {
    let path = path.as_ref();
    info!("Writing report: {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, results, precision)?;
    writer.flush()?;
    info!("Wrote {} rows", results.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(location: &str, value: f64) -> AggregationResult {
        AggregationResult {
            location: location.to_string(),
            value,
        }
    }

    fn render(results: &[AggregationResult], precision: Option<usize>) -> String {
        let mut out = Vec::new();
        write_report(&mut out, results, precision).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_formatting() {
        let text = render(&[row("AFG", 12.5), row("ALB", 0.0)], None);
        assert_eq!(text, "Location,Value\nAFG,12.5\nALB,0\n");
    }

    #[test]
    fn test_fixed_precision() {
        let text = render(&[row("AFG", 2.0 / 3.0)], Some(3));
        assert_eq!(text, "Location,Value\nAFG,0.667\n");
    }

    #[test]
    fn test_quoting() {
        let text = render(&[row("Korea, Republic of", 1.0), row("say \"hi\"", 2.0)], None);
        assert_eq!(
            text,
            "Location,Value\n\"Korea, Republic of\",1\n\"say \"\"hi\"\"\",2\n"
        );
    }

    #[test]
    fn test_empty_report_has_header() {
        assert_eq!(render(&[], Some(2)), "Location,Value\n");
    }
}
