use super::{io_error, ToolsError};
use std::fs;
use std::path::Path;

pub fn loadtxt(path: &Path) -> Result<f64, ToolsError> {
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let parse_error = || ToolsError::ParseScalar {
        path: path.display().to_string(),
        value: raw.trim().to_string(),
    };
    let mut tokens = raw.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => token.parse::<f64>().map_err(|_| parse_error()),
        _ => Err(parse_error()),
    }
}

pub fn savetxt(path: &Path, value: f64) -> Result<(), ToolsError> {
    fs::write(path, format!("{}\n", format_exponent(value))).map_err(|e| io_error(path, e))
}

// %11.6e: six mantissa decimals, signed exponent of at least two digits
pub fn format_exponent(value: f64) -> String {
    if !value.is_finite() {
        let word = if value.is_nan() {
            "nan"
        } else if value > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        return format!("{word:>11}");
    }
    let raw = format!("{value:.6e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let formatted = format!("{mantissa}e{sign}{:02}", exponent.abs());
    format!("{formatted:>11}")
}

pub fn number_fid(fid: &str, i: usize) -> String {
    let name = Path::new(fid)
        .file_name()
        .map(|v| v.to_string_lossy().into_owned())
        .unwrap_or_else(|| fid.to_string());
    match Path::new(&name).extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy();
            let stem = &name[..name.len() - ext.len() - 1];
            format!("{stem}_{i:03}.{ext}")
        }
        None => format!("{name}_{i:03}"),
    }
}

pub fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn number_fid_inserts_zero_padded_index_before_extension() {
        assert_eq!(number_fid("output.txt", 0), "output_000.txt");
        assert_eq!(number_fid("output.txt", 12), "output_012.txt");
        assert_eq!(number_fid("output.txt", 1234), "output_1234.txt");
    }

    #[test]
    fn number_fid_strips_directories_and_handles_missing_extension() {
        assert_eq!(number_fid("logs/run/output.log", 3), "output_003.log");
        assert_eq!(number_fid("output", 0), "output_000");
        assert_eq!(number_fid("archive.tar.gz", 1), "archive.tar_001.gz");
        assert_eq!(number_fid(".bashrc", 2), ".bashrc_002");
    }

    #[test]
    fn format_exponent_matches_fixed_width_scientific_layout() {
        assert_eq!(format_exponent(1.0), "1.000000e+00");
        assert_eq!(format_exponent(-0.00123), "-1.230000e-03");
        assert_eq!(format_exponent(123456.0), "1.234560e+05");
        assert_eq!(format_exponent(f64::INFINITY), "        inf");
    }

    #[test]
    fn scalar_text_files_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("f_new");
        savetxt(&path, 0.5).expect("save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "5.000000e-01\n");
        assert_eq!(loadtxt(&path).expect("load"), 0.5);
    }

    #[test]
    fn loadtxt_reports_unparseable_content() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bad");
        fs::write(&path, "not-a-number\n").expect("write");
        match loadtxt(&path).expect_err("parse should fail") {
            ToolsError::ParseScalar { value, .. } => assert_eq!(value, "not-a-number"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn loadtxt_rejects_more_than_one_value() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("pair");
        fs::write(&path, "1.0 2.0\n").expect("write");
        match loadtxt(&path).expect_err("two values should fail") {
            ToolsError::ParseScalar { value, .. } => assert_eq!(value, "1.0 2.0"),
            other => panic!("unexpected error: {other:?}"),
        }

        fs::write(&path, "\n").expect("write");
        assert!(loadtxt(&path).is_err());
    }

    #[test]
    fn timestamp_is_clock_formatted() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
