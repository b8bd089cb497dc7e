use std::fs;
use std::io::{self, Read};
use std::path::Path;

use manilit::manifest::{Indent, ManifestError, Result};

const MAX_INDENT_SPACES: u8 = 8;

/// Parse `tab` or a space count into an indent unit.
pub(crate) fn parse_indent(value: &str) -> Result<Indent> {
	if value.eq_ignore_ascii_case("tab") {
		return Ok(Indent::Tab);
	}

	match value.parse::<u8>() {
		Ok(width) if (1..=MAX_INDENT_SPACES).contains(&width) => Ok(Indent::Spaces(width)),
		_ => Err(ManifestError::InvalidIndent { value: value.to_owned() }),
	}
}

/// Read a whole file, or stdin when no path (or `-`) is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
	match path {
		Some(path) if path != Path::new("-") => Ok(fs::read(path)?),
		_ => {
			let mut buf = Vec::new();
			io::stdin().lock().read_to_end(&mut buf)?;
			Ok(buf)
		}
	}
}

/// Print one pretty JSON document on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use manilit::manifest::{Indent, ManifestError};

	use super::parse_indent;

	#[test]
	fn indent_accepts_tab_and_space_counts() {
		assert_eq!(parse_indent("tab").expect("tab parses"), Indent::Tab);
		assert_eq!(parse_indent("TAB").expect("tab parses"), Indent::Tab);
		assert_eq!(parse_indent("4").expect("count parses"), Indent::Spaces(4));
	}

	#[test]
	fn indent_rejects_out_of_range_values() {
		for raw in ["0", "9", "spaces", "-1"] {
			let err = parse_indent(raw).expect_err("should fail");
			assert!(matches!(err, ManifestError::InvalidIndent { .. }), "{raw}");
		}
	}
}
