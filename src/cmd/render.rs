use std::path::PathBuf;

use manilit::manifest::{DecodeOptions, LiteralOptions, Result, Schema, decode_manifest, read_document, render_value};
use tracing::info;

use crate::cmd::util::{emit_json, parse_indent, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Manifest file; stdin when omitted or `-`.
	pub file: Option<PathBuf>,
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long, default_value = "tab")]
	pub indent: String,
	#[arg(long = "strict-fields")]
	pub strict_fields: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode one manifest and print its pruned literal.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		schema: schema_path,
		type_name,
		indent,
		strict_fields,
		max_depth,
		json,
	} = args;

	let literal = LiteralOptions { indent: parse_indent(&indent)? };
	let schema = Schema::load(&schema_path)?;

	let (compression, doc) = read_document(read_input(file.as_deref())?)?;

	let mut decode = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		decode.max_depth = max_depth;
	}
	decode.strict_fields = strict_fields;

	let (root, value) = decode_manifest(&schema, &doc, type_name.as_deref(), &decode)?;
	info!(root = %root, compression = compression.as_str(), "decoded manifest");

	let rendered = render_value(&value, 0, &literal);

	if json {
		return emit_json(&RenderJson {
			type_name: root.to_string(),
			empty: rendered.empty,
			literal: rendered.text,
		});
	}

	println!("{}", rendered.text);
	Ok(())
}

#[derive(serde::Serialize)]
struct RenderJson {
	#[serde(rename = "type")]
	type_name: String,
	empty: bool,
	literal: String,
}
